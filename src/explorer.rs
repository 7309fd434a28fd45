//! Explorer: the three fetch units bound to the shared stores.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::ProxyApi;
use crate::fetch::{FetchUnit, GeneSearch, PathwayGraphSource, PathwayList};
use crate::selection::{ExplorerContext, SelectedGene, SelectedPathway};
use crate::view::{genes_table, pathway_graph, pathway_list};

#[derive(Clone)]
struct Units {
    gene_search: FetchUnit<GeneSearch>,
    pathway_list: FetchUnit<PathwayList>,
    pathway_graph: FetchUnit<PathwayGraphSource>,
}

impl Units {
    /// Push the keys derived from the current store values into each unit.
    fn sync(&self, ctx: &ExplorerContext) {
        let query = ctx.search_query.get();
        let gene = ctx.selected_gene.get();
        let pathway = ctx.selected_pathway.get();

        self.gene_search.on_key(GeneSearch::key(&query).as_deref());
        self.pathway_list
            .on_key(PathwayList::key(&query, gene.as_ref()).as_deref());
        self.pathway_graph
            .on_key(PathwayGraphSource::key(pathway.as_ref()).as_deref());
    }
}

/// One rendered section of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: &'static str,
    pub text: String,
    pub is_error: bool,
}

/// Genes table pagination, zero-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePaging {
    pub page: usize,
    pub page_size: usize,
}

impl Default for TablePaging {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: genes_table::DEFAULT_PAGE_SIZE,
        }
    }
}

pub struct Explorer {
    ctx: ExplorerContext,
    units: Units,
    binding: JoinHandle<()>,
}

impl Explorer {
    /// Must be called from within a tokio runtime.
    pub fn new(ctx: ExplorerContext, api: Arc<dyn ProxyApi>) -> Self {
        let units = Units {
            gene_search: FetchUnit::new(Arc::clone(&api)),
            pathway_list: FetchUnit::new(Arc::clone(&api)),
            pathway_graph: FetchUnit::new(api),
        };
        // Subscribed before the first sync so no write after `new` is missed.
        let receivers = Receivers {
            query: ctx.search_query.subscribe(),
            gene: ctx.selected_gene.subscribe(),
            pathway: ctx.selected_pathway.subscribe(),
        };
        units.sync(&ctx);
        let binding = tokio::spawn(bind(ctx.clone(), units.clone(), receivers));

        Self {
            ctx,
            units,
            binding,
        }
    }

    pub fn context(&self) -> &ExplorerContext {
        &self.ctx
    }

    pub fn gene_search(&self) -> &FetchUnit<GeneSearch> {
        &self.units.gene_search
    }

    pub fn pathway_list(&self) -> &FetchUnit<PathwayList> {
        &self.units.pathway_list
    }

    pub fn pathway_graph(&self) -> &FetchUnit<PathwayGraphSource> {
        &self.units.pathway_graph
    }

    /// Wait for every unit to finish its debounce and request.
    pub async fn settled(&self) {
        // The binding task may not have run since the last store write.
        self.units.sync(&self.ctx);
        futures::join!(
            self.units.gene_search.settled(),
            self.units.pathway_list.settled(),
            self.units.pathway_graph.settled(),
        );
    }

    /// Select a row of the genes table (1-based, across all pages).
    pub fn pick_gene_row(&self, row: usize) -> Option<SelectedGene> {
        let state = self.units.gene_search.state();
        let data = state.data?;
        let gene = genes_table::rows(&data)
            .get(row.checked_sub(1)?)?
            .selection();
        tracing::info!("Selected gene {}", gene.user_input);
        self.ctx.select_gene(gene.clone());
        Some(gene)
    }

    /// Select a pathway by its 1-based position in the list, or by id.
    ///
    /// An id that is not in the current list is still selected, without a name.
    pub fn pick_pathway(&self, choice: &str) -> Option<SelectedPathway> {
        let choice = choice.trim();
        if choice.is_empty() {
            return None;
        }

        let listed = self.units.pathway_list.state().data.and_then(|data| {
            let entry = match choice.parse::<usize>() {
                Ok(n) => data.pathways.get(n.checked_sub(1)?),
                Err(_) => data.pathways.iter().find(|p| p.pathway_id == choice),
            };
            entry.map(|p| SelectedPathway {
                id: p.pathway_id.clone(),
                name: Some(p.pathway_name.clone()),
            })
        });

        let selected = match listed {
            Some(selected) => selected,
            None if choice.parse::<usize>().is_ok() => return None,
            None => SelectedPathway {
                id: choice.to_string(),
                name: None,
            },
        };
        tracing::info!("Selected pathway {}", selected.id);
        self.ctx.select_pathway(selected.id.clone(), selected.name.clone());
        Some(selected)
    }

    /// Drop the selected gene so the pathway list follows the search term
    /// again. Returns `false` when there was nothing to go back from.
    pub fn back_to_search(&self) -> bool {
        let gene = self.ctx.selected_gene.get();
        let query = self.ctx.search_query.get();
        let ctx = pathway_list::ListContext {
            search_query: &query,
            selected_gene: gene.as_ref(),
            selected_pathway: None,
        };
        if pathway_list::back_target(&ctx).is_none() {
            return false;
        }
        self.ctx.clear_gene();
        true
    }

    pub fn screen(&self, paging: TablePaging) -> [Panel; 3] {
        let query = self.ctx.search_query.get();
        let gene = self.ctx.selected_gene.get();
        let pathway = self.ctx.selected_pathway.get();

        let genes = self.units.gene_search.view();
        let pathways = self.units.pathway_list.view();
        let graph = self.units.pathway_graph.view();

        let list_ctx = pathway_list::ListContext {
            search_query: &query,
            selected_gene: gene.as_ref(),
            selected_pathway: pathway.as_ref(),
        };

        [
            Panel {
                title: "Genes",
                text: genes_table::render(&genes, paging.page, paging.page_size),
                is_error: genes.is_error(),
            },
            Panel {
                title: "KEGG pathways",
                text: pathway_list::render(&pathways, &list_ctx),
                is_error: pathways.is_error(),
            },
            Panel {
                title: "Pathway graph",
                text: pathway_graph::render(&graph, pathway.as_ref()),
                is_error: graph.is_error(),
            },
        ]
    }

    /// Number of rows the genes table currently holds.
    pub fn gene_row_count(&self) -> usize {
        self.units
            .gene_search
            .state()
            .data
            .map_or(0, |data| data.gene_count())
    }
}

impl Drop for Explorer {
    fn drop(&mut self) {
        self.binding.abort();
    }
}

struct Receivers {
    query: watch::Receiver<String>,
    gene: watch::Receiver<Option<SelectedGene>>,
    pathway: watch::Receiver<Option<SelectedPathway>>,
}

async fn bind(ctx: ExplorerContext, units: Units, receivers: Receivers) {
    let Receivers {
        mut query,
        mut gene,
        mut pathway,
    } = receivers;

    loop {
        let changed = tokio::select! {
            r = query.changed() => r,
            r = gene.changed() => r,
            r = pathway.changed() => r,
        };
        if changed.is_err() {
            break;
        }
        units.sync(&ctx);
    }
}
