//! Fetch unit and explorer behaviour against a scripted proxy.
//!
//! All tests run with tokio's clock paused, so debounce timers and slow
//! responses advance instantly and deterministically.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::{sleep, Instant};

use kegg_explorer::fetch::{GeneSearch, PathwayGraphSource, PathwayList};
use kegg_explorer::{
    Endpoint, Explorer, ExplorerContext, FetchError, FetchPhase, FetchUnit, ProxyApi, RawResponse,
    View,
};

// ── Scripted proxy ─────────────────────────────────────────────

struct Reply {
    delay: Duration,
    status: u16,
    body: String,
}

fn ok(body: serde_json::Value) -> Reply {
    Reply {
        delay: Duration::ZERO,
        status: 200,
        body: body.to_string(),
    }
}

fn status(code: u16, body: serde_json::Value) -> Reply {
    Reply {
        delay: Duration::ZERO,
        status: code,
        body: body.to_string(),
    }
}

/// Behaves like the proxy in front of the KEGG/UniProt services.
fn kegg_proxy(endpoint: &Endpoint) -> Reply {
    match endpoint {
        Endpoint::Search { query } if query == "nothing" => ok(json!({"result": [], "total": 0})),
        Endpoint::Search { query } if query == "missing-array" => ok(json!({"total": 0})),
        Endpoint::Search { query } => {
            let mut reply = ok(json!({
                "result": [{
                    "primaryAccession": "Q81J04",
                    "proteinDescription": format!("match for {query}"),
                    "genes": [{"geneName": "rpoB", "orderedLocusNames": "BC_0002"}],
                    "sequence": {"value": "MKLV", "length": 4}
                }],
                "total": 1
            }));
            if query == "slow" {
                reply.delay = Duration::from_secs(1);
            }
            reply
        }
        Endpoint::PathwaysForGene { gen_id } if gen_id == "BC_0002" => ok(json!({
            "geneId": "bce:BC_0002",
            "geneName": "rpoB",
            "pathways": [{"pathway_id": "map00010", "pathway_name": "Glycolysis"}]
        })),
        Endpoint::PathwaysForGene { gen_id } if gen_id == "BC_0100" => ok(json!({
            "geneId": "bce:BC_0100",
            "pathways": []
        })),
        Endpoint::PathwaysForGene { gen_id } if gen_id == "truncated" => {
            ok(json!({"geneId": "bce:BC_0002"}))
        }
        Endpoint::PathwaysForGene { gen_id } => status(
            404,
            json!({
                "error": "Failed to fetch data from KEGG service",
                "detail": format!("Gene {gen_id} not found")
            }),
        ),
        Endpoint::PathwayGraph { pathway_id } if pathway_id == "bce00010" => ok(json!({
            "_id": "bce00010",
            "pathwayName": "Glycolysis / Gluconeogenesis",
            "nodes": [{"id": "n1", "label": "pgi", "type": "gene"}],
            "edges": []
        })),
        Endpoint::PathwayGraph { .. } => status(
            404,
            json!({"error": "Failed to fetch data from KEGG service", "detail": "not found"}),
        ),
    }
}

struct FakeProxy {
    calls: Mutex<Vec<(Endpoint, Instant)>>,
}

impl FakeProxy {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Endpoint> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(e, _)| e.clone())
            .collect()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl ProxyApi for FakeProxy {
    async fn get_raw(&self, endpoint: &Endpoint) -> Result<RawResponse, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.clone(), Instant::now()));
        let reply = kegg_proxy(endpoint);
        if !reply.delay.is_zero() {
            sleep(reply.delay).await;
        }
        Ok(RawResponse {
            status: reply.status,
            body: reply.body,
        })
    }
}

fn gene_of(endpoint: &Endpoint) -> &str {
    match endpoint {
        Endpoint::PathwaysForGene { gen_id } => gen_id,
        other => panic!("unexpected endpoint {other:?}"),
    }
}

// ── Fetch unit ─────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_blank_keys_issue_no_requests() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<PathwayList> = FetchUnit::new(proxy.clone());

    unit.on_key(Some(""));
    unit.on_key(Some("   \t"));
    unit.on_key(None);
    sleep(Duration::from_secs(1)).await;

    assert_eq!(proxy.call_count(), 0);
    assert_eq!(unit.state().phase(), FetchPhase::Idle);
    assert!(matches!(unit.view(), View::Idle));
}

#[tokio::test(start_paused = true)]
async fn test_repeated_key_is_fetched_once() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<PathwayList> = FetchUnit::new(proxy.clone());

    unit.on_key(Some("BC_0002"));
    unit.on_key(Some("BC_0002"));
    unit.settled().await;
    unit.on_key(Some(" BC_0002 "));
    sleep(Duration::from_secs(1)).await;

    assert_eq!(proxy.call_count(), 1);
    assert_eq!(unit.state().phase(), FetchPhase::Success);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_key_changes_fetch_only_final_key() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<PathwayList> = FetchUnit::new(proxy.clone());

    for partial in ["B", "BC", "BC_", "BC_00", "BC_0002"] {
        unit.on_key(Some(partial));
        sleep(Duration::from_millis(100)).await;
    }
    let state = unit.settled().await;

    let calls = proxy.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(gene_of(&calls[0]), "BC_0002");
    assert_eq!(state.data.unwrap().gene_id, "bce:BC_0002");
}

#[tokio::test(start_paused = true)]
async fn test_graph_debounce_is_shorter_than_list() {
    let proxy = FakeProxy::new();
    let graph: FetchUnit<PathwayGraphSource> = FetchUnit::new(proxy.clone());
    let list: FetchUnit<PathwayList> = FetchUnit::new(proxy.clone());

    let start = Instant::now();
    graph.on_key(Some("bce00010"));
    list.on_key(Some("BC_0002"));

    sleep(Duration::from_millis(90)).await;
    assert_eq!(proxy.call_count(), 0);
    assert_eq!(graph.state().phase(), FetchPhase::Debouncing);

    graph.settled().await;
    list.settled().await;

    let times = proxy.call_times();
    assert_eq!(times.len(), 2);
    let graph_delay = times[0] - start;
    let list_delay = times[1] - start;
    assert!(graph_delay >= Duration::from_millis(100), "{graph_delay:?}");
    assert!(graph_delay < Duration::from_millis(300), "{graph_delay:?}");
    assert!(list_delay >= Duration::from_millis(300), "{list_delay:?}");
}

#[tokio::test(start_paused = true)]
async fn test_non_success_sets_error_without_data() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<PathwayGraphSource> = FetchUnit::new(proxy.clone());

    unit.on_key(Some("map00010"));
    let state = unit.settled().await;

    assert!(state.data.is_none());
    assert_eq!(state.error.as_deref(), Some("Error 404: not found"));
    assert_eq!(state.last_requested_key.as_deref(), Some("map00010"));
    assert_eq!(state.phase(), FetchPhase::Error);

    match unit.view() {
        View::Error { key, message } => {
            assert_eq!(key, "map00010");
            assert!(message.contains("not found"));
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_array_field_is_a_contract_error_naming_key() {
    let proxy = FakeProxy::new();
    let list: FetchUnit<PathwayList> = FetchUnit::new(proxy.clone());
    let search: FetchUnit<GeneSearch> = FetchUnit::new(proxy.clone());

    list.on_key(Some("truncated"));
    search.on_key(Some("missing-array"));
    let list_state = list.settled().await;
    let search_state = search.settled().await;

    assert!(list_state.data.is_none());
    let message = list_state.error.unwrap();
    assert!(message.contains("\"truncated\""), "{message}");
    assert!(message.contains("pathways"), "{message}");

    assert!(search_state.data.is_none());
    assert!(search_state.error.unwrap().contains("\"missing-array\""));
}

#[tokio::test(start_paused = true)]
async fn test_errored_key_is_not_retried_until_key_changes() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<PathwayList> = FetchUnit::new(proxy.clone());

    unit.on_key(Some("BC_9999"));
    unit.settled().await;
    unit.on_key(Some("BC_9999"));
    sleep(Duration::from_secs(1)).await;
    assert_eq!(proxy.call_count(), 1);

    unit.on_key(Some("BC_0002"));
    unit.settled().await;
    unit.on_key(Some("BC_9999"));
    unit.settled().await;
    assert_eq!(proxy.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_new_key_drops_previous_data_immediately() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<PathwayList> = FetchUnit::new(proxy.clone());

    unit.on_key(Some("BC_0002"));
    unit.settled().await;
    unit.on_key(Some("BC_0100"));

    let state = unit.state();
    assert!(state.data.is_none());
    assert!(state.pending);
    assert!(matches!(unit.view(), View::Loading { ref key } if key == "BC_0100"));

    unit.settled().await;
    assert!(matches!(unit.view(), View::Empty { ref key } if key == "BC_0100"));
}

#[tokio::test(start_paused = true)]
async fn test_stale_in_flight_response_is_discarded() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<GeneSearch> = FetchUnit::new(proxy.clone());

    unit.on_key(Some("slow"));
    // Past the 300 ms debounce: "slow" is now in flight for one second.
    sleep(Duration::from_millis(400)).await;
    assert!(unit.state().loading);

    unit.on_key(Some("fast"));
    unit.settled().await;
    sleep(Duration::from_secs(2)).await;

    assert_eq!(proxy.call_count(), 2);
    let state = unit.state();
    assert_eq!(state.last_requested_key.as_deref(), Some("fast"));
    let page = state.data.unwrap();
    assert_eq!(
        page.result[0].protein_description.as_deref(),
        Some("match for fast")
    );
}

#[tokio::test(start_paused = true)]
async fn test_clearing_key_while_in_flight_ends_cleared() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<GeneSearch> = FetchUnit::new(proxy.clone());

    unit.on_key(Some("slow"));
    sleep(Duration::from_millis(400)).await;
    unit.on_key(None);
    sleep(Duration::from_secs(2)).await;

    let state = unit.state();
    assert!(state.data.is_none());
    assert!(state.error.is_none());
    assert!(state.last_requested_key.is_none());
    assert!(matches!(unit.view(), View::Cleared));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_unit_aborts_pending_fetch() {
    let proxy = FakeProxy::new();
    let unit: FetchUnit<PathwayList> = FetchUnit::new(proxy.clone());

    unit.on_key(Some("BC_0002"));
    drop(unit);
    sleep(Duration::from_secs(1)).await;

    assert_eq!(proxy.call_count(), 0);
}

// ── Explorer scenarios ─────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_store_write_right_after_new_reaches_units() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    // No explorer.settled(): only the binding task can deliver this.
    explorer.context().submit_search("BC_0002");
    sleep(Duration::from_secs(2)).await;

    let calls = proxy.calls();
    assert!(calls.contains(&Endpoint::Search {
        query: "BC_0002".into()
    }));
    assert!(calls.contains(&Endpoint::PathwaysForGene {
        gen_id: "BC_0002".into()
    }));
    assert!(explorer.pathway_list().state().data.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_later_store_writes_reach_units_through_binding() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());
    sleep(Duration::from_millis(10)).await;

    explorer.context().select_pathway("bce00010", None);
    sleep(Duration::from_secs(1)).await;
    let graph = explorer.pathway_graph().settled().await;

    assert_eq!(
        proxy.calls(),
        [Endpoint::PathwayGraph {
            pathway_id: "bce00010".into()
        }]
    );
    assert_eq!(graph.data.unwrap().id, "bce00010");
}

#[tokio::test(start_paused = true)]
async fn test_dropping_explorer_aborts_pending_fetches() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    explorer.context().submit_search("BC_0002");
    sleep(Duration::from_millis(10)).await;
    assert_eq!(explorer.gene_search().state().phase(), FetchPhase::Debouncing);

    drop(explorer);
    sleep(Duration::from_secs(1)).await;

    assert_eq!(proxy.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_gene_id_search_lists_pathways() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    explorer.context().submit_search("BC_0002");
    explorer.settled().await;

    let gene = explorer.pathway_list().state().data.unwrap();
    assert_eq!(gene.gene_id, "bce:BC_0002");
    assert_eq!(gene.gene_name.as_deref(), Some("rpoB"));
    assert_eq!(gene.pathways.len(), 1);

    let [_, pathways, _] = explorer.screen(Default::default());
    assert!(!pathways.is_error);
    assert!(pathways.text.contains("KEGG pathways for: bce:BC_0002 (rpoB)"));
    assert!(pathways.text.contains("Glycolysis (map00010)"));
}

#[tokio::test(start_paused = true)]
async fn test_missing_pathway_graph_shows_error_banner() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    explorer.context().submit_search("BC_0002");
    explorer.settled().await;
    let picked = explorer.pick_pathway("1").unwrap();
    assert_eq!(picked.id, "map00010");
    explorer.settled().await;

    let [_, pathways, graph] = explorer.screen(Default::default());
    assert!(pathways.text.contains("*  1. Glycolysis (map00010)"));
    assert!(graph.is_error);
    assert!(graph.text.contains("\"map00010\""));
    assert!(graph.text.contains("not found"));
}

#[tokio::test(start_paused = true)]
async fn test_pathway_by_id_renders_graph() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    explorer.pick_pathway("bce00010").unwrap();
    explorer.settled().await;

    let [genes, _, graph] = explorer.screen(Default::default());
    assert!(genes.text.starts_with("Enter a gene or protein term"));
    assert!(graph.text.starts_with("Pathway: Glycolysis / Gluconeogenesis (bce00010)"));
    assert!(graph.text.contains("gene (1): pgi"));
}

#[tokio::test(start_paused = true)]
async fn test_clearing_search_shows_cleared_not_stale_results() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    explorer.context().submit_search("rpoB");
    explorer.settled().await;
    let [genes, _, _] = explorer.screen(Default::default());
    assert!(genes.text.contains("BC_0002"));

    explorer.context().submit_search("  ");
    explorer.settled().await;

    let [genes, pathways, _] = explorer.screen(Default::default());
    assert_eq!(genes.text, "Search cleared. Enter a new term.");
    assert_eq!(pathways.text, "Search cleared. Enter a new term.");
    assert!(explorer.gene_search().state().data.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_empty_search_reports_no_results() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    explorer.context().submit_search("nothing");
    explorer.settled().await;

    let [genes, _, _] = explorer.screen(Default::default());
    assert_eq!(genes.text, "No genes found for \"nothing\".");
}

#[tokio::test(start_paused = true)]
async fn test_selecting_gene_row_overrides_search_until_back() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    explorer.context().submit_search("rpoB");
    explorer.settled().await;
    // "rpoB" is not a KEGG gene id.
    assert!(explorer.pathway_list().view().is_error());

    let gene = explorer.pick_gene_row(1).unwrap();
    assert_eq!(gene.resolved_id.as_deref(), Some("BC_0002"));
    explorer.settled().await;

    let [_, pathways, _] = explorer.screen(Default::default());
    assert!(pathways.text.contains("Glycolysis (map00010)"));
    assert!(pathways.text.contains("(back: show pathways for \"rpoB\")"));

    assert!(explorer.back_to_search());
    explorer.settled().await;
    assert!(explorer.context().selected_gene.get().is_none());

    let list_calls: Vec<String> = proxy
        .calls()
        .iter()
        .filter(|e| matches!(e, Endpoint::PathwaysForGene { .. }))
        .map(|e| gene_of(e).to_string())
        .collect();
    assert_eq!(list_calls, ["rpoB", "BC_0002", "rpoB"]);
    assert!(!explorer.back_to_search());
}

#[tokio::test(start_paused = true)]
async fn test_out_of_range_row_selects_nothing() {
    let proxy = FakeProxy::new();
    let explorer = Explorer::new(ExplorerContext::new(), proxy.clone());

    explorer.context().submit_search("rpoB");
    explorer.settled().await;

    assert!(explorer.pick_gene_row(0).is_none());
    assert!(explorer.pick_gene_row(2).is_none());
    assert!(explorer.pick_pathway("7").is_none());
    assert!(explorer.context().selected_gene.get().is_none());
}
