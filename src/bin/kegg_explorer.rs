//! KEGG Explorer interactive browser
//!
//! Talks to a running `kegg-explorer-web` proxy.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session
//! kegg-explorer --proxy-url http://localhost:3000 --timeout-secs 10
//!
//! # One search, print the three panels, exit
//! kegg-explorer --query BC_0002
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::runtime::Runtime;
use url::Url;

use kegg_explorer::explorer::{Panel, TablePaging};
use kegg_explorer::view::genes_table::{page_count, PAGE_SIZES};
use kegg_explorer::{Explorer, ExplorerContext, HttpProxyApi};

#[derive(Parser)]
#[command(name = "kegg-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Browse UniProt genes and their KEGG pathways through the explorer proxy")]
#[command(long_about = None)]
struct Cli {
    /// Base URL of the kegg-explorer-web proxy
    #[arg(long, env = "EXPLORER_PROXY_URL", default_value = "http://localhost:3000")]
    proxy_url: Url,

    /// Per-request timeout in seconds
    #[arg(long, env = "EXPLORER_TIMEOUT_SECS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Genes table rows per page (5, 10, 20 or 50)
    #[arg(long, default_value_t = 10, value_parser = parse_page_size)]
    page_size: usize,

    /// Run a single search, print the panels and exit
    #[arg(long, short)]
    query: Option<String>,
}

fn parse_page_size(raw: &str) -> std::result::Result<usize, String> {
    let size: usize = raw.parse().map_err(|_| format!("not a number: {raw}"))?;
    if PAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {PAGE_SIZES:?}"))
    }
}

// ============================================================================
// REPL COMMANDS
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Gene(usize),
    Back,
    Pathway(String),
    Clear,
    Page(usize),
    Size(usize),
    Show,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "search" | "s" => Command::Search(rest.to_string()),
            "gene" | "g" => Command::Gene(parse_number(rest, "gene <row>")?),
            "back" | "b" => Command::Back,
            "pathway" | "p" => {
                if rest.is_empty() {
                    bail!("usage: pathway <n|id>");
                }
                Command::Pathway(rest.to_string())
            }
            "clear" => Command::Clear,
            "page" => Command::Page(parse_number(rest, "page <n>")?),
            "size" => Command::Size(parse_page_size(rest).map_err(anyhow::Error::msg)?),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(Some(command))
    }
}

fn parse_number(raw: &str, usage: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => bail!("usage: {usage}"),
    }
}

const HELP: &str = "\
  search <term>     search UniProt (empty term clears the search)
  gene <row>        show pathways for a genes table row
  back              go back to pathways for the search term
  pathway <n|id>    show the graph of a listed pathway, or any pathway id
  clear             clear search, gene and pathway
  page <n>          show genes table page n
  size <n>          genes table rows per page (5, 10, 20, 50)
  show              redraw
  help              this text
  quit              exit";

// ============================================================================
// MAIN
// ============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kegg_explorer=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let runtime = Runtime::new().context("Failed to start tokio runtime")?;
    let _guard = runtime.enter();

    let api = HttpProxyApi::new(cli.proxy_url.clone(), Duration::from_secs(cli.timeout_secs))?;
    let explorer = Explorer::new(ExplorerContext::new(), Arc::new(api));
    let mut paging = TablePaging {
        page: 0,
        page_size: cli.page_size,
    };

    if let Some(query) = cli.query {
        explorer.context().submit_search(query);
        runtime.block_on(explorer.settled());
        print_screen(&explorer, paging);
        return Ok(());
    }

    println!(
        "{} proxy at {} (type 'help' for commands)",
        "KEGG Explorer".cyan().bold(),
        cli.proxy_url
    );

    let mut rl = DefaultEditor::new().context("Failed to start line editor")?;
    loop {
        let line = match rl.readline("kegg> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };
        let _ = rl.add_history_entry(line.as_str());

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e.to_string().yellow());
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Search(term) => {
                paging.page = 0;
                explorer.context().submit_search(term);
            }
            Command::Gene(row) => {
                if explorer.pick_gene_row(row).is_none() {
                    eprintln!("{}", format!("no genes table row {row}").yellow());
                    continue;
                }
            }
            Command::Back => {
                if !explorer.back_to_search() {
                    eprintln!("{}", "nothing to go back from".yellow());
                    continue;
                }
            }
            Command::Pathway(choice) => {
                if explorer.pick_pathway(&choice).is_none() {
                    eprintln!("{}", format!("no pathway {choice} in the list").yellow());
                    continue;
                }
            }
            Command::Clear => {
                paging.page = 0;
                let ctx = explorer.context();
                ctx.clear_pathway();
                ctx.clear_gene();
                ctx.submit_search("");
            }
            Command::Page(n) => {
                let pages = page_count(explorer.gene_row_count(), paging.page_size).max(1);
                paging.page = (n - 1).min(pages - 1);
            }
            Command::Size(size) => {
                paging.page = 0;
                paging.page_size = size;
            }
            Command::Show => {}
        }

        runtime.block_on(explorer.settled());
        print_screen(&explorer, paging);
    }

    Ok(())
}

fn print_screen(explorer: &Explorer, paging: TablePaging) {
    for panel in explorer.screen(paging) {
        print_panel(&panel);
    }
}

fn print_panel(panel: &Panel) {
    println!("\n{}", format!("== {} ==", panel.title).cyan().bold());
    if panel.is_error {
        println!("{}", panel.text.red());
    } else {
        println!("{}", panel.text);
    }
}
