use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wheat::banner::{BannerInfo, print_banner, print_farewell};
use wheat::commands::{CommandRegistry, CommandResult};
use wheat::config::CatalogConfig;
use wheat::consts::{DEFAULT_PRODUCT_URL, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT_SECS};
use wheat::dispatch::Dispatcher;
use wheat::lookup::LookupClient;
use wheat::product::ProductQuery;
use wheat::product::openfoodfacts::OpenFoodFactsCatalog;
use wheat::render::{render_card, render_session};
use wheat::scanner::wedge::WedgeScanner;
use wheat::scanner::{BarcodeSource, Scan};
use wheat::session::Session;
use wheat::spinner::Spinner;

#[derive(Parser)]
#[command(name = "wheat", version, about = "It looks safe, but is it gluten?")]
struct Cli {
    /// Search products by name, print the results and exit
    #[arg(short, long, conflicts_with_all = ["barcode", "scan"])]
    name: Option<String>,

    /// Look up a single barcode, print it with its verdict and exit
    #[arg(short, long, conflicts_with = "scan")]
    barcode: Option<String>,

    /// Read one barcode from stdin (wedge scanner or pipe), look it up and exit
    #[arg(long, default_value_t = false)]
    scan: bool,

    /// With --name: check result n (1-based) for gluten
    #[arg(short, long, requires = "name")]
    check: Option<usize>,

    /// Product search endpoint
    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Per-barcode product endpoint
    #[arg(long, default_value = DEFAULT_PRODUCT_URL)]
    product_url: String,

    /// HTTP timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Skip the startup banner
    #[arg(long, default_value_t = false)]
    no_banner: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = CatalogConfig::new(
        &cli.search_url,
        &cli.product_url,
        Duration::from_secs(cli.timeout),
    )?;
    info!(search = %config.search_url, product = %config.product_url, "catalog configured");

    let catalog = OpenFoodFactsCatalog::new(&config)?;
    let client = Arc::new(LookupClient::new(Box::new(catalog)));

    // One-shot modes
    if let Some(term) = &cli.name {
        return run_once(client, ProductQuery::text(term), cli.check).await;
    }
    if let Some(code) = &cli.barcode {
        return run_once(client, ProductQuery::barcode(code), None).await;
    }
    if cli.scan {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        return match WedgeScanner::new(&mut lines).acquire().await? {
            Scan::Decoded(code) => run_once(client, ProductQuery::barcode(&code), None).await,
            Scan::Cancelled => {
                println!("scan cancelled");
                Ok(())
            }
        };
    }

    if !cli.no_banner {
        print_banner(&BannerInfo {
            search_url: config.search_url.as_str(),
            product_url: config.product_url.as_str(),
            timeout_secs: cli.timeout,
        });
    }

    repl(client).await?;
    print_farewell();
    Ok(())
}

async fn run_once(
    client: Arc<LookupClient>,
    query: Option<ProductQuery>,
    check: Option<usize>,
) -> Result<()> {
    let Some(query) = query else {
        println!("nothing to look up");
        return Ok(());
    };

    let mut session = Session::new();
    let mut dispatcher = Dispatcher::new(client);
    dispatcher.start(&mut session, query);

    let spinner = Spinner::start("Searching");
    dispatcher.settle(&mut session).await;
    spinner.stop().await;

    if let Some(n) = check
        && (n == 0 || !session.expand(n - 1))
    {
        eprintln!("no result #{n} to check");
    }

    print!("{}", render_session(&session));
    Ok(())
}

async fn repl(client: Arc<LookupClient>) -> Result<()> {
    let registry = CommandRegistry::new();
    let mut session = Session::new();
    let mut dispatcher = Dispatcher::new(client);

    // Async stdin so Ctrl+C and finished lookups are caught at the prompt too
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nwheat> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            applied = dispatcher.settle(&mut session) => {
                if applied {
                    println!();
                    print!("{}", render_session(&session));
                }
                continue;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match registry.dispatch(input, &session).await {
            CommandResult::NotACommand => {
                if let Some(query) = ProductQuery::text(input) {
                    dispatcher.start(&mut session, query);
                    print!("{}", render_session(&session));
                }
            }
            CommandResult::Handled => {}
            CommandResult::Scan => {
                println!("  scan a barcode now (/cancel to stop)");
                // Ctrl+C during a scan cancels the scan, not the REPL
                let mut scanner = WedgeScanner::new(&mut lines);
                let scan = tokio::select! {
                    result = scanner.acquire() => result,
                    _ = tokio::signal::ctrl_c() => Ok(Scan::Cancelled),
                };
                match scan {
                    Ok(Scan::Decoded(code)) => {
                        if let Some(query) = ProductQuery::barcode(&code) {
                            dispatcher.start(&mut session, query);
                            print!("{}", render_session(&session));
                        }
                    }
                    Ok(Scan::Cancelled) => println!("  scan cancelled"),
                    Err(e) => eprintln!("  scan failed: {e:#}"),
                }
            }
            CommandResult::Check(index) => {
                if session.expand(index)
                    && let Some(product) = session.expanded()
                {
                    print!("{}", render_card(index + 1, product, true));
                }
            }
            CommandResult::Quit => break,
        }
    }

    Ok(())
}
