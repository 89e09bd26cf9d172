// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Crawl the website, or run the `links` helper
// 4. Print the URLs or write the sitemap file
// 5. Exit with proper code (0 = success, 1 = error)
//
// Any error (bad seed URL, a page that fails to load, a file we can't write)
// stops the program. We never write a partial sitemap.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - fetching pages and walking the site
mod error; // src/error.rs - our error type
mod links; // src/links/ - finding and filtering links in HTML
mod output; // src/output.rs - listing, JSON and sitemap output

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use crawl::{Crawler, HttpFetcher};
use links::Link;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Text attached to the seed link; it shows up in --json output
const ROOT_LINK_TEXT: &str = "Root link";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        // {:#} prints the whole chain: "context: cause: cause"
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

// Logs go to stderr so stdout only carries results
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Links { file, json }) => handle_links(&file, json),
        None => handle_crawl(&cli.crawl).await,
    }
}

// Crawls the site and prints or saves the result
async fn handle_crawl(args: &CrawlArgs) -> Result<()> {
    let seed = args.domain.as_str();

    let domain = links::extract_domain(seed)?;
    let fetcher = HttpFetcher::new(args.timeout())?;

    let root_url = crawl::resolve_root(&fetcher, seed)
        .await
        .with_context(|| format!("could not resolve root URL of {}", seed))?;

    let config = args.crawl_config(domain, root_url);
    info!(?config, "crawl configured");

    let crawler = Crawler::new(fetcher, config);
    let visited = crawler
        .crawl(Link::new(seed, ROOT_LINK_TEXT))
        .await
        .context("crawl failed")?;

    match args.outfile() {
        Some(path) => {
            let count = output::write_sitemap(&path, &visited)
                .with_context(|| format!("could not write {}", path.display()))?;
            eprintln!("Wrote {} URLs to {}", count, path.display());
        }
        None => {
            let stdout = std::io::stdout().lock();
            if args.json {
                output::write_json(stdout, &visited)?;
            } else {
                output::write_listing(stdout, &visited)?;
            }
        }
    }

    Ok(())
}

// Prints the anchors found in a local HTML file
fn handle_links(file: &Path, json: bool) -> Result<()> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("could not read {}", file.display()))?;

    let found = links::extract_links_from_html(&html);

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        for link in &found {
            println!("{:<60} {}", link.href, link.text.trim());
        }
    }

    Ok(())
}
