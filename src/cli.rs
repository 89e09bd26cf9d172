// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Without a subcommand the tool crawls a site:
//   sitemap-crawler --domain https://example.com --depth 2 --outfile sitemap.xml
//
// The `links` subcommand is a debugging helper that prints the anchors of a
// local HTML file:
//   sitemap-crawler links page.html
//
// Rust concepts:
// - Structs and enums with derive macros: clap generates the parser
// - Option<T>: For arguments that may be missing
// =============================================================================

use crate::crawl::CrawlConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "sitemap-crawler",
    version,
    about = "Crawl a website and list or save its same-domain pages as a sitemap",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub crawl: CrawlArgs,

    /// Print more logs to stderr (-v debug, -vv trace). RUST_LOG wins if set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the links found in a local HTML file
    ///
    /// Example: sitemap-crawler links index.html
    Links {
        /// Path to the HTML file
        file: PathBuf,

        /// Output results in JSON format instead of plain lines
        #[arg(long)]
        json: bool,
    },
}

// Arguments for crawling a website (the default command)
#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Seed URL to start crawling from
    #[arg(short = 'f', long = "domain", default_value = "https://example.com")]
    pub domain: String,

    /// Maximum number of link hops from the seed page (-1 = unlimited)
    #[arg(
        long,
        default_value_t = -1,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(-1..)
    )]
    pub depth: i64,

    /// Write a sitemap XML file here; when empty, URLs are printed to stdout
    #[arg(long, default_value = "")]
    pub outfile: String,

    /// Print the URL listing as JSON instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// Timeout for each HTTP request, in seconds (default: no timeout)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl CrawlArgs {
    // Converts --depth into the crawler's representation
    //
    // -1 means "no limit" and becomes None
    pub fn max_depth(&self) -> Option<usize> {
        usize::try_from(self.depth).ok()
    }

    // Some(path) when a sitemap file was requested
    pub fn outfile(&self) -> Option<PathBuf> {
        let outfile = self.outfile.trim();
        if outfile.is_empty() {
            None
        } else {
            Some(PathBuf::from(outfile))
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    // Builds the crawl settings once the domain and root URL are known
    pub fn crawl_config(&self, domain: String, root_url: String) -> CrawlConfig {
        CrawlConfig {
            domain,
            root_url,
            max_depth: self.max_depth(),
        }
    }
}
