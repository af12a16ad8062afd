use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use linkmap_core::crawl::{CrawlOptions, execute_crawl, generate_crawl_summary};
use linkmap_core::report::{ReportFormat, generate_report, save_report};
use linkmap_scanner::SiteGraph;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::server;

/// Install the fmt subscriber. `RUST_LOG` overrides the default `warn` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Try to parse as-is
    if let Ok(url) = Url::parse(line)
        && url.has_host()
    {
        return Some(line.to_string());
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    match Url::parse(&with_scheme) {
        Ok(url) if url.has_host() => Some(with_scheme),
        _ => None,
    }
}

/// Build crawl options from the shared `crawl`/`serve` arguments
pub fn crawl_options_from(sub_matches: &ArgMatches, quiet: bool) -> Result<CrawlOptions> {
    let raw_url = sub_matches
        .get_one::<String>("url")
        .context("missing --url")?;
    let Some(url) = parse_url_line(raw_url) else {
        bail!("invalid seed URL '{}'", raw_url);
    };

    Ok(CrawlOptions {
        url,
        max_items: sub_matches.get_one::<usize>("max-pages").copied().unwrap_or(10),
        timeout: sub_matches
            .get_one::<u64>("timeout")
            .map(|secs| Duration::from_secs(*secs)),
        show_progress_bars: !quiet,
    })
}

/// Crawl without extra progress output; failures carry the seed URL.
pub async fn crawl(options: CrawlOptions) -> Result<SiteGraph> {
    let seed = options.url.clone();
    execute_crawl(options, None)
        .await
        .with_context(|| format!("crawl of {} failed", seed))
}

/// Write `report` to `output` (tilde-expanded) and return the final path.
pub fn write_report(report: &str, output: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::tilde(&output.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    save_report(report, &path)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(path)
}

pub async fn handle_crawl(sub_matches: &ArgMatches) {
    if let Err(e) = run_crawl(sub_matches).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_crawl(sub_matches: &ArgMatches) -> Result<()> {
    let quiet = sub_matches.get_flag("quiet");
    let options = crawl_options_from(sub_matches, quiet)?;
    let format_name = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let Some(format) = ReportFormat::from_str(format_name) else {
        bail!("unknown report format '{}'", format_name);
    };

    if !quiet {
        println!("{} Crawling {}", "→".blue(), options.url.bright_white());
        println!("Max pages: {}\n", options.max_items);
    }

    let seed = options.url.clone();
    let graph = crawl(options).await?;
    let report = generate_report(&graph, &seed, format)?;

    if !quiet {
        print!("{}", generate_crawl_summary(&graph));
    }

    match sub_matches.get_one::<PathBuf>("output") {
        Some(output) => {
            let path = write_report(&report, output)?;
            if !quiet {
                println!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}

pub async fn handle_serve(sub_matches: &ArgMatches) {
    if let Err(e) = run_serve(sub_matches).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_serve(sub_matches: &ArgMatches) -> Result<()> {
    let quiet = sub_matches.get_flag("quiet");
    let options = crawl_options_from(sub_matches, quiet)?;
    let bind = sub_matches
        .get_one::<SocketAddr>("bind")
        .copied()
        .context("missing --bind")?;
    let index = sub_matches.get_one::<PathBuf>("index").cloned();

    if let Some(ref index) = index
        && !index.is_file()
    {
        bail!("index file {} does not exist", index.display());
    }

    let graph = Arc::new(crawl(options).await?);
    if !quiet {
        print!("{}", generate_crawl_summary(&graph));
    }

    let router = server::router(graph, index)?;
    let listener = server::bind(bind).await?;
    info!("serving link graph on {}", bind);
    if !quiet {
        println!(
            "{} Starting web server on {}",
            "✓".green().bold(),
            bind.to_string().bright_white()
        );
    }

    server::serve(listener, router).await
}
