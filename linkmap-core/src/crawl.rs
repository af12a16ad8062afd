use indicatif::{ProgressBar, ProgressStyle};
use linkmap_scanner::error::Result;
use linkmap_scanner::{ContentType, Crawler, HttpFetcher, SiteGraph};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub max_items: usize,
    pub timeout: Option<Duration>,
    pub show_progress_bars: bool,
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a crawl with the given options
/// Returns the finished link graph
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<SiteGraph> {
    let CrawlOptions {
        url,
        max_items,
        timeout,
        show_progress_bars,
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let fetcher = match timeout {
        Some(timeout) => HttpFetcher::with_timeout(timeout)?,
        None => HttpFetcher::new()?,
    };

    let pb_clone = progress_bar.clone();
    let internal_progress_callback: linkmap_scanner::ProgressCallback =
        Arc::new(move |count: usize, url: String| {
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!("Crawling... {}/{} items processed", count, max_items));
                pb.tick();
            }
            if let Some(ref callback) = progress_callback {
                callback(format!("[{}] {}", count, url));
            }
        });

    let crawler = Crawler::new(Arc::new(fetcher))
        .with_max_items(max_items)
        .with_progress_callback(internal_progress_callback);

    let result = crawler.crawl(&url).await;

    if let Some(ref pb) = progress_bar {
        match result {
            Ok(ref session) => pb.finish_with_message(format!(
                "Crawl complete! {} items processed",
                session.processed_count()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    Ok(result?.to_graph())
}

/// Generate a short crawl summary from a finished graph
pub fn generate_crawl_summary(graph: &SiteGraph) -> String {
    let mut summary = String::new();
    summary.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    summary.push_str("# Summary:\n");
    summary.push_str(&format!("  Assets found: {}\n", graph.nodes.len()));

    for content_type in ContentType::ALL {
        summary.push_str(&format!(
            "    {:<12} {}\n",
            format!("{}s:", content_type),
            graph.count_of(content_type)
        ));
    }

    let total_references: usize = graph.links.iter().map(|link| link.weight).sum();
    summary.push_str(&format!("  Links: {}\n", graph.links.len()));
    summary.push_str(&format!("  References seen: {}\n", total_references));
    summary.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    summary
}
