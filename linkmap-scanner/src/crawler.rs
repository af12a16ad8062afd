use crate::asset::{Asset, AssetRegistry, ContentType};
use crate::error::{Result, ScanError};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::frontier::Frontier;
use crate::graph::{Edge, LinkGraph};
use crate::parse::extract_references;
use crate::result::{Node, SiteGraph};
use crate::scope::UrlScope;
use std::sync::Arc;
use tracing::{debug, info};

/// Called with (items processed so far, url) after each fetch completes.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Outcome of one frontier step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The URL was fetched and its references recorded.
    Fetched(String),
    /// The URL had already been processed; nothing was fetched.
    Skipped(String),
}

/// All mutable state of one crawl.
pub struct CrawlSession {
    scope: UrlScope,
    registry: AssetRegistry,
    graph: LinkGraph,
    frontier: Frontier<String>,
    processed_count: usize,
}

impl CrawlSession {
    /// Validate the seed and register it as the first page.
    pub fn new(seed: &str) -> Result<Self> {
        let scope = UrlScope::new(seed)?;
        let base_url = scope.base_url().to_string();

        let mut session = Self {
            scope,
            registry: AssetRegistry::new(),
            graph: LinkGraph::new(),
            frontier: Frontier::new(),
            processed_count: 0,
        };
        session.register(&base_url, ContentType::Page);

        Ok(session)
    }

    /// Register `url`, queueing it for processing if it is new.
    fn register(&mut self, url: &str, content_type: ContentType) -> usize {
        let (index, created) = self.registry.register_if_absent(url, content_type);
        if created {
            debug!("Registered {} #{} {}", content_type, index, url);
            self.frontier.enqueue(url.to_string());
        }
        index
    }

    /// Dequeue one URL, fetch it and record everything it references.
    ///
    /// Errors with [`ScanError::EmptyFrontier`] when there is nothing queued.
    /// Fetch failures propagate unchanged.
    pub async fn process_next(&mut self, fetcher: &dyn Fetcher) -> Result<Step> {
        let url = self.frontier.dequeue().ok_or(ScanError::EmptyFrontier)?;
        self.processed_count += 1;

        // Queued URLs are always registered already; this only matters for
        // URLs pushed by hand.
        let (index, _) = self.registry.register_if_absent(&url, ContentType::Page);

        if !self.registry.mark_processed(index) {
            debug!("Already processed {}", url);
            return Ok(Step::Skipped(url));
        }

        let body = fetcher.fetch(&url).await?;
        self.process_document(index, &body);

        Ok(Step::Fetched(url))
    }

    /// Record every in-scope reference found in `html` as a link from the
    /// asset at `source`.
    pub fn process_document(&mut self, source: usize, html: &str) {
        for reference in extract_references(html) {
            self.handle_reference(source, &reference.url, reference.content_type);
        }
    }

    /// Resolve one reference and link it from `source`.
    ///
    /// Returns the edge if this is the first time `source` references the
    /// target; repeats only increase the existing edge's weight.
    pub fn handle_reference(
        &mut self,
        source: usize,
        reference: &str,
        content_type: ContentType,
    ) -> Option<Edge> {
        let url = self.scope.resolve(reference)?;
        let target = self.register(&url, content_type);

        let source_asset = self.registry.get(source)?;
        let target_asset = self.registry.get(target)?;
        self.graph.record_link(source_asset, target_asset)
    }

    /// Queue a URL directly, bypassing registration.
    pub fn enqueue(&mut self, url: &str) {
        self.frontier.enqueue(url.to_string());
    }

    pub fn base_url(&self) -> &str {
        self.scope.base_url()
    }

    pub fn assets(&self) -> &[Asset] {
        self.registry.assets()
    }

    pub fn asset(&self, index: usize) -> Option<&Asset> {
        self.registry.get(index)
    }

    pub fn asset_by_url(&self, url: &str) -> Option<&Asset> {
        self.registry.get_by_url(url)
    }

    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    pub fn edge(&self, source: usize, target_url: &str) -> Option<&Edge> {
        self.graph.edge(source, target_url)
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed_count
    }

    pub fn to_graph(&self) -> SiteGraph {
        SiteGraph {
            nodes: self.registry.assets().iter().map(Node::from).collect(),
            links: self.graph.edges().to_vec(),
        }
    }
}

/// Drives a [`CrawlSession`] until the frontier is drained or the item
/// budget is spent. Fetches run one at a time.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    max_items: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            max_items: DEFAULT_MAX_ITEMS,
            progress_callback: None,
        }
    }

    /// A crawler backed by [`HttpFetcher`] without a timeout.
    pub fn http() -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new()?)))
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub async fn crawl(&self, seed: &str) -> Result<CrawlSession> {
        info!("Starting crawl of {} (budget: {} items)", seed, self.max_items);

        let mut session = CrawlSession::new(seed)?;
        self.run(&mut session).await?;

        info!(
            "Crawl complete. Processed {} items, found {} assets and {} links",
            session.processed_count(),
            session.assets().len(),
            session.edges().len()
        );
        Ok(session)
    }

    /// Process `session` until its frontier empties or the budget runs out.
    pub async fn run(&self, session: &mut CrawlSession) -> Result<()> {
        while session.frontier_len() > 0 {
            if session.processed_count() >= self.max_items {
                info!(
                    "Item budget of {} reached with {} URLs still queued",
                    self.max_items,
                    session.frontier_len()
                );
                break;
            }

            if let Step::Fetched(url) = session.process_next(self.fetcher.as_ref()).await?
                && let Some(ref callback) = self.progress_callback
            {
                callback(session.processed_count(), url);
            }
        }

        Ok(())
    }
}
