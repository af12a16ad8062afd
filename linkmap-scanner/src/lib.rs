pub mod asset;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod frontier;
pub mod graph;
pub mod parse;
pub mod result;
pub mod scope;

pub use asset::{Asset, AssetRegistry, ContentType};
pub use crawler::{CrawlSession, Crawler, ProgressCallback, Step};
pub use error::ScanError;
pub use fetch::{Fetcher, HttpFetcher};
pub use graph::{Edge, LinkGraph};
pub use result::SiteGraph;
pub use scope::UrlScope;
