pub mod handlers;
pub mod server;

// Re-export commonly used handler functions for convenience
pub use handlers::{crawl_options_from, parse_url_line, write_report};

// Re-export crawl functionality from linkmap-core
pub use linkmap_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl, extract_url_path};
