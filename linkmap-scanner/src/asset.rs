use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Classification of an asset, fixed by the markup context in which it was
/// first discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Page,
    Stylesheet,
    Script,
    Image,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Page => "page",
            ContentType::Stylesheet => "stylesheet",
            ContentType::Script => "script",
            ContentType::Image => "image",
        }
    }

    pub const ALL: [ContentType; 4] = [
        ContentType::Page,
        ContentType::Stylesheet,
        ContentType::Script,
        ContentType::Image,
    ];
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    url: String,
    content_type: ContentType,
    index: usize,
    processed: bool,
}

impl Asset {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Position in registration order. Never changes once assigned.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }
}

/// Owning store for every asset of a crawl, addressable by URL and by index.
///
/// Both lookups are updated together in [`AssetRegistry::register_if_absent`],
/// which is the only place an index is handed out.
#[derive(Debug, Default, Clone)]
pub struct AssetRegistry {
    assets: Vec<Asset>,
    by_url: HashMap<String, usize>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the asset for `url` and whether it was created by
    /// this call. An existing asset keeps its first classification; the
    /// supplied `content_type` is ignored in that case.
    pub fn register_if_absent(&mut self, url: &str, content_type: ContentType) -> (usize, bool) {
        if let Some(&index) = self.by_url.get(url) {
            return (index, false);
        }

        let index = self.assets.len();
        self.assets.push(Asset {
            url: url.to_string(),
            content_type,
            index,
            processed: false,
        });
        self.by_url.insert(url.to_string(), index);

        (index, true)
    }

    /// Marks the asset as processed. Returns `true` if this call changed it.
    pub fn mark_processed(&mut self, index: usize) -> bool {
        match self.assets.get_mut(index) {
            Some(asset) if !asset.processed => {
                asset.processed = true;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    pub fn get_by_url(&self, url: &str) -> Option<&Asset> {
        self.by_url.get(url).and_then(|&index| self.assets.get(index))
    }

    pub fn index_of(&self, url: &str) -> Option<usize> {
        self.by_url.get(url).copied()
    }

    /// All assets in index order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
