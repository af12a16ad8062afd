use crate::asset::{Asset, ContentType};
use crate::graph::Edge;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl From<&Asset> for Node {
    fn from(asset: &Asset) -> Self {
        Self {
            url: asset.url().to_string(),
            content_type: asset.content_type(),
        }
    }
}

/// Finished crawl as a node/link graph: nodes in index order, links in
/// discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
}

impl SiteGraph {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn count_of(&self, content_type: ContentType) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.content_type == content_type)
            .count()
    }

    /// URL of the node at `index`.
    pub fn url_of(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(|node| node.url.as_str())
    }
}
