use crate::asset::Asset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weighted directed relation between two assets, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: usize,
}

impl Edge {
    fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            weight: 1,
        }
    }
}

/// Link bookkeeping for a crawl.
///
/// Each source asset owns a map from target URL to its edge, giving O(1)
/// dedup. The edges themselves live in one append-only list so output keeps
/// discovery order.
#[derive(Debug, Default, Clone)]
pub struct LinkGraph {
    edges: Vec<Edge>,
    outgoing: HashMap<usize, HashMap<String, usize>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source` references `target`.
    ///
    /// Returns the new edge when the pair is seen for the first time. A
    /// repeated pair only bumps the existing edge's weight and returns `None`.
    pub fn record_link(&mut self, source: &Asset, target: &Asset) -> Option<Edge> {
        let links = self.outgoing.entry(source.index()).or_default();

        if let Some(&position) = links.get(target.url()) {
            self.edges[position].weight += 1;
            return None;
        }

        let edge = Edge::new(source.index(), target.index());
        links.insert(target.url().to_string(), self.edges.len());
        self.edges.push(edge);

        Some(edge)
    }

    /// Every edge, in discovery order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The edge from `source` to the asset at `target_url`, if any.
    pub fn edge(&self, source: usize, target_url: &str) -> Option<&Edge> {
        self.outgoing
            .get(&source)
            .and_then(|links| links.get(target_url))
            .map(|&position| &self.edges[position])
    }

    /// Outgoing edges of `source`, keyed by target URL.
    pub fn outgoing(&self, source: usize) -> impl Iterator<Item = (&str, &Edge)> {
        self.outgoing
            .get(&source)
            .into_iter()
            .flat_map(|links| links.iter())
            .map(move |(url, &position)| (url.as_str(), &self.edges[position]))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
