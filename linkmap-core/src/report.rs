// Report generation from a finished link graph

use crate::crawl::extract_url_path;
use linkmap_scanner::{ContentType, SiteGraph};
use petgraph::dot::Dot;
use petgraph::graph::DiGraph;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Dot,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

pub fn generate_report(
    graph: &SiteGraph,
    seed: &str,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    Ok(match format {
        ReportFormat::Text => generate_text_report(graph, seed),
        ReportFormat::Json => generate_json_report(graph)?,
        ReportFormat::Csv => generate_csv_report(graph),
        ReportFormat::Dot => generate_dot_report(graph),
        ReportFormat::Markdown => generate_markdown_report(graph, seed),
    })
}

pub fn generate_text_report(graph: &SiteGraph, seed: &str) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                              LINKMAP SITE REPORT\n");
    report.push_str(RULE);
    report.push('\n');

    report.push_str(&format!("Seed:         {}\n", seed));
    report.push_str(&format!(
        "Generated:    {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str(&format!("Assets:       {}\n", graph.nodes.len()));
    for content_type in ContentType::ALL {
        report.push_str(&format!(
            "  {:<12}{}\n",
            content_type.as_str(),
            graph.count_of(content_type)
        ));
    }
    report.push_str(&format!("Links:        {}\n", graph.links.len()));
    report.push('\n');

    report.push_str(RULE);
    report.push_str("ASSETS\n");
    report.push_str(RULE);
    report.push('\n');

    if graph.nodes.is_empty() {
        report.push_str("  (empty)\n");
    }
    for (index, node) in graph.nodes.iter().enumerate() {
        report.push_str(&format!(
            "  #{:<4} {:<11} {}\n",
            index,
            node.content_type.as_str(),
            node.url
        ));
    }
    report.push('\n');

    report.push_str(RULE);
    report.push_str("LINKS\n");
    report.push_str(RULE);
    report.push('\n');

    if graph.links.is_empty() {
        report.push_str("  (none)\n");
    }
    for link in &graph.links {
        let source = graph.url_of(link.source).map(extract_url_path).unwrap_or_default();
        let target = graph.url_of(link.target).map(extract_url_path).unwrap_or_default();
        report.push_str(&format!(
            "  #{} {} → #{} {}  x{}\n",
            link.source, source, link.target, target, link.weight
        ));
    }
    report.push('\n');

    report
}

pub fn generate_json_report(graph: &SiteGraph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(graph)
}

/// One row per link, with both indices and URLs.
pub fn generate_csv_report(graph: &SiteGraph) -> String {
    let mut report = String::from("source,target,source_url,target_url,weight\n");

    for link in &graph.links {
        report.push_str(&format!(
            "{},{},{},{},{}\n",
            link.source,
            link.target,
            csv_field(graph.url_of(link.source).unwrap_or_default()),
            csv_field(graph.url_of(link.target).unwrap_or_default()),
            link.weight
        ));
    }

    report
}

/// Graphviz rendering; node labels are URLs, edge labels are weights.
pub fn generate_dot_report(graph: &SiteGraph) -> String {
    let mut digraph: DiGraph<String, usize> = DiGraph::new();

    let indices: Vec<_> = graph
        .nodes
        .iter()
        .map(|node| digraph.add_node(node.url.clone()))
        .collect();

    for link in &graph.links {
        if let (Some(&source), Some(&target)) = (indices.get(link.source), indices.get(link.target)) {
            digraph.add_edge(source, target, link.weight);
        }
    }

    format!("{}", Dot::with_config(&digraph, &[]))
}

pub fn generate_markdown_report(graph: &SiteGraph, seed: &str) -> String {
    let mut report = String::new();

    report.push_str("# Site map\n\n");
    report.push_str(&format!("Seed: `{}`\n\n", seed));

    report.push_str("| Type | Count |\n|------|-------|\n");
    for content_type in ContentType::ALL {
        report.push_str(&format!(
            "| {} | {} |\n",
            content_type.as_str(),
            graph.count_of(content_type)
        ));
    }
    report.push('\n');

    report.push_str("## Assets\n\n");
    report.push_str("| # | Type | URL |\n|---|------|-----|\n");
    for (index, node) in graph.nodes.iter().enumerate() {
        report.push_str(&format!(
            "| {} | {} | {} |\n",
            index,
            node.content_type.as_str(),
            markdown_cell(&node.url)
        ));
    }
    report.push('\n');

    report.push_str("## Links\n\n");
    report.push_str("| Source | Target | Weight |\n|--------|--------|--------|\n");
    for link in &graph.links {
        report.push_str(&format!(
            "| {} | {} | {} |\n",
            link.source, link.target, link.weight
        ));
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn markdown_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
