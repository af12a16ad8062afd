// HTTP front end: the graph viewer at / and the crawl result at /graph.json

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use linkmap_scanner::SiteGraph;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeFile;

/// Built-in force-directed viewer, served when no `--index` file is given.
pub const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
struct AppState {
    graph_json: Arc<String>,
}

/// Routes for a finished crawl. The graph is serialized once up front.
pub fn router(graph: Arc<SiteGraph>, index: Option<PathBuf>) -> Result<Router> {
    let state = AppState {
        graph_json: Arc::new(graph.to_json().context("failed to serialize graph")?),
    };

    let router = Router::new().route("/graph.json", get(graph_json));
    let router = match index {
        Some(path) => router.route_service("/", ServeFile::new(path)),
        None => router.route("/", get(index_page)),
    };

    Ok(router.with_state(state))
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    axum::serve(listener, router)
        .await
        .context("web server stopped")
}

async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn graph_json(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.graph_json.as_ref().clone(),
    )
}
