//! UI serving route

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../ui/index.html");

/// GET /
///
/// Serves the grade table page; it loads its data from `/api/dados`.
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
