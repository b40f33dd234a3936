//! Index page
//!
//! Serves the HTML shell of the browser front-end.

use axum::{response::Html, routing::get, Router};

use crate::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
