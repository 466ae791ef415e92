use axum::{
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::http::response::{ApiResponse, BadRequest};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn index() -> &'static str {
    "route-gate"
}

pub async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn login_page() -> Html<&'static str> {
    Html("<!doctype html><title>Sign in</title><h1>Please sign in</h1>")
}

pub async fn dashboard() -> Html<&'static str> {
    Html("<!doctype html><title>Dashboard</title><h1>Dashboard</h1>")
}

pub async fn profile() -> ApiResponse {
    ApiResponse::success(json!({ "authenticated": true }))
}

pub async fn create_note(body: String) -> Response {
    let note = body.trim();
    if note.is_empty() {
        return BadRequest::new().message("note must not be empty").into_response();
    }

    ApiResponse::success(json!({ "note": note })).into_response()
}
