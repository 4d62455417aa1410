use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the API - Go to /docs for the Swagger documentation";

/// Interactive API documentation, served by the docs router.
pub const DOCS_PATH: &str = "/docs";

#[derive(Serialize)]
pub struct Welcome {
    pub data: &'static str,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub environment: &'static str,
    pub cache: &'static str,
}

/// Welcome payload in production, redirect to the docs everywhere else.
pub async fn root(State(state): State<AppState>) -> Response {
    if state.settings.app_environment.is_production() {
        Json(Welcome {
            data: WELCOME_MESSAGE,
        })
        .into_response()
    } else {
        Redirect::temporary(DOCS_PATH).into_response()
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        environment: state.settings.app_environment.as_str(),
        cache: if state.cache.is_closed() { "closed" } else { "open" },
    })
}
