use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form, Json,
};
use ec_ui::{render_document, ExposureCheckController, FormInput, Phase};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckForm {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub blog_url: String,
}

pub async fn index() -> impl IntoResponse {
    Html(render_document(&ec_ui::page(&FormInput::default(), &Phase::Idle)))
}

/// One submit event: a fresh controller per request, rendered once settled.
pub async fn check(State(state): State<AppState>, Form(form): Form<CheckForm>) -> impl IntoResponse {
    debug!(keyword = %form.keyword, blog_url = %form.blog_url, "form submitted");
    let mut controller = ExposureCheckController::new(state.api.clone());
    controller.handle_submit(&form.keyword, &form.blog_url).await;
    Html(render_document(&controller.view()))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
