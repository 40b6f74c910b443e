//! Routes and request handlers.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::analysis::GeminiClient;
use crate::intake::ImageUpload;
use crate::report::{sectionize, ReportSection};
use crate::server::error::{ApiError, ServerError};
use crate::server::health::HealthHandler;
use crate::server::page::{Notice, PageView, Preview};

/// Room for multipart boundaries and the notes field on top of the image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared, read-only state for all handlers.
#[derive(Clone)]
pub struct AppState {
    client: Arc<GeminiClient>,
    health: Arc<HealthHandler>,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new(client: GeminiClient, max_upload_bytes: usize) -> Self {
        let health = HealthHandler::new(client.model(), client.is_configured());
        Self {
            client: Arc::new(client),
            health: Arc::new(health),
            max_upload_bytes,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_page))
        .route("/api/analyze", post(analyze_api))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Fields read from the upload form.
struct UploadForm {
    image: Option<Vec<u8>>,
    notes: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ServerError> {
    let mut form = UploadForm {
        image: None,
        notes: None,
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => form.image = Some(field.bytes().await?.to_vec()),
            Some("notes") => form.notes = Some(field.text().await?),
            other => tracing::debug!(field = ?other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn intake(form: &mut UploadForm, limit: usize) -> Result<ImageUpload, ServerError> {
    let bytes = form.image.take().ok_or(ServerError::MissingImage)?;
    Ok(ImageUpload::from_bytes(bytes, limit)?)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(PageView::landing(state.client.model()).render())
}

async fn health(State(state): State<AppState>) -> Response {
    state.health.handle().await
}

async fn analyze_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let mut view = PageView {
        model: state.client.model().to_string(),
        ..PageView::default()
    };

    let mut form = match read_form(multipart).await {
        Ok(form) => form,
        Err(err) => return error_page(view, &request_id, err),
    };
    view.notes = form.notes.clone().unwrap_or_default();

    let image = match intake(&mut form, state.max_upload_bytes) {
        Ok(image) => image,
        Err(err) => return error_page(view, &request_id, err),
    };
    view.preview = Some(Preview {
        data_url: image.data_url(),
        caption: "Uploaded Image".to_string(),
    });

    match analyze(&state, &request_id, &image, form.notes.as_deref()).await {
        Ok(sections) => {
            view.sections = Some(sections);
            Html(view.render()).into_response()
        }
        Err(err) => error_page(view, &request_id, err),
    }
}

fn error_page(mut view: PageView, request_id: &str, err: ServerError) -> Response {
    tracing::warn!(request_id = %request_id, error = %err, "Analysis request failed");
    let status = err.status_code();
    view.notice = Some(Notice::Error(err.to_string()));
    (status, Html(view.render())).into_response()
}

#[derive(Debug, Serialize)]
pub struct ImageInfo {
    pub format: &'static str,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: String,
    pub model: String,
    pub image: ImageInfo,
    pub sections: Vec<ReportSection>,
}

async fn analyze_api(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let tag = |error: ServerError| {
        tracing::warn!(request_id = %request_id, error = %error, "Analysis request failed");
        ApiError {
            error,
            request_id: request_id.clone(),
        }
    };

    let mut form = read_form(multipart).await.map_err(tag)?;
    let image = intake(&mut form, state.max_upload_bytes).map_err(tag)?;
    let sections = analyze(&state, &request_id, &image, form.notes.as_deref())
        .await
        .map_err(tag)?;

    Ok(Json(AnalyzeResponse {
        request_id,
        model: state.client.model().to_string(),
        image: ImageInfo {
            format: image.format_name(),
            width: image.width(),
            height: image.height(),
        },
        sections,
    }))
}

/// One model call, then sectioning. Errors are never retried.
async fn analyze(
    state: &AppState,
    request_id: &str,
    image: &ImageUpload,
    notes: Option<&str>,
) -> Result<Vec<ReportSection>, ServerError> {
    tracing::info!(
        request_id = %request_id,
        format = image.format_name(),
        width = image.width(),
        height = image.height(),
        "Analyzing image"
    );

    let raw = state.client.analyze(image, notes).await?;
    let sections = sectionize(&raw);

    tracing::info!(
        request_id = %request_id,
        sections = sections.len(),
        "Report ready"
    );
    Ok(sections)
}
