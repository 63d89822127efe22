use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, Local};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    CalendarConfig, CalendarTemplate, CalendarWeek, ConfigError, ExportError, export_file_name,
    export_xlsx, generate,
};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// External text-generation service used for advisory suggestions.
///
/// Nothing in the generator depends on it; the API only relays prompts.
pub trait SuggestionProvider: Send + Sync {
    fn suggest(&self, prompt: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<RwLock<CalendarConfig>>,
    suggestions: Option<Arc<dyn SuggestionProvider>>,
}

impl AppState {
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            suggestions: None,
        }
    }

    pub fn with_shared(config: Arc<RwLock<CalendarConfig>>) -> Self {
        Self {
            config,
            suggestions: None,
        }
    }

    pub fn with_suggestions(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
        self.suggestions = Some(provider);
        self
    }

    fn current_config(&self) -> CalendarConfig {
        self.config.read().clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<ConfigError> for ApiError {
    fn from(value: ConfigError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(value: ExportError) -> Self {
        tracing::warn!(error = %value, "calendar export failed");
        ApiError::Internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
struct TemplateSummary {
    key: &'static str,
    description: &'static str,
}

#[derive(Debug, Deserialize)]
struct TemplateQuery {
    start_year: Option<i32>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(get_config).put(update_config))
        .route("/calendar", get(current_calendar))
        .route("/calendar/generate", post(generate_calendar))
        .route(
            "/calendar/export",
            get(export_current).post(export_calendar),
        )
        .route("/templates", get(list_templates))
        .route("/templates/:key", get(build_template))
        .route("/suggestions", post(suggest))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_config(State(state): State<AppState>) -> Json<CalendarConfig> {
    Json(state.current_config())
}

async fn update_config(
    State(state): State<AppState>,
    Json(config): Json<CalendarConfig>,
) -> Result<Json<CalendarConfig>, ApiError> {
    config.validate()?;
    *state.config.write() = config.clone();
    tracing::info!(academic_year = %config.academic_year, "calendar config replaced");
    Ok(Json(config))
}

async fn current_calendar(
    State(state): State<AppState>,
) -> Result<Json<Vec<CalendarWeek>>, ApiError> {
    let config = state.current_config();
    Ok(Json(generate(&config)?))
}

async fn generate_calendar(
    Json(config): Json<CalendarConfig>,
) -> Result<Json<Vec<CalendarWeek>>, ApiError> {
    Ok(Json(generate(&config)?))
}

async fn export_current(State(state): State<AppState>) -> Result<Response, ApiError> {
    let config = state.current_config();
    xlsx_response(&config)
}

async fn export_calendar(Json(config): Json<CalendarConfig>) -> Result<Response, ApiError> {
    xlsx_response(&config)
}

fn xlsx_response(config: &CalendarConfig) -> Result<Response, ApiError> {
    let weeks = generate(config)?;
    let bytes = export_xlsx(&weeks, config)?;
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(config));
    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, bytes).into_response())
}

async fn list_templates() -> Json<Vec<TemplateSummary>> {
    let templates = CalendarTemplate::variants()
        .into_iter()
        .map(|(key, description)| TemplateSummary { key, description })
        .collect();
    Json(templates)
}

async fn build_template(
    Path(key): Path<String>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<CalendarConfig>, ApiError> {
    let template = CalendarTemplate::from_str(&key)
        .map_err(|err| ApiError::not_found(err.to_string()))?;
    let start_year = query
        .start_year
        .unwrap_or_else(|| Local::now().date_naive().year());
    Ok(Json(template.build(start_year)))
}

async fn suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::invalid("prompt must not be empty"));
    }
    let Some(provider) = state.suggestions.clone() else {
        return Ok(Json(SuggestionResponse {
            success: false,
            data: None,
        }));
    };

    let outcome = tokio::task::spawn_blocking(move || provider.suggest(&request.prompt))
        .await
        .map_err(|err| ApiError::internal(err.to_string()))?;
    match outcome {
        Ok(text) => Ok(Json(SuggestionResponse {
            success: true,
            data: Some(text),
        })),
        Err(err) => {
            tracing::warn!(error = %err, "suggestion provider failed");
            Ok(Json(SuggestionResponse {
                success: false,
                data: None,
            }))
        }
    }
}
