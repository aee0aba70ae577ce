//! HTTP surface: `/invocations` plus health probes

use actix_web::http::header::{ACCEPT, CONTENT_TYPE};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::{error, warn};

use crate::context::InvocationContext;
use crate::error::AppError;
use crate::services::{self, ModelServer};

const SERVICE_NAME: &str = "ncf-inference-adapter";

/// Shared, read-only handler state
pub struct AdapterState {
    pub model_server: Arc<dyn ModelServer>,
    pub rest_uri: String,
}

impl AdapterState {
    pub fn new(model_server: Arc<dyn ModelServer>, rest_uri: impl Into<String>) -> Self {
        Self {
            model_server,
            rest_uri: rest_uri.into(),
        }
    }
}

/// Register every route on an actix `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(invocations).service(ping).service(health);
}

#[post("/invocations")]
pub async fn invocations(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AdapterState>,
) -> Result<HttpResponse, AppError> {
    let ctx = InvocationContext {
        request_content_type: header_value(&req, CONTENT_TYPE.as_str()),
        accept_header: header_value(&req, ACCEPT.as_str()),
        rest_uri: state.rest_uri.clone(),
    };

    match services::handle(&body, &ctx, state.model_server.as_ref()).await {
        Ok(output) => Ok(HttpResponse::Ok()
            .content_type(output.content_type)
            .body(output.body)),
        Err(err) => {
            if err.is_upstream() || matches!(err, AppError::Internal(_)) {
                error!(error = %err, "Invocation failed");
            } else {
                warn!(error = %err, "Invocation rejected");
            }
            Err(err)
        }
    }
}

#[get("/ping")]
pub async fn ping() -> HttpResponse {
    healthy()
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    healthy()
}

fn healthy() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
