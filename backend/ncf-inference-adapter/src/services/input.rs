//! Input normalization: content-type gate and body decoding

use crate::context::{InvocationContext, JSON_CONTENT_TYPE};
use crate::error::{AppError, Result};

/// Validate the declared content type and return the body as text, unmodified
pub fn process_input(body: &[u8], ctx: &InvocationContext) -> Result<String> {
    if ctx.request_content_type.as_deref() != Some(JSON_CONTENT_TYPE) {
        return Err(unsupported_content_type(
            ctx.request_content_type.as_deref(),
        ));
    }

    if body.is_empty() {
        return Ok(String::new());
    }

    std::str::from_utf8(body)
        .map(str::to_owned)
        .map_err(|e| AppError::InvalidEncoding(e.to_string()))
}

fn unsupported_content_type(content_type: Option<&str>) -> AppError {
    let message = serde_json::json!({
        "error": format!("unsupported content type {}", content_type.unwrap_or("unknown")),
    });
    AppError::UnsupportedContentType(message.to_string())
}
