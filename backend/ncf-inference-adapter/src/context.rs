//! Per-invocation request metadata supplied by the hosting layer

/// Media type accepted on the inbound request and sent to the model server
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type, accept header and model server address for one invocation
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Raw `Content-Type` of the inbound request, if any
    pub request_content_type: Option<String>,
    /// Raw `Accept` header of the inbound request, if any
    pub accept_header: Option<String>,
    /// Model server invocation URI
    pub rest_uri: String,
}

impl InvocationContext {
    pub fn new(rest_uri: impl Into<String>) -> Self {
        Self {
            request_content_type: None,
            accept_header: None,
            rest_uri: rest_uri.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.request_content_type = Some(content_type.into());
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept_header = Some(accept.into());
        self
    }

    /// Content type of the adapter's reply: the accept header as given
    pub fn response_content_type(&self) -> String {
        self.accept_header
            .clone()
            .unwrap_or_else(|| JSON_CONTENT_TYPE.to_string())
    }
}
