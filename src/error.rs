use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl GatewayError {
    /// Errors a page render turns into its error card. The rest escape to
    /// the router as unexpected failures.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            GatewayError::Network(_) | GatewayError::Api { .. } | GatewayError::NotAuthenticated
        )
    }

    /// Toast text: `prefix` followed by the backend's own message, or the
    /// generic unexpected-error template.
    pub fn toast_text(&self, prefix: &str) -> String {
        if self.is_expected() {
            format!("{prefix}{self}")
        } else {
            format!("{}{}", crate::messages::UNEXPECTED, self)
        }
    }
}

impl From<gloo_net::Error> for GatewayError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => GatewayError::Decode(e.to_string()),
            other => GatewayError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Page not found: {0}")]
    UnknownPage(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Gateway failure while rendering: {0}")]
    Gateway(#[from] GatewayError),
}
