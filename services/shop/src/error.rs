use axum::http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE};
use axum::response::{IntoResponse, Response};

/// Shop service domain error variants.
///
/// Absence and non-ownership share the same not-found variants, and unknown email
/// and wrong password share [`ShopError::Unauthorized`], so responses never reveal
/// which records exist.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("invalid id")]
    InvalidId,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("missing data")]
    MissingData,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("product not found")]
    ProductNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("email already in use")]
    EmailAlreadyExists,
    #[error("order already processed")]
    OrderAlreadyProcessed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ShopError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidId => "INVALID_ID",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::MissingData => "MISSING_DATA",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::OrderAlreadyProcessed => "ORDER_ALREADY_PROCESSED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId
            | Self::InvalidInput(_)
            | Self::MissingData
            | Self::OrderAlreadyProcessed => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ProductNotFound | Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Only 500s are logged here; TraceLayer already records every response status.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        let mut response = (status, axum::Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
