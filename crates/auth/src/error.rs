/// Failure of a credential or revocation store call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "database")]
    #[error("postgres: {0}")]
    Postgres(#[from] rms_pg::PgErr),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The call was abandoned before the store answered.
    #[error("store call cancelled")]
    Cancelled,
}

/// Caller-facing failure of an authentication operation.
///
/// Messages are fixed strings; storage and signing details are logged
/// where the failure is classified and never carried in the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("user not found")]
    NotFound,
    #[error("invalid credentials")]
    Unauthenticated,
    #[error("{0}")]
    Internal(&'static str),
    #[error("request cancelled")]
    Cancelled,
}

#[cfg(feature = "server")]
impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cancelled => StatusCode::REQUEST_TIMEOUT,
        }
    }
}
