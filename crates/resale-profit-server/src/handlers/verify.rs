use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;

use crate::error::AppError;
use crate::state::AppState;

/// Serve the platform domain-verification file, or 404 when it is absent.
pub async fn verification_file(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = &state.config.verify_file;
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            bytes,
        )
            .into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(file = %path.display(), "verification file missing");
            Err(AppError::NotFound("verification file not found".into()))
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("reading {}", path.display()))
            .into()),
    }
}
