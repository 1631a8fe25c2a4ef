//! `/files/{name}` handlers

use crate::http::response::{Response, StatusCode};
use crate::storage::{FileStore, StorageError};

/// Serves a stored file. Any read failure is reported as 404.
pub async fn get(store: &FileStore, name: &str) -> Response {
    match store.read(name).await {
        Ok(contents) => Response::octet_stream(StatusCode::Ok, contents),
        Err(StorageError::InvalidName(name)) => {
            tracing::warn!(file = %name, "Rejected file name");
            Response::empty(StatusCode::BadRequest)
        }
        Err(e) => {
            tracing::warn!(file = %name, error = %e, "Failed to read stored file");
            Response::not_found()
        }
    }
}

/// Stores the request body and echoes it back with 201.
pub async fn post(store: &FileStore, name: &str, body: &[u8]) -> Response {
    match store.write(name, body).await {
        Ok(()) => {
            tracing::debug!(file = %name, bytes = body.len(), "Stored file written");
            Response::octet_stream(StatusCode::Created, body.to_vec())
        }
        Err(StorageError::InvalidName(name)) => {
            tracing::warn!(file = %name, "Rejected file name");
            Response::empty(StatusCode::BadRequest)
        }
        Err(e) => {
            tracing::error!(file = %name, error = %e, "Failed to write stored file");
            Response::internal_error()
        }
    }
}
