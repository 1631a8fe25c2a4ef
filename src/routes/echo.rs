use crate::http::encoding::{gzip, negotiate, Encoding};
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Returns `message` as plain text, gzip-compressed when the client accepts it.
pub fn respond(message: &str, accept_encoding: Option<&str>) -> Response {
    match negotiate(accept_encoding) {
        Encoding::Gzip => match gzip(message.as_bytes()) {
            Ok(compressed) => ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", "text/plain")
                .header("Content-Encoding", Encoding::Gzip.as_str())
                .header("Content-Length", compressed.len().to_string())
                .body(compressed)
                .build(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to compress echo body");
                Response::internal_error()
            }
        },
        Encoding::Identity => Response::text(message),
    }
}
