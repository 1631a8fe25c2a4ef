//! Request routing
//!
//! Classifies a request path into one of the server's fixed routes and runs
//! the matching handler. Matching compares whole path segments, so
//! `/filesystem` or `/a/echo/b` do not hit the file or echo routes.

pub mod echo;
pub mod files;
pub mod user_agent;

use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::storage::FileStore;

/// The route a request path resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Root,
    /// `/files/{name}`; everything after `files/`, decoded
    Files(String),
    /// `/echo/{message}`; the decoded second segment
    Echo(String),
    /// `/user-agent`
    UserAgent,
    NotFound,
}

impl Route {
    pub fn resolve(request: &Request) -> Self {
        let segments = request.path_segments();

        match segments.as_slice() {
            [] => Route::Root,
            [first, rest @ ..] if first == "files" && !rest.is_empty() => {
                Route::Files(rest.join("/"))
            }
            [first, message, ..] if first == "echo" => Route::Echo(message.to_string()),
            [only] if only == "user-agent" => Route::UserAgent,
            _ => Route::NotFound,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Root => "root",
            Route::Files(_) => "files",
            Route::Echo(_) => "echo",
            Route::UserAgent => "user-agent",
            Route::NotFound => "not-found",
        }
    }
}

/// Dispatches requests to route handlers.
#[derive(Debug, Clone)]
pub struct Router {
    store: FileStore,
}

impl Router {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Produces exactly one response for `request`.
    pub async fn handle(&self, request: &Request) -> Response {
        let route = Route::resolve(request);

        tracing::debug!(
            method = request.method.as_str(),
            path = %request.path,
            route = route.name(),
            "Dispatching request"
        );

        match route {
            Route::Root => Response::empty(StatusCode::Ok),
            Route::Files(name) => match request.method {
                Method::GET => files::get(&self.store, &name).await,
                Method::POST => files::post(&self.store, &name, &request.body).await,
                _ => method_not_allowed("GET, POST"),
            },
            Route::Echo(message) => echo::respond(&message, request.header("Accept-Encoding")),
            Route::UserAgent => user_agent::respond(request),
            Route::NotFound => Response::not_found(),
        }
    }
}

fn method_not_allowed(allow: &str) -> Response {
    ResponseBuilder::new(StatusCode::MethodNotAllowed)
        .header("Allow", allow)
        .build()
}
