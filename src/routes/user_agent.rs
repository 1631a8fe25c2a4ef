use crate::http::request::Request;
use crate::http::response::Response;

pub fn respond(request: &Request) -> Response {
    Response::text(request.user_agent())
}
