use std::borrow::Cow;
use std::collections::HashMap;

/// HTTP request methods.
///
/// Any syntactically valid method token is parsed. Routes decide which ones
/// they answer; the stored-file route answers GET and POST and rejects the
/// rest with 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other method token (TRACE, CONNECT, PURGE, ...)
    Other(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Header names are stored lower-cased; use [`Request::header`] for
/// case-insensitive lookup.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request-target exactly as sent (e.g. "/echo/abc?x=1")
    pub target: String,
    /// Normalized path: dot-segments resolved, query removed, still percent-encoded
    pub path: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers keyed by lower-cased name
    pub headers: HashMap<String, String>,
    /// Request body, framed by Content-Length
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string is a valid method token, `None` otherwise.
    /// Tokens other than the well-known methods become `Method::Other`.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), Some(Method::Other("get".to_string())));
    /// assert_eq!(Method::from_str("GE(T"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            other if is_token(other) => Some(Method::Other(other.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(token) => token,
        }
    }
}

/// RFC 7230 `token`: one or more visible ASCII characters excluding delimiters.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the request-target. The normalized path is derived from it in `build`.
    pub fn path(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key: String = key.into();
        self.headers.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let target = self.target.ok_or("path missing")?;
        let path = normalize_target(&target).ok_or("invalid path")?;

        Ok(Request {
            method: self.method.ok_or("method missing")?,
            target,
            path,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// The `User-Agent` header, or an empty string when the client sent none.
    pub fn user_agent(&self) -> &str {
        self.header("User-Agent").unwrap_or("")
    }

    /// Splits the normalized path into percent-decoded segments.
    ///
    /// The leading slash is dropped, so `/` yields no segments and
    /// `/files/` yields `["files", ""]`. A segment that does not decode to
    /// UTF-8 is returned as sent.
    pub fn path_segments(&self) -> Vec<Cow<'_, str>> {
        let trimmed = self.path.strip_prefix('/').unwrap_or(&self.path);
        if trimmed.is_empty() {
            return Vec::new();
        }

        trimmed
            .split('/')
            .map(|seg| urlencoding::decode(seg).unwrap_or(Cow::Borrowed(seg)))
            .collect()
    }
}

/// Resolves a request-target to its normalized path.
///
/// Accepts origin-form (`/a/b?q`) and absolute-form (`http://host/a/b`)
/// targets. Dot-segments are resolved the way a URL parser resolves them.
pub(crate) fn normalize_target(target: &str) -> Option<String> {
    let url = if target.starts_with('/') {
        url::Url::parse(&format!("http://localhost{}", target)).ok()?
    } else {
        let url = url::Url::parse(target).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        url
    };

    Some(url.path().to_string())
}
