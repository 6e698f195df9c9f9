//! Request-line parsing and response composition.

/// Bytes read from a connection in a single call. Anything longer is truncated.
pub const READ_BUFFER_SIZE: usize = 4096;

/// The request line of one connection. Headers and body are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    pub method: String,
    /// Path token as received, query string included.
    pub path: String,
    /// Undecoded text after the first `?`, if any.
    pub query: Option<String>,
    pub protocol: String,
}

impl InboundRequest {
    /// Parse the first line of `raw`. Returns `None` when nothing was received.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let line_end = raw.iter().position(|&b| b == b'\n').unwrap_or(raw.len());
        let line = String::from_utf8_lossy(&raw[..line_end]);
        let mut parts = line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();
        let protocol = parts.next().unwrap_or_default().to_string();
        let query = path.split_once('?').map(|(_, q)| q.to_string());
        Some(Self {
            method,
            path,
            query,
            protocol,
        })
    }

    /// Everything after the literal `marker` (e.g. `?q=`) to the end of the path.
    ///
    /// No `&` splitting and no decoding happen here.
    pub fn param(&self, marker: &str) -> Option<&str> {
        self.path
            .find(marker)
            .map(|pos| &self.path[pos + marker.len()..])
    }
}

/// What a routed request produced, before it is put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    StaticAsset {
        body: Vec<u8>,
        content_type: &'static str,
        cors: bool,
    },
    Json(Vec<u8>),
    NotFound,
}

impl RouteOutcome {
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            _ => 200,
        }
    }

    /// Serialize into a complete response with an exact `Content-Length`.
    pub fn into_response(self) -> Vec<u8> {
        match self {
            Self::StaticAsset {
                body,
                content_type,
                cors,
            } => ok_response(content_type, cors, body),
            Self::Json(body) => ok_response("application/json", true, body),
            Self::NotFound => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_vec(),
        }
    }
}

fn ok_response(content_type: &str, cors: bool, body: Vec<u8>) -> Vec<u8> {
    let mut head = format!("HTTP/1.1 200 OK\r\nContent-Type: {}\r\n", content_type);
    if cors {
        head.push_str("Access-Control-Allow-Origin: *\r\n");
    }
    head.push_str(&format!("Content-Length: {}\r\n\r\n", body.len()));

    let mut response = head.into_bytes();
    response.extend_from_slice(&body);
    response
}
