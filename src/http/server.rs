// HTTP/1.1 server - accept loop, request parsing, routing

use super::config::HttpConfig;
use super::error::{HttpError, HttpInitError};
use crate::api::{
    ChatRequest, Dispatcher, RecipeRequest, SearchRequest, StatusCheckCreate, StatusStore,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Parsed request head plus body
#[derive(Debug)]
struct Request {
    method: String,
    path: String,
    body: Vec<u8>,
}

/// Response ready for serialization to the wire
#[derive(Debug)]
struct Response {
    status: u16,
    body: Option<String>,
}

impl Response {
    fn json(status: u16, value: &impl Serialize) -> Self {
        let body = serde_json::to_string(value)
            .unwrap_or_else(|e| json!({ "success": false, "error": e.to_string() }).to_string());
        Self {
            status,
            body: Some(body),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, &json!({ "success": false, "error": message.into() }))
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }
}

/// HTTP server - owns the listener and routes requests into the dispatcher
pub struct HttpServer {
    listener: TcpListener,
    config: HttpConfig,
    dispatcher: Arc<Dispatcher>,
    status: Arc<StatusStore>,
}

impl HttpServer {
    /// Bind the listen socket
    pub async fn bind(
        config: HttpConfig,
        dispatcher: Arc<Dispatcher>,
        status: Arc<StatusStore>,
    ) -> Result<Self, HttpInitError> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(addr).await.map_err(|source| HttpInitError::Bind {
            addr: addr.to_string(),
            source,
        })?;

        if let Ok(local) = listener.local_addr() {
            info!("HTTP listening on {}", local);
        }

        Ok(Self {
            listener,
            config,
            dispatcher,
            status,
        })
    }

    /// Get local socket address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the accept loop. Per-connection failures are logged, never fatal.
    pub async fn run(self) -> Result<(), HttpError> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            let config = self.config.clone();
            let dispatcher = Arc::clone(&self.dispatcher);
            let status = Arc::clone(&self.status);

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer, config, dispatcher, status).await {
                    warn!(peer = %peer, error = %e, "failed to handle connection");
                }
            });
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    config: HttpConfig,
    dispatcher: Arc<Dispatcher>,
    status: Arc<StatusStore>,
) -> Result<(), HttpError> {
    let response = match read_request(&mut stream, &config).await {
        Ok(request) => {
            debug!(peer = %peer, method = %request.method, path = %request.path, "request received");
            route(&request, &dispatcher, &status).await
        }
        Err(HttpError::BodyTooLarge { got, limit }) => {
            warn!(peer = %peer, got = got, limit = limit, "request body too large");
            Response::error(413, "request body too large")
        }
        Err(HttpError::HeadTooLarge(limit)) => {
            warn!(peer = %peer, limit = limit, "request head too large");
            Response::error(431, "request head too large")
        }
        Err(HttpError::Malformed(reason)) => {
            warn!(peer = %peer, reason = %reason, "malformed request");
            Response::error(400, reason)
        }
        Err(e) => return Err(e),
    };

    write_response(&mut stream, &response).await?;
    stream.shutdown().await.ok();
    Ok(())
}

/// Read and parse one request from the stream
async fn read_request(stream: &mut TcpStream, config: &HttpConfig) -> Result<Request, HttpError> {
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    let mut chunk = [0u8; 4096];

    // Read until end of head
    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        if buf.len() > config.max_head_bytes {
            return Err(HttpError::HeadTooLarge(config.max_head_bytes));
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(HttpError::Malformed(
                "connection closed before request head".to_string(),
            ));
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = std::str::from_utf8(&buf[..head_end])
        .map_err(|_| HttpError::Malformed("request head is not valid UTF-8".to_string()))?;

    let mut lines = head.split("\r\n");
    let request_line = lines
        .next()
        .ok_or_else(|| HttpError::Malformed("missing request line".to_string()))?;

    let mut parts = request_line.split_whitespace();
    let method = parts
        .next()
        .ok_or_else(|| HttpError::Malformed("missing method".to_string()))?
        .to_string();
    let target = parts
        .next()
        .ok_or_else(|| HttpError::Malformed("missing request target".to_string()))?;
    let path = target.split('?').next().unwrap_or(target).to_string();

    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().map_err(|_| {
                    HttpError::Malformed("invalid Content-Length header".to_string())
                })?;
            }
        }
    }

    if content_length > config.max_body_bytes {
        return Err(HttpError::BodyTooLarge {
            got: content_length,
            limit: config.max_body_bytes,
        });
    }

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(HttpError::Malformed(
                "connection closed before full body".to_string(),
            ));
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok(Request { method, path, body })
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Response> {
    serde_json::from_slice(body)
        .map_err(|e| Response::error(400, format!("invalid request body: {}", e)))
}

/// Route a request to its handler. Agent-facing endpoints answer 200 with a
/// failure-shaped body on agent problems; protocol-level errors are reserved
/// for transport and capability-construction failures.
async fn route(request: &Request, dispatcher: &Dispatcher, status: &StatusStore) -> Response {
    // CORS preflight
    if request.method == "OPTIONS" {
        return Response::no_content();
    }

    let path = if request.path.len() > 1 {
        request.path.trim_end_matches('/')
    } else {
        request.path.as_str()
    };

    match (request.method.as_str(), path) {
        ("GET", "/api") => Response::json(200, &json!({ "message": "Hello World" })),

        ("POST", "/api/status") => match parse_body::<StatusCheckCreate>(&request.body) {
            Ok(input) => Response::json(200, &status.create(input).await),
            Err(response) => response,
        },

        ("GET", "/api/status") => Response::json(200, &status.list().await),

        ("POST", "/api/chat") => match parse_body::<ChatRequest>(&request.body) {
            Ok(body) => Response::json(200, &dispatcher.chat(body).await),
            Err(response) => response,
        },

        ("POST", "/api/search") => match parse_body::<SearchRequest>(&request.body) {
            Ok(body) => Response::json(200, &dispatcher.search(body).await),
            Err(response) => response,
        },

        ("POST", "/api/recipes/generate") => match parse_body::<RecipeRequest>(&request.body) {
            Ok(body) => Response::json(200, &dispatcher.generate_recipe(body).await),
            Err(response) => response,
        },

        ("GET", "/api/agents/capabilities") => match dispatcher.capabilities() {
            Ok(capabilities) => Response::json(200, &capabilities),
            Err(e) => Response::error(500, e.to_string()),
        },

        _ => Response::error(404, "not found"),
    }
}

async fn write_response(stream: &mut TcpStream, response: &Response) -> Result<(), HttpError> {
    let body = response.body.as_deref().unwrap_or("");
    let mut head = format!(
        "HTTP/1.1 {} {}\r\n",
        response.status,
        reason_phrase(response.status)
    );
    if response.body.is_some() {
        head.push_str("Content-Type: application/json\r\n");
    }
    head.push_str(&format!("Content-Length: {}\r\n", body.len()));
    head.push_str("Access-Control-Allow-Origin: *\r\n");
    head.push_str("Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n");
    head.push_str("Access-Control-Allow-Headers: *\r\n");
    head.push_str("Connection: close\r\n\r\n");

    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        413 => "Payload Too Large",
        431 => "Request Header Fields Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
