//! HTTP airtime query server.
//!
//! An optional front end behind the `server` feature. The [`airtime`](crate::airtime)
//! core has no dependency on it and no wire protocol of its own.
//!
//! Serves forward and inverse airtime lookups as JSON over `tiny_http`.
//! Tables come from a shared [`TableCache`], so repeated queries for the
//! same radio settings reuse one table.
//!
//! # Endpoints
//!
//! ```text
//! GET /airtime?band=EU868&bw=125000&sf=7&payload=51
//! {"band":"EU868","bandwidth":"BW125","spreading_factor":"SF7","payload_size":51,"airtime_ms":118.0,"max_payload_size":222}
//!
//! GET /payload?band=EU868&bw=125000&sf=7&airtime_ms=118
//! {"band":"EU868","bandwidth":"BW125","spreading_factor":"SF7","airtime_ms":118.0,"min_payload_size":49,"max_payload_size":52}
//! ```
//!
//! `band` is optional and defaults to [`Band::default`]. Bad or missing
//! parameters return 400, queries outside a table return 422, both with an
//! `{"error": "..."}` body.

use crate::airtime::{AirtimeError, AirtimeTable, Band, TableCache, TableKey};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server};

/// Default port for the airtime server.
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration for the airtime server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    /// IP address to bind to (`None` for 0.0.0.0).
    pub bind_addr: Option<IpAddr>,
    /// Port to listen on.
    pub port: u16,
    /// Build every table before accepting requests.
    pub preload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: None,
            port: DEFAULT_PORT,
            preload: true,
        }
    }
}

impl ServerConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.port == 0 {
            return Err(ServerError::InvalidConfig("port must be greater than 0"));
        }
        Ok(())
    }

    /// Socket address string (host:port).
    pub fn address(&self) -> String {
        match self.bind_addr {
            Some(ip) => format!("{}:{}", ip, self.port),
            None => format!("0.0.0.0:{}", self.port),
        }
    }
}

/// Errors starting the server.
#[derive(Debug)]
pub enum ServerError {
    /// Invalid configuration parameter.
    InvalidConfig(&'static str),
    /// Failed to bind the listening socket.
    Bind(String),
    /// Failed to build tables at startup.
    Preload(AirtimeError),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid server config: {}", msg),
            Self::Bind(msg) => write!(f, "failed to bind: {}", msg),
            Self::Preload(e) => write!(f, "failed to preload tables: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

/// Response body for `/airtime`.
#[derive(Debug, Serialize)]
struct AirtimeResponse {
    #[serde(flatten)]
    key: TableKey,
    payload_size: usize,
    airtime_ms: f64,
    max_payload_size: usize,
}

/// Response body for `/payload`.
#[derive(Debug, Serialize)]
struct PayloadResponse {
    #[serde(flatten)]
    key: TableKey,
    airtime_ms: f64,
    min_payload_size: usize,
    max_payload_size: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Outcome of routing one request: status code and JSON body.
#[derive(Debug, PartialEq)]
pub(crate) struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(500, &e.to_string()),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self { status, body }
    }
}

impl From<AirtimeError> for Reply {
    fn from(e: AirtimeError) -> Self {
        let status = if e.is_invalid_parameter() { 400 } else { 422 };
        Reply::json(
            status,
            &ErrorResponse {
                error: e.to_string(),
            },
        )
    }
}

/// HTTP airtime server.
///
/// Runs in a background thread. Drop it to stop the server.
pub struct AirtimeServer {
    /// Server thread handle.
    handle: Option<thread::JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    address: String,
}

impl AirtimeServer {
    /// Start the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the socket cannot
    /// be bound, or preloading a table fails.
    pub fn start(config: ServerConfig, cache: Arc<TableCache>) -> Result<Self, ServerError> {
        config.validate()?;

        if config.preload {
            let count = cache.preload().map_err(ServerError::Preload)?;
            info!("Preloaded {} airtime tables", count);
        }

        let address = config.address();
        let server = Server::http(&address).map_err(|e| ServerError::Bind(e.to_string()))?;

        info!("Airtime server listening on http://{}/airtime", address);

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::spawn(move || {
            Self::run_server(server, cache, shutdown_clone);
        });

        Ok(Self {
            handle: Some(handle),
            shutdown,
            address,
        })
    }

    /// Address the server is bound to.
    pub fn address(&self) -> &str {
        &self.address
    }

    fn run_server(server: Server, cache: Arc<TableCache>, shutdown: Arc<AtomicBool>) {
        let content_type = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
            .expect("static header");
        let allow_get = Header::from_bytes(&b"Allow"[..], &b"GET"[..]).expect("static header");

        loop {
            // Acquire pairs with the Release store in stop()
            if shutdown.load(Ordering::Acquire) {
                info!("Airtime server shutting down");
                break;
            }

            match server.recv_timeout(Duration::from_millis(100)) {
                Ok(Some(request)) => {
                    if request.method() != &Method::Get {
                        let response = Response::from_string("Method Not Allowed")
                            .with_status_code(405)
                            .with_header(allow_get.clone());
                        let _ = request.respond(response);
                        continue;
                    }

                    let reply = route(&cache, request.url());
                    debug!("GET {} -> {}", request.url(), reply.status);

                    let response = Response::from_string(reply.body)
                        .with_header(content_type.clone())
                        .with_status_code(reply.status);
                    if let Err(e) = request.respond(response) {
                        warn!("Failed to send response: {}", e);
                    }
                }
                Ok(None) => {
                    // Timeout, check shutdown flag and continue
                }
                Err(e) => {
                    error!("Server error: {}", e);
                    break;
                }
            }
        }
    }

    /// Stop the server.
    ///
    /// Note: May take up to 100ms due to polling interval.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for AirtimeServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Dispatch a request URL to its handler.
pub(crate) fn route(cache: &TableCache, url: &str) -> Reply {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    };
    let params = parse_query(query);

    match path.trim_end_matches('/') {
        "/airtime" => handle_airtime(cache, &params),
        "/payload" => handle_payload(cache, &params),
        _ => Reply::error(404, "not found"),
    }
}

fn handle_airtime(cache: &TableCache, params: &HashMap<&str, &str>) -> Reply {
    let table = match lookup_table(cache, params) {
        Ok(table) => table,
        Err(reply) => return reply,
    };
    let payload_size = match required::<usize>(params, "payload") {
        Ok(v) => v,
        Err(reply) => return reply,
    };

    match table.estimate_airtime_ms(payload_size) {
        Ok(airtime_ms) => Reply::json(
            200,
            &AirtimeResponse {
                key: table.key(),
                payload_size,
                airtime_ms,
                max_payload_size: table.max_payload_size(),
            },
        ),
        Err(e) => e.into(),
    }
}

fn handle_payload(cache: &TableCache, params: &HashMap<&str, &str>) -> Reply {
    let table = match lookup_table(cache, params) {
        Ok(table) => table,
        Err(reply) => return reply,
    };
    let airtime_ms = match required::<f64>(params, "airtime_ms") {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        Ok(_) => return Reply::error(400, "airtime_ms must be a non-negative number"),
        Err(reply) => return reply,
    };

    match table.max_payload_size_for_airtime(airtime_ms) {
        Ok(max_payload_size) => Reply::json(
            200,
            &PayloadResponse {
                key: table.key(),
                airtime_ms,
                min_payload_size: table.min_payload_size_for_airtime(airtime_ms),
                max_payload_size,
            },
        ),
        Err(e) => e.into(),
    }
}

fn lookup_table(
    cache: &TableCache,
    params: &HashMap<&str, &str>,
) -> Result<Arc<AirtimeTable>, Reply> {
    let band = match params.get("band") {
        Some(s) => s.parse::<Band>().map_err(|e| Reply::error(400, &e.to_string()))?,
        None => Band::default(),
    };
    let bw = required::<u32>(params, "bw")?;
    let sf = required::<u32>(params, "sf")?;
    cache.get_table(band, bw, sf).map_err(Reply::from)
}

fn required<T: std::str::FromStr>(params: &HashMap<&str, &str>, name: &str) -> Result<T, Reply> {
    let raw = params
        .get(name)
        .ok_or_else(|| Reply::error(400, &format!("missing parameter: {}", name)))?;
    raw.parse::<T>()
        .map_err(|_| Reply::error(400, &format!("invalid parameter {}: {:?}", name, raw)))
}

/// Split `a=1&b=2` into pairs. No percent-decoding; values are plain tokens.
fn parse_query(query: &str) -> HashMap<&str, &str> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .collect()
}
