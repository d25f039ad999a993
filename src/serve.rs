//! Development server with live search.
//!
//! Built on `tiny_http`:
//!
//! - The gallery page rendered per request, so time labels follow the clock
//! - Static file serving from the build output directory
//! - Automatic `index.html` resolution for directories
//! - `POST /api/events` runs the search controller against the live store
//! - File watching and auto-rebuild (via `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Serve files             Reload content
//!    Answer events           Rebuild page
//!          │                       │
//!          └──────► GalleryStore ◄─┘
//! ```
//!
//! The event endpoint keeps no session: the page sends the current search
//! field value as `?q=`, and each request gets a fresh controller seeded
//! with it and the latest snapshot.

use crate::{
    build::render_index,
    config::SiteConfig,
    content::{GalleryState, GalleryStore},
    log,
    search::{Effect, SearchController, SearchEvent, SearchOptions},
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Method, Request, Response, Server};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Endpoint the page posts search events to
const EVENTS_PATH: &str = "/api/events";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server with optional file watching.
///
/// Blocks until Ctrl+C is received.
pub fn serve_site(config: &'static SiteConfig, store: Arc<GalleryStore>) -> Result<()> {
    let interface: IpAddr = config.serve.interface.parse()?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if config.serve.watch {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking(config, &store) {
                log!("watch"; "{err}");
            }
        });
    }

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config, &store) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// What a request resolves to.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    /// `POST /api/events`
    Events,
    /// The gallery page, rendered fresh for every request.
    Page,
    /// A file under the output directory.
    File(PathBuf),
    MethodNotAllowed,
    NotFound,
}

/// Resolve a decoded request path against the output directory.
///
/// Resolution order:
/// 1. `/api/events` → controller endpoint (POST only)
/// 2. `/` or `/index.html` → page rendered with the current time
/// 3. Exact file match → serve file
/// 4. Directory with index.html → serve index.html
/// 5. Nothing found → 404
fn route(method: &Method, path: &str, output: &Path) -> Route {
    if path == EVENTS_PATH {
        return match method {
            Method::Post => Route::Events,
            _ => Route::MethodNotAllowed,
        };
    }

    let relative = path.trim_matches('/');
    if relative.is_empty() || relative == "index.html" {
        return Route::Page;
    }

    let local_path = output.join(relative);
    if local_path.is_file() {
        return Route::File(local_path);
    }

    let index_path = local_path.join("index.html");
    if local_path.is_dir() && index_path.is_file() {
        return Route::File(index_path);
    }

    Route::NotFound
}

/// Handle a single HTTP request.
fn handle_request(mut request: Request, config: &SiteConfig, store: &GalleryStore) -> Result<()> {
    let (path, query) = split_url(request.url());

    match route(request.method(), &path, &config.build.output) {
        Route::Events => {
            let mut body = String::new();
            request
                .as_reader()
                .read_to_string(&mut body)
                .context("Failed to read request body")?;

            let query = query.unwrap_or_default();
            match answer_event(store.load(), config, &query, &body) {
                Ok(json) => respond(request, 200, json.into_bytes(), "application/json; charset=utf-8"),
                Err(message) => respond_text(request, 400, &message),
            }
        }
        Route::Page => {
            let html = render_index(&store.load(), config, Utc::now());
            respond(request, 200, html, "text/html; charset=utf-8")
        }
        Route::File(path) => serve_file(request, &path),
        Route::MethodNotAllowed => respond_text(request, 405, "405 Method Not Allowed"),
        Route::NotFound => respond_text(request, 404, "404 Not Found"),
    }
}

/// Split a request URL into its decoded path and decoded `q` parameter.
fn split_url(url: &str) -> (String, Option<String>) {
    let (raw_path, raw_query) = url.split_once('?').unwrap_or((url, ""));

    let path = urlencoding::decode(raw_path)
        .map(|s| s.into_owned())
        .unwrap_or_default();

    let query = raw_query
        .split('&')
        .find_map(|pair| pair.strip_prefix("q="))
        .map(|value| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value)
                .map(|s| s.into_owned())
                .unwrap_or(value)
        });

    (path, query)
}

/// Run one event through a controller seeded with `query`.
///
/// Returns the serialized effects, or a message for a malformed event.
fn answer_event(
    state: Arc<GalleryState>,
    config: &SiteConfig,
    query: &str,
    body: &str,
) -> std::result::Result<String, String> {
    let event: SearchEvent =
        serde_json::from_str(body).map_err(|err| format!("invalid event: {err}"))?;

    let mut controller =
        SearchController::new(state, SearchOptions::from(&config.search)).with_query(query);
    let effects: Vec<Effect> = controller.handle(event, Utc::now());

    serde_json::to_string(&effects).map_err(|err| err.to_string())
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    respond(request, 200, content, guess_content_type(path))
}

fn respond_text(request: Request, status: u16, text: &str) -> Result<()> {
    respond(request, status, text.as_bytes().to_vec(), "text/plain; charset=utf-8")
}

fn respond(request: Request, status: u16, body: Vec<u8>, content_type: &str) -> Result<()> {
    let header = Header::from_bytes("Content-Type", content_type)
        .map_err(|_| anyhow!("invalid content type: {content_type}"))?;
    let response = Response::from_data(body)
        .with_status_code(status)
        .with_header(header);
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        Some("txt") => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}
