//! Request dispatch.
//!
//! A [`Dispatcher`] asks each special-case [`Responder`] whether it wants
//! the request and otherwise falls back to [`StaticFileResponder`]. Every
//! response leaving the dispatcher carries an allow-all CORS header.

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::errors::RequestError;
use crate::http::{
    html_escape, http_date, parse_http_date, percent_encode_path, Method, Request, Response,
    StatusCode,
};
use crate::mime::{guess_type, OCTET_STREAM};

pub const CORS_HEADER: &str = "Access-Control-Allow-Origin";

/// Files tried, in order, when a directory is requested.
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// A handler for a subset of requests.
pub trait Responder: Send + Sync {
    /// Whether this responder handles `req`.
    fn matches(&self, req: &Request) -> bool;

    /// Build the response for a request this responder matched.
    fn respond(&self, req: &Request) -> Response;
}

/// Map a decoded URL path onto a file under `root`.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment
/// but never climbs above `root`, and segments that are not a single plain
/// file name (drive prefixes, embedded separators) are ignored.
pub fn resolve_path(root: &Path, url_path: &str) -> PathBuf {
    let mut segments: Vec<&str> = Vec::new();
    for seg in url_path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => {
                let mut comps = Path::new(s).components();
                if matches!((comps.next(), comps.next()), (Some(Component::Normal(_)), None)) {
                    segments.push(s);
                }
            }
        }
    }
    segments.iter().fold(root.to_path_buf(), |p, s| p.join(s))
}

/// Serves files with a given extension as raw bytes, typed
/// `application/octet-stream`, with an explicit CORS header.
#[derive(Debug, Clone)]
pub struct BinaryAssetResponder {
    root: PathBuf,
    suffix: String,
}

impl BinaryAssetResponder {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            suffix: format!(".{}", extension.trim_start_matches('.')),
        }
    }
}

impl Responder for BinaryAssetResponder {
    fn matches(&self, req: &Request) -> bool {
        req.path.ends_with(&self.suffix)
    }

    fn respond(&self, req: &Request) -> Response {
        let file = resolve_path(&self.root, &req.path);
        match fs::read(&file) {
            Ok(bytes) => Response::ok(OCTET_STREAM, bytes).with_header(CORS_HEADER, "*"),
            Err(e) => {
                debug!(path = %file.display(), error = %e, "binary asset unavailable");
                Response::error(StatusCode::NOT_FOUND)
            }
        }
    }
}

/// Plain static file serving: files, index pages and directory listings.
#[derive(Debug, Clone)]
pub struct StaticFileResponder {
    root: PathBuf,
}

impl StaticFileResponder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn serve_file(&self, file: &Path, req: &Request) -> Response {
        let meta = match fs::metadata(file) {
            Ok(meta) if meta.is_file() => meta,
            _ => return Response::error(StatusCode::NOT_FOUND),
        };
        let modified: Option<DateTime<Utc>> = meta.modified().ok().map(DateTime::from);

        if let (Some(mtime), Some(since)) = (
            modified,
            req.header("If-Modified-Since").and_then(parse_http_date),
        ) {
            if req.header("If-None-Match").is_none() && mtime.timestamp() <= since.timestamp() {
                return Response::new(StatusCode::NOT_MODIFIED);
            }
        }

        let body = match fs::read(file) {
            Ok(body) => body,
            Err(e) => {
                debug!(path = %file.display(), error = %e, "read failed");
                return Response::error(StatusCode::NOT_FOUND);
            }
        };

        let mut resp = Response::ok(guess_type(file), body);
        if let Some(mtime) = modified {
            resp.set_header("Last-Modified", &http_date(mtime));
        }
        resp
    }

    fn list_directory(&self, dir: &Path, url_path: &str) -> Response {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return Response::error(StatusCode::NOT_FOUND),
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| {
                let mut name = e.file_name().to_string_lossy().into_owned();
                if e.path().is_dir() {
                    name.push('/');
                }
                name
            })
            .collect();
        names.sort_by_key(|n| n.to_lowercase());

        let title = format!("Directory listing for {}", html_escape(url_path));
        let mut html = format!(
            "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
        );
        for name in &names {
            html.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                html_escape(&percent_encode_path(name)),
                html_escape(name)
            ));
        }
        html.push_str("</ul>\n<hr>\n</body>\n</html>\n");

        Response::ok("text/html; charset=utf-8", html.into_bytes())
    }
}

impl Responder for StaticFileResponder {
    fn matches(&self, _req: &Request) -> bool {
        true
    }

    fn respond(&self, req: &Request) -> Response {
        let target = resolve_path(&self.root, &req.path);

        if target.is_dir() {
            if !req.path.ends_with('/') {
                let mut location = percent_encode_path(&format!("{}/", req.path));
                if let Some(q) = &req.query {
                    location.push('?');
                    location.push_str(q);
                }
                return Response::redirect(&location);
            }
            return match INDEX_FILES.iter().map(|i| target.join(i)).find(|p| p.is_file()) {
                Some(index) => self.serve_file(&index, req),
                None => self.list_directory(&target, &req.path),
            };
        }

        // a trailing slash names a directory, never a file
        if req.path.ends_with('/') {
            return Response::error(StatusCode::NOT_FOUND);
        }
        self.serve_file(&target, req)
    }
}

/// Routes requests to responders and stamps CORS on every response.
pub struct Dispatcher {
    routes: Vec<Box<dyn Responder>>,
    fallback: StaticFileResponder,
}

impl Dispatcher {
    /// Dispatcher serving `root`, with files ending in `.{binary_extension}`
    /// handled by [`BinaryAssetResponder`].
    pub fn new(root: impl Into<PathBuf>, binary_extension: &str) -> Self {
        let root = root.into();
        Self {
            routes: vec![Box::new(BinaryAssetResponder::new(root.clone(), binary_extension))],
            fallback: StaticFileResponder::new(root),
        }
    }

    /// Add a responder consulted before the existing ones.
    pub fn with_route(mut self, route: impl Responder + 'static) -> Self {
        self.routes.insert(0, Box::new(route));
        self
    }

    pub fn dispatch(&self, req: &Request) -> Response {
        let resp = match req.method {
            Method::Get | Method::Head => match self.routes.iter().find(|r| r.matches(req)) {
                Some(route) => route.respond(req),
                None => self.fallback.respond(req),
            },
            Method::Other(_) => Response::error(StatusCode::NOT_IMPLEMENTED),
        };
        with_cors(resp)
    }

    /// Response for a request that could not be parsed.
    pub fn reject(&self, err: &RequestError) -> Response {
        let status = match err {
            RequestError::LineTooLong { .. } => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        with_cors(Response::error(status))
    }
}

fn with_cors(mut resp: Response) -> Response {
    resp.set_header(CORS_HEADER, "*");
    resp
}
