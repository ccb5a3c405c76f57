//! Minimal HTTP/1.x request parsing and response writing.
//!
//! Only what a one-request-per-connection static server needs: every
//! response is sent as `HTTP/1.0` with `Connection: close`.

use std::io::{BufRead, Read, Write};

use chrono::{DateTime, Utc};

use crate::errors::RequestError;

/// Longest accepted request line or header line, in bytes.
pub const MAX_LINE: usize = 65536;
/// Most headers accepted on one request.
pub const MAX_HEADERS: usize = 100;

pub const SERVER_NAME: &str = concat!("hex3world-dev-server/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Other(String),
}

impl Method {
    fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Other(m) => m,
        }
    }
}

/// A parsed request head. Bodies are never read.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Request target exactly as received.
    pub target: String,
    /// Percent-decoded path with query and fragment removed.
    pub path: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    pub version: String,
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// Read a request line and headers up to the terminating blank line.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, RequestError> {
        let line = match read_line(reader)? {
            Some(line) => line,
            None => return Err(RequestError::ConnectionClosed),
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        let (method, target, version) = match parts.as_slice() {
            [m, t, v] => (*m, *t, *v),
            // HTTP/0.9 style "GET /path"
            [m, t] => (*m, *t, "HTTP/0.9"),
            _ => {
                return Err(RequestError::Malformed(format!(
                    "bad request line {:?}",
                    line
                )))
            }
        };
        if !version.starts_with("HTTP/") {
            return Err(RequestError::Malformed(format!(
                "bad request version {:?}",
                version
            )));
        }

        let mut headers = Vec::new();
        loop {
            let line = read_line(reader)?
                .ok_or_else(|| RequestError::Malformed("unterminated header block".to_string()))?;
            if line.is_empty() {
                break;
            }
            if headers.len() == MAX_HEADERS {
                return Err(RequestError::Malformed("too many headers".to_string()));
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| RequestError::Malformed(format!("bad header {:?}", line)))?;
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }

        let (path, query) = split_target(target);
        Ok(Self {
            method: Method::parse(method),
            target: target.to_string(),
            path,
            query,
            version: version.to_string(),
            headers,
        })
    }

    /// First header with this name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Read one CRLF- or LF-terminated line. `None` at clean end of stream.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, RequestError> {
    let mut buf = Vec::new();
    let n = reader
        .by_ref()
        .take(MAX_LINE as u64 + 1)
        .read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    if buf.len() > MAX_LINE {
        return Err(RequestError::LineTooLong { limit: MAX_LINE });
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| RequestError::Malformed("request head is not UTF-8".to_string()))
}

/// Split a request target into its decoded path and raw query.
fn split_target(target: &str) -> (String, Option<String>) {
    let without_fragment = target.split('#').next().unwrap_or_default();
    let (raw_path, query) = match without_fragment.split_once('?') {
        Some((p, q)) => (p, Some(q.to_string())),
        None => (without_fragment, None),
    };
    (percent_decode(raw_path), query)
}

/// Decode `%XX` escapes. Malformed escapes are kept literally and invalid
/// UTF-8 is replaced.
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode everything except unreserved characters and `/`.
pub fn percent_encode_path(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Escape text for inclusion in HTML element content or attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Format a timestamp as an RFC 7231 IMF-fixdate.
pub fn http_date(t: DateTime<Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date header (IMF-fixdate / RFC 2822 form).
pub fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: Self = Self(200);
    pub const MOVED_PERMANENTLY: Self = Self(301);
    pub const NOT_MODIFIED: Self = Self(304);
    pub const BAD_REQUEST: Self = Self(400);
    pub const NOT_FOUND: Self = Self(404);
    pub const REQUEST_HEADER_FIELDS_TOO_LARGE: Self = Self(431);
    pub const NOT_IMPLEMENTED: Self = Self(501);

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn reason(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            301 => "Moved Permanently",
            304 => "Not Modified",
            400 => "Bad Request",
            404 => "Not Found",
            431 => "Request Header Fields Too Large",
            501 => "Not Implemented",
            _ => "Unknown",
        }
    }

    /// Human readable explanation used in error pages.
    fn explain(&self) -> &'static str {
        match self.0 {
            400 => "Bad request syntax or unsupported method.",
            404 => "File not found.",
            431 => "Request line or header too large.",
            501 => "Server does not support this operation.",
            _ => "",
        }
    }
}

/// A complete response held in memory.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// `200 OK` with the given content type and body.
    pub fn ok(content_type: &str, body: Vec<u8>) -> Self {
        Self::new(StatusCode::OK)
            .with_header("Content-Type", content_type)
            .with_body(body)
    }

    /// An error page in the standard library handler's format.
    pub fn error(status: StatusCode) -> Self {
        let body = format!(
            "<!DOCTYPE HTML>\n\
             <html lang=\"en\">\n\
             \x20   <head>\n\
             \x20       <meta charset=\"utf-8\">\n\
             \x20       <title>Error response</title>\n\
             \x20   </head>\n\
             \x20   <body>\n\
             \x20       <h1>Error response</h1>\n\
             \x20       <p>Error code: {code}</p>\n\
             \x20       <p>Message: {reason}.</p>\n\
             \x20       <p>Error code explanation: {code} - {explain}</p>\n\
             \x20   </body>\n\
             </html>\n",
            code = status.as_u16(),
            reason = status.reason(),
            explain = status.explain(),
        );
        Self::new(status)
            .with_header("Content-Type", "text/html;charset=utf-8")
            .with_body(body.into_bytes())
    }

    pub fn redirect(location: &str) -> Self {
        Self::new(StatusCode::MOVED_PERMANENTLY).with_header("Location", location)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Replace any existing header of this name, or append it.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Serialize status line, headers and (unless `head_only`) the body.
    /// `Server`, `Date`, `Content-Length` and `Connection` are filled in
    /// here when the handler has not set them.
    pub fn write_to<W: Write>(&self, mut w: W, head_only: bool) -> std::io::Result<()> {
        write!(w, "HTTP/1.0 {} {}\r\n", self.status.as_u16(), self.status.reason())?;
        write!(w, "Server: {}\r\n", SERVER_NAME)?;
        write!(w, "Date: {}\r\n", http_date(Utc::now()))?;
        for (name, value) in &self.headers {
            write!(w, "{}: {}\r\n", name, value)?;
        }
        if self.header("Content-Length").is_none() {
            write!(w, "Content-Length: {}\r\n", self.body.len())?;
        }
        write!(w, "Connection: close\r\n\r\n")?;
        if !head_only {
            w.write_all(&self.body)?;
        }
        w.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(raw: &str) -> Result<Request, RequestError> {
        Request::read_from(&mut Cursor::new(raw.as_bytes().to_vec()))
    }

    #[test]
    fn parses_request_line_and_headers() {
        let req = parse(
            "GET /models/grass_hex.stl?v=2 HTTP/1.1\r\nHost: localhost\r\nOrigin: http://a\r\n\r\n",
        )
        .unwrap();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/models/grass_hex.stl");
        assert_eq!(req.query.as_deref(), Some("v=2"));
        assert_eq!(req.version, "HTTP/1.1");
        assert_eq!(req.header("host"), Some("localhost"));
    }

    #[test]
    fn decodes_percent_escapes() {
        let req = parse("GET /my%20file.html#top HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(req.path, "/my file.html");
        assert_eq!(req.query, None);
        assert_eq!(percent_decode("%zz%4"), "%zz%4");
        assert_eq!(percent_decode("%41%62"), "Ab");
    }

    #[test]
    fn empty_stream_is_closed_connection() {
        assert!(matches!(parse(""), Err(RequestError::ConnectionClosed)));
    }

    #[test]
    fn garbage_request_line_is_malformed() {
        assert!(matches!(parse("HELLO\r\n\r\n"), Err(RequestError::Malformed(_))));
        assert!(matches!(parse("GET / FTP/1.0\r\n\r\n"), Err(RequestError::Malformed(_))));
    }

    #[test]
    fn overlong_line_is_rejected() {
        let raw = format!("GET /{} HTTP/1.1\r\n\r\n", "a".repeat(MAX_LINE));
        assert!(matches!(parse(&raw), Err(RequestError::LineTooLong { .. })));
    }

    #[test]
    fn response_serialization() {
        let resp = Response::ok("text/plain", b"hi".to_vec());
        let mut out = Vec::new();
        resp.write_to(&mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Content-Length: 2\r\n"));
        assert!(text.ends_with("\r\n\r\nhi"));
    }

    #[test]
    fn head_only_omits_body() {
        let resp = Response::ok("text/plain", b"hi".to_vec());
        let mut out = Vec::new();
        resp.write_to(&mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Content-Length: 2\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn set_header_replaces() {
        let mut resp =
            Response::new(StatusCode::OK).with_header("access-control-allow-origin", "x");
        resp.set_header("Access-Control-Allow-Origin", "*");
        assert_eq!(resp.headers.len(), 1);
        assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));
    }

    #[test]
    fn http_date_round_trips_to_the_second() {
        let t = DateTime::parse_from_rfc3339("2024-03-01T12:34:56Z")
            .unwrap()
            .with_timezone(&Utc);
        let s = http_date(t);
        assert_eq!(s, "Fri, 01 Mar 2024 12:34:56 GMT");
        assert_eq!(parse_http_date(&s), Some(t));
    }

    #[test]
    fn encode_and_escape() {
        assert_eq!(percent_encode_path("a b/c.stl"), "a%20b/c.stl");
        assert_eq!(html_escape("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }
}
