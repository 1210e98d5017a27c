//! HTTP/1.x request-line parsing.
//!
//! Only the request line matters to the command surface: the method, the
//! path and the query string. Headers and bodies are read off the socket
//! and ignored.

use core::fmt;

/// Largest request head the firmware buffers before giving up.
pub const MAX_REQUEST_LEN: usize = 1024;

/// Why a request could not be understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Nothing was received.
    Empty,
    /// The request line is not `METHOD SP target SP version`.
    Malformed,
    /// The version is not HTTP/1.x.
    UnsupportedVersion,
    /// The request line did not end within [`MAX_REQUEST_LEN`] bytes.
    TooLong,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::Empty => write!(f, "Empty request"),
            RequestError::Malformed => write!(f, "Malformed request line"),
            RequestError::UnsupportedVersion => write!(f, "Unsupported HTTP version"),
            RequestError::TooLong => write!(f, "Request line too long"),
        }
    }
}

/// A parsed request line, borrowing from the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub method: &'a str,
    /// Path component of the target, always starting with `/`.
    pub path: &'a str,
    /// Text after `?`, if any, without the fragment.
    pub query: Option<&'a str>,
}

impl<'a> Request<'a> {
    /// Value of the first `name=value` pair in the query string.
    ///
    /// A bare `name` with no `=` yields `Some("")`. No percent-decoding is
    /// performed.
    pub fn query_param(&self, name: &str) -> Option<&'a str> {
        self.query?
            .split('&')
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// Parse the request line at the start of `bytes`.
///
/// `bytes` may hold the whole request head or only its first line; a
/// buffer without any line break is parsed as a complete line unless it has
/// already reached [`MAX_REQUEST_LEN`].
pub fn parse_request(bytes: &[u8]) -> Result<Request<'_>, RequestError> {
    if bytes.is_empty() {
        return Err(RequestError::Empty);
    }

    let line = match bytes.iter().position(|&b| b == b'\n') {
        Some(end) => &bytes[..end],
        None if bytes.len() >= MAX_REQUEST_LEN => return Err(RequestError::TooLong),
        None => bytes,
    };
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return Err(RequestError::Empty);
    }
    let line = core::str::from_utf8(line).map_err(|_| RequestError::Malformed)?;

    let mut parts = line.split(' ');
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(RequestError::Malformed);
    };

    if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(RequestError::Malformed);
    }
    if !target.starts_with('/') {
        return Err(RequestError::Malformed);
    }
    if !version.starts_with("HTTP/") {
        return Err(RequestError::Malformed);
    }
    if !version.starts_with("HTTP/1.") {
        return Err(RequestError::UnsupportedVersion);
    }

    let target = target.split_once('#').map_or(target, |(t, _)| t);
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };

    Ok(Request {
        method,
        path,
        query,
    })
}

/// `true` once `bytes` holds a full request head (terminated by an empty line).
pub fn head_complete(bytes: &[u8]) -> bool {
    bytes.windows(4).any(|w| w == b"\r\n\r\n") || bytes.windows(2).any(|w| w == b"\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_get() {
        let req = parse_request(b"GET / HTTP/1.1\r\nHost: 192.168.4.1\r\n\r\n").unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/");
        assert_eq!(req.query, None);
    }

    #[test]
    fn splits_query_and_drops_fragment() {
        let req = parse_request(b"GET /play?id=3#top HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(req.path, "/play");
        assert_eq!(req.query, Some("id=3"));
        assert_eq!(req.query_param("id"), Some("3"));
    }

    #[test]
    fn accepts_bare_newlines_and_other_methods() {
        let req = parse_request(b"POST /idle HTTP/1.1\n\n").unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/idle");
    }

    #[test]
    fn line_without_terminator_is_parsed() {
        let req = parse_request(b"GET /status HTTP/1.1").unwrap();
        assert_eq!(req.path, "/status");
    }

    #[test]
    fn query_param_picks_first_match() {
        let req = parse_request(b"GET /play?x=1&id=2&id=5&flag HTTP/1.1\r\n").unwrap();
        assert_eq!(req.query_param("id"), Some("2"));
        assert_eq!(req.query_param("x"), Some("1"));
        assert_eq!(req.query_param("flag"), Some(""));
        assert_eq!(req.query_param("missing"), None);
    }

    #[test]
    fn query_param_without_query() {
        let req = parse_request(b"GET /play HTTP/1.1\r\n").unwrap();
        assert_eq!(req.query_param("id"), None);
    }

    #[test]
    fn empty_query_string() {
        let req = parse_request(b"GET /play? HTTP/1.1\r\n").unwrap();
        assert_eq!(req.query, Some(""));
        assert_eq!(req.query_param("id"), None);
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_request(b""), Err(RequestError::Empty));
        assert_eq!(parse_request(b"\r\n"), Err(RequestError::Empty));
    }

    #[test]
    fn malformed_lines() {
        for line in [
            &b"GET\r\n"[..],
            b"GET /\r\n",
            b"GET / HTTP/1.1 extra\r\n",
            b"get / HTTP/1.1\r\n",
            b"GET index.html HTTP/1.1\r\n",
            b"GET  / HTTP/1.1\r\n",
            b"GET / FTP/1.0\r\n",
            b"GET /\xff HTTP/1.1\r\n",
        ] {
            assert_eq!(parse_request(line), Err(RequestError::Malformed), "{:?}", line);
        }
    }

    #[test]
    fn rejects_other_versions() {
        assert_eq!(
            parse_request(b"GET / HTTP/2.0\r\n"),
            Err(RequestError::UnsupportedVersion)
        );
        assert_eq!(
            parse_request(b"GET / HTTP/0.9\r\n"),
            Err(RequestError::UnsupportedVersion)
        );
    }

    #[test]
    fn unterminated_full_buffer_is_too_long() {
        let mut buf = [b'a'; MAX_REQUEST_LEN];
        buf[..4].copy_from_slice(b"GET ");
        assert_eq!(parse_request(&buf), Err(RequestError::TooLong));
    }

    #[test]
    fn head_completion() {
        assert!(!head_complete(b"GET / HTTP/1.1\r\nHost: x\r\n"));
        assert!(head_complete(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n"));
        assert!(head_complete(b"GET / HTTP/1.1\n\n"));
        assert!(!head_complete(b""));
    }
}
