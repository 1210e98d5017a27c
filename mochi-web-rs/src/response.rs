//! HTTP/1.1 responses and their serialization.

use core::fmt::Write as _;

use embedded_io_async::Write;
use heapless::String;

/// Capacity of a formatted (non-static) response body.
pub const TEXT_BODY_CAPACITY: usize = 96;

/// Status codes the command surface produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusCode {
    Ok,
    BadRequest,
    NotFound,
}

impl StatusCode {
    pub const fn code(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    pub const fn reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContentType {
    Html,
    Plain,
}

impl ContentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Plain => "text/plain",
        }
    }
}

/// Response body: borrowed text or a short formatted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    Borrowed(&'a str),
    Text(String<TEXT_BODY_CAPACITY>),
}

impl Body<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Body::Borrowed(s) => s,
            Body::Text(s) => s.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<'a> {
    pub status: StatusCode,
    pub content_type: ContentType,
    pub body: Body<'a>,
}

impl<'a> Response<'a> {
    /// 200 `text/html`.
    pub fn html(page: &'a str) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type: ContentType::Html,
            body: Body::Borrowed(page),
        }
    }

    /// `text/plain` with a fixed message.
    pub fn plain(status: StatusCode, message: &'a str) -> Self {
        Self {
            status,
            content_type: ContentType::Plain,
            body: Body::Borrowed(message),
        }
    }

    /// 200 `text/plain` with a formatted message.
    pub fn text(message: String<TEXT_BODY_CAPACITY>) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type: ContentType::Plain,
            body: Body::Text(message),
        }
    }

    /// 400 `Bad request`, sent when the request line cannot be parsed.
    pub fn bad_request() -> Self {
        Self::plain(StatusCode::BadRequest, "Bad request")
    }

    /// 404 `Not found`.
    pub fn not_found() -> Self {
        Self::plain(StatusCode::NotFound, "Not found")
    }
}

/// Status line and headers, terminated by the blank line.
pub fn format_head(response: &Response<'_>) -> String<128> {
    let mut head = String::new();
    // Longest possible head is 111 bytes.
    let _ = write!(
        head,
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status.code(),
        response.status.reason(),
        response.content_type.as_str(),
        response.body.as_str().len(),
    );
    head
}

/// Write `response` to `writer` and flush it.
pub async fn write_response<W>(writer: &mut W, response: &Response<'_>) -> Result<(), W::Error>
where
    W: Write,
{
    writer.write_all(format_head(response).as_bytes()).await?;
    writer.write_all(response.body.as_str().as_bytes()).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;
    use std::vec::Vec;

    use embassy_futures::block_on;
    use embedded_io_async::ErrorType;

    use super::*;

    /// Collects written bytes, accepting at most `chunk` bytes per call.
    struct Wire {
        out: Vec<u8>,
        chunk: usize,
        flushed: bool,
    }

    impl Wire {
        fn new(chunk: usize) -> Self {
            Self {
                out: Vec::new(),
                chunk,
                flushed: false,
            }
        }
    }

    impl ErrorType for Wire {
        type Error = Infallible;
    }

    impl Write for Wire {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            let n = buf.len().min(self.chunk);
            self.out.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        async fn flush(&mut self) -> Result<(), Infallible> {
            self.flushed = true;
            Ok(())
        }
    }

    #[test]
    fn head_for_plain_text() {
        let head = format_head(&Response::plain(StatusCode::Ok, "Idle"));
        assert_eq!(
            head.as_str(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 4\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn head_for_errors() {
        let head = format_head(&Response::not_found());
        assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(head.contains("Content-Length: 9\r\n"));

        let head = format_head(&Response::bad_request());
        assert!(head.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn html_content_type() {
        let head = format_head(&Response::html("<p>hi</p>"));
        assert!(head.contains("Content-Type: text/html\r\n"));
        assert!(head.contains("Content-Length: 9\r\n"));
    }

    #[test]
    fn writes_head_then_body_across_short_writes() {
        let mut body = String::new();
        body.push_str("Wink (Frame 1/4)").unwrap();
        let response = Response::text(body);

        let mut wire = Wire::new(7);
        block_on(write_response(&mut wire, &response)).unwrap();

        let text = core::str::from_utf8(&wire.out).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 16\r\n"));
        assert!(text.ends_with("\r\n\r\nWink (Frame 1/4)"));
        assert!(wire.flushed);
    }

    #[test]
    fn content_length_counts_bytes_not_chars() {
        let head = format_head(&Response::plain(StatusCode::Ok, "128×64"));
        assert!(head.contains("Content-Length: 7\r\n"));
    }
}
