use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

use crate::error::HttpError;
use crate::request::{HttpVersion, Method, Request, find_header};

const DEFAULT_MAX_HEAD_BYTES: usize = 8 * 1024;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// The receiving end handle of the connection.
pub struct HttpReceiver<R: AsyncRead + Unpin> {
    rx: BufReader<R>,
    max_head: usize,
    max_body: usize,
}

impl<R: AsyncRead + Unpin> HttpReceiver<R> {
    /// Creates a new `HttpReceiver` instance.
    ///
    /// # Arguments
    /// * `rx` - The underlying reader.
    pub(super) fn new(rx: R) -> Self {
        Self {
            rx: BufReader::new(rx),
            max_head: DEFAULT_MAX_HEAD_BYTES,
            max_body: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Overrides the default head/body size limits.
    pub fn with_limits(mut self, max_head: usize, max_body: usize) -> Self {
        self.max_head = max_head;
        self.max_body = max_body;
        self
    }

    /// Waits to receive the next request on the connection.
    ///
    /// # Returns
    /// `Ok(Some(request))` once a full request has been read.
    /// `Ok(None)` if the peer closed the connection between requests.
    ///
    /// # Errors
    /// `HttpError::Io` on transport failure; other variants on framing
    /// violations, after which the stream position is unreliable.
    pub async fn recv(&mut self) -> Result<Option<Request>, HttpError> {
        let mut head_bytes = 0;

        let Some(request_line) = self.read_line(&mut head_bytes).await? else {
            return Ok(None);
        };

        let (method, target, version) = parse_request_line(&request_line)?;

        let mut headers = Vec::new();
        loop {
            let Some(line) = self.read_line(&mut head_bytes).await? else {
                return Err(HttpError::BadRequest("connection closed mid-headers"));
            };

            if line.is_empty() {
                break;
            }

            headers.push(parse_header(&line)?);
        }

        let body = self.read_body(&headers).await?;

        Ok(Some(Request::new(method, target, version, headers, body)))
    }

    /// Reads one CRLF-terminated line, tracking the cumulative head size.
    async fn read_line(&mut self, head_bytes: &mut usize) -> Result<Option<String>, HttpError> {
        let mut line = String::new();
        let n = self.rx.read_line(&mut line).await?;

        if n == 0 {
            return Ok(None);
        }

        *head_bytes += n;
        if *head_bytes > self.max_head {
            return Err(HttpError::HeadTooLarge {
                limit: self.max_head,
            });
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        Ok(Some(line))
    }

    async fn read_body(&mut self, headers: &[(String, String)]) -> Result<Vec<u8>, HttpError> {
        if find_header(headers, "transfer-encoding").is_some() {
            return Err(HttpError::BadRequest("transfer-encoding is not supported"));
        }

        let Some(raw_len) = find_header(headers, "content-length") else {
            return Ok(Vec::new());
        };

        let len: usize = raw_len
            .trim()
            .parse()
            .map_err(|_| HttpError::BadRequest("invalid content-length"))?;

        if len > self.max_body {
            return Err(HttpError::BodyTooLarge {
                got: len,
                limit: self.max_body,
            });
        }

        let mut body = vec![0; len];
        self.rx.read_exact(&mut body).await?;
        Ok(body)
    }
}

fn parse_request_line(line: &str) -> Result<(Method, String, HttpVersion), HttpError> {
    let mut parts = line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(HttpError::BadRequest("malformed request line"));
    };

    let method = Method::parse(method).ok_or(HttpError::BadRequest("unrecognized method"))?;
    let version =
        HttpVersion::parse(version).ok_or(HttpError::BadRequest("unsupported http version"))?;

    Ok((method, target.to_string(), version))
}

fn parse_header(line: &str) -> Result<(String, String), HttpError> {
    let Some((name, value)) = line.split_once(':') else {
        return Err(HttpError::BadRequest("malformed header"));
    };

    if name.is_empty() || name.contains(' ') {
        return Err(HttpError::BadRequest("malformed header name"));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_line_parses() {
        let (method, target, version) = parse_request_line("POST /predict HTTP/1.1").unwrap();
        assert_eq!(method, Method::Post);
        assert_eq!(target, "/predict");
        assert_eq!(version, HttpVersion::Http11);
    }

    #[test]
    fn request_line_rejects_extra_tokens() {
        let err = parse_request_line("POST /predict HTTP/1.1 junk").unwrap_err();
        assert!(matches!(err, HttpError::BadRequest(_)));
    }

    #[test]
    fn request_line_rejects_unknown_method() {
        let err = parse_request_line("BREW /predict HTTP/1.1").unwrap_err();
        assert!(matches!(err, HttpError::BadRequest(_)));
    }

    #[test]
    fn header_parses_and_trims() {
        let (name, value) = parse_header("Content-Length:  42 ").unwrap();
        assert_eq!(name, "Content-Length");
        assert_eq!(value, "42");
    }

    #[test]
    fn header_without_colon_is_rejected() {
        assert!(matches!(
            parse_header("no colon here"),
            Err(HttpError::BadRequest(_))
        ));
    }
}
