use crate::event::{ProxyRequest, ProxyResponse, StringMap};
use crate::handler::CONTENT_TYPE_JSON;
use bytes::BytesMut;
use http::StatusCode;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

const MAX_HEADERS: usize = 64;

/// Resource template reported for the root path
pub const ROOT_RESOURCE: &str = "/";
/// Resource template reported for every other path
pub const PROXY_RESOURCE: &str = "/{proxy+}";

#[derive(Debug, thiserror::Error)]
pub enum LocalProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP parsing error: {0}")]
    HttpParse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Incomplete request")]
    IncompleteRequest,
    #[error("Request exceeds {0} bytes")]
    RequestTooLarge(usize),
    #[error("Not supported: {0}")]
    Unsupported(String),
}

impl LocalProtocolError {
    /// Status to answer the client with, or `None` when the connection
    /// should just be closed
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Io(_) | Self::IncompleteRequest => None,
            Self::HttpParse(_) | Self::InvalidRequest(_) => Some(StatusCode::BAD_REQUEST),
            Self::RequestTooLarge(_) => Some(StatusCode::PAYLOAD_TOO_LARGE),
            Self::Unsupported(_) => Some(StatusCode::NOT_IMPLEMENTED),
        }
    }
}

/// Reads one HTTP/1.1 request from `stream` and converts it to a proxy event
pub async fn read_request<S>(
    stream: &mut S,
    buffer_size: usize,
    max_request_size: usize,
) -> Result<ProxyRequest, LocalProtocolError>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = BytesMut::with_capacity(buffer_size);

    loop {
        if let Some(request) = parse_request(&buffer, max_request_size)? {
            return Ok(request);
        }

        buffer.reserve(buffer_size);
        let n = stream.read_buf(&mut buffer).await?;
        if n == 0 {
            return Err(LocalProtocolError::IncompleteRequest);
        }
    }
}

/// Parses a buffered request
///
/// Returns `Ok(None)` while more bytes are needed.
pub fn parse_request(
    buf: &[u8],
    max_request_size: usize,
) -> Result<Option<ProxyRequest>, LocalProtocolError> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut req = httparse::Request::new(&mut headers);

    let head_len = match req.parse(buf) {
        Ok(httparse::Status::Complete(parsed_len)) => parsed_len,
        Ok(httparse::Status::Partial) => {
            if buf.len() >= max_request_size {
                return Err(LocalProtocolError::RequestTooLarge(max_request_size));
            }
            return Ok(None);
        }
        Err(e) => {
            return Err(LocalProtocolError::HttpParse(format!(
                "Failed to parse request head: {e}"
            )));
        }
    };

    let method = req
        .method
        .ok_or_else(|| LocalProtocolError::HttpParse("Missing method".to_string()))?;
    let target = req
        .path
        .ok_or_else(|| LocalProtocolError::HttpParse("Missing request target".to_string()))?;

    let mut header_map = StringMap::new();
    let mut content_length: Option<usize> = None;
    for header in req.headers.iter() {
        let value = std::str::from_utf8(header.value).map_err(|_| {
            LocalProtocolError::InvalidRequest(format!("Header {} is not valid UTF-8", header.name))
        })?;

        if header.name.eq_ignore_ascii_case("transfer-encoding")
            && value.to_ascii_lowercase().contains("chunked")
        {
            return Err(LocalProtocolError::Unsupported(
                "chunked transfer encoding".to_string(),
            ));
        }
        if header.name.eq_ignore_ascii_case("content-length") {
            let length: usize = value.trim().parse().map_err(|_| {
                LocalProtocolError::InvalidRequest(format!("Invalid Content-Length: {value}"))
            })?;
            if content_length.is_some_and(|previous| previous != length) {
                return Err(LocalProtocolError::InvalidRequest(
                    "Conflicting Content-Length headers".to_string(),
                ));
            }
            content_length = Some(length);
        }

        header_map.insert(header.name.to_string(), value.to_string());
    }

    let total_len = head_len.saturating_add(content_length.unwrap_or(0));
    if total_len > max_request_size {
        return Err(LocalProtocolError::RequestTooLarge(max_request_size));
    }
    if buf.len() < total_len {
        return Ok(None);
    }

    let body = match &buf[head_len..total_len] {
        [] => None,
        bytes => Some(String::from_utf8(bytes.to_vec()).map_err(|_| {
            LocalProtocolError::InvalidRequest("Body is not valid UTF-8".to_string())
        })?),
    };

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };

    let query_string_parameters = query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    let mut request = ProxyRequest {
        path: path.to_string(),
        http_method: method.to_string(),
        headers: header_map,
        query_string_parameters,
        body,
        ..Default::default()
    };
    route(&mut request);

    Ok(Some(request))
}

/// Fills in the resource and path parameters the way the gateway's
/// catch-all routes would
fn route(request: &mut ProxyRequest) {
    let proxy = request.path.trim_start_matches('/');
    if proxy.is_empty() {
        request.resource = Some(ROOT_RESOURCE.to_string());
    } else {
        request
            .path_parameters
            .insert("proxy".to_string(), proxy.to_string());
        request.resource = Some(PROXY_RESOURCE.to_string());
    }
}

/// Renders a proxy response as an HTTP/1.1 response
pub fn encode_response(response: &ProxyResponse) -> Vec<u8> {
    let reason = StatusCode::from_u16(response.status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("");

    let mut head = format!("HTTP/1.1 {} {}\r\n", response.status_code, reason);
    for (name, value) in &response.headers {
        if name.eq_ignore_ascii_case("content-length") || name.eq_ignore_ascii_case("connection") {
            continue;
        }
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        response.body.len()
    ));

    let mut out = head.into_bytes();
    out.extend_from_slice(response.body.as_bytes());
    out
}

/// Builds the JSON error answer for a request the server could not accept
pub fn error_response(status: StatusCode, err: &LocalProtocolError) -> ProxyResponse {
    ProxyResponse {
        status_code: status.as_u16(),
        headers: StringMap::from([("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())]),
        body: serde_json::json!({ "error": err.to_string() }).to_string(),
    }
}
