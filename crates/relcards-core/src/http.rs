//! Blocking HTTP GET via the curl crate (libcurl).
//!
//! Two shapes: a buffered GET for small JSON bodies, and a streaming GET that
//! hands each chunk to a sink and lets the sink stop the transfer.

use anyhow::{Context, Result};
use std::time::Duration;

/// Sent on every request; the GitHub API rejects requests without one.
pub const USER_AGENT: &str = concat!("relcards/", env!("CARGO_PKG_VERSION"));

/// Request header as `(name, value)`.
pub type Header = (&'static str, String);

/// Buffered response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

fn header_list(headers: &[Header]) -> Result<curl::easy::List> {
    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    Ok(list)
}

/// GET `url` and buffer the whole body. Any status is returned; only
/// transport failures are errors.
pub fn get(url: &str, headers: &[Header], timeout: Duration) -> Result<Response> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(USER_AGENT)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;
    if !headers.is_empty() {
        easy.http_headers(header_list(headers)?)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {url} failed"))?;
    }

    let status = easy.response_code().context("no response code")?;
    Ok(Response { status, body })
}

/// Why a streaming GET stopped early.
#[derive(Debug)]
pub enum StreamError<E> {
    /// The sink refused a chunk; the transfer was aborted.
    Sink(E),
    Curl(curl::Error),
    /// Final response had a non-2xx status.
    Http(u32),
}

impl<E> From<curl::Error> for StreamError<E> {
    fn from(e: curl::Error) -> Self {
        StreamError::Curl(e)
    }
}

/// GET `url`, passing each received chunk to `sink`. Follows redirects.
///
/// `stall_timeout` bounds the connect phase and any window with less than
/// 1 KiB/s of progress; there is no total deadline.
pub fn get_streaming<E, F>(
    url: &str,
    stall_timeout: Duration,
    mut sink: F,
) -> Result<u64, StreamError<E>>
where
    F: FnMut(&[u8]) -> Result<(), E>,
{
    let mut received = 0u64;
    let mut refused: Option<E> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(USER_AGENT)?;
    easy.fail_on_error(true)?;
    easy.connect_timeout(stall_timeout)?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(stall_timeout)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match sink(data) {
            Ok(()) => {
                received += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                refused = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = refused {
        return Err(StreamError::Sink(e));
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            let code = easy.response_code().unwrap_or(0);
            return Err(StreamError::Http(code));
        }
        return Err(StreamError::Curl(e));
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(StreamError::Http(code));
    }
    Ok(received)
}
