//! Liveness probe logic.
//!
//! [`http_probe`] issues `GET {base_url}/health` over a fresh HTTP/1
//! connection. [`guarded_probe`] bounds any [`Probe`] with a timeout and
//! normalizes the result into a [`ProbeOutcome`].

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use http::header::{HOST, USER_AGENT};
use http::{Method, Request, Uri};
use http_body_util::Empty;
use tracing::debug;

use bankops_core::{Endpoint, ProbeOutcome};

/// Result of a single liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// The health endpoint returned 2xx.
    Healthy,
    /// The health endpoint answered with a non-2xx status.
    Unhealthy,
    /// The probe could not complete (connection error, timeout).
    Failed,
}

impl ProbeResult {
    pub fn is_healthy(self) -> bool {
        self == ProbeResult::Healthy
    }
}

/// Something that can check whether an endpoint is alive.
///
/// Implementations must not apply their own deadline; [`guarded_probe`]
/// owns the timeout.
pub trait Probe: Send + Sync + 'static {
    fn check(&self, endpoint: &Endpoint) -> impl Future<Output = ProbeResult> + Send;
}

/// Probes `GET {base_url}/health` over plain HTTP/1.1.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpProbe;

impl Probe for HttpProbe {
    fn check(&self, endpoint: &Endpoint) -> impl Future<Output = ProbeResult> + Send {
        let url = endpoint.health_url();
        async move { http_probe(&url).await }
    }
}

/// Run `probe` against `endpoint`, giving up after `timeout`.
///
/// Never fails: every error path yields `reachable = false`.
pub async fn guarded_probe<P: Probe>(
    probe: &P,
    endpoint: &Endpoint,
    timeout: Duration,
) -> ProbeOutcome {
    let result = match tokio::time::timeout(timeout, probe.check(endpoint)).await {
        Ok(result) => result,
        Err(_) => {
            debug!(endpoint = %endpoint.key, timeout_ms = timeout.as_millis() as u64, "health probe timed out");
            ProbeResult::Failed
        }
    };

    ProbeOutcome::new(&endpoint.key, result.is_healthy())
}

/// Perform an HTTP GET against a full health URL.
///
/// Returns `Healthy` for 2xx, `Unhealthy` for other statuses, and `Failed`
/// when the URL is unusable or the connection or request fails. The body is
/// never read.
pub async fn http_probe(url: &str) -> ProbeResult {
    let uri: Uri = match url.parse() {
        Ok(uri) => uri,
        Err(e) => {
            debug!(error = %e, %url, "health probe url invalid");
            return ProbeResult::Failed;
        }
    };

    if uri.scheme_str() != Some("http") {
        debug!(%uri, "health probe only supports plain http");
        return ProbeResult::Failed;
    }

    let Some(authority) = uri.authority().cloned() else {
        debug!(%uri, "health probe url has no authority");
        return ProbeResult::Failed;
    };
    let host = authority.host().trim_start_matches('[').trim_end_matches(']');
    let port = authority.port_u16().unwrap_or(80);

    let stream = match tokio::net::TcpStream::connect((host, port)).await {
        Ok(s) => s,
        Err(e) => {
            debug!(error = %e, %uri, "health probe connection failed");
            return ProbeResult::Failed;
        }
    };

    let io = hyper_util::rt::TokioIo::new(stream);
    let (mut sender, conn) = match hyper::client::conn::http1::handshake(io).await {
        Ok(pair) => pair,
        Err(e) => {
            debug!(error = %e, %uri, "health probe handshake failed");
            return ProbeResult::Failed;
        }
    };

    // Drive the connection in the background.
    tokio::spawn(async move {
        let _ = conn.await;
    });

    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    let req = match Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(HOST, authority.as_str())
        .header(USER_AGENT, "bankops-health/0.1")
        .body(Empty::<Bytes>::new())
    {
        Ok(req) => req,
        Err(e) => {
            debug!(error = %e, %uri, "health probe request invalid");
            return ProbeResult::Failed;
        }
    };

    match sender.send_request(req).await {
        Ok(resp) if resp.status().is_success() => ProbeResult::Healthy,
        Ok(resp) => {
            debug!(status = %resp.status(), %uri, "health probe non-2xx");
            ProbeResult::Unhealthy
        }
        Err(e) => {
            debug!(error = %e, %uri, "health probe request failed");
            ProbeResult::Failed
        }
    }
}
