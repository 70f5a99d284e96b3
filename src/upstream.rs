use crate::config::DevServerConfig;
use url::Url;

/// The forwarding decision the proxy layer must carry out for one request:
/// the absolute upstream URL and the Host header to send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    /// Absolute URL on the upstream origin, path preserved from the request
    pub url: Url,
    /// Effective Host header: target authority when the route rewrites the
    /// origin, the original host otherwise
    pub host: String,
}

impl DevServerConfig {
    /// Resolves a request path against the declared proxy routes.
    ///
    /// A route matches when the path starts with its prefix, taken literally.
    /// When prefixes nest, the longest match wins. Returns `None` when no
    /// route matches; the host tool then serves the request itself.
    ///
    /// Resolution is pure: no liveness check, no retry, no I/O.
    pub fn resolve_upstream(&self, path: &str, original_host: &str) -> Option<UpstreamRequest> {
        let (_, route) = self
            .proxy
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())?;

        // Targets are validated to origin-form, so joining the absolute
        // request path cannot clobber an upstream base path.
        let url = route.target.join(path).ok()?;

        let host = if route.change_origin {
            authority(&route.target)
        } else {
            original_host.to_string()
        };

        Some(UpstreamRequest { url, host })
    }
}

fn authority(target: &Url) -> String {
    let host = target.host_str().unwrap_or_default();
    match target.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
