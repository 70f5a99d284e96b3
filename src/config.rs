use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Default backend origin the dev server proxies to.
pub const DEFAULT_BACKEND: &str = "http://localhost:19527";

/// A framework integration plugin activated by the dev server.
///
/// Activation takes no arguments; the host tool wires the plugin into its
/// own transform pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plugin {
    Vue,
}

impl Plugin {
    /// Stable identifier used on the wire and in log output
    pub fn id(&self) -> &'static str {
        match self {
            Plugin::Vue => "vue",
        }
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single reverse-proxy rule: requests whose path starts with the route's
/// prefix are forwarded to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRoute {
    /// Upstream origin to forward matching requests to
    pub target: Url,
    /// Whether the forwarded Host header is rewritten to the target authority
    #[serde(default)]
    pub change_origin: bool,
}

impl ProxyRoute {
    /// Creates a route to `target` with Host-header rewriting enabled
    pub fn to_backend(target: Url) -> Self {
        Self {
            target,
            change_origin: true,
        }
    }
}

/// Dev-server configuration: plugin activations plus proxy routes keyed by
/// path prefix.
///
/// The value is constructed once, read once by the host tool at startup, and
/// never mutated afterwards. Route prefixes are unique by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevServerConfig {
    /// Ordered plugin activations
    #[serde(default)]
    pub plugins: Vec<Plugin>,
    /// Proxy routes keyed by request path prefix
    #[serde(default)]
    pub proxy: BTreeMap<String, ProxyRoute>,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        let backend = Url::parse(DEFAULT_BACKEND).expect("default backend origin is well-formed");

        let mut proxy = BTreeMap::new();
        proxy.insert("/api".to_string(), ProxyRoute::to_backend(backend.clone()));
        proxy.insert("/analysis".to_string(), ProxyRoute::to_backend(backend));

        Self {
            plugins: vec![Plugin::Vue],
            proxy,
        }
    }
}

impl DevServerConfig {
    /// Creates the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a proxy route, rejecting duplicate or malformed prefixes
    pub fn insert_route(&mut self, prefix: &str, route: ProxyRoute) -> Result<(), ConfigError> {
        if !prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix(prefix.to_string()));
        }
        if self.proxy.contains_key(prefix) {
            return Err(ConfigError::DuplicateRoute(prefix.to_string()));
        }
        check_target(prefix, &route.target).map_err(|reason| ConfigError::InvalidTarget {
            target: route.target.to_string(),
            reason,
        })?;
        self.proxy.insert(prefix.to_string(), route);
        Ok(())
    }

    /// Points every declared route at a new backend origin
    pub fn set_backend(&mut self, target: &Url) {
        for route in self.proxy.values_mut() {
            route.target = target.clone();
        }
    }

    /// Validates the configuration, collecting every problem found
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (prefix, route) in &self.proxy {
            if !prefix.starts_with('/') {
                errors.push(format!(
                    "Route prefix '{prefix}' must start with '/'"
                ));
            }
            if let Err(reason) = check_target(prefix, &route.target) {
                errors.push(reason);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Targets must be origin-form http/https URLs: scheme + authority only, so
/// that forwarding can append the request path unchanged.
fn check_target(prefix: &str, target: &Url) -> Result<(), String> {
    if !matches!(target.scheme(), "http" | "https") {
        return Err(format!(
            "Route '{prefix}': target '{target}' must use http or https"
        ));
    }
    if target.host_str().is_none() {
        return Err(format!("Route '{prefix}': target '{target}' has no host"));
    }
    if target.path() != "/" || target.query().is_some() || target.fragment().is_some() {
        return Err(format!(
            "Route '{prefix}': target '{target}' must be an origin without path or query"
        ));
    }
    if !target.username().is_empty() || target.password().is_some() {
        return Err(format!(
            "Route '{prefix}': target '{target}' must not carry credentials"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_declared_routes() {
        let config = DevServerConfig::default();

        let api = config.proxy.get("/api").expect("missing /api route");
        assert_eq!(api.target.as_str(), "http://localhost:19527/");
        assert!(api.change_origin);

        let analysis = config.proxy.get("/analysis").expect("missing /analysis route");
        assert_eq!(analysis.target.as_str(), "http://localhost:19527/");
        assert!(analysis.change_origin);
    }

    #[test]
    fn default_config_has_single_plugin_and_two_routes() {
        let config = DevServerConfig::default();
        assert_eq!(config.plugins, vec![Plugin::Vue]);
        assert_eq!(config.proxy.len(), 2);

        let prefixes: Vec<&str> = config.proxy.keys().map(String::as_str).collect();
        assert_eq!(prefixes, vec!["/analysis", "/api"]);
    }

    #[test]
    fn evaluation_is_idempotent() {
        assert_eq!(DevServerConfig::new(), DevServerConfig::new());
    }

    #[test]
    fn serde_round_trip_preserves_value() {
        let config = DevServerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: DevServerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn wire_format_uses_camel_case_change_origin() {
        let config = DevServerConfig::default();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["proxy"]["/api"]["changeOrigin"], true);
        assert_eq!(
            value["proxy"]["/api"]["target"],
            "http://localhost:19527/"
        );
        assert_eq!(value["plugins"][0], "vue");
    }

    #[test]
    fn change_origin_defaults_to_false_on_the_wire() {
        let json = r#"{"proxy":{"/api":{"target":"http://localhost:19527"}}}"#;
        let config: DevServerConfig = serde_json::from_str(json).unwrap();
        assert!(!config.proxy["/api"].change_origin);
    }

    #[test]
    fn insert_route_rejects_duplicate_prefix() {
        let mut config = DevServerConfig::default();
        let route = ProxyRoute::to_backend(Url::parse(DEFAULT_BACKEND).unwrap());
        let err = config.insert_route("/api", route).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRoute(p) if p == "/api"));
    }

    #[test]
    fn insert_route_rejects_unrooted_prefix() {
        let mut config = DevServerConfig::default();
        let route = ProxyRoute::to_backend(Url::parse(DEFAULT_BACKEND).unwrap());
        let err = config.insert_route("api", route).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPrefix(p) if p == "api"));
    }

    #[test]
    fn validate_rejects_target_with_path() {
        let mut config = DevServerConfig::default();
        config.proxy.get_mut("/api").unwrap().target =
            Url::parse("http://localhost:19527/base").unwrap();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("/api"));
        assert!(errors[0].contains("origin"));
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let mut config = DevServerConfig::default();
        config.proxy.get_mut("/api").unwrap().target = Url::parse("ftp://localhost").unwrap();

        let errors = config.validate().unwrap_err();
        assert!(errors[0].contains("http or https"));
    }

    #[test]
    fn set_backend_retargets_every_route() {
        let mut config = DevServerConfig::default();
        let target = Url::parse("http://127.0.0.1:8080").unwrap();
        config.set_backend(&target);

        assert!(config.proxy.values().all(|r| r.target == target));
        assert!(config.validate().is_ok());
    }
}
