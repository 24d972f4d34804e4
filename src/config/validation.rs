//! Semantic configuration checks.
//!
//! Serde handles the syntactic layer; everything here is about values that
//! parse but cannot work: unparseable addresses, zero timeouts, and endpoints
//! that point a service back at its own listener.

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{EndpointConfig, ServiceConfig};

/// One failed semantic check, naming the offending setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub setting: String,
    pub message: String,
}

impl ValidationError {
    fn new(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.setting, self.message)
    }
}

/// Validate a loaded configuration, collecting every failure.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let local: Option<SocketAddr> = match config.listener.bind_address.parse() {
        Ok(addr) => Some(addr),
        Err(_) => {
            errors.push(ValidationError::new(
                "listener.bind_address",
                format!(
                    "not a valid socket address: {:?}",
                    config.listener.bind_address
                ),
            ));
            None
        }
    };

    check_endpoint("services.books", &config.services.books, local, &mut errors);
    check_endpoint(
        "services.reviews",
        &config.services.reviews,
        local,
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_endpoint(
    setting: &str,
    endpoint: &EndpointConfig,
    local: Option<SocketAddr>,
    errors: &mut Vec<ValidationError>,
) {
    // Unconfigured endpoints are allowed; each binary only uses the ones it
    // needs, and calls through an unconfigured one fail at the client.
    if endpoint.base_url.is_empty() {
        return;
    }

    let url = match Url::parse(&endpoint.base_url) {
        Ok(url) => url,
        Err(e) => {
            errors.push(ValidationError::new(
                format!("{setting}.base_url"),
                format!("not a valid URL ({e}): {:?}", endpoint.base_url),
            ));
            return;
        }
    };

    if endpoint.timeout_secs == 0 {
        errors.push(ValidationError::new(
            format!("{setting}.timeout_secs"),
            "must be greater than zero",
        ));
    }

    if let Some(local) = local {
        if points_at_self(&url, local) {
            errors.push(ValidationError::new(
                format!("{setting}.base_url"),
                format!(
                    "{} points at this service's own listener; it must name \
                     the downstream service",
                    endpoint.base_url
                ),
            ));
        }
    }
}

const LOCAL_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "0.0.0.0", "::1"];

/// True when a base URL would loop a request back into our own listener.
///
/// Port must match; the host counts as "self" when it is our exact listen
/// address, or any loopback spelling while we listen locally or on the
/// wildcard address.
pub fn points_at_self(base: &Url, local: SocketAddr) -> bool {
    if base.port_or_known_default() != Some(local.port()) {
        return false;
    }
    let Some(host) = base.host_str() else {
        return false;
    };
    if host == local.ip().to_string() {
        return true;
    }
    LOCAL_HOSTS.contains(&host) && (local.ip().is_loopback() || local.ip().is_unspecified())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn addr(s: &str) -> SocketAddr {
        s.parse().unwrap()
    }

    #[test]
    fn same_host_and_port_is_self() {
        assert!(points_at_self(&url("http://127.0.0.1:8000"), addr("127.0.0.1:8000")));
        assert!(points_at_self(&url("http://localhost:8000"), addr("127.0.0.1:8000")));
        assert!(points_at_self(&url("http://localhost:8000"), addr("0.0.0.0:8000")));
    }

    #[test]
    fn different_port_is_not_self() {
        assert!(!points_at_self(&url("http://127.0.0.1:8002"), addr("127.0.0.1:8000")));
        assert!(!points_at_self(&url("http://localhost:8002"), addr("0.0.0.0:8000")));
    }

    #[test]
    fn remote_host_is_not_self() {
        assert!(!points_at_self(&url("http://books.internal:8000"), addr("0.0.0.0:8000")));
    }

    #[test]
    fn default_http_port_is_compared() {
        assert!(points_at_self(&url("http://localhost"), addr("0.0.0.0:80")));
    }

    #[test]
    fn rejects_self_referential_endpoint() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:8000".into();
        config.services.books.base_url = "http://127.0.0.1:8000".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].setting, "services.books.base_url");
    }

    #[test]
    fn accepts_unconfigured_endpoints() {
        let config = ServiceConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_bad_url_and_zero_timeout() {
        let mut config = ServiceConfig::default();
        config.services.books.base_url = "not a url".into();
        config.services.reviews.base_url = "http://localhost:8003".into();
        config.services.reviews.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let settings: Vec<_> = errors.iter().map(|e| e.setting.as_str()).collect();
        assert!(settings.contains(&"services.books.base_url"));
        assert!(settings.contains(&"services.reviews.timeout_secs"));
    }
}
