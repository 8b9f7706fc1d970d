use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;

/// Server settings. Every flag falls back to an environment variable, and a
/// `.env` file is loaded before parsing.
#[derive(Debug, Clone, Parser)]
#[command(name = "resale-server", version, about = "HTTP front-end for the resale profit calculator")]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Domain-verification file served verbatim
    #[arg(long, env = "VERIFY_FILE", default_value = "verification.txt")]
    pub verify_file: PathBuf,

    /// Path the verification file is served at
    #[arg(long, env = "VERIFY_ROUTE", default_value = "/verification.txt")]
    pub verify_route: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Route path, always with a leading slash.
    pub fn verify_route(&self) -> String {
        if self.verify_route.starts_with('/') {
            self.verify_route.clone()
        } else {
            format!("/{}", self.verify_route)
        }
    }

    /// Reject a verification route that would collide with the API routes
    /// or be read as a path parameter.
    pub fn validate(&self) -> anyhow::Result<()> {
        let route = self.verify_route();
        if route == "/" || route.ends_with('/') {
            bail!("VERIFY_ROUTE '{route}' must name a file");
        }
        if route == "/health" || route == "/v1" || route.starts_with("/v1/") {
            bail!("VERIFY_ROUTE '{route}' collides with a built-in route");
        }
        if route.contains(['{', '}', '*', ':']) || route.chars().any(char::is_whitespace) {
            bail!("VERIFY_ROUTE '{route}' must be a plain path");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::parse_from(["resale-server", "--verify-file", "v.txt"]);
        assert_eq!(cfg.verify_file, PathBuf::from("v.txt"));
        assert!(cfg.verify_route().starts_with('/'));
    }

    #[test]
    fn test_route_gets_leading_slash() {
        let cfg = Config::parse_from([
            "resale-server",
            "--verify-route",
            "tiktok-verify.txt",
            "--host",
            "127.0.0.1",
            "--port",
            "3000",
        ]);
        assert_eq!(cfg.verify_route(), "/tiktok-verify.txt");
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3000");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_colliding_routes_rejected() {
        for route in ["/health", "health", "/v1/calculate", "/{file}", "/files/*rest", "/"] {
            let cfg = Config::parse_from(["resale-server", "--verify-route", route]);
            assert!(cfg.validate().is_err(), "{route} should be rejected");
        }
    }
}
