//! Listener settings for the Brankas Kita JSON API.

use clap::Args;

/// Address the API binds to.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// Socket address for binding. Bare IPv6 hosts are bracketed.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> ServerRuntimeConfig {
        ServerRuntimeConfig {
            host: host.to_owned(),
            port: 8698,
        }
    }

    #[test]
    fn ipv4_host_is_used_as_is() {
        assert_eq!(config("127.0.0.1").socket_addr(), "127.0.0.1:8698");
    }

    #[test]
    fn bare_ipv6_host_is_bracketed() {
        assert_eq!(config("::").socket_addr(), "[::]:8698");
        assert_eq!(config("[::1]").socket_addr(), "[::1]:8698");
    }
}
