//! Forward DNS lookups.

use std::collections::HashMap;
use std::net::{IpAddr, ToSocketAddrs};

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("lookup {host}: {source}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("lookup {0}: no addresses returned")]
    NoAddress(String),
}

/// Resolve a hostname to IP addresses.
pub trait Resolver {
    /// All addresses for `host`, in resolver order. Never empty on success.
    fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError>;

    /// First address for `host`.
    fn lookup_first(&self, host: &str) -> Result<IpAddr, ResolveError> {
        self.lookup(host)?
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::NoAddress(host.to_string()))
    }
}

/// Resolver backed by the system's name service (hosts file included).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
        let addrs = (host, 0)
            .to_socket_addrs()
            .map_err(|source| ResolveError::Lookup {
                host: host.to_string(),
                source,
            })?;
        let mut ips: Vec<IpAddr> = Vec::new();
        for addr in addrs {
            if !ips.contains(&addr.ip()) {
                ips.push(addr.ip());
            }
        }
        debug!(host, ?ips, "resolved");
        if ips.is_empty() {
            return Err(ResolveError::NoAddress(host.to_string()));
        }
        Ok(ips)
    }
}

/// Fixed hostname table. Unknown names fail to resolve.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    table: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `host` -> `ips` to the table.
    pub fn with(mut self, host: &str, ips: &[IpAddr]) -> Self {
        self.table.insert(host.to_ascii_lowercase(), ips.to_vec());
        self
    }
}

impl Resolver for StaticResolver {
    fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
        match self.table.get(&host.to_ascii_lowercase()) {
            Some(ips) if !ips.is_empty() => Ok(ips.clone()),
            Some(_) => Err(ResolveError::NoAddress(host.to_string())),
            None => Err(ResolveError::Lookup {
                host: host.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "unknown host"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_lookup_first() {
        let a: IpAddr = "10.1.1.1".parse().unwrap();
        let b: IpAddr = "10.1.1.2".parse().unwrap();
        let r = StaticResolver::new()
            .with("Example.test", &[a, b])
            .with("empty.test", &[]);
        assert_eq!(r.lookup_first("example.test").unwrap(), a);
        assert!(matches!(r.lookup("empty.test"), Err(ResolveError::NoAddress(_))));
        assert!(matches!(r.lookup("nope.test"), Err(ResolveError::Lookup { .. })));
    }
}
