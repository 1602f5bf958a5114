use std::net::SocketAddr;

/// Runtime configuration for the listener. Only the bind address is
/// exposed today; the accept queue backlog (128) is a protocol-level
/// constant rather than something operators are expected to tune, so it
/// lives in `depindexd-net` directly instead of here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0:8080".parse().expect("static default addr"),
        }
    }
}
