//! A server collects together all resources necessary to answer client
//! connections: its configuration and the shared dependency store. Wiring
//! those into a running listener is the only job of this crate; the
//! interesting work lives in `depindexd-proto`, `depindexd-store`, and
//! `depindexd-net`.

use depindexd_base::{Config, Result};
use depindexd_store::Store;

pub struct Server {
    config: Config,
    store: Store,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Server {
            config,
            store: Store::new(),
        }
    }

    /// Runs until the listener fails to bind; under normal operation this
    /// never returns.
    pub fn run(self) -> Result<()> {
        depindexd_net::run(&self.config, self.store)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn server_binds_an_ephemeral_port() {
        let config = Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
        };
        let server = Server::new(config);
        // Exercise construction only; `run` never returns on success so it
        // isn't exercised here. The bind/serve split in `depindexd-net` is
        // what gets driven end-to-end, in that crate's own tests.
        drop(server);
    }
}
