use std::net::{SocketAddr, TcpListener};
use std::thread;

use depindexd_base::{Config, Result};
use depindexd_store::Store;
use socket2::{Domain, Protocol, Socket, Type};
use tracing::{info, warn};

/// Accept queue capacity mandated by the protocol. The listener is pure
/// glue: it owns no business logic, only the accept loop and per-connection
/// thread spawn.
pub const BACKLOG: i32 = 128;

/// Binds and serves forever, spawning one detached thread per accepted
/// connection, each sharing `store`. Returns only if the initial bind
/// fails; once serving starts this does not return under normal operation.
pub fn run(config: &Config, store: Store) -> Result<()> {
    let listener = bind(config.bind_addr)?;
    info!(addr = %config.bind_addr, backlog = BACKLOG, "depindexd listening");
    serve(listener, store);
    Ok(())
}

/// Runs the accept loop against an already-bound listener. Split out from
/// `run` so tests can bind an ephemeral port (`127.0.0.1:0`), discover the
/// assigned address, and drive the server over real sockets.
pub fn serve(listener: TcpListener, store: Store) {
    for incoming in listener.incoming() {
        match incoming {
            Ok(stream) => {
                let store = store.clone();
                thread::spawn(move || crate::session::handle_session(stream, store));
            }
            Err(error) => {
                warn!(%error, "failed to accept connection");
            }
        }
    }
}

/// Builds the listening socket via `socket2` so `SO_REUSEADDR` and the
/// accept backlog can be set explicitly before `listen()`, rather than
/// relying on `std::net::TcpListener::bind`'s defaults.
pub fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let domain = if addr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;
    Ok(socket.into())
}
