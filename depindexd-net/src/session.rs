use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;

use depindexd_proto::MAX_LINE_LEN;
use depindexd_store::Store;
use tracing::{debug, info_span};

use crate::dispatch::dispatch;

/// Runs one connection's READING -> DISPATCHING -> WRITING state machine
/// to completion. Meant to be run on its own thread; holds no state beyond
/// its read buffer and the shared store handle.
pub fn handle_session(stream: TcpStream, store: Store) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let span = info_span!("session", peer = %peer);
    let _guard = span.enter();
    debug!("session started");

    let mut writer = match stream.try_clone() {
        Ok(writer) => writer,
        Err(error) => {
            debug!(%error, "could not clone socket, dropping connection");
            return;
        }
    };
    let mut reader = BufReader::new(stream);
    let mut line = Vec::with_capacity(128);

    loop {
        line.clear();
        // Bound each line read to MAX_LINE_LEN bytes. A line that has no
        // terminator within that bound (whether because the peer sent an
        // oversized line, or because it closed mid-line) comes back from
        // the bounded read without a trailing `\n`; parse_command already
        // treats that as a malformed line, so no special-casing is needed
        // here beyond the bound itself. Any bytes past the bound are left
        // for the next read and re-framed as whatever follows.
        let read_result = reader.by_ref().take(MAX_LINE_LEN as u64).read_until(b'\n', &mut line);

        match read_result {
            Ok(0) => {
                debug!("peer closed connection");
                break;
            }
            Ok(_) => {}
            Err(error) => {
                debug!(%error, "read error, closing session");
                break;
            }
        }

        let reply = dispatch(&line, &store);

        if let Err(error) = writer.write_all(reply.as_bytes()) {
            debug!(%error, "write error, closing session");
            break;
        }
    }

    debug!("session ended");
}
