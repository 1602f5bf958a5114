use depindexd_proto::{parse_command, Command, Reply};
use depindexd_store::{Outcome, Store};
use tracing::debug;

/// Turns one raw line (including its `\n`, if present) into a reply,
/// running the matching store operation along the way. This is the
/// seam between the wire protocol and the store: `ParseError`s never
/// reach the store, and store `Outcome`s never reach the codec.
pub fn dispatch(line: &[u8], store: &Store) -> Reply {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(error) => {
            debug!(?error, "rejected malformed command");
            return Reply::Error;
        }
    };

    match command {
        Command::Index { package, deps } => {
            let outcome = store.index(package.clone(), deps);
            debug!(verb = "INDEX", package = %package, ?outcome, "dispatched");
            reply_for(outcome)
        }
        Command::Remove { package } => {
            let outcome = store.remove(&package);
            debug!(verb = "REMOVE", package = %package, ?outcome, "dispatched");
            reply_for(outcome)
        }
        Command::Query { package } => {
            let outcome = store.query(&package);
            debug!(verb = "QUERY", package = %package, ?outcome, "dispatched");
            reply_for(outcome)
        }
    }
}

fn reply_for(outcome: Outcome) -> Reply {
    match outcome {
        Outcome::Ok => Reply::Ok,
        Outcome::Fail => Reply::Fail,
    }
}
