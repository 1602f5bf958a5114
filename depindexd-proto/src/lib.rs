mod codec;
mod reply;

pub use codec::{parse_command, Command, ParseError};
pub use reply::Reply;

/// Maximum meaningful line length, in bytes, including the terminator.
/// Lines longer than this are treated the same as any other malformed
/// line by the session handler: `ERROR\n`, connection survives.
pub const MAX_LINE_LEN: usize = 1024;
