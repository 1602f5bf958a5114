mod dispatch;
mod listener;
mod session;

pub use dispatch::dispatch;
pub use listener::{bind, run, serve, BACKLOG};
pub use session::handle_session;
