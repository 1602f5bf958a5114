mod node;
mod store;

pub use node::PackageNode;
pub use store::{Outcome, Store};
