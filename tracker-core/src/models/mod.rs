mod chat;
mod id;
mod note;
mod project;
mod task;
mod validate;

pub use chat::*;
pub use id::*;
pub use note::*;
pub use project::*;
pub use task::*;
pub use validate::resolve_limit;
