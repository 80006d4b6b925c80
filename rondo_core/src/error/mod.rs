mod rondo;
mod protocol;
mod action;
mod invariant;
mod internal_error;
mod config;
mod render;

pub use self::rondo::*;
pub use protocol::*;
pub use action::*;
pub use invariant::*;
pub use internal_error::*;
pub use config::*;
pub use render::*;
