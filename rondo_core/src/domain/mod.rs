mod action;
mod reward;
mod scheme;

pub use action::*;
pub use reward::*;
pub use scheme::*;
