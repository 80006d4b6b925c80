mod scheduler;
mod round;
mod lifecycle;
mod state;
mod environment;
mod iter;
mod traits;
mod render;

pub use scheduler::*;
pub use round::*;
pub use lifecycle::*;
pub use state::*;
pub use environment::*;
pub use iter::*;
pub use traits::*;
pub use render::*;

#[cfg(test)]
mod tests;
