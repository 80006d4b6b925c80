mod table;
mod signal;
mod policy;

pub use table::*;
pub use signal::*;
pub use policy::*;
