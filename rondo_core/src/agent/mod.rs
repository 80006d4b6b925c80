mod identifier;
mod policy;

pub use identifier::*;
pub use policy::*;
