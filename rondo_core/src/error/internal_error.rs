use std::error::Error;
use std::fmt::Debug;
use crate::domain::Scheme;

/// Marker for errors defined by game rules, automatically implemented.
pub trait InternalGameError<S: Scheme>: Error + Clone + PartialEq + Debug + Send + Sync + 'static{

}


impl<T: Error + Clone + PartialEq + Debug + Send + Sync + 'static, S: Scheme> InternalGameError<S> for T{

}
