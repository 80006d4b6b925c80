pub mod setup;
pub mod plots;
pub mod series;
pub mod driver;
