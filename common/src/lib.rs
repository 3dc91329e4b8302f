pub mod error;
pub mod group;
pub mod plot;
pub mod result;
