//! Application services coordinating domain data and presentation views.

pub mod error;
pub mod tiles;
