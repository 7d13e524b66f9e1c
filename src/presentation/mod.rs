//! Presentation layer: askama views producing HTML fragments.

pub mod tile;
pub mod views;
