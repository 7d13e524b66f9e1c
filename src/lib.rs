//! Tile card rendering: typed tile data in, escaped HTML fragments out.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
