//! Homestead library crate: the farming simulation core.
//!
//! The binary crate (`main.rs`) runs the simulation headless.
//! This library crate exposes every domain module so that `tests/`
//! integration tests can drive the simulation without a window or GPU.

pub mod shared;
pub mod config;
pub mod calendar;
pub mod player;
pub mod farming;
pub mod world;
pub mod save;
pub mod data;
