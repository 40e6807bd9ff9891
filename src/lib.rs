//! Valley farm library crate: re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is a console front end over the same
//! plugins. Tests under `tests/` drive the farm through events without a
//! window, a terminal, or a live narrator.

pub mod shared;
pub mod input;
pub mod calendar;
pub mod farming;
pub mod economy;
pub mod narrative;
pub mod ui;
pub mod data;
pub mod session;
