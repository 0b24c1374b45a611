//! Grid Snake - a grid-based snake game
//!
//! This library provides:
//! - The deterministic simulation core (game module)
//! - A terminal front end built on it (input, render, metrics and modes modules)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
