//! Classic grid snake for the terminal.
//!
//! The game logic lives in [`game`] and is driven by [`engine::GameEngine`];
//! everything under [`renderer`] and [`ui`] only reads state.

pub mod config;
pub mod engine;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod schedule;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
