//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through [`GameController`] and reads back a
//! [`ViewModel`] every tick.

pub mod action;
pub mod config;
pub mod controller;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use controller::{EndReason, GameController, Phase, ViewModel};
pub use grid::{Cell, Grid};
pub use session::{GameSession, TickOutcome};
pub use snake::{CollisionType, Snake};
