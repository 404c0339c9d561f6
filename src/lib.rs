//! # slide-deck-core
//!
//! Core navigation and playback controller for browser slide decks.
//!
//! This crate provides platform-agnostic logic for:
//! - Navigating a fixed-size deck (step, jump, edge handling)
//! - Refreshing the slide indicator, progress bar and nav buttons
//! - Turning keyboard, swipe and anchor input into navigation
//! - Autoplay, fullscreen toggling and print layout switching
//!
//! The controller talks to its host only through the traits in [`host`], so
//! it runs the same against a live document (`web` feature) or a fake.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for config and state
//! - `toml` - Load [`DeckConfig`] from TOML
//! - `web` - Enable the web/WASM document backend and event wiring
//!
//! ## Example
//!
//! ```rust,ignore
//! use slide_deck_core::{DeckConfig, Direction, PresentationController};
//!
//! let mut controller = PresentationController::new(
//!     DeckConfig::with_total_slides(12),
//!     registry,
//!     scheduler,
//!     viewport,
//! )?;
//! controller.init();
//!
//! controller.change_slide(Direction::Next);
//! assert_eq!(controller.current_slide(), 2);
//!
//! // From your timer callback:
//! controller.fire_timer(handle);
//! ```

mod config;
mod controller;
pub mod host;
mod input;
mod print;
mod state;

#[cfg(test)]
mod test_support;

#[cfg(feature = "web")]
pub mod web;

pub use config::{ConfigError, DeckConfig, ElementIds};
pub use controller::PresentationController;
pub use host::{DeckElement, ElementRegistry, HostError, Scheduler, TimerHandle, TimerKind, Viewport};
pub use input::{anchor_target, Direction, KeyCommand, SwipeDetector};
pub use print::{apply_print_layout, restore_screen_layout, PRINT_LAYOUT};
pub use state::PresentationState;

#[cfg(feature = "web")]
pub use web::WebDeck;
