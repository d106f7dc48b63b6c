//! AgriDoc application layer.
//!
//! Wires the persisted stores, settings and network services into one
//! [`AppContext`] and drives the screen flows from `agridoc-core` against
//! it. No rendering lives here; a host (desktop shell, web view, TUI) owns
//! the widgets and calls in.

mod backend;
mod context;
mod flows;
mod landing;
mod worker;

pub use backend::{Backend, PlaceLookup};
pub use context::{AppContext, AppError};
pub use landing::LandingHero;
pub use worker::Job;
