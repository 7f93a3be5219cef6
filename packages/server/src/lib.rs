//! Two-player grid battle server library.
//!
//! Participants connect over WebSocket, are paired first-come first-served,
//! and play turn-based shots against randomly placed fleets.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
