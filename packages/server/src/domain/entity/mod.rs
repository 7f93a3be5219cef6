//! Domain entities

pub mod board;
pub mod participant;
pub mod session;
pub mod ship;

pub use board::{CellView, Perspective, PlayerBoard, ShotMark, ShotReport};
pub use participant::Participant;
pub use session::{GameSession, GameStateSnapshot, Phase, ShotOutcome};
pub use ship::{Orientation, Ship};
