//! ドメインサービス

pub mod fleet_placer;

pub use fleet_placer::{FleetLayout, FleetPlacer, MAX_PLACEMENT_ATTEMPTS, place_fleet};
