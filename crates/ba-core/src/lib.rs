//! `ba-core` — foundational types for the `basin_alloc` allocation engine.
//!
//! This crate is a dependency of every other `ba-*` crate.  It intentionally
//! has no `ba-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `ParcelId`                                               |
//! | [`key`]      | `CropKey` canonicalization, `FALLOW`                     |
//! | [`scenario`] | `Scenario`, `Algorithm`, `SeasonSource`, `Projection`    |
//! | [`vector`]   | `AllocationVector`, `normalize`                          |
//! | [`rng`]      | `SolverRng` (seeded, derivable)                          |
//! | [`model`]    | `Crop`, `Parcel`, `CropAllocationRow`, `PlanTotals`, …   |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.         |

pub mod error;
pub mod ids;
pub mod key;
pub mod model;
pub mod rng;
pub mod scenario;
pub mod vector;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::ParcelId;
pub use key::{CropKey, FALLOW};
pub use model::{BaselineTotals, Crop, CropAllocationRow, OptimizationResult, Parcel, PlanTotals, SoilContext};
pub use rng::SolverRng;
pub use scenario::{Algorithm, Projection, Scenario, SeasonSource};
pub use vector::AllocationVector;
