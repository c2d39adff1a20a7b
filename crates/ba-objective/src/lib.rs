//! `ba-objective` — the allocation fitness function.
//!
//! Scores one allocation vector for one parcel under one scenario.  Lower is
//! better.  The score is the scenario's objective term plus soft constraint
//! penalties; hard guardrails are enforced afterwards by the runner in
//! `ba-plan`, not here.
//!
//! The scoring entry point is the [`Objective`] trait so that solvers stay
//! generic over the function they minimize — tests substitute counting or
//! analytic objectives for the real [`ScenarioObjective`].

pub mod objective;
pub mod weights;


pub use objective::{Objective, ScenarioObjective};
pub use weights::PenaltyWeights;
