//! `ba-plan` — the allocation engine's orchestration layer.
//!
//! Wires candidate crops, the scenario fitness function, and a solver into
//! per-parcel optimization, then reconciles all parcels against one shared
//! basin water budget.
//!
//! # Two operations
//!
//! ```text
//! run_optimization(parcel, scenario, algorithm)  → OptimizationResult
//!   candidate crops + bonuses → ScenarioObjective → solver → rows
//!   → guardrail check (fall back to the baseline when violated)
//!
//! compute_basin_plan(scenario, algorithm)        → BasinPlan
//!   per-parcel results → aggregate totals → greedy correction loop:
//!   shift area from the thirstiest row to the thriftiest row of the
//!   most water-intensive parcel until the budget fits or the cap hits
//! ```
//!
//! Both consult an injected [`PlanCache`]; neither ever touches hidden
//! global state.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Evaluates independent parcels of the basin pass on      |
//! |            | Rayon's thread pool.                                    |
//! | `serde`    | Serde derives on plans, keys, and configuration.        |

pub mod basin;
pub mod cache;
pub mod config;
pub mod error;
pub mod observer;
pub mod providers;
pub mod runner;


pub use basin::BasinPlan;
pub use cache::{CacheKey, CacheScope, PlanCache};
pub use config::{EngineConfig, PlanContext, ReconcileParams};
pub use error::{PlanError, PlanResult};
pub use observer::{NoopObserver, PlanObserver};
pub use providers::{
    BonusProvider, CandidateProvider, CropCatalog, FixedBudget, InMemoryCatalog, NoBonus,
    StaticCandidates, WaterBudget,
};
pub use runner::Planner;
