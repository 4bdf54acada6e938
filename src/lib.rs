//! # u-dispatch
//!
//! Depot dispatch optimization: decides, for each depot feeding a central
//! hub, whether it ships directly at a fixed cost or is visited by a pickup
//! vehicle on a multi-stop route, minimizing total cost under a per-route
//! driving-time budget and a route-count limit. The assignment and the
//! visiting order are chosen jointly by a mixed-integer linear program with
//! MTZ subtour elimination, solved exactly.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Depot, PickupRequest, PickupPlan, RateCard)
//! - [`distance`] — Travel time/distance matrix with mirroring and missing-entry policies
//! - [`network`] — Interned location set and configuration validation
//! - [`milp`] — Model construction, route reconstruction, and the [`milp::optimize`] entry point
//! - [`solver`] — Adapter over the MILP backend
//! - [`error`] — Crate-level error type

pub mod distance;
pub mod error;
pub mod milp;
pub mod models;
pub mod network;
pub mod solver;
