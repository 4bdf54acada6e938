//! Domain model types for dispatch optimization.
//!
//! Provides the request/result surface of the crate: depot records with
//! manual decision overrides, the immutable per-call request object, edge
//! pricing rates, and the resulting pickup plan with its routes.

mod depot;
mod plan;
mod request;

pub use depot::{Depot, FixedDecision};
pub use plan::{DirectShipment, PickupPlan, Route, RouteLeg};
pub use request::{PickupRequest, RateCard};
