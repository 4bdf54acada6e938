//! The dispatch optimization engine.
//!
//! Builds a mixed-integer linear program over three variable families
//! (direct-shipment choice, arc selection per route, MTZ positions),
//! solves it, and walks the arc selection back into ordered routes:
//!
//! - decision-variable registration
//! - constraint assembly (coverage, flow conservation, hub degree,
//!   anchors, fixed-decision pinning, subtour elimination, time budget)
//! - objective composition from shipment costs and rated edge costs
//! - route reconstruction with per-route-index arc matching
//!
//! [`optimize`] wires the pipeline together; everything else is internal.

mod constraints;
mod objective;
mod reconstruct;
pub(crate) mod variables;

use good_lp::ProblemVariables;
use tracing::{debug, info};

use crate::distance::{MissingEntryPolicy, TravelMatrix};
use crate::error::OptimizeError;
use crate::models::{PickupPlan, PickupRequest};
use crate::network::Network;
use crate::solver;

/// Optimizes one dispatch request into a pickup plan.
///
/// Builds the location set, prices all arcs, assembles and solves the
/// model, and reconstructs ordered routes. The model lives only for this
/// call; requests never share state.
///
/// # Errors
///
/// [`OptimizeError::Configuration`] for invalid input (before any model is
/// built), [`OptimizeError::Infeasible`] when the solver finds no optimal
/// assignment, and [`OptimizeError::Inconsistent`] if the solved arcs
/// cannot be walked into routes.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_dispatch::milp::optimize;
/// use u_dispatch::models::{Depot, PickupRequest};
/// use u_dispatch::distance::TravelRecord;
///
/// let depots = vec![Depot::new("A"), Depot::new("B")];
/// let costs = HashMap::from([("A".into(), 50.0), ("B".into(), 80.0)]);
/// let travel = vec![
///     TravelRecord::new("HUB", "A", 20.0),
///     TravelRecord::new("A", "B", 15.0),
///     TravelRecord::new("B", "HUB", 25.0),
/// ];
///
/// let request = PickupRequest::new("HUB", depots, costs, travel, 90.0, 1);
/// let plan = optimize(&request).unwrap();
/// assert_eq!(plan.total_cost(), 60.0);
/// assert!(plan.direct_shipments().is_empty());
/// ```
pub fn optimize(request: &PickupRequest) -> Result<PickupPlan, OptimizeError> {
    let network = Network::from_request(request)?;
    let matrix = TravelMatrix::from_records(network.labels(), request.travel(), request.mirror());

    if request.missing_policy() == MissingEntryPolicy::Reject {
        if let Some((i, j)) = matrix.first_missing() {
            return Err(OptimizeError::config(format!(
                "no driving entry from {} to {}",
                network.label(i),
                network.label(j)
            )));
        }
    }

    if network.num_depots() == 0 {
        return Ok(PickupPlan::empty());
    }

    let mut pv = ProblemVariables::new();
    let vars = variables::VariableSet::register(&mut pv, &network, request.max_routes());
    let constraints = constraints::assemble(&network, &matrix, &vars, request.time_budget());
    let objective = objective::compose(&network, &matrix, &vars, request.rates());
    debug!(
        variables = vars.num_variables(),
        constraints = constraints.len(),
        routes = vars.num_routes(),
        "model assembled"
    );

    let assignment = solver::solve_minimize(pv, objective, constraints, &vars)?;
    let plan = reconstruct::extract_plan(&network, &matrix, request.rates(), &assignment)?;
    info!(
        routes = plan.routes().len(),
        direct = plan.direct_shipments().len(),
        total_cost = plan.total_cost(),
        "dispatch plan ready"
    );
    Ok(plan)
}
