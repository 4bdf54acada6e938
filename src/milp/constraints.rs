//! Feasibility constraints of the dispatch model.

use good_lp::constraint::{eq, leq};
use good_lp::{Constraint, Expression};

use crate::distance::TravelMatrix;
use crate::models::FixedDecision;
use crate::network::{Network, HUB};

use super::variables::VariableSet;

/// Assembles the full constraint set.
///
/// In order: fixed-decision pinning, depot coverage, per-route flow
/// conservation, hub degree bounds, anchor edge pinning, MTZ subtour
/// elimination, and the per-route driving-time budget.
pub(crate) fn assemble(
    network: &Network,
    matrix: &TravelMatrix,
    vars: &VariableSet,
    time_budget: f64,
) -> Vec<Constraint> {
    let mut constraints = Vec::new();
    let n = network.num_locations();
    let num_routes = vars.num_routes();

    // Fixed-decision pinning. A depot chosen as start or end anchor must be
    // routed, so its ShipDirect override is not emitted.
    for d in network.depot_indices() {
        match network.fixed_decision(d) {
            FixedDecision::ShipDirect if !network.is_anchor(d) => {
                constraints.push(eq(vars.direct(d), 1.0));
            }
            FixedDecision::AwaitPickup => {
                constraints.push(eq(vars.direct(d), 0.0));
            }
            _ => {}
        }
    }

    // Coverage: each depot is shipped direct or entered by exactly one route.
    for d in network.depot_indices() {
        let mut lhs = Expression::default();
        lhs += vars.direct(d);
        for k in 0..num_routes {
            for j in 0..n {
                if let Some(link) = vars.link(j, d, k) {
                    lhs += link;
                }
            }
        }
        constraints.push(eq(lhs, 1.0));
    }

    // Flow conservation: a route entering a depot also leaves it.
    for d in network.depot_indices() {
        for k in 0..num_routes {
            let mut outgoing = Expression::default();
            let mut incoming = Expression::default();
            for j in 0..n {
                if let Some(link) = vars.link(d, j, k) {
                    outgoing += link;
                }
                if let Some(link) = vars.link(j, d, k) {
                    incoming += link;
                }
            }
            constraints.push(eq(outgoing, incoming));
        }
    }

    // Hub degree: at most `num_routes` departures, and as many returns as
    // departures.
    let mut hub_out = Expression::default();
    let mut hub_in = Expression::default();
    for k in 0..num_routes {
        for d in network.depot_indices() {
            if let Some(link) = vars.link(HUB, d, k) {
                hub_out += link;
            }
            if let Some(link) = vars.link(d, HUB, k) {
                hub_in += link;
            }
        }
    }
    constraints.push(leq(hub_out.clone(), num_routes as f64));
    constraints.push(eq(hub_out, hub_in));

    // Anchor pinning: a custom start is the first stop out of the hub, a
    // custom end is the last stop before it. Custom anchors are validated
    // to imply a single route.
    if network.start() != HUB {
        if let Some(link) = vars.link(HUB, network.start(), 0) {
            constraints.push(eq(link, 1.0));
        }
    }
    if network.end() != HUB {
        if let Some(link) = vars.link(network.end(), HUB, 0) {
            constraints.push(eq(link, 1.0));
        }
    }

    // Subtour elimination (MTZ): a selected arc i→j forces position[i] <
    // position[j], so no cycle can close among depots alone.
    let m = network.num_depots() as f64;
    for k in 0..num_routes {
        for i in network.depot_indices() {
            for j in network.depot_indices() {
                if let Some(link) = vars.link(i, j, k) {
                    let lhs = vars.position(i, k) - vars.position(j, k) + m * link;
                    constraints.push(leq(lhs, m - 1.0));
                }
            }
        }
    }

    // Per-route driving-time budget.
    for k in 0..num_routes {
        let mut route_time = Expression::default();
        for i in 0..n {
            for j in 0..n {
                if let Some(link) = vars.link(i, j, k) {
                    route_time += matrix.minutes(i, j) * link;
                }
            }
        }
        constraints.push(leq(route_time, time_budget));
    }

    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelRecord;
    use crate::models::{Depot, PickupRequest};
    use good_lp::ProblemVariables;
    use std::collections::HashMap;

    fn setup(
        depots: Vec<Depot>,
        max_routes: usize,
        start: Option<&str>,
        end: Option<&str>,
    ) -> (Network, TravelMatrix, ProblemVariables, VariableSet) {
        let costs: HashMap<String, f64> = depots
            .iter()
            .map(|d| (d.designation().to_string(), 10.0))
            .collect();
        let travel = vec![TravelRecord::new("H", "A", 5.0)];
        let mut request = PickupRequest::new("H", depots, costs, travel, 60.0, max_routes);
        if let Some(s) = start {
            request = request.with_start(s);
        }
        if let Some(e) = end {
            request = request.with_end(e);
        }
        let network = Network::from_request(&request).expect("valid request");
        let matrix = TravelMatrix::from_records(network.labels(), request.travel(), true);
        let mut pv = ProblemVariables::new();
        let vars = VariableSet::register(&mut pv, &network, max_routes);
        (network, matrix, pv, vars)
    }

    // Expected counts: pinning (varies) + coverage |D| + flow |D|*K +
    // hub degree 2 + anchors (varies) + MTZ |D|*(|D|-1)*K + budget K.
    #[test]
    fn test_constraint_count_single_route() {
        let (network, matrix, _pv, vars) =
            setup(vec![Depot::new("A"), Depot::new("B")], 1, None, None);
        let constraints = assemble(&network, &matrix, &vars, 60.0);
        assert_eq!(constraints.len(), 2 + 2 + 2 + 2 + 1);
    }

    #[test]
    fn test_constraint_count_multi_route() {
        let (network, matrix, _pv, vars) = setup(
            vec![Depot::new("A"), Depot::new("B"), Depot::new("C")],
            2,
            None,
            None,
        );
        let constraints = assemble(&network, &matrix, &vars, 60.0);
        assert_eq!(constraints.len(), 3 + 6 + 2 + 12 + 2);
    }

    #[test]
    fn test_pinning_adds_constraints() {
        use crate::models::FixedDecision;
        let depots = vec![
            Depot::new("A").with_fixed_decision(FixedDecision::ShipDirect),
            Depot::new("B").with_fixed_decision(FixedDecision::AwaitPickup),
        ];
        let (network, matrix, _pv, vars) = setup(depots, 1, None, None);
        let constraints = assemble(&network, &matrix, &vars, 60.0);
        assert_eq!(constraints.len(), 2 + 2 + 2 + 2 + 2 + 1);
    }

    #[test]
    fn test_anchor_pinning_adds_constraints() {
        let depots = vec![Depot::new("A"), Depot::new("B")];
        let (network, matrix, _pv, vars) = setup(depots, 1, Some("A"), Some("B"));
        let constraints = assemble(&network, &matrix, &vars, 60.0);
        assert_eq!(constraints.len(), 2 + 2 + 2 + 2 + 2 + 1);
    }

    #[test]
    fn test_ship_direct_anchor_not_pinned() {
        use crate::models::FixedDecision;
        // A is both ShipDirect and the start anchor; the anchor wins, so no
        // pinning constraint is emitted for it.
        let depots = vec![
            Depot::new("A").with_fixed_decision(FixedDecision::ShipDirect),
            Depot::new("B"),
        ];
        let (network, matrix, _pv, vars) = setup(depots, 1, Some("A"), None);
        let constraints = assemble(&network, &matrix, &vars, 60.0);
        // coverage 2 + flow 2 + hub 2 + start anchor 1 + MTZ 2 + budget 1
        assert_eq!(constraints.len(), 2 + 2 + 2 + 1 + 2 + 1);
    }
}
