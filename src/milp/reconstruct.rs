//! Walks the solved arc selection back into ordered routes.

use tracing::debug;

use crate::distance::TravelMatrix;
use crate::error::OptimizeError;
use crate::models::{DirectShipment, PickupPlan, RateCard, Route, RouteLeg};
use crate::network::{Network, HUB};
use crate::solver::SolvedAssignment;

/// Extracts the final plan from a solved assignment.
///
/// Routes are discovered by seeding one walk per selected hub-outgoing
/// arc and following, for that walk's route index only, the unique
/// selected arc out of each stop. Matching on the route index matters:
/// with several simultaneous routes, taking the first selected arc across
/// all indices could splice two routes together. Each walk is bounded by
/// the depot count; an overrun, a missing outgoing arc, or a depot left
/// uncovered all indicate a defect in the model rather than bad input and
/// surface as [`OptimizeError::Inconsistent`].
pub(crate) fn extract_plan(
    network: &Network,
    matrix: &TravelMatrix,
    rates: RateCard,
    assignment: &SolvedAssignment,
) -> Result<PickupPlan, OptimizeError> {
    let n = network.num_locations();

    let mut direct_shipments = Vec::new();
    let mut ships_direct = vec![false; n];
    for d in network.depot_indices() {
        if assignment.direct_value(d) > 0.5 {
            ships_direct[d] = true;
            let depot = network.depot(d);
            direct_shipments.push(DirectShipment {
                designation: depot.designation().to_string(),
                cost: network.direct_cost(d),
                region: depot.region().map(str::to_string),
                address: depot.address().map(str::to_string),
            });
        }
    }

    // Routing cost covers every selected arc, including the hub-adjacent
    // scaffolding arcs of custom anchors.
    let mut routing_cost = 0.0;
    for k in 0..assignment.num_routes() {
        for i in 0..n {
            for j in 0..n {
                if i != j && assignment.link_value(i, j, k) > 0.5 {
                    routing_cost += rates.edge_cost(matrix.minutes(i, j), matrix.miles(i, j));
                }
            }
        }
    }

    let mut visited = vec![false; n];
    let mut routes = Vec::new();
    for k in 0..assignment.num_routes() {
        for first in network.depot_indices() {
            if assignment.link_value(HUB, first, k) > 0.5 {
                routes.push(walk_route(
                    network,
                    matrix,
                    rates,
                    assignment,
                    k,
                    first,
                    &mut visited,
                )?);
            }
        }
    }

    for d in network.depot_indices() {
        match (ships_direct[d], visited[d]) {
            (true, true) => {
                return Err(OptimizeError::inconsistent(format!(
                    "depot {} is both shipped direct and routed",
                    network.label(d)
                )));
            }
            (false, false) => {
                return Err(OptimizeError::inconsistent(format!(
                    "depot {} is neither shipped direct nor routed",
                    network.label(d)
                )));
            }
            _ => {}
        }
    }

    debug!(
        routes = routes.len(),
        direct = direct_shipments.len(),
        "plan extracted"
    );
    Ok(PickupPlan::new(direct_shipments, routes, routing_cost))
}

/// Walks one route of index `k` from its first stop after the hub.
fn walk_route(
    network: &Network,
    matrix: &TravelMatrix,
    rates: RateCard,
    assignment: &SolvedAssignment,
    k: usize,
    first: usize,
    visited: &mut [bool],
) -> Result<Route, OptimizeError> {
    if network.start() != HUB && first != network.start() {
        return Err(OptimizeError::inconsistent(format!(
            "route leaves the hub toward {} instead of the start anchor {}",
            network.label(first),
            network.label(network.start())
        )));
    }

    let n = network.num_locations();
    let mut path = Vec::new();
    if network.start() == HUB {
        path.push(HUB);
    }

    let mut current = first;
    let mut steps = 0;
    loop {
        if visited[current] {
            return Err(OptimizeError::inconsistent(format!(
                "depot {} is entered twice",
                network.label(current)
            )));
        }
        visited[current] = true;
        path.push(current);

        steps += 1;
        if steps > network.num_depots() {
            return Err(OptimizeError::inconsistent(
                "route walk exceeded the depot count without returning to its anchor",
            ));
        }

        let mut next = None;
        for j in 0..n {
            if j != current && assignment.link_value(current, j, k) > 0.5 {
                if next.is_some() {
                    return Err(OptimizeError::inconsistent(format!(
                        "depot {} has more than one outgoing arc",
                        network.label(current)
                    )));
                }
                next = Some(j);
            }
        }
        let Some(next) = next else {
            return Err(OptimizeError::inconsistent(format!(
                "depot {} has no outgoing arc",
                network.label(current)
            )));
        };

        if next == HUB {
            if network.end() == HUB {
                path.push(HUB);
            } else if current != network.end() {
                return Err(OptimizeError::inconsistent(format!(
                    "route returned to the hub from {} instead of the end anchor {}",
                    network.label(current),
                    network.label(network.end())
                )));
            }
            break;
        }
        current = next;
    }

    let stops = path
        .iter()
        .map(|&ix| network.label(ix).to_string())
        .collect();
    let legs = path
        .windows(2)
        .map(|leg| RouteLeg {
            from: network.label(leg[0]).to_string(),
            to: network.label(leg[1]).to_string(),
            minutes: matrix.minutes(leg[0], leg[1]),
            miles: matrix.miles(leg[0], leg[1]),
            cost: rates.edge_cost(matrix.minutes(leg[0], leg[1]), matrix.miles(leg[0], leg[1])),
        })
        .collect();
    Ok(Route::new(stops, legs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelRecord;
    use crate::models::{Depot, PickupRequest};
    use std::collections::HashMap;

    fn hub_network(depots: &[&str]) -> (Network, TravelMatrix) {
        make_network(depots, None, None)
    }

    fn make_network(
        depots: &[&str],
        start: Option<&str>,
        end: Option<&str>,
    ) -> (Network, TravelMatrix) {
        let records: Vec<Depot> = depots.iter().map(|d| Depot::new(*d)).collect();
        let costs: HashMap<String, f64> =
            depots.iter().map(|d| (d.to_string(), 100.0)).collect();
        let mut travel = Vec::new();
        let mut all = vec!["H"];
        all.extend_from_slice(depots);
        for a in &all {
            for b in &all {
                if a != b {
                    travel.push(TravelRecord::new(*a, *b, 10.0).with_miles(5.0));
                }
            }
        }
        let mut request = PickupRequest::new("H", records, costs, travel, 600.0, 1);
        if let Some(s) = start {
            request = request.with_start(s);
        }
        if let Some(e) = end {
            request = request.with_end(e);
        }
        let network = Network::from_request(&request).expect("valid request");
        let matrix = TravelMatrix::from_records(network.labels(), request.travel(), false);
        (network, matrix)
    }

    /// Builds an assignment for one route over `arcs` plus the given
    /// direct depots, all on route index 0 of `num_routes`.
    fn assignment(
        n: usize,
        num_routes: usize,
        arcs: &[(usize, usize, usize)],
        direct: &[usize],
    ) -> SolvedAssignment {
        let mut direct_values = vec![0.0; n - 1];
        for &d in direct {
            direct_values[d - 1] = 1.0;
        }
        let mut links = vec![0.0; n * n * num_routes];
        for &(i, j, k) in arcs {
            links[(k * n + i) * n + j] = 1.0;
        }
        let positions = vec![1.0; (n - 1) * num_routes];
        SolvedAssignment::from_parts(n, num_routes, direct_values, links, positions)
    }

    #[test]
    fn test_single_route_walk() {
        let (network, matrix) = hub_network(&["A", "B"]);
        let a = assignment(3, 1, &[(0, 1, 0), (1, 2, 0), (2, 0, 0)], &[]);
        let plan = extract_plan(&network, &matrix, RateCard::default(), &a).expect("consistent");
        assert_eq!(plan.routes().len(), 1);
        assert_eq!(plan.routes()[0].stops(), ["H", "A", "B", "H"]);
        assert!(plan.direct_shipments().is_empty());
        assert!((plan.routing_cost() - 30.0).abs() < 1e-10);
        assert!((plan.total_cost() - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_direct_only() {
        let (network, matrix) = hub_network(&["A", "B"]);
        let a = assignment(3, 1, &[], &[1, 2]);
        let plan = extract_plan(&network, &matrix, RateCard::default(), &a).expect("consistent");
        assert!(plan.routes().is_empty());
        assert_eq!(plan.direct_shipments().len(), 2);
        assert!((plan.total_cost() - 200.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_routes_not_spliced() {
        let (network, matrix) = hub_network(&["A", "B"]);
        // Route 0 serves A, route 1 serves B; walking must not mix indices.
        let a = assignment(3, 2, &[(0, 1, 0), (1, 0, 0), (0, 2, 1), (2, 0, 1)], &[]);
        let plan = extract_plan(&network, &matrix, RateCard::default(), &a).expect("consistent");
        assert_eq!(plan.routes().len(), 2);
        assert_eq!(plan.routes()[0].stops(), ["H", "A", "H"]);
        assert_eq!(plan.routes()[1].stops(), ["H", "B", "H"]);
    }

    #[test]
    fn test_uncovered_depot_is_inconsistent() {
        let (network, matrix) = hub_network(&["A", "B"]);
        let a = assignment(3, 1, &[(0, 1, 0), (1, 0, 0)], &[]);
        let err = extract_plan(&network, &matrix, RateCard::default(), &a).expect_err("must fail");
        assert!(matches!(err, OptimizeError::Inconsistent(_)));
        assert!(err.to_string().contains("B"));
    }

    #[test]
    fn test_doubly_covered_depot_is_inconsistent() {
        let (network, matrix) = hub_network(&["A"]);
        let a = assignment(2, 1, &[(0, 1, 0), (1, 0, 0)], &[1]);
        let err = extract_plan(&network, &matrix, RateCard::default(), &a).expect_err("must fail");
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_missing_outgoing_arc_is_inconsistent() {
        let (network, matrix) = hub_network(&["A", "B"]);
        let a = assignment(3, 1, &[(0, 1, 0), (1, 2, 0)], &[]);
        let err = extract_plan(&network, &matrix, RateCard::default(), &a).expect_err("must fail");
        assert!(err.to_string().contains("no outgoing arc"));
    }

    #[test]
    fn test_custom_anchor_route_strips_hub() {
        let (network, matrix) = make_network(&["A", "B"], Some("A"), Some("B"));
        let a = assignment(3, 1, &[(0, 1, 0), (1, 2, 0), (2, 0, 0)], &[]);
        let plan = extract_plan(&network, &matrix, RateCard::default(), &a).expect("consistent");
        assert_eq!(plan.routes()[0].stops(), ["A", "B"]);
        // Scaffolding arcs still count toward routing cost: 3 arcs * 10.
        assert!((plan.routing_cost() - 30.0).abs() < 1e-10);
        assert!((plan.routes()[0].driving_cost() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_custom_end_anchor_mismatch_is_inconsistent() {
        let (network, matrix) = make_network(&["A", "B"], Some("A"), Some("B"));
        // Route returns to the hub from A, but the end anchor is B.
        let a = assignment(3, 1, &[(0, 1, 0), (1, 0, 0)], &[2]);
        let err = extract_plan(&network, &matrix, RateCard::default(), &a).expect_err("must fail");
        assert!(err.to_string().contains("end anchor"));
    }

    #[test]
    fn test_wrong_start_anchor_is_inconsistent() {
        let (network, matrix) = make_network(&["A", "B"], Some("A"), None);
        let a = assignment(3, 1, &[(0, 2, 0), (2, 0, 0)], &[1]);
        let err = extract_plan(&network, &matrix, RateCard::default(), &a).expect_err("must fail");
        assert!(err.to_string().contains("start anchor"));
    }

    #[test]
    fn test_cycle_overrun_is_bounded() {
        let (network, matrix) = hub_network(&["A", "B"]);
        // Malformed: A and B point at each other and the hub also enters A.
        let a = assignment(3, 1, &[(0, 1, 0), (1, 2, 0), (2, 1, 0)], &[]);
        let err = extract_plan(&network, &matrix, RateCard::default(), &a).expect_err("must fail");
        assert!(matches!(err, OptimizeError::Inconsistent(_)));
    }

    #[test]
    fn test_rates_price_legs() {
        let (network, matrix) = hub_network(&["A"]);
        let a = assignment(2, 1, &[(0, 1, 0), (1, 0, 0)], &[]);
        let rates = RateCard::new(2.0, 1.0);
        let plan = extract_plan(&network, &matrix, rates, &a).expect("consistent");
        // Each leg: 10 minutes * 2 + 5 miles * 1 = 25.
        assert!((plan.routes()[0].legs()[0].cost - 25.0).abs() < 1e-10);
        assert!((plan.routing_cost() - 50.0).abs() < 1e-10);
    }
}
