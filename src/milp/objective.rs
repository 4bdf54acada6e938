//! Objective composition for the dispatch model.

use good_lp::Expression;

use crate::distance::TravelMatrix;
use crate::models::RateCard;
use crate::network::Network;

use super::variables::VariableSet;

/// Builds the total-cost expression to minimize.
///
/// Direct shipments contribute their fixed cost; each arc contributes its
/// driving time and distance priced by the rate card. With the default
/// card an arc costs exactly its driving time.
pub(crate) fn compose(
    network: &Network,
    matrix: &TravelMatrix,
    vars: &VariableSet,
    rates: RateCard,
) -> Expression {
    let mut objective = Expression::default();

    for d in network.depot_indices() {
        objective += network.direct_cost(d) * vars.direct(d);
    }

    for (i, j, _k, link) in vars.arcs() {
        objective += rates.edge_cost(matrix.minutes(i, j), matrix.miles(i, j)) * link;
    }

    objective
}
