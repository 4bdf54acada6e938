//! Decision-variable families of the dispatch model.

use good_lp::{variable, ProblemVariables, Variable};

use crate::network::Network;

/// The three variable families of one model instance, dense-indexed.
///
/// - `direct[d]` ∈ {0,1}: depot `d` ships direct.
/// - `link[i,j,k]` ∈ {0,1}: route `k` drives directly from location `i` to
///   location `j` (no variable on the diagonal).
/// - `position[d,k]` ∈ [1, |depots|] integer: visiting order of depot `d`
///   within route `k`, used only for subtour elimination.
///
/// Indexing follows the interned location order of [`Network`]: hub 0,
/// depots 1..=n.
pub(crate) struct VariableSet {
    num_locations: usize,
    num_routes: usize,
    direct: Vec<Variable>,
    links: Vec<Option<Variable>>,
    positions: Vec<Variable>,
}

impl VariableSet {
    /// Registers all variables for `network` against the given problem.
    pub(crate) fn register(
        pv: &mut ProblemVariables,
        network: &Network,
        num_routes: usize,
    ) -> Self {
        let n = network.num_locations();
        let num_depots = network.num_depots();

        let direct = (0..num_depots)
            .map(|_| pv.add(variable().binary()))
            .collect();

        let mut links = Vec::with_capacity(n * n * num_routes);
        for _k in 0..num_routes {
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        links.push(None);
                    } else {
                        links.push(Some(pv.add(variable().binary())));
                    }
                }
            }
        }

        let mut positions = Vec::with_capacity(num_depots * num_routes);
        for _k in 0..num_routes {
            for _d in 0..num_depots {
                positions.push(pv.add(variable().integer().min(1.0).max(num_depots as f64)));
            }
        }

        Self {
            num_locations: n,
            num_routes,
            direct,
            links,
            positions,
        }
    }

    /// Number of locations (hub + depots).
    pub(crate) fn num_locations(&self) -> usize {
        self.num_locations
    }

    /// Number of depots.
    pub(crate) fn num_depots(&self) -> usize {
        self.direct.len()
    }

    /// Number of route indices.
    pub(crate) fn num_routes(&self) -> usize {
        self.num_routes
    }

    /// Total number of registered variables.
    pub(crate) fn num_variables(&self) -> usize {
        self.direct.len()
            + self.links.iter().filter(|l| l.is_some()).count()
            + self.positions.len()
    }

    /// Direct-shipment variable of the depot at location index `d` (≥ 1).
    pub(crate) fn direct(&self, d: usize) -> Variable {
        self.direct[d - 1]
    }

    /// Arc variable from `i` to `j` on route `k`; `None` on the diagonal.
    pub(crate) fn link(&self, i: usize, j: usize, k: usize) -> Option<Variable> {
        self.links[(k * self.num_locations + i) * self.num_locations + j]
    }

    /// Position variable of the depot at location index `d` on route `k`.
    pub(crate) fn position(&self, d: usize, k: usize) -> Variable {
        self.positions[k * self.num_depots() + (d - 1)]
    }

    /// All arc variables as `(from, to, route, variable)`.
    pub(crate) fn arcs(&self) -> impl Iterator<Item = (usize, usize, usize, Variable)> + '_ {
        let n = self.num_locations;
        (0..self.num_routes).flat_map(move |k| {
            (0..n).flat_map(move |i| {
                (0..n).filter_map(move |j| self.link(i, j, k).map(|v| (i, j, k, v)))
            })
        })
    }
}
