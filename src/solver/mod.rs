//! Adapter over the external MILP capability.
//!
//! The dispatch model is solver-agnostic: it hands variables, constraints,
//! and an objective to [`solve_minimize`] and gets back a status plus a
//! value for every variable. This module is the only place that touches
//! backend types; everything downstream works off the extracted
//! [`SolvedAssignment`] snapshot.

use good_lp::{Constraint, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};
use tracing::debug;

use crate::error::OptimizeError;
use crate::milp::variables::VariableSet;

/// Terminal status reported by the solver backend.
///
/// Only [`SolveStatus::Optimal`] yields a usable assignment; every other
/// status is surfaced to the caller as an optimization failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// A provably optimal assignment was found.
    Optimal,
    /// The constraints admit no assignment at all.
    Infeasible,
    /// The objective can decrease without bound.
    Unbounded,
    /// Any other backend-specific failure.
    Other(String),
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Optimal => f.write_str("optimal"),
            Self::Infeasible => f.write_str("infeasible"),
            Self::Unbounded => f.write_str("unbounded"),
            Self::Other(detail) => f.write_str(detail),
        }
    }
}

/// The solved value of every model variable, detached from solver types.
///
/// Layout mirrors [`VariableSet`]: locations are the interned indices
/// (hub 0), arcs are dense with zeroed diagonal.
pub(crate) struct SolvedAssignment {
    num_locations: usize,
    num_routes: usize,
    direct: Vec<f64>,
    links: Vec<f64>,
    positions: Vec<f64>,
}

impl SolvedAssignment {
    /// Builds a snapshot from raw family values (test scaffolding and
    /// extraction share this path).
    pub(crate) fn from_parts(
        num_locations: usize,
        num_routes: usize,
        direct: Vec<f64>,
        links: Vec<f64>,
        positions: Vec<f64>,
    ) -> Self {
        Self {
            num_locations,
            num_routes,
            direct,
            links,
            positions,
        }
    }

    fn extract<S: Solution>(solution: &S, vars: &VariableSet) -> Self {
        let n = vars.num_locations();
        let num_depots = vars.num_depots();
        let num_routes = vars.num_routes();

        let direct = (1..=num_depots)
            .map(|d| solution.value(vars.direct(d)))
            .collect();

        let mut links = vec![0.0; n * n * num_routes];
        for (i, j, k, var) in vars.arcs() {
            links[(k * n + i) * n + j] = solution.value(var);
        }

        let positions = (0..num_routes)
            .flat_map(|k| (1..=num_depots).map(move |d| (d, k)))
            .map(|(d, k)| solution.value(vars.position(d, k)))
            .collect();

        Self::from_parts(n, num_routes, direct, links, positions)
    }

    /// Number of route indices in the model.
    pub(crate) fn num_routes(&self) -> usize {
        self.num_routes
    }

    /// Value of `direct[d]` for the depot at location index `d` (≥ 1).
    pub(crate) fn direct_value(&self, d: usize) -> f64 {
        self.direct[d - 1]
    }

    /// Value of `link[i,j,k]`; zero on the diagonal.
    pub(crate) fn link_value(&self, i: usize, j: usize, k: usize) -> f64 {
        self.links[(k * self.num_locations + i) * self.num_locations + j]
    }

    /// Value of `position[d,k]` for the depot at location index `d` (≥ 1).
    pub(crate) fn position_value(&self, d: usize, k: usize) -> f64 {
        self.positions[k * self.direct.len() + (d - 1)]
    }
}

/// Minimizes `objective` under `constraints` and snapshots the assignment.
///
/// Statuses other than optimal map onto [`OptimizeError::Infeasible`] with
/// the backend's status preserved; no retry or relaxation is attempted.
pub(crate) fn solve_minimize(
    pv: ProblemVariables,
    objective: Expression,
    constraints: Vec<Constraint>,
    vars: &VariableSet,
) -> Result<SolvedAssignment, OptimizeError> {
    let mut model = pv.minimise(objective).using(good_lp::default_solver);
    for constraint in constraints {
        model = model.with(constraint);
    }

    match model.solve() {
        Ok(solution) => {
            debug!("solver returned an optimal assignment");
            Ok(SolvedAssignment::extract(&solution, vars))
        }
        Err(ResolutionError::Infeasible) => Err(OptimizeError::Infeasible {
            status: SolveStatus::Infeasible,
        }),
        Err(ResolutionError::Unbounded) => Err(OptimizeError::Infeasible {
            status: SolveStatus::Unbounded,
        }),
        Err(other) => Err(OptimizeError::Infeasible {
            status: SolveStatus::Other(other.to_string()),
        }),
    }
}
