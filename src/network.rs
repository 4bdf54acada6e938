//! Interned location set and configuration validation.

use std::collections::HashMap;

use tracing::debug;

use crate::error::OptimizeError;
use crate::models::{Depot, FixedDecision, PickupRequest};

/// Index of the hub in every location-indexed structure.
pub const HUB: usize = 0;

/// The validated location set of one optimization call.
///
/// Locations are interned as indices: the hub is index 0, included depots
/// are 1..=n in request order. Construction performs the full
/// configuration check — duplicate designations, missing or invalid
/// direct costs, unknown anchors, and the unsupported multi-route
/// custom-anchor combination are all rejected here, before any model is
/// built.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_dispatch::models::{Depot, PickupRequest};
/// use u_dispatch::network::Network;
///
/// let depots = vec![Depot::new("A")];
/// let costs = HashMap::from([("A".into(), 50.0)]);
/// let request = PickupRequest::new("H", depots, costs, vec![], 60.0, 1);
///
/// let network = Network::from_request(&request).unwrap();
/// assert_eq!(network.num_depots(), 1);
/// assert_eq!(network.label(0), "H");
/// assert_eq!(network.label(1), "A");
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    depots: Vec<Depot>,
    costs: Vec<f64>,
    start: usize,
    end: usize,
}

impl Network {
    /// Validates a request and interns its location set.
    pub fn from_request(request: &PickupRequest) -> Result<Self, OptimizeError> {
        if request.max_routes() == 0 {
            return Err(OptimizeError::config("maximum route count must be at least 1"));
        }
        if !request.time_budget().is_finite() || request.time_budget() < 0.0 {
            return Err(OptimizeError::config(format!(
                "driving time budget must be a non-negative number, got {}",
                request.time_budget()
            )));
        }

        let hub = request.hub().to_string();
        let mut labels = vec![hub.clone()];
        let mut index = HashMap::from([(hub.clone(), HUB)]);
        let mut depots = Vec::new();
        let mut costs = Vec::new();

        for depot in request.depots() {
            if !depot.included() || depot.designation() == hub {
                continue;
            }
            let designation = depot.designation().to_string();
            if index.contains_key(&designation) {
                return Err(OptimizeError::config(format!(
                    "duplicate depot designation: {designation}"
                )));
            }
            let cost = *request.direct_costs().get(&designation).ok_or_else(|| {
                OptimizeError::config(format!(
                    "no direct shipment cost for depot {designation}"
                ))
            })?;
            if !cost.is_finite() || cost < 0.0 {
                return Err(OptimizeError::config(format!(
                    "direct shipment cost for depot {designation} must be a non-negative number, got {cost}"
                )));
            }
            index.insert(designation.clone(), labels.len());
            labels.push(designation);
            depots.push(depot.clone());
            costs.push(cost);
        }

        let resolve_anchor = |designation: Option<&str>| -> Result<usize, OptimizeError> {
            match designation {
                None => Ok(HUB),
                Some(d) => index.get(d).copied().ok_or_else(|| {
                    OptimizeError::config(format!(
                        "anchor {d} is not the hub or an included depot"
                    ))
                }),
            }
        };
        let start = resolve_anchor(request.start())?;
        let end = resolve_anchor(request.end())?;

        if (start != HUB || end != HUB) && request.max_routes() > 1 {
            return Err(OptimizeError::config(
                "custom start/end anchors require a maximum route count of 1",
            ));
        }

        debug!(
            locations = labels.len(),
            depots = depots.len(),
            custom_anchors = start != HUB || end != HUB,
            "location set interned"
        );

        Ok(Self {
            labels,
            index,
            depots,
            costs,
            start,
            end,
        })
    }

    /// All location designations; index 0 is the hub.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Designation of the location at `ix`.
    ///
    /// # Panics
    ///
    /// Panics if `ix` is out of bounds.
    pub fn label(&self, ix: usize) -> &str {
        &self.labels[ix]
    }

    /// Location index of a designation, if interned.
    pub fn index_of(&self, designation: &str) -> Option<usize> {
        self.index.get(designation).copied()
    }

    /// Number of locations (hub + depots).
    pub fn num_locations(&self) -> usize {
        self.labels.len()
    }

    /// Number of included depots.
    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    /// Location indices of all depots (`1..=num_depots`).
    pub fn depot_indices(&self) -> std::ops::Range<usize> {
        1..self.num_locations()
    }

    /// Depot record at location index `ix` (must be ≥ 1).
    ///
    /// # Panics
    ///
    /// Panics if `ix` is the hub or out of bounds.
    pub fn depot(&self, ix: usize) -> &Depot {
        &self.depots[ix - 1]
    }

    /// Direct-shipment cost of the depot at location index `ix`.
    pub fn direct_cost(&self, ix: usize) -> f64 {
        self.costs[ix - 1]
    }

    /// Manual override of the depot at location index `ix`.
    pub fn fixed_decision(&self, ix: usize) -> FixedDecision {
        self.depots[ix - 1].fixed_decision()
    }

    /// Location index of the route start anchor.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Location index of the route end anchor.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns `true` if either anchor is not the hub.
    pub fn has_custom_anchors(&self) -> bool {
        self.start != HUB || self.end != HUB
    }

    /// Returns `true` if `ix` is the start or end anchor.
    pub fn is_anchor(&self, ix: usize) -> bool {
        ix == self.start || ix == self.end
    }
}
