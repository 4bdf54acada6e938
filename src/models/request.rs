//! Optimization request and edge pricing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::distance::{MissingEntryPolicy, TravelRecord};
use crate::models::Depot;

/// Per-minute and per-mile multipliers used to price routing edges.
///
/// The default card (`per_minute = 1.0`, `per_mile = 0.0`) makes an edge
/// cost exactly its driving time, recovering the plain time-minimizing
/// objective.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::RateCard;
///
/// let rates = RateCard::new(0.5, 1.2);
/// assert_eq!(rates.edge_cost(30.0, 10.0), 27.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    per_minute: f64,
    per_mile: f64,
}

impl RateCard {
    /// Creates a rate card with the given multipliers.
    pub fn new(per_minute: f64, per_mile: f64) -> Self {
        Self {
            per_minute,
            per_mile,
        }
    }

    /// Cost multiplier per minute of driving time.
    pub fn per_minute(&self) -> f64 {
        self.per_minute
    }

    /// Cost multiplier per mile of driving distance.
    pub fn per_mile(&self) -> f64 {
        self.per_mile
    }

    /// Prices a single edge from its driving time and distance.
    pub fn edge_cost(&self, minutes: f64, miles: f64) -> f64 {
        minutes * self.per_minute + miles * self.per_mile
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// An immutable, self-contained optimization request.
///
/// Carries everything one call needs: the hub designation, depot records,
/// the direct-shipment cost of every depot, the driving metric, and the
/// routing parameters. Nothing is shared between calls; build a fresh
/// request per optimization.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
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
/// let request = PickupRequest::new("HUB", depots, costs, travel, 90.0, 1);
/// assert_eq!(request.hub(), "HUB");
/// assert_eq!(request.max_routes(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupRequest {
    hub: String,
    depots: Vec<Depot>,
    direct_costs: HashMap<String, f64>,
    travel: Vec<TravelRecord>,
    time_budget: f64,
    max_routes: usize,
    rates: RateCard,
    start: Option<String>,
    end: Option<String>,
    mirror: bool,
    missing_policy: MissingEntryPolicy,
}

impl PickupRequest {
    /// Creates a request with hub-anchored routes, default rates, mirroring
    /// of one-sided driving entries, and missing pairs priced at zero.
    ///
    /// `time_budget` is the maximum cumulative driving time per route, in
    /// minutes. `max_routes` is the maximum number of simultaneous routes.
    pub fn new(
        hub: impl Into<String>,
        depots: Vec<Depot>,
        direct_costs: HashMap<String, f64>,
        travel: Vec<TravelRecord>,
        time_budget: f64,
        max_routes: usize,
    ) -> Self {
        Self {
            hub: hub.into(),
            depots,
            direct_costs,
            travel,
            time_budget,
            max_routes,
            rates: RateCard::default(),
            start: None,
            end: None,
            mirror: true,
            missing_policy: MissingEntryPolicy::Zero,
        }
    }

    /// Sets the edge pricing rates.
    pub fn with_rates(mut self, rates: RateCard) -> Self {
        self.rates = rates;
        self
    }

    /// Sets a custom start anchor (must be the hub or an included depot).
    pub fn with_start(mut self, designation: impl Into<String>) -> Self {
        self.start = Some(designation.into());
        self
    }

    /// Sets a custom end anchor (must be the hub or an included depot).
    pub fn with_end(mut self, designation: impl Into<String>) -> Self {
        self.end = Some(designation.into());
        self
    }

    /// Sets whether a one-sided driving entry also fills its reverse pair.
    ///
    /// Mirroring never overwrites an explicitly supplied reverse entry, so
    /// asymmetric data is honored either way.
    pub fn with_mirroring(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Sets the policy for ordered location pairs absent from the driving
    /// metric.
    pub fn with_missing_policy(mut self, policy: MissingEntryPolicy) -> Self {
        self.missing_policy = policy;
        self
    }

    /// Hub designation.
    pub fn hub(&self) -> &str {
        &self.hub
    }

    /// All depot records (included or not).
    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    /// Direct-shipment cost per depot designation.
    pub fn direct_costs(&self) -> &HashMap<String, f64> {
        &self.direct_costs
    }

    /// Driving metric records.
    pub fn travel(&self) -> &[TravelRecord] {
        &self.travel
    }

    /// Maximum cumulative driving time per route, in minutes.
    pub fn time_budget(&self) -> f64 {
        self.time_budget
    }

    /// Maximum number of simultaneous routes.
    pub fn max_routes(&self) -> usize {
        self.max_routes
    }

    /// Edge pricing rates.
    pub fn rates(&self) -> RateCard {
        self.rates
    }

    /// Custom start anchor, if any.
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Custom end anchor, if any.
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    /// Whether one-sided driving entries are mirrored.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Policy for missing driving-metric pairs.
    pub fn missing_policy(&self) -> MissingEntryPolicy {
        self.missing_policy
    }
}
