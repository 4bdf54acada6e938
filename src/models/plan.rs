//! Optimization result types.

use serde::{Deserialize, Serialize};

/// A single driven leg between two consecutive stops of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Designation of the origin location.
    pub from: String,
    /// Designation of the destination location.
    pub to: String,
    /// Driving time of this leg, in minutes.
    pub minutes: f64,
    /// Driving distance of this leg, in miles.
    pub miles: f64,
    /// Priced cost of this leg under the request's rate card.
    pub cost: f64,
}

/// A depot that resolves to a direct shipment, with its fixed cost and
/// pass-through metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectShipment {
    /// Designation of the depot.
    pub designation: String,
    /// Direct-shipment cost charged for this depot.
    pub cost: f64,
    /// Region metadata carried from the depot record.
    pub region: Option<String>,
    /// Address metadata carried from the depot record.
    pub address: Option<String>,
}

/// An ordered vehicle route from its start anchor to its end anchor.
///
/// Stops include both anchors: a hub-anchored route over depots A and B
/// reads `[hub, A, B, hub]`, while a route anchored at depots `A` and `B`
/// reads `[A, ..., B]`. Legs are the consecutive stop pairs; totals are
/// sums over those legs.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Route, RouteLeg};
///
/// let legs = vec![RouteLeg {
///     from: "H".into(),
///     to: "A".into(),
///     minutes: 20.0,
///     miles: 0.0,
///     cost: 20.0,
/// }];
/// let route = Route::new(vec!["H".into(), "A".into()], legs);
/// assert_eq!(route.stops(), ["H", "A"]);
/// assert_eq!(route.driving_time(), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<String>,
    legs: Vec<RouteLeg>,
    driving_time: f64,
    driving_distance: f64,
    driving_cost: f64,
}

impl Route {
    /// Creates a route from its ordered stops and legs, computing totals.
    pub fn new(stops: Vec<String>, legs: Vec<RouteLeg>) -> Self {
        let driving_time = legs.iter().map(|l| l.minutes).sum();
        let driving_distance = legs.iter().map(|l| l.miles).sum();
        let driving_cost = legs.iter().map(|l| l.cost).sum();
        Self {
            stops,
            legs,
            driving_time,
            driving_distance,
            driving_cost,
        }
    }

    /// Ordered stop designations, anchors included.
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Consecutive driven legs with their time, distance, and cost.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Stops with the first and last (the anchors) stripped.
    ///
    /// For hub-anchored routes this is exactly the visited depot set. With
    /// custom depot anchors the anchors themselves are also visited depots;
    /// use [`Route::stops`] directly in that case.
    pub fn interior_stops(&self) -> &[String] {
        if self.stops.len() <= 2 {
            &[]
        } else {
            &self.stops[1..self.stops.len() - 1]
        }
    }

    /// Total driving time over the legs, in minutes.
    pub fn driving_time(&self) -> f64 {
        self.driving_time
    }

    /// Total driving distance over the legs, in miles.
    pub fn driving_distance(&self) -> f64 {
        self.driving_distance
    }

    /// Total priced cost over the legs.
    pub fn driving_cost(&self) -> f64 {
        self.driving_cost
    }

    /// Number of stops, anchors included.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if this route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// The complete result of one optimization call.
///
/// Every included depot appears in exactly one of `direct_shipments` or one
/// route's stops; `total_cost` is the direct subtotal plus the cost of all
/// selected driving edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupPlan {
    direct_shipments: Vec<DirectShipment>,
    routes: Vec<Route>,
    direct_cost: f64,
    routing_cost: f64,
    total_cost: f64,
}

impl PickupPlan {
    /// Assembles a plan from its parts.
    pub fn new(
        direct_shipments: Vec<DirectShipment>,
        routes: Vec<Route>,
        routing_cost: f64,
    ) -> Self {
        let direct_cost = direct_shipments.iter().map(|d| d.cost).sum();
        Self {
            direct_shipments,
            routes,
            direct_cost,
            routing_cost,
            total_cost: direct_cost + routing_cost,
        }
    }

    /// An empty plan (no depots under consideration).
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), 0.0)
    }

    /// Depots resolved to direct shipment.
    pub fn direct_shipments(&self) -> &[DirectShipment] {
        &self.direct_shipments
    }

    /// Returns `true` if the given depot resolved to direct shipment.
    pub fn ships_direct(&self, designation: &str) -> bool {
        self.direct_shipments
            .iter()
            .any(|d| d.designation == designation)
    }

    /// Vehicle routes, each anchored per the request.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Sum of direct-shipment costs.
    pub fn direct_cost(&self) -> f64 {
        self.direct_cost
    }

    /// Cost of all selected driving edges.
    ///
    /// With custom anchors this includes the hub-adjacent scaffolding
    /// edges, so it can exceed the sum of per-route leg costs.
    pub fn routing_cost(&self) -> f64 {
        self.routing_cost
    }

    /// Total cost: direct subtotal plus routing cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}
