//! Depot record and manual decision override.

use serde::{Deserialize, Serialize};

/// A manual override pinning a depot's assignment before optimization.
///
/// The override constrains the corresponding decision variable; it does not
/// replace it. A depot pinned to [`FixedDecision::ShipDirect`] still
/// participates in the model so the remaining depots are optimized around
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FixedDecision {
    /// No override; the optimizer chooses freely.
    #[default]
    Unfixed,
    /// The depot must send a direct shipment to the hub.
    ShipDirect,
    /// The depot must be visited by a pickup route.
    AwaitPickup,
}

/// A collection point that either ships direct to the hub or is visited by
/// a pickup route.
///
/// Region and address are pass-through metadata: they are never read by the
/// optimizer, only carried into the resulting plan for presentation.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Depot, FixedDecision};
///
/// let d = Depot::new("BR-042")
///     .with_region("North")
///     .with_fixed_decision(FixedDecision::ShipDirect);
/// assert_eq!(d.designation(), "BR-042");
/// assert!(d.included());
/// assert_eq!(d.fixed_decision(), FixedDecision::ShipDirect);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    designation: String,
    included: bool,
    fixed_decision: FixedDecision,
    region: Option<String>,
    address: Option<String>,
}

impl Depot {
    /// Creates an included depot with no override and no metadata.
    pub fn new(designation: impl Into<String>) -> Self {
        Self {
            designation: designation.into(),
            included: true,
            fixed_decision: FixedDecision::Unfixed,
            region: None,
            address: None,
        }
    }

    /// Sets whether this depot participates in optimization.
    pub fn with_included(mut self, included: bool) -> Self {
        self.included = included;
        self
    }

    /// Sets the manual decision override.
    pub fn with_fixed_decision(mut self, decision: FixedDecision) -> Self {
        self.fixed_decision = decision;
        self
    }

    /// Sets the region metadata.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the address metadata.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Unique designation of this depot.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Whether this depot participates in optimization.
    pub fn included(&self) -> bool {
        self.included
    }

    /// Manual decision override, if any.
    pub fn fixed_decision(&self) -> FixedDecision {
        self.fixed_decision
    }

    /// Region metadata, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Address metadata, if any.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depot_new() {
        let d = Depot::new("D1");
        assert_eq!(d.designation(), "D1");
        assert!(d.included());
        assert_eq!(d.fixed_decision(), FixedDecision::Unfixed);
        assert!(d.region().is_none());
        assert!(d.address().is_none());
    }

    #[test]
    fn test_depot_builder() {
        let d = Depot::new("D2")
            .with_included(false)
            .with_fixed_decision(FixedDecision::AwaitPickup)
            .with_region("East")
            .with_address("12 Dock Rd");
        assert!(!d.included());
        assert_eq!(d.fixed_decision(), FixedDecision::AwaitPickup);
        assert_eq!(d.region(), Some("East"));
        assert_eq!(d.address(), Some("12 Dock Rd"));
    }

    #[test]
    fn test_fixed_decision_default() {
        assert_eq!(FixedDecision::default(), FixedDecision::Unfixed);
    }
}
