//! Dense travel matrix built from sparse per-pair records.

use serde::{Deserialize, Serialize};

/// One driving-metric record: an ordered location pair with its driving
/// time and, optionally, its driving distance.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::TravelRecord;
///
/// let r = TravelRecord::new("A", "B", 25.0).with_miles(18.5);
/// assert_eq!(r.from(), "A");
/// assert_eq!(r.miles(), Some(18.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRecord {
    from: String,
    to: String,
    minutes: f64,
    miles: Option<f64>,
}

impl TravelRecord {
    /// Creates a record with driving time only.
    pub fn new(from: impl Into<String>, to: impl Into<String>, minutes: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            minutes,
            miles: None,
        }
    }

    /// Sets the driving distance in miles.
    pub fn with_miles(mut self, miles: f64) -> Self {
        self.miles = Some(miles);
        self
    }

    /// Origin designation.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination designation.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Driving time in minutes.
    pub fn minutes(&self) -> f64 {
        self.minutes
    }

    /// Driving distance in miles, if supplied.
    pub fn miles(&self) -> Option<f64> {
        self.miles
    }
}

/// Policy for ordered location pairs absent from the driving metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingEntryPolicy {
    /// Price missing pairs at zero time and distance.
    ///
    /// Cheap and permissive, but an incomplete metric can then produce
    /// physically impossible routes; the caller must guarantee coverage of
    /// every pair it expects a vehicle to drive.
    #[default]
    Zero,
    /// Fail the call, naming the first missing ordered pair.
    Reject,
}

/// A dense n×n travel matrix (driving time and distance) stored row-major.
///
/// Built from sparse [`TravelRecord`]s against a fixed location ordering.
/// An optional mirroring pass copies each entry onto its unfilled reverse
/// pair, so one-sided symmetric data can be entered once; explicitly
/// supplied reverse entries are never overwritten, which keeps asymmetric
/// data intact.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::{TravelMatrix, TravelRecord};
///
/// let labels = vec!["H".to_string(), "A".to_string()];
/// let records = vec![TravelRecord::new("H", "A", 20.0)];
/// let m = TravelMatrix::from_records(&labels, &records, true);
/// assert_eq!(m.minutes(0, 1), 20.0);
/// assert_eq!(m.minutes(1, 0), 20.0); // mirrored
/// assert!(m.first_missing().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TravelMatrix {
    minutes: Vec<f64>,
    miles: Vec<f64>,
    provided: Vec<bool>,
    size: usize,
}

impl TravelMatrix {
    /// Creates a matrix of the given size with all entries zero and
    /// unprovided.
    pub fn new(size: usize) -> Self {
        Self {
            minutes: vec![0.0; size * size],
            miles: vec![0.0; size * size],
            provided: vec![false; size * size],
            size,
        }
    }

    /// Builds the matrix for `labels` from sparse records.
    ///
    /// Records naming a designation outside `labels` are ignored; a pair
    /// supplied twice keeps the last record. When `mirror` is set, each
    /// provided entry is copied onto its reverse pair unless that pair was
    /// itself supplied. Records without mileage contribute zero distance.
    pub fn from_records(labels: &[String], records: &[TravelRecord], mirror: bool) -> Self {
        let mut m = Self::new(labels.len());
        let index_of = |designation: &str| labels.iter().position(|l| l == designation);

        for record in records {
            let (Some(i), Some(j)) = (index_of(record.from()), index_of(record.to())) else {
                continue;
            };
            if i == j {
                continue;
            }
            m.set(i, j, record.minutes(), record.miles().unwrap_or(0.0));
        }

        if mirror {
            for i in 0..m.size {
                for j in 0..m.size {
                    if i != j && m.is_provided(i, j) && !m.is_provided(j, i) {
                        m.set(j, i, m.minutes(i, j), m.miles(i, j));
                    }
                }
            }
        }

        m
    }

    fn at(&self, from: usize, to: usize) -> usize {
        from * self.size + to
    }

    /// Sets the entry for an ordered pair, marking it provided.
    pub fn set(&mut self, from: usize, to: usize, minutes: f64, miles: f64) {
        let ix = self.at(from, to);
        self.minutes[ix] = minutes;
        self.miles[ix] = miles;
        self.provided[ix] = true;
    }

    /// Driving time from `from` to `to`, in minutes.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn minutes(&self, from: usize, to: usize) -> f64 {
        self.minutes[self.at(from, to)]
    }

    /// Driving distance from `from` to `to`, in miles.
    pub fn miles(&self, from: usize, to: usize) -> f64 {
        self.miles[self.at(from, to)]
    }

    /// Returns `true` if the ordered pair was supplied (or mirrored).
    pub fn is_provided(&self, from: usize, to: usize) -> bool {
        self.provided[self.at(from, to)]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// First ordered pair of distinct locations with no entry, if any.
    pub fn first_missing(&self) -> Option<(usize, usize)> {
        for i in 0..self.size {
            for j in 0..self.size {
                if i != j && !self.is_provided(i, j) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Returns `true` if driving times are symmetric within `tol`.
    pub fn is_time_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.minutes(i, j) - self.minutes(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
