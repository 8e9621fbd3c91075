use std::{cmp::Ordering, convert::TryFrom};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bounded scalar in `[0.0, 100.0]`.
///
/// Used for failure probabilities, health scores, and scale blockage, all of
/// which are reported on a 0–100 scale.
///
/// This type internally wraps an `f64` and guarantees the value is finite and
/// within `[0, 100]`. Because of this invariant, `Percent` implements [`Eq`]
/// and [`Ord`] even though raw `f64` does not.
///
/// # Examples
/// ```
/// use opterra_core::Percent;
///
/// let p = Percent::new(42.5).unwrap();
/// assert_eq!(p.get(), 42.5);
///
/// // Pipeline-internal math uses the clamping constructor.
/// assert_eq!(Percent::clamped(130.0).get(), 100.0);
/// assert_eq!(Percent::clamped(-4.0).get(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percent(f64);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const MAX: Self = Self(100.0);

    /// Creates a `Percent` if `value` is finite and within `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`PercentError::NotFinite`] if `value` is `NaN` or infinite.
    /// Returns [`PercentError::OutOfRange`] if `value` is less than `0.0`
    /// or greater than `100.0`.
    pub fn new(value: f64) -> Result<Self, PercentError> {
        if !value.is_finite() {
            return Err(PercentError::NotFinite(value));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(PercentError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Creates a `Percent` by clamping `value` into `[0, 100]`.
    ///
    /// A `NaN` input maps to zero, keeping engine pipelines total.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Returns the inner `f64`.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Returns this percent rounded to the nearest whole point.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(self.0.round())
    }
}

impl TryFrom<f64> for Percent {
    type Error = PercentError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Percent::new(value)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

// Safe because `Percent::new` and `Percent::clamped` forbid NaN and infinity.
impl Eq for Percent {}

impl Ord for Percent {
    /// Compares two `Percent`s.
    ///
    /// The unwrap is safe because `Percent` guarantees values are finite and
    /// within `[0, 100]`, so `partial_cmp` always returns `Some(_)`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap()
    }
}

impl PartialOrd for Percent {
    /// Delegates to [`Ord::cmp`] to ensure a total, consistent ordering.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Errors that can occur when constructing a [`Percent`].
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PercentError {
    /// Input was not finite.
    #[error("value is not finite: {0}")]
    NotFinite(f64),

    /// Input was outside the allowed range.
    #[error("value {0} is outside the range [0, 100]")]
    OutOfRange(f64),
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn valid_values() {
        assert_eq!(Percent::new(0.0).unwrap().get(), 0.0);
        assert_eq!(Percent::new(100.0).unwrap().get(), 100.0);
        assert_eq!(Percent::new(99.9).unwrap().get(), 99.9);
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(
            Percent::new(-0.01),
            Err(PercentError::OutOfRange(_))
        ));
        assert!(matches!(
            Percent::new(100.01),
            Err(PercentError::OutOfRange(_))
        ));
        assert!(matches!(
            Percent::new(f64::NAN),
            Err(PercentError::NotFinite(_))
        ));
        assert!(matches!(
            Percent::new(f64::INFINITY),
            Err(PercentError::NotFinite(_))
        ));
    }

    #[test]
    fn clamping_is_total() {
        assert_eq!(Percent::clamped(-5.0), Percent::ZERO);
        assert_eq!(Percent::clamped(250.0), Percent::MAX);
        assert_eq!(Percent::clamped(f64::NAN), Percent::ZERO);
        assert_eq!(Percent::clamped(37.5).get(), 37.5);
    }

    #[test]
    fn ordering_is_total() {
        let low = Percent::clamped(10.0);
        let high = Percent::clamped(90.0);
        assert!(low < high);
        assert_eq!(low.max(high), high);
    }

    #[test]
    fn rounding() {
        assert_eq!(Percent::clamped(66.6).rounded().get(), 67.0);
        assert_eq!(Percent::clamped(0.4).rounded(), Percent::ZERO);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let ok: Percent = serde_json::from_str("42.5").unwrap();
        assert_eq!(ok.get(), 42.5);
        assert!(serde_json::from_str::<Percent>("101.0").is_err());
    }
}
