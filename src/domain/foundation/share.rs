//! SharePercentage value object (0.0-100.0 scale, one-decimal precision).
//!
//! The share of all historical players who picked a given option. Always
//! rounded to one decimal, matching what the player is shown.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A percentage between 0.0 and 100.0 inclusive, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharePercentage(f64);

impl SharePercentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const FULL: Self = Self(100.0);

    /// Creates a SharePercentage, returning error if out of range or non-finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("percentage", 0.0, 100.0, value));
        }
        Ok(Self::rounded(value))
    }

    /// Creates a SharePercentage from a raw value, clamping to range and
    /// rounding to one decimal.
    pub fn rounded(value: f64) -> Self {
        let clamped = value.clamp(0.0, 100.0);
        Self((clamped * 10.0).round() / 10.0)
    }

    /// Share of `same` among `total` recorded choices.
    ///
    /// A total of zero yields 100.0: the percentage is always computed after
    /// the caller's own choice was counted, so the lone first-ever choice for
    /// a dilemma reads as full agreement rather than a division by zero.
    pub fn from_counts(same: u64, total: u64) -> Self {
        if total == 0 {
            return Self::FULL;
        }
        Self::rounded(same as f64 / total as f64 * 100.0)
    }

    /// Share of `count` among `total` for a stats breakdown.
    ///
    /// Unlike [`SharePercentage::from_counts`], an empty total reads as an
    /// even 50.0 split, the neutral display for a dilemma nobody answered yet.
    pub fn split_of(count: u64, total: u64) -> Self {
        if total == 0 {
            return Self(50.0);
        }
        Self::rounded(count as f64 / total as f64 * 100.0)
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for SharePercentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for SharePercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
