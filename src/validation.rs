//! Structural rules per pattern family
//!
//! Rules are applied in a fixed order: too few legs rejects everything, xabcd
//! is decided by leg count alone, zigzag requires alternating direction and
//! free accepts any chain that got this far.

use std::ops::RangeInclusive;

use crate::leg::Leg;
use crate::{PatternError, PatternType, Result};

/// Minimum number of legs for any pattern
pub const MIN_LEGS: usize = 2;
/// Accepted leg counts for xabcd
pub const XABCD_LEGS: RangeInclusive<usize> = 3..=4;

/// Validation options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Also require xabcd legs to alternate direction. Off by default: xabcd
    /// is validated on leg count only.
    pub xabcd_alternation: bool,
}

/// Check `legs` against the structural rule of `pattern_type`.
pub fn validate_for_type(
    pattern_type: PatternType,
    legs: &[Leg],
    config: &ValidationConfig,
) -> Result<()> {
    let count = legs.len();
    if count < MIN_LEGS {
        return Err(PatternError::InsufficientLegs {
            need: MIN_LEGS,
            got: count,
        });
    }

    match pattern_type {
        PatternType::Xabcd => {
            if !XABCD_LEGS.contains(&count) {
                return Err(PatternError::LegCountInvalidForType {
                    pattern_type,
                    got: count,
                });
            }
            if config.xabcd_alternation {
                check_alternation(legs)?;
            }
            Ok(())
        }
        PatternType::Zigzag => check_alternation(legs),
        PatternType::Free => Ok(()),
    }
}

/// [`validate_for_type`] with the default config, as a plain predicate
#[inline]
pub fn is_valid_for_type(pattern_type: PatternType, legs: &[Leg]) -> bool {
    validate_for_type(pattern_type, legs, &ValidationConfig::default()).is_ok()
}

/// Both deltas strictly negative or both strictly positive.
/// Zero (and NaN) never counts as a direction.
#[inline]
pub fn same_direction(prev: f64, cur: f64) -> bool {
    (prev < 0.0 && cur < 0.0) || (prev > 0.0 && cur > 0.0)
}

fn check_alternation(legs: &[Leg]) -> Result<()> {
    match legs
        .windows(2)
        .position(|pair| same_direction(pair[0].delta_y(), pair[1].delta_y()))
    {
        Some(i) => Err(PatternError::NonAlternatingLegs { index: i + 1 }),
        None => Ok(()),
    }
}

// ============================================================
// TESTS
// ============================================================
