//! Validated patterns
//!
//! A [`Pattern`] only exists if its legs passed the structural rule of its
//! [`PatternType`]. Construction returns the reason for rejection instead.

use crate::leg::{Leg, LegChain};
use crate::validation::{validate_for_type, ValidationConfig};
use crate::{PatternError, PatternType, Point, Result};

/// Minimum number of points accepted by [`make_pattern_from_points`]
pub const MIN_POINTS: usize = 3;

/// Optional descriptive fields of a pattern
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PatternMeta {
    pub name: Option<String>,
    pub sub_type: Option<String>,
    pub pid: Option<String>,
}

/// An ordered, validated chain of legs
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Pattern {
    legs: LegChain,
    pattern_type: PatternType,
    #[serde(flatten)]
    meta: PatternMeta,
}

impl Pattern {
    pub(crate) fn build(
        legs: LegChain,
        pattern_type: PatternType,
        meta: PatternMeta,
        config: &ValidationConfig,
    ) -> Result<Self> {
        validate_for_type(pattern_type, legs.as_slice(), config)?;
        Ok(Self {
            legs,
            pattern_type,
            meta,
        })
    }

    #[inline]
    pub fn legs(&self) -> &LegChain {
        &self.legs
    }

    #[inline]
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    #[inline]
    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    pub fn name(&self) -> Option<&str> {
        self.meta.name.as_deref()
    }

    pub fn sub_type(&self) -> Option<&str> {
        self.meta.sub_type.as_deref()
    }

    pub fn pid(&self) -> Option<&str> {
        self.meta.pid.as_deref()
    }

    pub fn meta(&self) -> &PatternMeta {
        &self.meta
    }

    /// Pivot points: start of the first leg, then the end of each leg
    pub fn points(&self) -> Vec<Point> {
        self.legs.points()
    }

    pub fn retracements(&self) -> Vec<Option<f64>> {
        self.legs.retracements()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Leg> {
        self.legs.iter()
    }

    /// Give the legs back to the caller
    pub fn into_chain(self) -> LegChain {
        self.legs
    }
}

/// Wrap `legs` in a Pattern if they satisfy the rule of `pattern_type`.
pub fn make_pattern(legs: LegChain, pattern_type: PatternType, meta: PatternMeta) -> Result<Pattern> {
    Pattern::build(legs, pattern_type, meta, &ValidationConfig::default())
}

/// Chain consecutive points into legs, each linked to the one before, and
/// validate the result with [`make_pattern`].
///
/// Every pair of points yields a leg; none is dropped.
pub fn make_pattern_from_points(
    points: &[Point],
    pattern_type: PatternType,
    meta: PatternMeta,
) -> Result<Pattern> {
    check_point_count(points)?;
    make_pattern(LegChain::from_points(points), pattern_type, meta)
}

pub(crate) fn check_point_count(points: &[Point]) -> Result<()> {
    if points.len() < MIN_POINTS {
        return Err(PatternError::InsufficientPoints {
            need: MIN_POINTS,
            got: points.len(),
        });
    }
    Ok(())
}

// ============================================================
// TESTS
// ============================================================
