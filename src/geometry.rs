//! Line geometry along a leg
//!
//! The [`LineGeometry`] collaborator turns two points into slope/intercept
//! terms and evaluates them; [`LinearGeometry`] is the plain `y = m*x + c`
//! implementation used by default.

use crate::leg::Leg;

/// Slope and intercept of a line in (bar index, price) space
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineTerms {
    pub slope: f64,
    pub intercept: f64,
}

/// Geometry service used for leg interpolation
pub trait LineGeometry {
    fn line_from_points(&self, x1: i64, y1: f64, x2: i64, y2: f64) -> LineTerms;
    fn value_at(&self, x: i64, terms: LineTerms) -> f64;
}

/// Straight line through two points.
///
/// Vertical input (`x1 == x2`) produces non-finite terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearGeometry;

impl LineGeometry for LinearGeometry {
    #[inline]
    fn line_from_points(&self, x1: i64, y1: f64, x2: i64, y2: f64) -> LineTerms {
        let slope = (y2 - y1) / (x2 as f64 - x1 as f64);
        LineTerms {
            slope,
            intercept: y1 - slope * x1 as f64,
        }
    }

    #[inline]
    fn value_at(&self, x: i64, terms: LineTerms) -> f64 {
        terms.slope * x as f64 + terms.intercept
    }
}

#[inline]
pub fn line_terms(leg: &Leg) -> LineTerms {
    line_terms_with(&LinearGeometry, leg)
}

pub fn line_terms_with<G: LineGeometry + ?Sized>(geometry: &G, leg: &Leg) -> LineTerms {
    let (a, b) = (leg.a(), leg.b());
    geometry.line_from_points(a.x(), a.y(), b.x(), b.y())
}

#[inline]
pub fn price_at(leg: &Leg, index: i64) -> Option<f64> {
    price_at_with(&LinearGeometry, leg, index)
}

/// Interpolated price at `index` when `a.x <= index <= b.x`.
///
/// No extrapolation. A non-finite value (vertical leg) is reported as `None`.
pub fn price_at_with<G: LineGeometry + ?Sized>(geometry: &G, leg: &Leg, index: i64) -> Option<f64> {
    if index < leg.a().x() || index > leg.b().x() {
        return None;
    }
    let terms = line_terms_with(geometry, leg);
    let value = geometry.value_at(index, terms);
    value.is_finite().then_some(value)
}

// ============================================================
// TESTS
// ============================================================
