//! Legs and leg chains
//!
//! A [`Leg`] is a directed segment between two [`Point`]s. Legs live in a
//! [`LegChain`] arena and refer to their neighbours by [`LegId`], so linking a
//! new leg never touches a value the caller holds by reference.

use std::ops::Index;

use crate::geometry::{self, LineTerms};
use crate::{PatternError, Point, Result};

/// Position of a leg inside its [`LegChain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct LegId(usize);

impl LegId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vertical direction of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LegDirection {
    Up,
    Down,
    Flat,
}

/// A directed segment from `a` to `b`
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Leg {
    a: Point,
    b: Point,
    delta_x: i64,
    delta_y: f64,
    prev: Option<LegId>,
    next: Option<LegId>,
    retrace: Option<f64>,
}

impl Leg {
    /// Standalone, unlinked leg.
    ///
    /// `delta_x` saturates at the `i64` bounds for extreme bar indices.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            a,
            b,
            delta_x: b.x().saturating_sub(a.x()),
            delta_y: b.y() - a.y(),
            prev: None,
            next: None,
            retrace: None,
        }
    }

    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }

    #[inline]
    pub fn b(&self) -> Point {
        self.b
    }

    #[inline]
    pub fn delta_x(&self) -> i64 {
        self.delta_x
    }

    #[inline]
    pub fn delta_y(&self) -> f64 {
        self.delta_y
    }

    #[inline]
    pub fn prev(&self) -> Option<LegId> {
        self.prev
    }

    #[inline]
    pub fn next(&self) -> Option<LegId> {
        self.next
    }

    /// Vertical extent relative to the linked predecessor, sign-inverted.
    /// `None` when no predecessor is linked.
    #[inline]
    pub fn retrace(&self) -> Option<f64> {
        self.retrace
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.prev.is_some() || self.next.is_some()
    }

    /// True if `next` starts exactly where this leg ends
    #[inline]
    pub fn connects_to(&self, next: &Leg) -> bool {
        self.b == next.a
    }

    pub fn direction(&self) -> LegDirection {
        if self.delta_y > 0.0 {
            LegDirection::Up
        } else if self.delta_y < 0.0 {
            LegDirection::Down
        } else {
            LegDirection::Flat
        }
    }

    /// Slope and intercept of the line through `a` and `b`
    #[inline]
    pub fn line_terms(&self) -> LineTerms {
        geometry::line_terms(self)
    }

    /// Interpolated price at `index`, only within `[a.x, b.x]`
    #[inline]
    pub fn price_at(&self, index: i64) -> Option<f64> {
        geometry::price_at(self, index)
    }
}

/// Arena of legs in insertion order
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct LegChain {
    legs: Vec<Leg>,
}

impl LegChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            legs: Vec::with_capacity(capacity),
        }
    }

    /// Build a fully linked chain over consecutive points.
    ///
    /// Fewer than two points yield an empty chain.
    pub fn from_points(points: &[Point]) -> Self {
        let mut chain = Self::with_capacity(points.len().saturating_sub(1));
        let mut prev = None;
        for pair in points.windows(2) {
            prev = Some(chain.make_leg(pair[0], pair[1], prev, None));
        }
        chain
    }

    /// Add a leg from `a` to `b`, linking it to existing legs where the
    /// endpoints match.
    ///
    /// `prev` is linked only if it ends at `a`; the predecessor's `next` then
    /// points at the new leg and the new leg's retracement is computed. `next`
    /// is linked only if it starts at `b`, forward reference only. A link
    /// whose endpoints differ, or whose id is unknown, is skipped without
    /// error. Re-using a leg as `prev` overwrites its earlier `next`.
    pub fn make_leg(
        &mut self,
        a: Point,
        b: Point,
        prev: Option<LegId>,
        next: Option<LegId>,
    ) -> LegId {
        let id = LegId(self.legs.len());
        let mut leg = Leg::new(a, b);

        if let Some(prev_id) = prev {
            match self.legs.get(prev_id.0) {
                Some(p) if p.b == a => {
                    leg.prev = Some(prev_id);
                    leg.retrace = Some((leg.delta_y / p.delta_y) * -1.0);
                }
                _ => tracing::trace!(leg = id.0, prev = prev_id.0, "prev link skipped"),
            }
        }

        if let Some(next_id) = next {
            match self.legs.get(next_id.0) {
                Some(n) if b == n.a => leg.next = Some(next_id),
                _ => tracing::trace!(leg = id.0, next = next_id.0, "next link skipped"),
            }
        }

        if let Some(prev_id) = leg.prev {
            self.legs[prev_id.0].next = Some(id);
        }

        self.legs.push(leg);
        id
    }

    /// Like [`make_leg`](Self::make_leg) with a mandatory predecessor, but
    /// refuses to add the leg when it does not connect.
    pub fn try_make_leg(&mut self, a: Point, b: Point, prev: LegId) -> Result<LegId> {
        match self.legs.get(prev.0) {
            Some(p) if p.b == a => Ok(self.make_leg(a, b, Some(prev), None)),
            _ => Err(PatternError::DisconnectedChain {
                index: self.legs.len(),
            }),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    #[inline]
    pub fn get(&self, id: LegId) -> Option<&Leg> {
        self.legs.get(id.0)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Leg] {
        &self.legs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Leg> {
        self.legs.iter()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = LegId> {
        (0..self.legs.len()).map(LegId)
    }

    pub fn first(&self) -> Option<&Leg> {
        self.legs.first()
    }

    pub fn last(&self) -> Option<&Leg> {
        self.legs.last()
    }

    /// Linked predecessor of `id`
    pub fn prev_of(&self, id: LegId) -> Option<&Leg> {
        self.get(id)?.prev.and_then(|p| self.get(p))
    }

    /// Linked successor of `id`
    pub fn next_of(&self, id: LegId) -> Option<&Leg> {
        self.get(id)?.next.and_then(|n| self.get(n))
    }

    /// Retracement of every leg, in order
    pub fn retracements(&self) -> Vec<Option<f64>> {
        self.legs.iter().map(Leg::retrace).collect()
    }

    /// Start of the first leg followed by the end of every leg
    pub fn points(&self) -> Vec<Point> {
        let Some(first) = self.legs.first() else {
            return Vec::new();
        };
        std::iter::once(first.a)
            .chain(self.legs.iter().map(|l| l.b))
            .collect()
    }

    /// Index of the first leg that does not start where the previous one ends
    pub fn first_gap(&self) -> Option<usize> {
        self.legs
            .windows(2)
            .position(|pair| !pair[0].connects_to(&pair[1]))
            .map(|i| i + 1)
    }
}

impl Index<LegId> for LegChain {
    type Output = Leg;

    fn index(&self, id: LegId) -> &Leg {
        &self.legs[id.0]
    }
}

impl<'a> IntoIterator for &'a LegChain {
    type Item = &'a Leg;
    type IntoIter = std::slice::Iter<'a, Leg>;

    fn into_iter(self) -> Self::IntoIter {
        self.legs.iter()
    }
}

// ============================================================
// TESTS
// ============================================================
