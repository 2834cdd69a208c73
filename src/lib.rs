//! # chartlegs - chart pattern legs
//!
//! Data model, structural validation and geometry for chart patterns built
//! from chains of legs between (bar-index, price) points.
//!
//! ## Quick Start
//!
//! ```rust
//! use chartlegs::prelude::*;
//!
//! let points = [
//!     Point::new(10681, 0.344), // X
//!     Point::new(10714, 0.296), // A
//!     Point::new(10743, 0.322), // B
//!     Point::new(10752, 0.300), // C
//!     Point::new(10796, 0.329), // D
//! ];
//!
//! let pattern = PatternBuilder::new(PatternType::Xabcd)
//!     .name("Gartley")
//!     .from_points(&points)
//!     .unwrap();
//!
//! assert_eq!(pattern.leg_count(), 4);
//!
//! let ab = &pattern.legs().as_slice()[1];
//! assert!((ab.retrace().unwrap() - 0.5417).abs() < 1e-4);
//! assert!(ab.price_at(10700).is_none());
//! ```

pub mod geometry;
pub mod leg;
pub mod pattern;
pub mod render;
pub mod validation;

pub mod prelude {
    pub use crate::{
        // Parallel
        build_parallel,
        // Geometry
        geometry::{
            line_terms, line_terms_with, price_at, price_at_with, LineGeometry, LineTerms,
            LinearGeometry,
        },
        // Legs
        leg::{Leg, LegChain, LegDirection, LegId},
        // Patterns
        pattern::{make_pattern, make_pattern_from_points, Pattern, PatternMeta},
        // Rendering contract
        render::{
            Color, LabelAppearance, LabelSpec, LabelStyle, LegLine, LineAppearance, LineSpec,
            LineStyle, PatternDrawing, PatternStyle, PointLabel, Renderer, Size, TextAlign,
        },
        // Validation
        validation::{is_valid_for_type, validate_for_type, ValidationConfig},
        BuildError,
        BuiltPattern,
        PatternBuilder,
        // Errors
        PatternError,
        PatternType,
        Point,
        Result,
        Width,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors that can occur while building or validating patterns
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    #[error("Insufficient legs: need {need}, got {got}")]
    InsufficientLegs { need: usize, got: usize },

    #[error("{pattern_type} pattern cannot have {got} legs")]
    LegCountInvalidForType { pattern_type: PatternType, got: usize },

    #[error("Legs {} and {index} move in the same direction", .index.saturating_sub(1))]
    NonAlternatingLegs { index: usize },

    #[error("Leg {index} does not start where its predecessor ends")]
    DisconnectedChain { index: usize },

    #[error("Insufficient points: need {need}, got {got}")]
    InsufficientPoints { need: usize, got: usize },

    #[error("Unknown {kind} token: {token:?}")]
    UnknownStyleToken { kind: &'static str, token: String },

    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),
}

// ============================================================
// VALIDATED TYPES
// ============================================================

/// Stroke width handed to the renderer, in whole pixels.
///
/// Zero is rejected. The renderer decides how wide one pixel is on its
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Width(u32);

impl Width {
    pub fn new(pixels: u32) -> Result<Self> {
        match pixels {
            0 => Err(PatternError::InvalidValue("line width must be at least one pixel")),
            px => Ok(Self(px)),
        }
    }

    #[doc(hidden)]
    pub const fn new_const(value: u32) -> Self {
        Self(value)
    }

    /// Width in pixels
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Hairline
impl Default for Width {
    fn default() -> Self {
        Self::new_const(1)
    }
}

impl serde::Serialize for Width {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Width {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = u32::deserialize(d)?;
        Width::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// POINT
// ============================================================

/// A (bar index, price) coordinate on the chart.
///
/// Points compare equal only when both coordinates are exactly equal, which
/// is what leg chaining relies on.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    x: i64,
    y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }

    /// Bar index
    #[inline]
    pub fn x(self) -> i64 {
        self.x
    }

    /// Price
    #[inline]
    pub fn y(self) -> f64 {
        self.y
    }
}

impl From<(i64, f64)> for Point {
    fn from((x, y): (i64, f64)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================
// PATTERN TYPE
// ============================================================

/// Structural family a pattern is validated against
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Harmonic X-A-B-C(-D) family: 3 or 4 legs
    Xabcd,
    /// Legs must alternate direction at every joint
    Zigzag,
    /// Any chain of at least two legs
    #[default]
    Free,
}

impl PatternType {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::Xabcd => "xabcd",
            PatternType::Zigzag => "zigzag",
            PatternType::Free => "free",
        }
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PatternType {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xabcd" => Ok(PatternType::Xabcd),
            "zigzag" => Ok(PatternType::Zigzag),
            "free" => Ok(PatternType::Free),
            other => Err(PatternError::UnknownStyleToken {
                kind: "pattern type",
                token: other.to_string(),
            }),
        }
    }
}

// ============================================================
// BUILDER
// ============================================================

use leg::LegChain;
use pattern::{Pattern, PatternMeta};
use validation::ValidationConfig;

/// Builder for creating validated Pattern instances
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    pattern_type: PatternType,
    meta: PatternMeta,
    config: ValidationConfig,
}

impl PatternBuilder {
    pub fn new(pattern_type: PatternType) -> Self {
        Self {
            pattern_type,
            meta: PatternMeta::default(),
            config: ValidationConfig::default(),
        }
    }

    /// Set the display name (e.g. "Gartley")
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.meta.name = Some(name.into());
        self
    }

    /// Set the sub-type (e.g. "bullish")
    pub fn sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.meta.sub_type = Some(sub_type.into());
        self
    }

    /// Set the pattern id
    pub fn pid(mut self, pid: impl Into<String>) -> Self {
        self.meta.pid = Some(pid.into());
        self
    }

    /// Replace the validation config
    pub fn config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply the zigzag alternation rule to xabcd patterns as well
    pub fn xabcd_alternation(mut self, enable: bool) -> Self {
        self.config.xabcd_alternation = enable;
        self
    }

    #[inline]
    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    /// Validate an existing chain and wrap it in a Pattern
    pub fn from_legs(&self, legs: LegChain) -> Result<Pattern> {
        Pattern::build(legs, self.pattern_type, self.meta.clone(), &self.config)
            .inspect_err(|e| self.log_rejection(e))
    }

    /// Chain consecutive points into legs and validate the result
    pub fn from_points(&self, points: &[Point]) -> Result<Pattern> {
        pattern::check_point_count(points).inspect_err(|e| self.log_rejection(e))?;
        self.from_legs(LegChain::from_points(points))
    }

    fn log_rejection(&self, error: &PatternError) {
        tracing::debug!(pattern_type = %self.pattern_type, %error, "pattern rejected");
    }
}

// ============================================================
// PARALLEL BUILDING
// ============================================================

use rayon::prelude::*;

/// A candidate that passed validation
#[derive(Debug)]
pub struct BuiltPattern {
    pub key: String,
    pub pattern: Pattern,
}

/// A candidate that failed validation
#[derive(Debug)]
pub struct BuildError {
    pub key: String,
    pub error: PatternError,
}

/// Validate many candidate point sequences in parallel.
///
/// Each candidate is keyed; when the builder carries no pid, the key becomes
/// the pattern's pid.
pub fn build_parallel<'a, I>(
    builder: &PatternBuilder,
    candidates: I,
) -> (Vec<BuiltPattern>, Vec<BuildError>)
where
    I: IntoParallelIterator<Item = (&'a str, &'a [Point])>,
{
    let results: Vec<_> = candidates
        .into_par_iter()
        .map(|(key, points)| {
            let built = if builder.meta.pid.is_some() {
                builder.from_points(points)
            } else {
                builder.clone().pid(key).from_points(points)
            };
            built
                .map(|pattern| BuiltPattern {
                    key: key.to_string(),
                    pattern,
                })
                .map_err(|error| BuildError {
                    key: key.to_string(),
                    error,
                })
        })
        .collect();

    let mut successes = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => errors.push(e),
        }
    }

    (successes, errors)
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn xabcd_points() -> Vec<Point> {
        vec![
            Point::new(10681, 0.344),
            Point::new(10714, 0.296),
            Point::new(10743, 0.322),
            Point::new(10752, 0.3),
            Point::new(10796, 0.329),
        ]
    }

    #[test]
    fn test_width_validation() {
        assert!(Width::new(1).is_ok());
        assert!(Width::new(4).is_ok());
        assert!(Width::new(0).is_err());
    }

    #[test]
    fn test_width_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Width>("0").is_err());
        assert_eq!(serde_json::from_str::<Width>("3").unwrap().get(), 3);
    }

    #[test]
    fn test_point_equality() {
        assert_eq!(Point::new(1, 2.0), Point::from((1, 2.0)));
        assert_ne!(Point::new(1, 2.0), Point::new(1, 2.000001));
        assert_ne!(Point::new(1, 2.0), Point::new(2, 2.0));
    }

    #[test]
    fn test_pattern_type_tokens() {
        for ty in [PatternType::Xabcd, PatternType::Zigzag, PatternType::Free] {
            assert_eq!(ty.as_str().parse::<PatternType>().unwrap(), ty);
        }
        assert!("harmonic".parse::<PatternType>().is_err());
        assert_eq!(PatternType::default(), PatternType::Free);
    }

    #[test]
    fn test_builder_metadata() {
        let pattern = PatternBuilder::new(PatternType::Xabcd)
            .name("Bat")
            .sub_type("bullish")
            .pid("p-1")
            .from_points(&xabcd_points())
            .unwrap();

        assert_eq!(pattern.name(), Some("Bat"));
        assert_eq!(pattern.sub_type(), Some("bullish"));
        assert_eq!(pattern.pid(), Some("p-1"));
        assert_eq!(pattern.pattern_type(), PatternType::Xabcd);
    }

    #[test]
    fn test_builder_rejects_two_points() {
        let err = PatternBuilder::new(PatternType::Free)
            .from_points(&xabcd_points()[..2])
            .unwrap_err();
        assert_eq!(err, PatternError::InsufficientPoints { need: 3, got: 2 });
    }

    /// Collects formatted log output
    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_builder_logs_every_rejection() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let builder = PatternBuilder::new(PatternType::Xabcd);
            assert!(builder.from_points(&xabcd_points()[..2]).is_err());
            assert!(builder.from_points(&xabcd_points()[..3]).is_err());
        });

        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.matches("pattern rejected").count(), 2);
        assert!(logs.contains("Insufficient points: need 3, got 2"));
        assert!(logs.contains("xabcd pattern cannot have 2 legs"));
    }

    #[test]
    fn test_builder_xabcd_alternation_opt_in() {
        // X->A down, A->B up, B->C up: not alternating
        let points = [
            Point::new(0, 10.0),
            Point::new(1, 5.0),
            Point::new(2, 7.0),
            Point::new(3, 9.0),
        ];

        assert!(PatternBuilder::new(PatternType::Xabcd)
            .from_points(&points)
            .is_ok());

        let err = PatternBuilder::new(PatternType::Xabcd)
            .xabcd_alternation(true)
            .from_points(&points)
            .unwrap_err();
        assert_eq!(err, PatternError::NonAlternatingLegs { index: 2 });
    }

    #[test]
    fn test_parallel_build() {
        let good = xabcd_points();
        let short = xabcd_points()[..3].to_vec();

        let candidates: Vec<(&str, &[Point])> = vec![("good", &good), ("short", &short)];
        let builder = PatternBuilder::new(PatternType::Xabcd);

        let (built, errors) = build_parallel(&builder, candidates);
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].pattern.pid(), Some("good"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, "short");
        assert_eq!(
            errors[0].error,
            PatternError::LegCountInvalidForType {
                pattern_type: PatternType::Xabcd,
                got: 2
            }
        );
    }

    #[test]
    fn test_parallel_build_keeps_builder_pid() {
        let points = xabcd_points();
        let candidates: Vec<(&str, &[Point])> = vec![("a", &points)];
        let builder = PatternBuilder::new(PatternType::Free).pid("fixed");

        let (built, errors) = build_parallel(&builder, candidates);
        assert!(errors.is_empty());
        assert_eq!(built[0].pattern.pid(), Some("fixed"));
    }

    #[test]
    fn test_error_messages() {
        let err = PatternError::NonAlternatingLegs { index: 2 };
        assert_eq!(err.to_string(), "Legs 1 and 2 move in the same direction");

        // caller-built value with no predecessor still formats
        let err = PatternError::NonAlternatingLegs { index: 0 };
        assert_eq!(err.to_string(), "Legs 0 and 0 move in the same direction");

        let err = PatternError::LegCountInvalidForType {
            pattern_type: PatternType::Xabcd,
            got: 5,
        };
        assert_eq!(err.to_string(), "xabcd pattern cannot have 5 legs");
    }
}
