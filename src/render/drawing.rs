//! Drawable slots for points, legs and patterns
//!
//! Each slot owns the renderer handles it created. `draw` erases whatever the
//! slot still holds before creating anything new, so calling it repeatedly
//! never leaves stale objects behind.

use super::{Color, LabelSpec, LabelStyle, LineSpec, LineStyle, Renderer, Size, TextAlign};
use crate::leg::Leg;
use crate::pattern::Pattern;
use crate::{PatternType, Point, Width};

/// Pivot names of a full xabcd pattern
const XABCD_NAMES: [&str; 5] = ["X", "A", "B", "C", "D"];

// ============================================================
// CONFIGURATION
// ============================================================

/// How leg lines look
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LineAppearance {
    pub color: Color,
    pub width: Width,
    pub style: LineStyle,
}

impl LineAppearance {
    pub fn spec(&self, from: Point, to: Point) -> LineSpec {
        LineSpec {
            from,
            to,
            color: self.color,
            width: self.width,
            style: self.style,
        }
    }
}

/// How pivot labels look
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelAppearance {
    /// Fixed label shape; `None` points each label away from its pivot
    pub style: Option<LabelStyle>,
    pub size: Size,
    pub text_align: TextAlign,
    pub text_color: Color,
    pub color: Color,
}

impl Default for LabelAppearance {
    fn default() -> Self {
        Self {
            style: None,
            size: Size::Small,
            text_align: TextAlign::Center,
            text_color: Color::WHITE,
            color: Color::default(),
        }
    }
}

impl LabelAppearance {
    pub fn spec(&self, position: Point, text: impl Into<String>, is_high: bool) -> LabelSpec {
        LabelSpec {
            position,
            text: text.into(),
            tooltip: None,
            style: self.style.unwrap_or_else(|| LabelStyle::for_pivot(is_high)),
            size: self.size,
            text_align: self.text_align,
            text_color: self.text_color,
            color: self.color,
        }
    }
}

/// Appearance of a whole pattern. `labels: None` draws lines only.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PatternStyle {
    pub line: LineAppearance,
    pub labels: Option<LabelAppearance>,
}

impl Default for PatternStyle {
    fn default() -> Self {
        Self {
            line: LineAppearance::default(),
            labels: Some(LabelAppearance::default()),
        }
    }
}

// ============================================================
// SLOTS
// ============================================================

/// Label attached to a single point
#[derive(Debug)]
pub struct PointLabel<H> {
    handle: Option<H>,
}

impl<H> Default for PointLabel<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> PointLabel<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<R: Renderer<Handle = H>>(&mut self, renderer: &mut R, label: &LabelSpec) {
        self.erase(renderer);
        self.handle = Some(renderer.create_label(label));
    }

    pub fn erase<R: Renderer<Handle = H>>(&mut self, renderer: &mut R) {
        if let Some(h) = self.handle.take() {
            renderer.delete_label(h);
        }
    }

    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }
}

/// Line drawn along a single leg
#[derive(Debug)]
pub struct LegLine<H> {
    handle: Option<H>,
}

impl<H> Default for LegLine<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> LegLine<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<R: Renderer<Handle = H>>(
        &mut self,
        renderer: &mut R,
        leg: &Leg,
        appearance: &LineAppearance,
    ) {
        self.erase(renderer);
        self.handle = Some(renderer.create_line(&appearance.spec(leg.a(), leg.b())));
    }

    pub fn erase<R: Renderer<Handle = H>>(&mut self, renderer: &mut R) {
        if let Some(h) = self.handle.take() {
            renderer.delete_line(h);
        }
    }

    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }
}

/// Lines and pivot labels of a whole pattern
#[derive(Debug)]
pub struct PatternDrawing<H> {
    lines: Vec<LegLine<H>>,
    labels: Vec<PointLabel<H>>,
}

impl<H> Default for PatternDrawing<H> {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl<H> PatternDrawing<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<R: Renderer<Handle = H>>(
        &mut self,
        renderer: &mut R,
        pattern: &Pattern,
        style: &PatternStyle,
    ) {
        self.erase(renderer);

        for leg in pattern.iter() {
            let mut line = LegLine::new();
            line.draw(renderer, leg, &style.line);
            self.lines.push(line);
        }

        let Some(appearance) = style.labels else {
            return;
        };

        let legs = pattern.legs().as_slice();
        let names = pivot_names(pattern);
        for (i, (point, name)) in pattern.points().into_iter().zip(names).enumerate() {
            let mut spec = appearance.spec(point, name, is_high_pivot(legs, i));
            // retracement of the leg ending at this pivot
            spec.tooltip = i
                .checked_sub(1)
                .and_then(|l| legs[l].retrace())
                .map(|r| format!("{r:.3}"));

            let mut label = PointLabel::new();
            label.draw(renderer, &spec);
            self.labels.push(label);
        }
    }

    pub fn erase<R: Renderer<Handle = H>>(&mut self, renderer: &mut R) {
        for mut line in self.lines.drain(..) {
            line.erase(renderer);
        }
        for mut label in self.labels.drain(..) {
            label.erase(renderer);
        }
    }

    #[inline]
    pub fn is_drawn(&self) -> bool {
        !self.lines.is_empty() || !self.labels.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

/// Label text for every pivot: X/A/B/C/D for xabcd, the pivot index otherwise
fn pivot_names(pattern: &Pattern) -> Vec<String> {
    let count = pattern.leg_count() + 1;
    match pattern.pattern_type() {
        PatternType::Xabcd if count <= XABCD_NAMES.len() => XABCD_NAMES[XABCD_NAMES.len() - count..]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        _ => (0..count).map(|i| i.to_string()).collect(),
    }
}

/// A pivot is a high when the price falls away from it (or rose into it, at the end)
fn is_high_pivot(legs: &[Leg], pivot: usize) -> bool {
    match legs.get(pivot) {
        Some(outgoing) => outgoing.delta_y() < 0.0,
        None => legs.last().is_some_and(|l| l.delta_y() > 0.0),
    }
}

// ============================================================
// TESTS
// ============================================================
