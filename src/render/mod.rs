//! Rendering contract
//!
//! The crate never draws anything itself. A host implements [`Renderer`]; the
//! drawable slots in [`drawing`] keep track of the handles it returns and
//! always release the previous handle before creating a new one.

pub mod drawing;
pub mod style;

pub use drawing::{LabelAppearance, LegLine, LineAppearance, PatternDrawing, PatternStyle, PointLabel};
pub use style::{LabelStyle, LineStyle, Size, TextAlign};

use crate::{Point, Width};

/// Opaque RGBA colour, `0xRRGGBBAA`. Passed through to the renderer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(33, 150, 243);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_be_bytes([r, g, b, a]))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLUE
    }
}

/// Everything the renderer needs to create a label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub position: Point,
    pub text: String,
    pub tooltip: Option<String>,
    pub style: LabelStyle,
    pub size: Size,
    pub text_align: TextAlign,
    pub text_color: Color,
    pub color: Color,
}

impl LabelSpec {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            tooltip: None,
            style: LabelStyle::default(),
            size: Size::default(),
            text_align: TextAlign::default(),
            text_color: Color::WHITE,
            color: Color::default(),
        }
    }
}

/// Everything the renderer needs to create a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpec {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub width: Width,
    pub style: LineStyle,
}

/// Drawing backend supplied by the host
pub trait Renderer {
    /// Handle identifying a created label or line
    type Handle;

    fn create_label(&mut self, label: &LabelSpec) -> Self::Handle;
    fn delete_label(&mut self, handle: Self::Handle);
    fn create_line(&mut self, line: &LineSpec) -> Self::Handle;
    fn delete_line(&mut self, handle: Self::Handle);
}
