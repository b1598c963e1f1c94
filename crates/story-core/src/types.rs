// File: crates/story-core/src/types.rs
// Summary: Shared types and constants (season key, chart sizes, margins).

/// Season key as an integer year (2016 is the 2015-16 season).
pub type Season = i32;

/// Default chart width in pixels when the target gives none.
pub const WIDTH: u32 = 800;
/// Default chart height in pixels.
pub const HEIGHT: u32 = 420;

/// Gap between the chart edge and its plot area. Axes, axis titles and
/// legends are drawn inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Width taken from the frame before the x range is laid out.
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Height taken from the frame; the caption strip is not part of it.
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(60, 60, 60, 50)
    }
}

/// Outer size of one chart plus the margins around its plot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
}

impl Frame {
    pub const fn new(width: u32, height: u32, insets: Insets) -> Self {
        Self { width, height, insets }
    }

    pub fn inner_width(&self) -> f64 {
        self.width.saturating_sub(self.insets.hsum()) as f64
    }

    pub fn inner_height(&self) -> f64 {
        self.height.saturating_sub(self.insets.vsum()) as f64
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT, Insets::default())
    }
}
