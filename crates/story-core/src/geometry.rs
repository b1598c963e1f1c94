// File: crates/story-core/src/geometry.rs
// Summary: Pixel-space points and path command lists shared by the SVG and raster backends.

use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// Backend-neutral path: a list of commands in pixel space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    cmds: Vec<PathCmd>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) { self.cmds.push(PathCmd::MoveTo(p)); }
    pub fn line_to(&mut self, p: Point) { self.cmds.push(PathCmd::LineTo(p)); }
    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) { self.cmds.push(PathCmd::CubicTo(c1, c2, p)); }
    pub fn close(&mut self) { self.cmds.push(PathCmd::Close); }

    pub fn commands(&self) -> &[PathCmd] { &self.cmds }
    pub fn is_empty(&self) -> bool { self.cmds.is_empty() }

    /// Number of sub-paths (one per `MoveTo`).
    pub fn subpath_count(&self) -> usize {
        self.cmds.iter().filter(|c| matches!(c, PathCmd::MoveTo(_))).count()
    }

    /// End point of every command, in order.
    pub fn vertices(&self) -> Vec<Point> {
        self.cmds
            .iter()
            .filter_map(|c| match *c {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) | PathCmd::CubicTo(_, _, p) => Some(p),
                PathCmd::Close => None,
            })
            .collect()
    }

    /// SVG `d` attribute text, coordinates at two decimals.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for c in &self.cmds {
            let _ = match *c {
                PathCmd::MoveTo(p) => write!(out, "M{:.2},{:.2}", p.x, p.y),
                PathCmd::LineTo(p) => write!(out, "L{:.2},{:.2}", p.x, p.y),
                PathCmd::CubicTo(a, b, p) => write!(
                    out,
                    "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                    a.x, a.y, b.x, b.y, p.x, p.y
                ),
                PathCmd::Close => write!(out, "Z"),
            };
        }
        out
    }
}
