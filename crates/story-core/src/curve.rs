// File: crates/story-core/src/curve.rs
// Summary: Monotone-X cubic interpolation (d3 curveMonotoneX) for line and area paths.
// Notes:
// - Input points are already in pixel space; `None` marks an undefined value.
// - Every run of defined points becomes its own sub-path, so gaps are never bridged.

use crate::geometry::{PathData, Point};

/// Line through every defined point, broken at `None` entries.
pub fn monotone_line(points: &[Option<Point>]) -> PathData {
    let mut out = PathData::new();
    for run in defined_runs(points) {
        let mut curve = MonotoneX::new(&mut out);
        for p in run {
            curve.point(p.x, p.y);
        }
        curve.line_end();
    }
    out
}

/// Area between the curve and the horizontal line `y = base`, one closed
/// shape per defined run.
pub fn monotone_area(points: &[Option<Point>], base: f64) -> PathData {
    let mut out = PathData::new();
    for run in defined_runs(points) {
        let (Some(first), Some(last)) = (run.first().copied(), run.last().copied()) else {
            continue;
        };
        {
            let mut curve = MonotoneX::new(&mut out);
            for p in &run {
                curve.point(p.x, p.y);
            }
            curve.top_end();
        }
        out.line_to(Point::new(last.x, base));
        out.line_to(Point::new(first.x, base));
        out.close();
    }
    out
}

fn defined_runs(points: &[Option<Point>]) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut cur = Vec::new();
    for p in points {
        match p {
            Some(p) if p.x.is_finite() && p.y.is_finite() => cur.push(*p),
            _ => {
                if !cur.is_empty() {
                    runs.push(std::mem::take(&mut cur));
                }
            }
        }
    }
    if !cur.is_empty() {
        runs.push(cur);
    }
    runs
}

/// Fritsch-Carlson style tangents as computed by d3's monotoneX curve.
struct MonotoneX<'a> {
    out: &'a mut PathData,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
    state: u8,
}

impl<'a> MonotoneX<'a> {
    fn new(out: &'a mut PathData) -> Self {
        Self { out, x0: f64::NAN, y0: f64::NAN, x1: f64::NAN, y1: f64::NAN, t0: f64::NAN, state: 0 }
    }

    fn point(&mut self, x: f64, y: f64) {
        let mut t1 = f64::NAN;
        if x == self.x1 && y == self.y1 {
            return; // coincident points
        }
        match self.state {
            0 => {
                self.state = 1;
                self.out.move_to(Point::new(x, y));
            }
            1 => self.state = 2,
            2 => {
                self.state = 3;
                t1 = self.slope3(x, y);
                let t0 = self.slope2(t1);
                self.bezier(t0, t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.bezier(self.t0, t1);
            }
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    /// Finish the pending segment. A lone point closes on itself.
    fn line_end(&mut self) {
        self.finish();
        if self.state == 1 {
            self.out.close();
        }
    }

    /// Finish the upper edge of an area; the caller closes the shape.
    fn top_end(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        match self.state {
            2 => self.out.line_to(Point::new(self.x1, self.y1)),
            3 => {
                let t1 = self.slope2(self.t0);
                self.bezier(self.t0, t1);
            }
            _ => {}
        }
    }

    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let d0 = if h0 != 0.0 { h0 } else if h1 < 0.0 { -0.0 } else { 0.0 };
        let d1 = if h1 != 0.0 { h1 } else if h0 < 0.0 { -0.0 } else { 0.0 };
        let s0 = (self.y1 - self.y0) / d0;
        let s1 = (y2 - self.y1) / d1;
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        if t.is_nan() { 0.0 } else { t }
    }

    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h != 0.0 { (3.0 * (self.y1 - self.y0) / h - t) / 2.0 } else { t }
    }

    fn bezier(&mut self, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;
        self.out.cubic_to(
            Point::new(self.x0 + dx, self.y0 + dx * t0),
            Point::new(self.x1 - dx, self.y1 - dx * t1),
            Point::new(self.x1, self.y1),
        );
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathCmd;

    fn pts(v: &[(f64, f64)]) -> Vec<Option<Point>> {
        v.iter().map(|&(x, y)| Some(Point::new(x, y))).collect()
    }

    #[test]
    fn collinear_points_stay_on_the_line() {
        let path = monotone_line(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]));
        let cmds = path.commands();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], PathCmd::MoveTo(Point::new(0.0, 0.0)));
        match cmds[1] {
            PathCmd::CubicTo(a, b, p) => {
                assert!((a.x - a.y).abs() < 1e-9);
                assert!((b.x - b.y).abs() < 1e-9);
                assert_eq!(p, Point::new(1.0, 1.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }
        assert_eq!(path.vertices().last().copied(), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn control_points_do_not_overshoot() {
        let path = monotone_line(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 4.0)]));
        for c in path.commands() {
            if let PathCmd::CubicTo(a, b, _) = c {
                for y in [a.y, b.y] {
                    assert!((0.0..=4.0).contains(&y), "overshoot at {y}");
                }
            }
        }
        // plateau between x=1 and x=2 stays flat
        let flat = path.commands().iter().find_map(|c| match c {
            PathCmd::CubicTo(a, b, p) if *p == Point::new(2.0, 1.0) => Some((a.y, b.y)),
            _ => None,
        });
        assert_eq!(flat, Some((1.0, 1.0)));
    }

    #[test]
    fn two_points_make_a_straight_segment() {
        let path = monotone_line(&pts(&[(0.0, 5.0), (4.0, 1.0)]));
        assert_eq!(
            path.commands(),
            &[PathCmd::MoveTo(Point::new(0.0, 5.0)), PathCmd::LineTo(Point::new(4.0, 1.0))]
        );
    }

    #[test]
    fn gaps_break_the_path() {
        let mut input = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        input.push(None);
        input.extend(pts(&[(3.0, 2.0), (4.0, 1.0), (5.0, 0.0)]));
        let path = monotone_line(&input);
        assert_eq!(path.subpath_count(), 2);
        // nothing is drawn at x=2
        assert!(path.vertices().iter().all(|p| p.x != 2.0));
    }

    #[test]
    fn lone_point_closes() {
        let path = monotone_line(&[Some(Point::new(1.0, 1.0))]);
        assert_eq!(path.commands(), &[PathCmd::MoveTo(Point::new(1.0, 1.0)), PathCmd::Close]);
    }

    #[test]
    fn area_closes_on_the_base() {
        let path = monotone_area(&pts(&[(0.0, 3.0), (1.0, 2.0), (2.0, 1.0)]), 10.0);
        let cmds = path.commands();
        assert_eq!(cmds.last(), Some(&PathCmd::Close));
        assert!(cmds.contains(&PathCmd::LineTo(Point::new(2.0, 10.0))));
        assert!(cmds.contains(&PathCmd::LineTo(Point::new(0.0, 10.0))));
        assert_eq!(path.subpath_count(), 1);
    }
}
