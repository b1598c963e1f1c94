// File: crates/story-core/src/chart/mod.rs
// Summary: The six story charts and the layout helpers they share.

pub mod adoption;
pub mod comparison;
pub mod interactive;
pub mod league_trend;
pub mod overlay;
pub mod position;
pub mod shot_profile;
pub mod volume;

use crate::curve::monotone_line;
use crate::geometry::{PathData, Point};
use crate::scale::LinearScale;
use crate::scene::{Node, Scene};
use crate::sources::ChartId;
use crate::theme::{Rgba, Theme};
use crate::types::{Frame, Insets, Season};

/// Strip under the plot holding the data-source note.
pub const CAPTION_HEIGHT: u32 = 24;
/// Most season ticks on a bottom axis.
pub const MAX_SEASON_TICKS: usize = 12;

/// Default outer height and margins of each chart; `height` overrides the default.
pub fn frame_for(id: ChartId, width: u32, height: Option<u32>) -> Frame {
    let (default_height, insets) = match id {
        ChartId::LeagueTrend => (420, Insets::new(60, 80, 40, 50)),
        ChartId::VolumeEfficiency => (400, Insets::new(60, 30, 50, 50)),
        ChartId::CurryComparison => (440, Insets::new(60, 60, 60, 50)),
        ChartId::PositionShare => (420, Insets::new(60, 100, 60, 50)),
        ChartId::ShotProfile => (420, Insets::new(70, 80, 60, 60)),
        ChartId::TeamAdoption => (420, Insets::new(60, 60, 50, 60)),
    };
    Frame::new(width, height.unwrap_or(default_height), insets)
}

/// Empty scene sized for `frame` plus `extra` pixels of footer and caption.
pub fn new_scene(frame: &Frame, extra: u32, theme: &Theme) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height + extra + CAPTION_HEIGHT, theme.background);
    scene.root.set("fill", theme.text);
    scene
}

/// Plot-area group, translated past the left and top margins.
pub fn plot_group(frame: &Frame) -> Node {
    Node::group().class("plot").translate(frame.insets.left as f64, frame.insets.top as f64)
}

pub fn x_scale(domain: (f64, f64), frame: &Frame) -> LinearScale {
    LinearScale::new(domain, (0.0, frame.inner_width()))
}

pub fn y_scale(domain: (f64, f64), frame: &Frame) -> LinearScale {
    LinearScale::new(domain, (frame.inner_height(), 0.0))
}

/// One tick per season up to [`MAX_SEASON_TICKS`].
pub fn season_ticks(seasons: usize) -> usize {
    seasons.clamp(1, MAX_SEASON_TICKS)
}

/// Map `(season, value)` pairs to pixel points, keeping gaps.
pub fn project(points: &[(Season, Option<f64>)], x: &LinearScale, y: &LinearScale) -> Vec<Option<Point>> {
    points
        .iter()
        .map(|&(s, v)| v.map(|v| Point::new(x.map(s as f64), y.map(v))))
        .collect()
}

pub fn line_path(points: &[(Season, Option<f64>)], x: &LinearScale, y: &LinearScale) -> PathData {
    monotone_line(&project(points, x, y))
}

/// Stroked, unfilled line path.
pub fn stroke_path(d: PathData, color: Rgba, width: f64) -> Node {
    Node::path(d)
        .attr("fill", "none")
        .attr("stroke", color)
        .attr("stroke-width", width)
        .attr("stroke-linejoin", "round")
        .attr("stroke-linecap", "round")
}

/// Append the data-source note along the bottom edge.
pub fn add_caption(scene: &mut Scene, id: ChartId, theme: &Theme) {
    let y = scene.height as f64 - 8.0;
    scene.root.push(
        Node::text(8.0, y, id.source().caption())
            .class("source")
            .attr("fill", theme.tick)
            .attr("font-size", 11.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_follow_chart_defaults() {
        let f = frame_for(ChartId::CurryComparison, 800, None);
        assert_eq!((f.width, f.height), (800, 440));
        assert_eq!(frame_for(ChartId::ShotProfile, 800, Some(500)).height, 500);
        assert_eq!(frame_for(ChartId::PositionShare, 800, None).insets.right, 100);
    }

    #[test]
    fn season_ticks_are_capped() {
        assert_eq!(season_ticks(40), 12);
        assert_eq!(season_ticks(5), 5);
        assert_eq!(season_ticks(0), 1);
    }

    #[test]
    fn project_keeps_gaps() {
        let frame = Frame::new(200, 100, Insets::new(0, 0, 0, 0));
        let x = x_scale((2000.0, 2002.0), &frame);
        let y = y_scale((0.0, 10.0), &frame);
        let pts = project(&[(2000, Some(0.0)), (2001, None), (2002, Some(10.0))], &x, &y);
        assert_eq!(pts, vec![Some(Point::new(0.0, 100.0)), None, Some(Point::new(200.0, 0.0))]);
    }
}
