// File: crates/story-core/src/chart/league_trend.rs
// Summary: League 3PA per game and 3P% over time on twin y axes.

use crate::axis::{Axis, TickFormat};
use crate::chart::{add_caption, line_path, new_scene, plot_group, season_ticks, stroke_path, x_scale, y_scale};
use crate::data::LeagueTrendRow;
use crate::scale::extent;
use crate::scene::{Node, Scene};
use crate::sources::ChartId;
use crate::theme::{Theme, BLUE, RED};
use crate::types::{Frame, Season};

pub const LEAGUE_TREND_SINCE: Season = 1979;
const DASH: &str = "6 4";

pub fn render(rows: &[LeagueTrendRow], frame: Frame, theme: &Theme) -> Scene {
    let rows: Vec<&LeagueTrendRow> = rows.iter().filter(|r| r.season >= LEAGUE_TREND_SINCE).collect();
    let attempts: Vec<(Season, Option<f64>)> = rows.iter().map(|r| (r.season, r.avg_3pa_per_game)).collect();
    let percent: Vec<(Season, Option<f64>)> =
        rows.iter().map(|r| (r.season, r.avg_3p_percent.map(|p| p * 100.0))).collect();

    let x = x_scale(extent(rows.iter().map(|r| r.season as f64)).unwrap_or((0.0, 1.0)), &frame);
    let max_attempts = attempts.iter().filter_map(|p| p.1).fold(0.0, f64::max);
    let max_percent = percent.iter().filter_map(|p| p.1).fold(0.0, f64::max);
    let y_left = y_scale((0.0, max_attempts * 1.05), &frame).nice(10);
    let y_right = y_scale((20.0, max_percent * 1.05), &frame).nice(10);

    let mut scene = new_scene(&frame, 0, theme);
    let plot = plot_group(&frame)
        .child(
            Axis::bottom(season_ticks(rows.len()))
                .build(&x, theme)
                .class("x-axis")
                .translate(0.0, frame.inner_height()),
        )
        .child(Axis::left(6).build(&y_left, theme).class("y-axis"))
        .child(
            Axis::right(6)
                .format(TickFormat::PercentSuffix)
                .build(&y_right, theme)
                .class("y-axis-right")
                .translate(frame.inner_width(), 0.0),
        )
        .child(stroke_path(line_path(&attempts, &x, &y_left), BLUE, 2.5).class("attempts-line"))
        .child(
            stroke_path(line_path(&percent, &x, &y_right), RED, 2.5)
                .class("percent-line")
                .attr("stroke-dasharray", DASH),
        );
    scene.root.push(plot);

    let legend = Node::group()
        .class("legend")
        .translate(frame.insets.left as f64 + 10.0, frame.insets.top as f64)
        .child(Node::text(30.0, 0.0, "League 3PA per game").attr("font-size", 12.0))
        .child(Node::line(0.0, -4.0, 20.0, -4.0).attr("stroke", BLUE).attr("stroke-width", 3.0))
        .child(Node::text(30.0, 18.0, "League 3P%").attr("font-size", 12.0))
        .child(
            Node::line(0.0, 12.0, 20.0, 12.0)
                .attr("stroke", RED)
                .attr("stroke-width", 3.0)
                .attr("stroke-dasharray", DASH),
        );
    scene.root.push(legend);
    add_caption(&mut scene, ChartId::LeagueTrend, theme);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::frame_for;

    fn row(season: Season, a: f64, p: f64) -> LeagueTrendRow {
        LeagueTrendRow { season, avg_3pa_per_game: Some(a), avg_3p_percent: Some(p) }
    }

    #[test]
    fn drops_early_seasons_and_dashes_percent() {
        let rows = vec![row(1975, 50.0, 0.9), row(1980, 2.8, 0.28), row(2000, 13.7, 0.354), row(2020, 34.1, 0.358)];
        let scene = render(&rows, frame_for(ChartId::LeagueTrend, 800, None), &Theme::light());
        let ticks: Vec<_> = scene
            .find("x-axis")
            .map(|a| a.children_with_class("tick").filter_map(|t| t.key.clone()).collect())
            .unwrap_or_default();
        assert_eq!(ticks.first().map(String::as_str), Some("1980"));
        // 34.1 * 1.05 = 35.8 -> nice 40
        let left: Vec<_> = scene
            .find("y-axis")
            .map(|a| a.children_with_class("tick").filter_map(|t| t.key.clone()).collect())
            .unwrap_or_default();
        assert_eq!(left.last().map(String::as_str), Some("40"));
        let dashed = scene.find("percent-line").and_then(|n| n.str_attr("stroke-dasharray"));
        assert_eq!(dashed, Some(DASH));
        assert!(scene.find("source").and_then(|n| n.text.as_deref()).is_some_and(|t| t.starts_with("Data: Team Stats")));
    }
}
