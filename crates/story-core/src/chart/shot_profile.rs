// File: crates/story-core/src/chart/shot_profile.rs
// Summary: Share of field-goal attempts by shot zone since 1997.

use crate::axis::{Axis, TickFormat};
use crate::chart::{add_caption, line_path, new_scene, plot_group, season_ticks, stroke_path, x_scale, y_scale};
use crate::data::ShotProfileRow;
use crate::scale::extent;
use crate::scene::{Node, Scene};
use crate::sources::ChartId;
use crate::theme::{Rgba, Theme, BLUE, PURPLE, RED};
use crate::types::{Frame, Season};

pub const SHOT_PROFILE_SINCE: Season = 1997;
const Y_DOMAIN: (f64, f64) = (0.0, 50.0);
const LEGEND_SPACING: f64 = 195.0;

struct Zone {
    key: &'static str,
    label: &'static str,
    color: Rgba,
    width: f64,
    value: fn(&ShotProfileRow) -> Option<f64>,
}

const ZONES: [Zone; 3] = [
    Zone { key: "three", label: "3PA share", color: BLUE, width: 2.5, value: |r| r.percent_fga_from_x3p_range },
    Zone {
        key: "mid",
        label: "Midrange (10-16ft)",
        color: RED,
        width: 2.0,
        value: |r| r.percent_fga_from_x10_16_range,
    },
    Zone {
        key: "long-mid",
        label: "Long midrange (16ft-3pt)",
        color: PURPLE,
        width: 2.0,
        value: |r| r.percent_fga_from_x16_3p_range,
    },
];

pub fn render(rows: &[ShotProfileRow], frame: Frame, theme: &Theme) -> Scene {
    let rows: Vec<&ShotProfileRow> = rows.iter().filter(|r| r.season >= SHOT_PROFILE_SINCE).collect();
    let x = x_scale(extent(rows.iter().map(|r| r.season as f64)).unwrap_or((0.0, 1.0)), &frame);
    let y = y_scale(Y_DOMAIN, &frame);

    let mut plot = plot_group(&frame)
        .child(
            Axis::bottom(season_ticks(rows.len()))
                .title("Season")
                .build(&x, theme)
                .class("x-axis")
                .translate(0.0, frame.inner_height()),
        )
        .child(
            Axis::left(6)
                .format(TickFormat::PercentSuffix)
                .title("Share of Field Goal Attempts")
                .build(&y, theme)
                .class("y-axis"),
        );
    let mut legend = Node::group()
        .class("legend")
        .translate(frame.insets.left as f64 + 10.0, frame.insets.top as f64 - 30.0);

    for (i, zone) in ZONES.iter().enumerate() {
        let points: Vec<(Season, Option<f64>)> =
            rows.iter().map(|r| (r.season, (zone.value)(r).map(|v| v * 100.0))).collect();
        plot.push(stroke_path(line_path(&points, &x, &y), zone.color, zone.width).class("zone").keyed(zone.key));
        legend.push(
            Node::group()
                .class("legend-item")
                .keyed(zone.key)
                .translate(i as f64 * LEGEND_SPACING, 0.0)
                .child(
                    Node::line(0.0, -4.0, 28.0, -4.0)
                        .attr("stroke", zone.color)
                        .attr("stroke-width", zone.width + 1.0),
                )
                .child(
                    Node::text(36.0, 0.0, zone.label)
                        .attr("font-size", 12.0)
                        .attr("font-weight", 600.0),
                ),
        );
    }

    let mut scene = new_scene(&frame, 0, theme);
    scene.root.push(plot);
    scene.root.push(legend);
    add_caption(&mut scene, ChartId::ShotProfile, theme);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::frame_for;

    #[test]
    fn three_zone_lines_with_gap() {
        let rows = vec![
            ShotProfileRow {
                season: 1997,
                percent_fga_from_x3p_range: Some(0.25),
                percent_fga_from_x10_16_range: Some(0.2),
                percent_fga_from_x16_3p_range: Some(0.25),
            },
            ShotProfileRow {
                season: 1998,
                percent_fga_from_x3p_range: None,
                percent_fga_from_x10_16_range: Some(0.2),
                percent_fga_from_x16_3p_range: Some(0.2),
            },
            ShotProfileRow {
                season: 1999,
                percent_fga_from_x3p_range: Some(0.5),
                percent_fga_from_x10_16_range: Some(0.15),
                percent_fga_from_x16_3p_range: Some(0.2),
            },
        ];
        let frame = frame_for(ChartId::ShotProfile, 800, None);
        let scene = render(&rows, frame, &Theme::light());
        let plot = scene.find("plot").expect("plot");
        let keys: Vec<_> = plot.children_with_class("zone").filter_map(|z| z.key.clone()).collect();
        assert_eq!(keys, vec!["three", "mid", "long-mid"]);

        let three = plot.keyed_child("zone", "three").and_then(|z| z.path_data()).expect("path");
        assert_eq!(three.subpath_count(), 2);
        // 50% sits on the top edge of the fixed axis
        let top = three.vertices().last().map(|p| p.y);
        assert_eq!(top, Some(0.0));

        let legend: Vec<_> = scene
            .find("legend")
            .map(|l| l.children_with_class("legend-item").filter_map(|i| i.transform.map(|t| t.tx)).collect())
            .unwrap_or_default();
        assert_eq!(legend, vec![0.0, 195.0, 390.0]);
        assert!(scene.find("axis-title").is_some());
    }
}
