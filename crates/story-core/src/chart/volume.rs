// File: crates/story-core/src/chart/volume.rs
// Summary: Small multiples of team 3PA volume against 3P% for a few landmark seasons.

use crate::axis::{Axis, TickFormat};
use crate::chart::{add_caption, new_scene};
use crate::data::{TeamVolume, VolumeDoc};
use crate::scale::{extent, LinearScale};
use crate::scene::{Node, Scene};
use crate::sources::ChartId;
use crate::theme::{Theme, BLUE};
use crate::types::Frame;

/// Panel seasons, drawn left to right when present.
pub const VOLUME_SEASONS: [&str; 4] = ["2000", "2010", "2020", "2025"];
const AXIS_TICKS: usize = 4;

fn plotted(teams: &[TeamVolume]) -> impl Iterator<Item = (&TeamVolume, f64, f64)> {
    teams
        .iter()
        .filter_map(|t| Some((t, t.x3pa_per_game.filter(|v| v.is_finite())?, t.x3p_percent.filter(|v| v.is_finite())?)))
}

/// One framed panel per present season. All panels share both domains.
pub fn render(doc: &VolumeDoc, frame: Frame, theme: &Theme) -> Scene {
    let seasons: Vec<(&str, &Vec<TeamVolume>)> =
        VOLUME_SEASONS.iter().filter_map(|s| doc.get(*s).map(|teams| (*s, teams))).collect();

    let max_x = seasons
        .iter()
        .flat_map(|(_, teams)| plotted(teams).map(|(_, x, _)| x))
        .fold(0.0, f64::max);
    let (min_y, max_y) =
        extent(seasons.iter().flat_map(|(_, teams)| plotted(teams).map(|(_, _, y)| y))).unwrap_or((0.0, 1.0));

    let cols = seasons.len().max(1);
    let panel_width = frame.width as f64 / cols as f64;
    let inner_width = (panel_width - frame.insets.hsum() as f64).max(0.0);
    let inner_height = frame.inner_height();
    let x = LinearScale::new((0.0, max_x * 1.1), (0.0, inner_width));
    let y = LinearScale::new((min_y * 0.95, max_y * 1.05), (inner_height, 0.0));

    let mut scene = new_scene(&frame, 0, theme);
    for (index, (season, teams)) in seasons.iter().enumerate() {
        let mut panel = Node::group()
            .class("panel")
            .keyed(*season)
            .translate(panel_width * index as f64 + frame.insets.left as f64, frame.insets.top as f64)
            .child(
                Node::rect(0.0, 0.0, inner_width, inner_height)
                    .class("panel-frame")
                    .attr("fill", "none")
                    .attr("stroke", theme.panel_frame),
            )
            .child(
                Axis::bottom(AXIS_TICKS)
                    .format(TickFormat::Plain)
                    .build(&x, theme)
                    .class("x-axis")
                    .translate(0.0, inner_height),
            )
            .child(Axis::left(AXIS_TICKS).format(TickFormat::Fixed(3)).build(&y, theme).class("y-axis"))
            .child(
                Node::text(inner_width / 2.0, -15.0, format!("Season {season}"))
                    .class("panel-title")
                    .attr("text-anchor", "middle")
                    .attr("font-weight", 600.0),
            );
        for (team, attempts, pct) in plotted(teams) {
            panel.push(
                Node::circle(x.map(attempts), y.map(pct), 4.0)
                    .class("team")
                    .keyed(team.team.as_str())
                    .attr("fill", BLUE)
                    .attr("opacity", 0.75)
                    .title(format!("{}\n3PA: {attempts:.1}\n3P%: {:.1}%", team.team, pct * 100.0)),
            );
        }
        scene.root.push(panel);
    }
    add_caption(&mut scene, ChartId::VolumeEfficiency, theme);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::frame_for;

    fn team(name: &str, a: f64, p: Option<f64>) -> TeamVolume {
        TeamVolume { team: name.into(), x3pa_per_game: Some(a), x3p_percent: p }
    }

    #[test]
    fn panels_follow_present_seasons() {
        let mut doc = VolumeDoc::new();
        doc.insert("2020".into(), vec![team("HOU", 45.0, Some(0.375)), team("MIL", 38.0, None)]);
        doc.insert("2000".into(), vec![team("SAC", 13.0, Some(0.35))]);
        doc.insert("1990".into(), vec![team("XXX", 99.0, Some(0.9))]);
        let scene = render(&doc, frame_for(ChartId::VolumeEfficiency, 800, None), &Theme::light());

        let panels: Vec<_> = scene.root.children_with_class("panel").filter_map(|p| p.key.clone()).collect();
        assert_eq!(panels, vec!["2000", "2020"]);
        let second = scene.root.keyed_child("panel", "2020").expect("panel");
        assert_eq!(second.transform.map(|t| t.tx), Some(460.0));
        assert_eq!(second.children_with_class("team").count(), 1);
        let hou = second.keyed_child("team", "HOU").expect("circle");
        assert_eq!(hou.title.as_deref(), Some("HOU\n3PA: 45.0\n3P%: 37.5%"));
        // 1990 is not a panel season, so its 99 3PA does not stretch the x domain
        let x_end = hou.num("cx").expect("cx");
        assert!((x_end - 310.0 / 1.1).abs() < 1e-9);
    }
}
