// File: crates/story-core/src/chart/adoption.rs
// Summary: Net rating of early three-point adopters, one dot per team season.

use crate::axis::Axis;
use crate::chart::{add_caption, new_scene, plot_group, season_ticks, x_scale, y_scale};
use crate::data::AdoptionRow;
use crate::scale::extent;
use crate::scene::{Node, Scene};
use crate::sources::ChartId;
use crate::theme::{Theme, GREEN};
use crate::types::Frame;

pub fn render(rows: &[AdoptionRow], frame: Frame, theme: &Theme) -> Scene {
    let rated: Vec<(&AdoptionRow, f64)> = rows
        .iter()
        .filter_map(|r| r.net_rating.filter(|v| v.is_finite()).map(|v| (r, v)))
        .collect();

    let x = x_scale(extent(rated.iter().map(|(r, _)| r.season as f64)).unwrap_or((0.0, 1.0)), &frame).nice(10);
    let y = y_scale(extent(rated.iter().map(|(_, v)| *v)).unwrap_or((0.0, 1.0)), &frame).nice(10);

    let mut plot = plot_group(&frame)
        .child(
            Axis::bottom(season_ticks(rated.len()))
                .build(&x, theme)
                .class("x-axis")
                .translate(0.0, frame.inner_height()),
        )
        .child(Axis::left(6).build(&y, theme).class("y-axis"));
    for (row, net) in &rated {
        plot.push(
            Node::circle(x.map(row.season as f64), y.map(*net), 5.0)
                .class("team-season")
                .keyed(format!("{}-{}", row.team, row.season))
                .attr("fill", GREEN)
                .attr("opacity", 0.8)
                .title(format!("{} ({})\nNet Rating: {net:.1}", row.team, row.season)),
        );
    }

    let mut scene = new_scene(&frame, 0, theme);
    scene.root.push(plot);
    add_caption(&mut scene, ChartId::TeamAdoption, theme);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::frame_for;

    #[test]
    fn skips_unrated_rows_and_nices_axes() {
        let rows = vec![
            AdoptionRow { team: "HOU".into(), season: 2013, net_rating: Some(3.25) },
            AdoptionRow { team: "GSW".into(), season: 2016, net_rating: Some(10.8) },
            AdoptionRow { team: "ATL".into(), season: 2014, net_rating: None },
            AdoptionRow { team: "BKN".into(), season: 2019, net_rating: Some(-1.5) },
        ];
        let scene = render(&rows, frame_for(ChartId::TeamAdoption, 800, None), &Theme::light());
        let plot = scene.find("plot").expect("plot");
        assert_eq!(plot.children_with_class("team-season").count(), 3);
        let gsw = plot.keyed_child("team-season", "GSW-2016").expect("dot");
        assert_eq!(gsw.title.as_deref(), Some("GSW (2016)\nNet Rating: 10.8"));

        // [-1.5, 10.8] nices to [-2, 11]; ticks step by 2
        let y_ticks: Vec<_> = plot
            .find("y-axis")
            .map(|a| a.children_with_class("tick").filter_map(|t| t.key.clone()).collect())
            .unwrap_or_default();
        assert_eq!(y_ticks.first().map(String::as_str), Some("-2"));
        assert_eq!(y_ticks.last().map(String::as_str), Some("10"));
    }
}
