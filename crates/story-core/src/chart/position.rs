// File: crates/story-core/src/chart/position.rs
// Summary: League three-point share by position, with up to five player overlays.

use crate::axis::TickFormat;
use crate::chart::interactive::InteractiveChart;
use crate::chart::overlay::{BaselineStyle, Layer, LegendLayout, OverlayChart, OverlayStyle, PlotSeries};
use crate::data::PositionSharesRow;
use crate::selection::Selection;
use crate::share::ShareSet;
use crate::sources::ChartId;
use crate::theme::{Rgba, Theme, BLUE, BROWN, GREEN, PURPLE, RED};
use crate::types::{Frame, Season};

pub const POSITION_SINCE: Season = 1997;

/// Baseline positions in legend order with their line colours.
pub const POSITIONS: [(&str, Rgba); 5] = [("PG", BLUE), ("SG", RED), ("SF", GREEN), ("PF", PURPLE), ("C", BROWN)];

pub fn style() -> OverlayStyle {
    OverlayStyle {
        baseline: BaselineStyle::Lines,
        legend: LegendLayout::Column { spacing: 18.0 },
        y_format: TickFormat::PercentOfUnit,
        line_width: 2.5,
        dot_radius: 3.5,
        colored_chips: true,
    }
}

/// One layer per position from `since` on; a missing share is a gap.
pub fn baselines(rows: &[PositionSharesRow], since: Season) -> Vec<Layer> {
    let rows: Vec<&PositionSharesRow> = rows.iter().filter(|r| r.season >= since).collect();
    POSITIONS
        .iter()
        .map(|&(pos, color)| {
            let values = rows.iter().map(|r| {
                let v = match pos {
                    "PG" => r.pg,
                    "SG" => r.sg,
                    "SF" => r.sf,
                    "PF" => r.pf,
                    _ => r.c,
                };
                (r.season, v)
            });
            Layer::new(PlotSeries::from_values(pos, values), color)
        })
        .collect()
}

/// The position chart drawn for an empty selection of at most `capacity` players.
pub fn build(
    rows: &[PositionSharesRow],
    shares: ShareSet,
    capacity: usize,
    since: Season,
    frame: Frame,
    theme: Theme,
) -> InteractiveChart<ShareSet> {
    let chart = OverlayChart::new(
        ChartId::PositionShare,
        frame,
        theme,
        style(),
        shares,
        baselines(rows, since),
        None,
    );
    InteractiveChart::new(chart, Selection::bounded(capacity))
}
