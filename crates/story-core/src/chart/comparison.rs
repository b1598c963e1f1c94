// File: crates/story-core/src/chart/comparison.rs
// Summary: Featured player vs league average, with any number of added players.

use crate::axis::TickFormat;
use crate::chart::interactive::InteractiveChart;
use crate::chart::overlay::{BaselineStyle, Layer, LegendLayout, OverlayChart, OverlayStyle, PlotSeries, PlotSource};
use crate::data::CurryVsLeague;
use crate::selection::Selection;
use crate::series::SeriesSet;
use crate::sources::ChartId;
use crate::theme::Theme;
use crate::types::{Frame, Season};

pub const FEATURED_PLAYER: &str = "Stephen Curry";
pub const COMPARISON_SINCE: Season = 2010;
pub const LEAGUE_LABEL: &str = "League avg player 3PA";

pub fn style() -> OverlayStyle {
    OverlayStyle {
        baseline: BaselineStyle::Area,
        legend: LegendLayout::Row { spacing: 180.0 },
        y_format: TickFormat::Plain,
        line_width: 3.0,
        dot_radius: 4.0,
        colored_chips: false,
    }
}

/// League average attempts per player from `since` on.
pub fn league_baseline(doc: &CurryVsLeague, since: Season) -> PlotSeries {
    PlotSeries::from_values(
        LEAGUE_LABEL,
        doc.league_avg_player_3pa_per_game
            .iter()
            .filter(|r| r.season >= since)
            .map(|r| (r.season, r.avg_player_3pa_per_game)),
    )
}

/// The comparison chart drawn for an empty selection. `featured` is always
/// shown (with an empty line when it has no data) and cannot be added again.
pub fn build(
    league: &CurryVsLeague,
    series: SeriesSet,
    featured: &str,
    since: Season,
    frame: Frame,
    theme: Theme,
) -> InteractiveChart<SeriesSet> {
    let baseline = Layer::new(league_baseline(league, since), theme.baseline_fill);
    let pinned = series
        .plot_series(featured)
        .unwrap_or_else(|| PlotSeries::from_values(featured, std::iter::empty()));
    let chart = OverlayChart::new(
        ChartId::CurryComparison,
        frame,
        theme,
        style(),
        series,
        vec![baseline],
        Some(Layer::new(pinned, theme.featured)),
    );
    InteractiveChart::new(chart, Selection::unbounded().with_pinned(featured))
}
