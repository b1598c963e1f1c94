// File: crates/story-core/src/chart/overlay.rs
// Summary: Baseline-plus-selection line chart, re-rendered through keyed joins.
// Notes:
// - Every render recomputes both domains from the currently visible series, then
//   reconciles lines, point groups, legend items and chips by entity name.
// - The renderer reads the selection; it never changes it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::axis::{Axis, TickFormat};
use crate::chart::{add_caption, new_scene, plot_group, project, season_ticks, stroke_path, x_scale, y_scale};
use crate::curve::{monotone_area, monotone_line};
use crate::geometry::PathData;
use crate::scale::LinearScale;
use crate::scene::{JoinReport, Node, Scene, Tag};
use crate::selection::{ColorAssignment, Selection};
use crate::series::{EntityLookup, SeriesSet};
use crate::share::ShareSet;
use crate::sources::ChartId;
use crate::theme::{Rgba, Theme};
use crate::types::{Frame, Season};

/// Room under the plot for the chip strip.
pub const CHIP_STRIP_HEIGHT: u32 = 36;
const CHIP_HEIGHT: f64 = 22.0;
const CHIP_GAP: f64 = 8.0;
const CHIP_CHAR_WIDTH: f64 = 7.0;
const CHIP_PADDING: f64 = 40.0;
const Y_TICKS: usize = 6;

/// Values of one entity over consecutive seasons; `None` is a gap.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    pub name: String,
    pub points: Vec<(Season, Option<f64>)>,
}

impl PlotSeries {
    /// Densify from the first to the last season; seasons without a finite
    /// value become gaps. The first value given for a season wins.
    pub fn from_values<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (Season, Option<f64>)>,
    {
        let mut known: BTreeMap<Season, Option<f64>> = BTreeMap::new();
        for (season, v) in values {
            known.entry(season).or_insert(v.filter(|v| v.is_finite()));
        }
        let points = match (known.keys().next(), known.keys().next_back()) {
            (Some(&first), Some(&last)) => (first..=last).map(|s| (s, known.get(&s).copied().flatten())).collect(),
            _ => Vec::new(),
        };
        Self { name: name.into(), points }
    }

    pub fn defined(&self) -> impl Iterator<Item = (Season, f64)> + '_ {
        self.points.iter().filter_map(|&(s, v)| v.map(|v| (s, v)))
    }

    pub fn has_values(&self) -> bool {
        self.defined().next().is_some()
    }

    pub fn max(&self) -> Option<f64> {
        self.defined().map(|(_, v)| v).reduce(f64::max)
    }

    pub fn seasons(&self) -> Option<(Season, Season)> {
        Some((self.points.first()?.0, self.points.last()?.0))
    }
}

/// Where the overlay chart gets entity series from.
pub trait PlotSource: EntityLookup {
    fn plot_series(&self, name: &str) -> Option<PlotSeries>;
}

impl PlotSource for SeriesSet {
    fn plot_series(&self, name: &str) -> Option<PlotSeries> {
        let s = self.get(name)?;
        Some(PlotSeries::from_values(name, s.records().iter().map(|r| (r.season, Some(r.attempts)))))
    }
}

impl PlotSource for ShareSet {
    fn plot_series(&self, name: &str) -> Option<PlotSeries> {
        let s = self.get(name)?;
        Some(PlotSeries::from_values(name, s.points.iter().map(|&(season, v)| (season, Some(v)))))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaselineStyle {
    /// Filled down to the x axis.
    Area,
    /// One stroked line per baseline series.
    Lines,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LegendLayout {
    /// Above the plot, left to right.
    Row { spacing: f64 },
    /// In the right margin, top to bottom.
    Column { spacing: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub baseline: BaselineStyle,
    pub legend: LegendLayout,
    pub y_format: TickFormat,
    pub line_width: f64,
    pub dot_radius: f64,
    /// Fill chips with the entity colour instead of the neutral chip colour.
    pub colored_chips: bool,
}

/// A series drawn in a fixed colour.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub series: PlotSeries,
    pub color: Rgba,
}

impl Layer {
    pub fn new(series: PlotSeries, color: Rgba) -> Self {
        Self { series, color }
    }
}

/// Keys touched by one render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub baseline: JoinReport,
    pub lines: JoinReport,
    pub points: JoinReport,
    pub legend: JoinReport,
    pub chips: JoinReport,
}

struct Entry {
    name: String,
    color: Rgba,
    points: Vec<(Season, Option<f64>)>,
    baseline: bool,
}

pub struct OverlayChart<S> {
    id: ChartId,
    frame: Frame,
    theme: Theme,
    style: OverlayStyle,
    source: S,
    baselines: Vec<Layer>,
    pinned: Option<Layer>,
    colors: ColorAssignment,
    x: LinearScale,
    y: LinearScale,
    scene: Scene,
}

impl<S: PlotSource> OverlayChart<S> {
    /// Chart skeleton with empty layers; call [`OverlayChart::render`] to draw.
    pub fn new(
        id: ChartId,
        frame: Frame,
        theme: Theme,
        style: OverlayStyle,
        source: S,
        baselines: Vec<Layer>,
        pinned: Option<Layer>,
    ) -> Self {
        let x = x_scale((0.0, 1.0), &frame);
        let y = y_scale((0.0, 1.0), &frame);
        let mut scene = new_scene(&frame, CHIP_STRIP_HEIGHT, &theme);

        let plot = plot_group(&frame)
            .child(
                Axis::bottom(1)
                    .build(&x, &theme)
                    .class("x-axis")
                    .translate(0.0, frame.inner_height()),
            )
            .child(Axis::left(Y_TICKS).format(style.y_format).build(&y, &theme).class("y-axis"))
            .child(Node::group().class("baseline"))
            .child(Node::group().class("entity-lines"))
            .child(Node::group().class("entity-dots"));
        let (lx, ly) = match style.legend {
            LegendLayout::Row { .. } => (frame.insets.left as f64 + 10.0, frame.insets.top as f64 - 35.0),
            LegendLayout::Column { .. } => {
                (frame.width as f64 - frame.insets.right as f64 + 10.0, frame.insets.top as f64)
            }
        };
        scene.root.push(plot);
        scene.root.push(Node::group().class("legend").translate(lx, ly));
        scene.root.push(
            Node::group()
                .class("chips")
                .class("empty")
                .translate(frame.insets.left as f64, frame.height as f64 + 6.0),
        );
        add_caption(&mut scene, id, &theme);

        Self { id, frame, theme, style, source, baselines, pinned, colors: ColorAssignment::new(), x, y, scene }
    }

    pub fn id(&self) -> ChartId { self.id }
    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn into_scene(self) -> Scene { self.scene }
    pub fn source(&self) -> &S { &self.source }
    pub fn x_scale(&self) -> &LinearScale { &self.x }
    pub fn y_scale(&self) -> &LinearScale { &self.y }
    pub fn colors(&self) -> &ColorAssignment { &self.colors }

    /// Redraw for `selection`: recompute both domains, then join every layer.
    pub fn render(&mut self, selection: &Selection) -> RenderReport {
        let entries = self.entries(selection);
        let (x_domain, y_domain) = self.domains(&entries);
        self.x.set_domain(x_domain);
        self.y.set_domain(y_domain);
        let (x, y) = (self.x, self.y);
        let theme = self.theme;
        let style = self.style;
        let base_y = self.frame.inner_height();

        let season_count = self.baselines.first().map(|l| l.series.points.len()).unwrap_or(0);
        if let Some(axis) = self.scene.find_mut("x-axis") {
            Axis::bottom(season_ticks(season_count)).redraw(axis, &x, &theme);
        }
        if let Some(axis) = self.scene.find_mut("y-axis") {
            Axis::left(Y_TICKS).format(style.y_format).redraw(axis, &y, &theme);
        }

        let mut report = RenderReport { x_domain, y_domain, ..RenderReport::default() };
        let baseline_entries: Vec<&Entry> = entries.iter().filter(|e| e.baseline).collect();
        let entity_entries: Vec<&Entry> = entries.iter().filter(|e| !e.baseline).collect();

        if let Some(g) = self.scene.find_mut("baseline") {
            report.baseline = match style.baseline {
                BaselineStyle::Area => g.join(
                    "baseline-area",
                    &baseline_entries,
                    |e| e.name.clone(),
                    |_| {
                        Node::path(PathData::new())
                            .attr("fill", theme.baseline_fill)
                            .attr("stroke", theme.baseline_stroke)
                            .attr("stroke-width", 1.0)
                            .attr("stroke-opacity", 0.3)
                    },
                    |n, e, _| n.set("d", monotone_area(&project(&e.points, &x, &y), base_y)),
                ),
                BaselineStyle::Lines => g.join(
                    "baseline-line",
                    &baseline_entries,
                    |e| e.name.clone(),
                    |e| stroke_path(PathData::new(), e.color, 2.5),
                    |n, e, _| {
                        n.set("stroke", e.color);
                        n.set("d", monotone_line(&project(&e.points, &x, &y)));
                    },
                ),
            };
        }

        if let Some(g) = self.scene.find_mut("entity-lines") {
            report.lines = g.join(
                "entity-line",
                &entity_entries,
                |e| e.name.clone(),
                |e| stroke_path(PathData::new(), e.color, style.line_width),
                |n, e, _| {
                    n.set("stroke", e.color);
                    n.set("d", monotone_line(&project(&e.points, &x, &y)));
                },
            );
        }

        if let Some(g) = self.scene.find_mut("entity-dots") {
            report.points = g.join(
                "entity-points",
                &entity_entries,
                |e| e.name.clone(),
                |_| Node::group(),
                |n, e, _| {
                    let defined: Vec<(Season, f64)> =
                        e.points.iter().filter_map(|&(s, v)| v.map(|v| (s, v))).collect();
                    n.join(
                        "dot",
                        &defined,
                        |(s, _)| s.to_string(),
                        |_| Node::circle(0.0, 0.0, style.dot_radius),
                        |c, &(s, v), _| {
                            c.set("cx", x.map(s as f64));
                            c.set("cy", y.map(v));
                            c.set("fill", e.color);
                        },
                    );
                },
            );
        }

        if let Some(g) = self.scene.find_mut("legend") {
            report.legend = g.join(
                "legend-item",
                &entries,
                |e| e.name.clone(),
                |_| legend_item(style.legend),
                |n, e, i| {
                    let (swatch_fill, swatch_stroke) = if e.baseline && style.baseline == BaselineStyle::Area {
                        (theme.baseline_fill, theme.baseline_stroke)
                    } else {
                        (e.color, e.color)
                    };
                    match style.legend {
                        LegendLayout::Row { spacing } => n.set_translate(i as f64 * spacing, 0.0),
                        LegendLayout::Column { spacing } => n.set_translate(0.0, i as f64 * spacing),
                    }
                    if let Some(sw) = n.find_mut("swatch") {
                        sw.set("stroke", swatch_stroke);
                        if sw.tag == Tag::Rect {
                            sw.set("fill", swatch_fill);
                        }
                    }
                    if let Some(label) = n.find_mut("label") {
                        label.set_text(e.name.as_str());
                    }
                },
            );
        }

        let chips = self.chip_layout(selection);
        if let Some(g) = self.scene.find_mut("chips") {
            report.chips = g.join(
                "chip",
                &chips,
                |c| c.name.clone(),
                |c| chip(&c.name),
                |n, c, _| {
                    n.set_translate(c.x, 0.0);
                    if let Some(bg) = n.find_mut("chip-bg") {
                        bg.set("width", c.width);
                        bg.set("fill", c.fill);
                    }
                    for class in ["chip-label", "chip-remove"] {
                        if let Some(t) = n.find_mut(class) {
                            t.set("fill", c.text);
                        }
                    }
                    if let Some(t) = n.find_mut("chip-remove") {
                        t.set("x", c.width - 16.0);
                    }
                },
            );
            g.set_class_flag("empty", selection.is_empty());
        }

        debug!(
            chart = %self.id,
            selected = selection.len(),
            y_max = y_domain.1,
            lines_changed = !report.lines.is_noop(),
            entered = ?report.lines.entered,
            exited = ?report.lines.exited,
            "overlay rendered"
        );
        report
    }

    /// Baselines, then the pinned layer, then selected entities that have data.
    fn entries(&mut self, selection: &Selection) -> Vec<Entry> {
        let mut out: Vec<Entry> = self
            .baselines
            .iter()
            .map(|l| Entry { name: l.series.name.clone(), color: l.color, points: l.series.points.clone(), baseline: true })
            .collect();
        if let Some(p) = &self.pinned {
            out.push(Entry { name: p.series.name.clone(), color: p.color, points: p.series.points.clone(), baseline: false });
        }
        for name in selection.names() {
            let Some(series) = self.source.plot_series(name).filter(PlotSeries::has_values) else { continue };
            let color = self.colors.color(name);
            out.push(Entry { name: name.clone(), color, points: series.points, baseline: false });
        }
        out
    }

    fn domains(&self, entries: &[Entry]) -> ((f64, f64), (f64, f64)) {
        let season_extent = |pred: &dyn Fn(&Entry) -> bool| {
            entries
                .iter()
                .filter(|e| pred(e))
                .filter_map(|e| Some((e.points.first()?.0, e.points.last()?.0)))
                .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
        };
        let x_domain = season_extent(&|e| e.baseline)
            .or_else(|| season_extent(&|_| true))
            .map(|(a, b)| (a as f64, b as f64))
            .unwrap_or((0.0, 1.0));

        let max = entries
            .iter()
            .flat_map(|e| e.points.iter().filter_map(|p| p.1))
            .filter(|v| v.is_finite())
            .reduce(f64::max);
        let upper = match max {
            Some(m) if m > 0.0 => m * 1.1,
            _ => 1.1,
        };
        (x_domain, (0.0, upper))
    }

    fn chip_layout(&mut self, selection: &Selection) -> Vec<ChipSpec> {
        let mut x = 0.0;
        let mut out = Vec::with_capacity(selection.len());
        for name in selection.names() {
            let width = name.chars().count() as f64 * CHIP_CHAR_WIDTH + CHIP_PADDING;
            let (fill, text) = if self.style.colored_chips {
                (self.colors.color(name), self.theme.chip_text)
            } else {
                (self.theme.chip_fill, self.theme.text)
            };
            out.push(ChipSpec { name: name.clone(), x, width, fill, text });
            x += width + CHIP_GAP;
        }
        out
    }
}

struct ChipSpec {
    name: String,
    x: f64,
    width: f64,
    fill: Rgba,
    text: Rgba,
}

fn legend_item(layout: LegendLayout) -> Node {
    match layout {
        LegendLayout::Row { .. } => Node::group()
            .child(
                Node::rect(0.0, -12.0, 18.0, 9.0)
                    .class("swatch")
                    .attr("rx", 2.0)
                    .attr("ry", 2.0)
                    .attr("stroke-width", 1.5),
            )
            .child(
                Node::text(24.0, -4.0, "")
                    .class("label")
                    .attr("font-size", 12.0)
                    .attr("font-weight", 600.0),
            ),
        LegendLayout::Column { .. } => Node::group()
            .child(Node::line(0.0, 0.0, 20.0, 0.0).class("swatch").attr("stroke-width", 3.0))
            .child(Node::text(30.0, 4.0, "").class("label").attr("font-size", 12.0)),
    }
}

fn chip(name: &str) -> Node {
    Node::group()
        .child(
            Node::rect(0.0, 0.0, 0.0, CHIP_HEIGHT)
                .class("chip-bg")
                .attr("rx", CHIP_HEIGHT / 2.0)
                .attr("ry", CHIP_HEIGHT / 2.0),
        )
        .child(Node::text(10.0, 15.0, name).class("chip-label").attr("font-size", 12.0))
        .child(
            Node::text(0.0, 15.0, "\u{2715}")
                .class("chip-remove")
                .attr("font-size", 12.0)
                .attr("aria-label", "Remove player"),
        )
}
