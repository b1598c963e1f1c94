// File: crates/story-core/src/axis.rs
// Summary: Axis model (orientation, tick count, tick format) and its scene subtree.

use crate::geometry::{PathData, Point};
use crate::scale::LinearScale;
use crate::scene::Node;
use crate::theme::Theme;

const TICK_SIZE: f64 = 6.0;
const TICK_PAD: f64 = 3.0;
const FONT_SIZE: f64 = 10.0;
const TITLE_OFFSET: f64 = 45.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickFormat {
    /// Whole numbers ("2015").
    Integer,
    /// Shortest decimals the tick step needs ("0.5", "12").
    Plain,
    /// Fraction shown as a whole percentage (0.25 -> "25%").
    PercentOfUnit,
    /// Value already in percent, suffixed ("40%").
    PercentSuffix,
    /// Fixed decimals.
    Fixed(usize),
}

impl TickFormat {
    pub fn format(self, v: f64, step: f64) -> String {
        match self {
            TickFormat::Integer => format!("{}", v.round() as i64),
            TickFormat::Plain => plain(v, step),
            TickFormat::PercentOfUnit => format!("{:.0}%", v * 100.0),
            TickFormat::PercentSuffix => format!("{}%", plain(v, step)),
            TickFormat::Fixed(n) => format!("{v:.n$}"),
        }
    }
}

fn plain(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-(step.log10() + 1e-9).floor()).max(0.0) as usize
    } else {
        0
    };
    let s = format!("{v:.decimals$}");
    if s.starts_with('-') && s.trim_start_matches(['-', '0', '.']).is_empty() {
        s[1..].to_string()
    } else {
        s
    }
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub orient: Orient,
    pub ticks: usize,
    pub format: TickFormat,
    /// Optional title drawn outside the tick labels.
    pub title: Option<String>,
}

impl Axis {
    pub fn new(orient: Orient, ticks: usize, format: TickFormat) -> Self {
        Self { orient, ticks, format, title: None }
    }

    pub fn bottom(ticks: usize) -> Self {
        Self::new(Orient::Bottom, ticks, TickFormat::Integer)
    }

    pub fn left(ticks: usize) -> Self {
        Self::new(Orient::Left, ticks, TickFormat::Plain)
    }

    pub fn right(ticks: usize) -> Self {
        Self::new(Orient::Right, ticks, TickFormat::Plain)
    }

    pub fn format(mut self, format: TickFormat) -> Self {
        self.format = format;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Tick values and their labels for `scale`.
    pub fn labels(&self, scale: &LinearScale) -> Vec<(f64, String)> {
        let ticks = scale.ticks(self.ticks);
        let step = match ticks.as_slice() {
            [a, b, ..] => (b - a).abs(),
            _ => 1.0,
        };
        ticks.into_iter().map(|v| (v, self.format.format(v, step))).collect()
    }

    /// Axis group in plot coordinates; the caller positions it.
    pub fn build(&self, scale: &LinearScale, theme: &Theme) -> Node {
        let mut g = Node::group().class("axis").attr("font-size", FONT_SIZE);
        g.children = self.children(scale, theme);
        g
    }

    /// Replace the contents of an existing axis group, keeping the group itself.
    pub fn redraw(&self, node: &mut Node, scale: &LinearScale, theme: &Theme) {
        node.children = self.children(scale, theme);
    }

    fn tick_line(&self) -> Node {
        match self.orient {
            Orient::Bottom => Node::line(0.0, 0.0, 0.0, TICK_SIZE),
            Orient::Left => Node::line(-TICK_SIZE, 0.0, 0.0, 0.0),
            Orient::Right => Node::line(0.0, 0.0, TICK_SIZE, 0.0),
        }
    }

    fn children(&self, scale: &LinearScale, theme: &Theme) -> Vec<Node> {
        let (r0, r1) = scale.range();
        let mut domain = PathData::new();
        let (text_x, text_y, anchor) = match self.orient {
            Orient::Bottom => {
                domain.move_to(Point::new(r0, 0.0));
                domain.line_to(Point::new(r1, 0.0));
                (0.0, TICK_SIZE + TICK_PAD + FONT_SIZE * 0.71, "middle")
            }
            Orient::Left => {
                domain.move_to(Point::new(0.0, r0));
                domain.line_to(Point::new(0.0, r1));
                (-(TICK_SIZE + TICK_PAD), FONT_SIZE * 0.32, "end")
            }
            Orient::Right => {
                domain.move_to(Point::new(0.0, r0));
                domain.line_to(Point::new(0.0, r1));
                (TICK_SIZE + TICK_PAD, FONT_SIZE * 0.32, "start")
            }
        };

        let mut out = vec![Node::path(domain)
            .class("domain")
            .attr("fill", "none")
            .attr("stroke", theme.axis_line)];
        for (v, label) in self.labels(scale) {
            let p = scale.map(v);
            let (tx, ty) = if self.orient == Orient::Bottom { (p, 0.0) } else { (0.0, p) };
            out.push(
                Node::group()
                    .class("tick")
                    .keyed(label.clone())
                    .translate(tx, ty)
                    .child(self.tick_line().attr("stroke", theme.axis_line))
                    .child(
                        Node::text(text_x, text_y, label)
                            .attr("fill", theme.tick)
                            .attr("text-anchor", anchor),
                    ),
            );
        }

        if let Some(title) = &self.title {
            let mid = (r0 + r1) / 2.0;
            let title = match self.orient {
                Orient::Bottom => Node::text(mid, TITLE_OFFSET, title.as_str()),
                Orient::Left => Node::text(0.0, 0.0, title.as_str()).translate(-TITLE_OFFSET - 5.0, mid).rotate(-90.0),
                Orient::Right => Node::text(0.0, 0.0, title.as_str()).translate(TITLE_OFFSET + 5.0, mid).rotate(90.0),
            };
            out.push(
                title
                    .class("axis-title")
                    .attr("fill", theme.text)
                    .attr("font-size", 12.0)
                    .attr("text-anchor", "middle"),
            );
        }
        out
    }
}
