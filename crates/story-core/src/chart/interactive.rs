// File: crates/story-core/src/chart/interactive.rs
// Summary: Couples control state with an overlay chart; each event re-renders synchronously.

use tracing::debug;

use crate::chart::overlay::{OverlayChart, PlotSource, RenderReport};
use crate::controls::{ControlEvent, Controls};
use crate::scene::Scene;
use crate::selection::{AddOutcome, Selection};

/// Result of one dispatched event.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    pub outcome: Option<AddOutcome>,
    /// Present when the chart was redrawn.
    pub render: Option<RenderReport>,
}

pub struct InteractiveChart<S> {
    controls: Controls,
    chart: OverlayChart<S>,
}

impl<S: PlotSource> InteractiveChart<S> {
    /// Draws the initial state right away.
    pub fn new(chart: OverlayChart<S>, selection: Selection) -> Self {
        let mut this = Self { controls: Controls::new(selection), chart };
        this.chart.render(&this.controls.selection);
        this
    }

    pub fn dispatch(&mut self, event: &ControlEvent) -> Dispatch {
        let t = self.controls.handle(event, self.chart.source());
        self.controls = t.state;
        let render = t.rerender.then(|| self.chart.render(&self.controls.selection));
        debug!(chart = %self.chart.id(), ?event, outcome = ?t.outcome, rerendered = render.is_some(), "dispatched");
        Dispatch { outcome: t.outcome, render }
    }

    pub fn dispatch_all<'e, I>(&mut self, events: I) -> Vec<Dispatch>
    where
        I: IntoIterator<Item = &'e ControlEvent>,
    {
        events.into_iter().map(|e| self.dispatch(e)).collect()
    }

    pub fn controls(&self) -> &Controls { &self.controls }
    pub fn selection(&self) -> &Selection { &self.controls.selection }
    pub fn chart(&self) -> &OverlayChart<S> { &self.chart }
    pub fn scene(&self) -> &Scene { self.chart.scene() }
    pub fn into_scene(self) -> Scene { self.chart.into_scene() }
}
