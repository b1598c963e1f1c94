// File: crates/story-core/src/lib.rs
// Summary: Core library entry point; exports data loading, series building, selection state and chart scenes.

pub mod types;
pub mod error;
pub mod theme;
pub mod scale;
pub mod geometry;
pub mod curve;
pub mod scene;
pub mod svg;
pub mod series;
pub mod builder;
pub mod data;
pub mod loader;
pub mod share;
pub mod selection;
pub mod controls;
pub mod options;
pub mod axis;
pub mod sources;
pub mod chart;
pub mod config;
pub mod story;

pub use builder::SeriesBuilder;
pub use chart::interactive::{Dispatch, InteractiveChart};
pub use chart::overlay::{OverlayChart, PlotSeries, PlotSource, RenderReport};
pub use config::{StoryConfig, TargetConfig};
pub use controls::{ControlEvent, Controls, Transition};
pub use error::{StoryError, StoryResult};
pub use scene::{Node, NodeId, Scene};
pub use selection::{AddOutcome, ColorAssignment, Selection};
pub use series::{EntitySeries, RawRow, SeasonRecord, SeriesSet};
pub use share::ShareSet;
pub use sources::ChartId;
pub use story::{RenderedChart, Story, StoryReport};
pub use theme::{Rgba, Theme};
