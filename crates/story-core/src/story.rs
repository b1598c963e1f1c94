// File: crates/story-core/src/story.rs
// Summary: Loads, builds and writes all six charts; one chart failing never stops the others.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::builder::SeriesBuilder;
use crate::chart::interactive::InteractiveChart;
use crate::chart::overlay::PlotSource;
use crate::chart::{adoption, comparison, frame_for, league_trend, position, shot_profile, volume};
use crate::config::StoryConfig;
use crate::controls::ControlEvent;
use crate::data::{
    AdoptionRow, CurryVsLeague, LeagueTrendRow, PlayerShareRecord, PositionSharesRow, ShotProfileRow, VolumeDoc,
    ADOPTION_FILE, CURRY_FILE, LEAGUE_TREND_FILE, PLAYER_PER_GAME_FILE, PLAYER_SHARE_FILE, POSITION_SHARES_FILE,
    SHOT_PROFILE_FILE, VOLUME_FILE,
};
use crate::error::StoryResult;
use crate::loader::DataLoader;
use crate::scene::Scene;
use crate::series::SeriesSet;
use crate::share::ShareSet;
use crate::sources::ChartId;
use crate::svg::write_svg;
use crate::theme::Theme;
use crate::types::Frame;

/// One chart written to disk.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub id: ChartId,
    pub path: PathBuf,
    pub scene: Scene,
}

#[derive(Clone, Debug, Default)]
pub struct StoryReport {
    pub rendered: Vec<RenderedChart>,
    /// Charts whose target is disabled.
    pub skipped: Vec<ChartId>,
    pub failed: Vec<(ChartId, String)>,
}

impl StoryReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Story {
    config: StoryConfig,
    loader: DataLoader,
    theme: Theme,
}

impl Story {
    pub fn new(config: StoryConfig) -> Self {
        let loader = DataLoader::new(&config.data_dir);
        let theme = config.theme();
        Self { config, loader, theme }
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    fn frame(&self, id: ChartId) -> Frame {
        frame_for(id, self.config.width, self.config.height)
    }

    /// Player series for the comparison chart.
    pub fn comparison_series(&self) -> StoryResult<SeriesSet> {
        let rows = self.loader.player_rows(PLAYER_PER_GAME_FILE)?;
        Ok(SeriesBuilder::new()
            .aggregate_team(self.config.aggregate_team.as_str())
            .since(self.config.comparison_since)
            .build(&rows))
    }

    /// Player shares for the position chart.
    pub fn share_set(&self) -> StoryResult<ShareSet> {
        let records: Vec<PlayerShareRecord> = self.loader.json(PLAYER_SHARE_FILE)?;
        Ok(ShareSet::from_records(&records, self.config.position_since))
    }

    /// Comparison chart with the configured players already added.
    pub fn comparison(&self) -> StoryResult<InteractiveChart<SeriesSet>> {
        let league: CurryVsLeague = self.loader.json(CURRY_FILE)?;
        let mut chart = comparison::build(
            &league,
            self.comparison_series()?,
            &self.config.featured_player,
            self.config.comparison_since,
            self.frame(ChartId::CurryComparison),
            self.theme,
        );
        pick_all(&mut chart, &self.config.comparison_players);
        Ok(chart)
    }

    /// Position chart with the configured players already added.
    pub fn position(&self) -> StoryResult<InteractiveChart<ShareSet>> {
        let rows: Vec<PositionSharesRow> = self.loader.json(POSITION_SHARES_FILE)?;
        let mut chart = position::build(
            &rows,
            self.share_set()?,
            self.config.position_capacity,
            self.config.position_since,
            self.frame(ChartId::PositionShare),
            self.theme,
        );
        pick_all(&mut chart, &self.config.position_players);
        Ok(chart)
    }

    /// Load the data behind `id` and draw it.
    pub fn build_scene(&self, id: ChartId) -> StoryResult<Scene> {
        let frame = self.frame(id);
        let scene = match id {
            ChartId::LeagueTrend => {
                let rows: Vec<LeagueTrendRow> = self.loader.json(LEAGUE_TREND_FILE)?;
                league_trend::render(&rows, frame, &self.theme)
            }
            ChartId::VolumeEfficiency => {
                let doc: VolumeDoc = self.loader.json(VOLUME_FILE)?;
                volume::render(&doc, frame, &self.theme)
            }
            ChartId::CurryComparison => self.comparison()?.into_scene(),
            ChartId::PositionShare => self.position()?.into_scene(),
            ChartId::ShotProfile => {
                let rows: Vec<ShotProfileRow> = self.loader.json(SHOT_PROFILE_FILE)?;
                shot_profile::render(&rows, frame, &self.theme)
            }
            ChartId::TeamAdoption => {
                let rows: Vec<AdoptionRow> = self.loader.json(ADOPTION_FILE)?;
                adoption::render(&rows, frame, &self.theme)
            }
        };
        Ok(scene)
    }

    fn render_one(&self, id: ChartId) -> StoryResult<Option<RenderedChart>> {
        let Some(target) = self.config.target(id)? else {
            return Ok(None);
        };
        let scene = self.build_scene(id)?;
        let path = self.config.output_dir.join(&target.file);
        write_svg(&scene, &path)?;
        info!(chart = %id, path = %path.display(), "wrote chart");
        Ok(Some(RenderedChart { id, path, scene }))
    }

    /// Render every chart in story order.
    pub fn render_all(&self) -> StoryReport {
        let mut report = StoryReport::default();
        for id in ChartId::ALL {
            match self.render_one(id) {
                Ok(Some(chart)) => report.rendered.push(chart),
                Ok(None) => {
                    debug!(chart = %id, "chart disabled");
                    report.skipped.push(id);
                }
                Err(e) => {
                    error!(chart = %id, error = %e, "chart failed");
                    report.failed.push((id, e.to_string()));
                }
            }
        }
        report
    }
}

fn pick_all<S: PlotSource>(chart: &mut InteractiveChart<S>, players: &[String]) {
    for name in players {
        let outcome = chart.dispatch(&ControlEvent::Pick(name.clone())).outcome;
        if !outcome.is_some_and(|o| o.is_added()) {
            warn!(chart = %chart.chart().id(), player = %name, ?outcome, "player not added");
        }
    }
}
