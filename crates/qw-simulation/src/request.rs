use qw_core::{Difficulty, Project, RecordId};
use serde::{Deserialize, Serialize};

use crate::config::{PlayStyle, SimConfig};
use crate::error::SimResult;
use crate::player::PlayerOverrides;
use crate::result::SimulationResult;
use crate::simulation::{RunInfo, Simulation};

/// A request to simulate one story arc of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// The project the arc belongs to.
    #[serde(default)]
    pub project_id: Option<String>,
    /// The story arc to play.
    pub story_arc_id: RecordId,
    /// Partial starting state.
    #[serde(default)]
    pub initial_state: Option<PlayerOverrides>,
    /// Name of the simulated player.
    #[serde(default)]
    pub player_name: Option<String>,
    /// Requested difficulty.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Play style name; unrecognized names play balanced.
    #[serde(default)]
    pub play_style: Option<String>,
    /// Simulated time budget in minutes.
    #[serde(default)]
    pub max_duration: Option<u32>,
    /// Seed for a reproducible run.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl SimulationRequest {
    /// A request with defaults for everything but the arc.
    pub fn new(story_arc_id: impl Into<RecordId>) -> Self {
        Self {
            project_id: None,
            story_arc_id: story_arc_id.into(),
            initial_state: None,
            player_name: None,
            difficulty: None,
            play_style: None,
            max_duration: None,
            random_seed: None,
        }
    }

    /// Set the play style by name.
    pub fn with_play_style(mut self, style: impl Into<String>) -> Self {
        self.play_style = Some(style.into());
        self
    }

    /// Set the time budget in minutes.
    pub fn with_max_duration(mut self, minutes: u32) -> Self {
        self.max_duration = Some(minutes);
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set the player name.
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Set the starting state overrides.
    pub fn with_initial_state(mut self, overrides: PlayerOverrides) -> Self {
        self.initial_state = Some(overrides);
        self
    }

    /// The run configuration this request asks for.
    pub fn config(&self) -> SimConfig {
        let mut config = SimConfig::default().with_play_style(
            self.play_style
                .as_deref()
                .map(PlayStyle::parse)
                .unwrap_or_default(),
        );
        if let Some(minutes) = self.max_duration {
            config = config.with_max_duration(minutes);
        }
        if let Some(seed) = self.random_seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Run a request against a project, using the quests of the requested arc,
/// the dialogues attached to them, and every character.
pub fn run_request(project: &Project, request: &SimulationRequest) -> SimResult<SimulationResult> {
    run_request_with(project, request, request.config())
}

/// Like [`run_request`] with an explicit configuration.
pub fn run_request_with(
    project: &Project,
    request: &SimulationRequest,
    config: SimConfig,
) -> SimResult<SimulationResult> {
    let arc = project.story_arc(request.story_arc_id.as_str())?;
    let quests = project.quests_in_arc(arc.id.as_str());
    let dialogues = project
        .dialogues
        .iter()
        .filter(|d| {
            d.quest_id
                .as_ref()
                .is_some_and(|q| quests.iter().any(|quest| quest.id == *q))
        })
        .cloned()
        .collect();

    let info = RunInfo {
        project_id: request
            .project_id
            .clone()
            .or_else(|| project.id.as_ref().map(ToString::to_string)),
        story_arc_id: Some(arc.id.clone()),
        player_name: request
            .player_name
            .clone()
            .unwrap_or_else(|| RunInfo::default().player_name),
        difficulty: request.difficulty.unwrap_or_default(),
    };
    let overrides = request.initial_state.clone().unwrap_or_default();

    tracing::debug!(arc = %arc.id, quests = quests.len(), "starting simulation");
    let simulation = Simulation::new(
        quests,
        dialogues,
        project.characters.clone(),
        &overrides,
        config,
    )?;
    Ok(simulation.with_info(info).run())
}
