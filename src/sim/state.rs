//! Game selection and the top-level state owned by the loop driver

use super::level::LevelSet;
use super::platformer::PlatformerState;
use super::runner::RunnerState;
use crate::tuning::{ObstacleModel, Tuning};

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Which of the three games to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameKind {
    #[default]
    Platformer,
    /// Runner with a single recycled obstacle
    RunnerClassic,
    /// Runner with spawned triangular obstacles
    RunnerSpawner,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Platformer => "platformer",
            GameKind::RunnerClassic => "runner-classic",
            GameKind::RunnerSpawner => "runner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "platformer" | "jumper" => Some(GameKind::Platformer),
            "runner-classic" | "classic" => Some(GameKind::RunnerClassic),
            "runner" | "spawner" => Some(GameKind::RunnerSpawner),
            _ => None,
        }
    }
}

/// The running game
#[derive(Debug, Clone)]
pub enum Game {
    Platformer(PlatformerState),
    Runner(RunnerState),
}

impl Game {
    /// Build a game of `kind` with default balance; `levels` is only used by the platformer
    pub fn new(kind: GameKind, viewport: Viewport, seed: u64, levels: LevelSet) -> Self {
        Self::with_tuning(kind, viewport, seed, levels, &Tuning::default())
    }

    pub fn with_tuning(
        kind: GameKind,
        viewport: Viewport,
        seed: u64,
        levels: LevelSet,
        tuning: &Tuning,
    ) -> Self {
        match kind {
            GameKind::Platformer => Game::Platformer(PlatformerState::new(
                levels,
                tuning.platformer.clone(),
                viewport,
            )),
            GameKind::RunnerClassic => {
                Game::Runner(RunnerState::new(tuning.classic.clone(), viewport, seed))
            }
            GameKind::RunnerSpawner => {
                Game::Runner(RunnerState::new(tuning.spawner.clone(), viewport, seed))
            }
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Game::Platformer(_) => GameKind::Platformer,
            Game::Runner(runner) => match runner.config.obstacles {
                ObstacleModel::SingleRecycled { .. } => GameKind::RunnerClassic,
                ObstacleModel::MultiSpawned { .. } => GameKind::RunnerSpawner,
            },
        }
    }

    pub fn viewport(&self) -> Viewport {
        match self {
            Game::Platformer(p) => p.viewport,
            Game::Runner(r) => r.viewport,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        match self {
            Game::Platformer(p) => p.resize(viewport),
            Game::Runner(r) => r.resize(viewport),
        }
    }

    /// Won (platformer) or game over (runner)
    pub fn is_terminal(&self) -> bool {
        match self {
            Game::Platformer(p) => p.won,
            Game::Runner(r) => r.game_over,
        }
    }
}
