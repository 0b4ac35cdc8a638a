//! Data-driven game balance
//!
//! Every number that shapes how a game feels lives here. The defaults match
//! the shipped games. A tuning file (`?tuning=tuning.json`) overrides any
//! subset of them:
//!
//! ```json
//! { "platformer": { "gravity": 0.4 }, "spawner": { "speed_ramp": 0.004 } }
//! ```

use serde::Deserialize;

/// Platformer balance
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlatformerTuning {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_impulse: f32,
    /// Horizontal speed while an arrow key is held
    pub move_speed: f32,
    /// Player square size
    pub player_size: f32,
    /// Spawn x; spawn y is `canvas.height - spawn_height`
    pub spawn_x: f32,
    pub spawn_height: f32,
}

impl Default for PlatformerTuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: -15.0,
            move_speed: 8.0,
            player_size: 50.0,
            spawn_x: 50.0,
            spawn_height: 50.0,
        }
    }
}

/// How a runner produces obstacles
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ObstacleModel {
    /// One square obstacle, teleported back past the right edge once it leaves
    SingleRecycled {
        size: f32,
        /// Upper bound of the random offset added past the right edge
        max_offset: f32,
    },
    /// Triangles spawned on a random countdown and dropped once off screen
    MultiSpawned {
        /// Width per kind; a kind-`k` obstacle is `k * unit_width` wide
        unit_width: f32,
        height: f32,
        /// Highest kind; kinds are drawn uniformly from `1..=max_kind`
        max_kind: u8,
        /// Countdown before the first obstacle
        first_spawn_ticks: u32,
        /// Inclusive range for the re-armed countdown
        min_spawn_ticks: u32,
        max_spawn_ticks: u32,
    },
}

impl ObstacleModel {
    /// Furthest past the right edge an obstacle can ever start
    pub fn spawn_offset_bound(&self) -> f32 {
        match self {
            ObstacleModel::SingleRecycled { max_offset, .. } => *max_offset,
            ObstacleModel::MultiSpawned { .. } => 0.0,
        }
    }
}

/// Runner balance; one config per runner variant
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub obstacles: ObstacleModel,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// World scroll speed at the start of a run
    pub initial_speed: f32,
    /// Added to the scroll speed every tick
    pub speed_ramp: f32,
    pub player_x: f32,
    pub player_size: f32,
}

impl RunnerConfig {
    /// Single recycled square obstacle
    pub fn classic() -> Self {
        Self {
            obstacles: ObstacleModel::SingleRecycled {
                size: 20.0,
                max_offset: 200.0,
            },
            gravity: 0.6,
            jump_impulse: -12.0,
            initial_speed: 4.0,
            speed_ramp: 0.002,
            player_x: 80.0,
            player_size: 20.0,
        }
    }

    /// Several triangular obstacles on a random spawn timer
    pub fn spawner() -> Self {
        Self {
            obstacles: ObstacleModel::MultiSpawned {
                unit_width: 35.0,
                height: 35.0,
                max_kind: 3,
                first_spawn_ticks: 60,
                min_spawn_ticks: 70,
                max_spawn_ticks: 160,
            },
            ..Self::classic()
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Balance for all three games, as read from a tuning file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub platformer: PlatformerTuning,
    pub classic: RunnerConfig,
    /// Fields left out of this section fall back to the spawner defaults
    #[serde(deserialize_with = "spawner_overrides")]
    pub spawner: RunnerConfig,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            platformer: PlatformerTuning::default(),
            classic: RunnerConfig::classic(),
            spawner: RunnerConfig::spawner(),
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Partial runner section layered over [`RunnerConfig::spawner`]
fn spawner_overrides<'de, D>(deserializer: D) -> Result<RunnerConfig, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Partial {
        obstacles: Option<ObstacleModel>,
        gravity: Option<f32>,
        jump_impulse: Option<f32>,
        initial_speed: Option<f32>,
        speed_ramp: Option<f32>,
        player_x: Option<f32>,
        player_size: Option<f32>,
    }

    let p = Partial::deserialize(deserializer)?;
    let base = RunnerConfig::spawner();
    Ok(RunnerConfig {
        obstacles: p.obstacles.unwrap_or(base.obstacles),
        gravity: p.gravity.unwrap_or(base.gravity),
        jump_impulse: p.jump_impulse.unwrap_or(base.jump_impulse),
        initial_speed: p.initial_speed.unwrap_or(base.initial_speed),
        speed_ramp: p.speed_ramp.unwrap_or(base.speed_ramp),
        player_x: p.player_x.unwrap_or(base.player_x),
        player_size: p.player_size.unwrap_or(base.player_size),
    })
}
