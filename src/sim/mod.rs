//! Per-frame simulation module
//!
//! All gameplay logic lives here:
//! - One tick per display refresh, no delta time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod input;
pub mod level;
pub mod platformer;
pub mod player;
pub mod rect;
pub mod runner;
pub mod state;
pub mod tick;

pub use input::{InputTracker, TickInput};
pub use level::{Dim, Level, LevelError, LevelSet};
pub use platformer::PlatformerState;
pub use player::Player;
pub use rect::Rect;
pub use runner::{Obstacle, RunnerState};
pub use state::{Game, GameKind, Viewport};
pub use tick::tick;
