//! Canvas Hop - three tiny canvas games
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD text and overlay hit testing

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::{PlatformerTuning, RunnerConfig, Tuning};

/// Game configuration constants
pub mod consts {
    /// Canvas margin on each side for desktop-sized viewports
    pub const DESKTOP_MARGIN: f32 = 100.0;
    /// Viewports this wide or narrower are treated as mobile (no margin)
    pub const MOBILE_BREAKPOINT: f32 = 800.0;

    /// Runner ground line sits this far above the bottom of the canvas
    pub const GROUND_OFFSET: f32 = 40.0;

    /// Restart button geometry, relative to the canvas center
    pub const RESTART_BUTTON_WIDTH: f32 = 150.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 50.0;
    pub const RESTART_BUTTON_OFFSET_Y: f32 = 60.0;
}
