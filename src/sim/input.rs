//! Input tracking
//!
//! Browser events land in an [`InputTracker`] whenever they arrive; the loop
//! takes one [`TickInput`] snapshot per tick, which also clears one-shot
//! presses.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::state::{Game, GameKind, Viewport};
use crate::ui;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move left (platformer)
    pub left: bool,
    /// Move right (platformer)
    pub right: bool,
    /// Jump held
    pub jump: bool,
    /// Restart from a terminal state (won / game over)
    pub restart: bool,
    /// Reload the current level (platformer `R`)
    pub reload_level: bool,
}

pub const KEY_LEFT: &str = "ArrowLeft";
pub const KEY_RIGHT: &str = "ArrowRight";
pub const KEY_JUMP: &str = " ";
pub const KEY_RESTART: &str = "Enter";

/// Held keys and touches plus one-shot presses since the last snapshot
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: HashSet<String>,
    /// Active touches by identifier, with their canvas-space x
    touches: HashMap<i32, f32>,
    restart_pressed: bool,
    reload_pressed: bool,
    tapped: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        match key {
            KEY_RESTART => self.restart_pressed = true,
            "r" | "R" => self.reload_pressed = true,
            _ => {}
        }
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn touch_start(&mut self, id: i32, x: f32) {
        self.touches.insert(id, x);
        self.tapped = true;
    }

    pub fn touch_end(&mut self, id: i32) {
        self.touches.remove(&id);
    }

    /// Canvas click; only the restart button reacts, and only while it is shown
    pub fn click(&mut self, point: Vec2, game: &Game) {
        if ui::restart_hit(game, point) {
            self.restart_pressed = true;
        }
    }

    /// Drop everything held, e.g. when the page loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
        self.touches.clear();
    }

    /// Build this tick's input and clear one-shot presses
    pub fn snapshot(&mut self, kind: GameKind, viewport: Viewport) -> TickInput {
        let mut input = TickInput {
            left: self.is_held(KEY_LEFT),
            right: self.is_held(KEY_RIGHT),
            jump: self.is_held(KEY_JUMP),
            restart: self.restart_pressed,
            reload_level: false,
        };

        match kind {
            GameKind::Platformer => {
                input.reload_level = self.reload_pressed;
                // Touch zones: left third, right third, middle jumps
                for &x in self.touches.values() {
                    if x < viewport.width / 3.0 {
                        input.left = true;
                    } else if x > viewport.width * 2.0 / 3.0 {
                        input.right = true;
                    } else {
                        input.jump = true;
                    }
                }
            }
            GameKind::RunnerClassic | GameKind::RunnerSpawner => {
                input.jump |= !self.touches.is_empty();
                input.restart |= self.tapped;
            }
        }

        self.restart_pressed = false;
        self.reload_pressed = false;
        self.tapped = false;
        input
    }
}
