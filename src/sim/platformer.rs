//! Platformer: walk, jump, grab the coin, reach the door

use glam::Vec2;

use super::input::TickInput;
use super::level::{Coin, Level, LevelSet};
use super::player::Player;
use super::state::Viewport;
use crate::tuning::PlatformerTuning;

/// Complete platformer state
#[derive(Debug, Clone)]
pub struct PlatformerState {
    pub tuning: PlatformerTuning,
    pub viewport: Viewport,
    levels: LevelSet,
    /// Active level number (1-based)
    pub current_level: usize,
    pub player: Player,
    /// The active level, resolved against the canvas size at load time
    pub level: Level,
    /// Set after the door of the final level is reached
    pub won: bool,
}

impl PlatformerState {
    pub fn new(levels: LevelSet, tuning: PlatformerTuning, viewport: Viewport) -> Self {
        let player = Player::new(Vec2::ZERO, tuning.player_size);
        let mut state = Self {
            tuning,
            viewport,
            levels,
            current_level: 1,
            player,
            level: Level {
                platforms: Vec::new(),
                coin: Coin {
                    rect: Default::default(),
                    collected: false,
                },
                door: Default::default(),
            },
            won: false,
        };
        state.load_level();
        state
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn spawn_point(&self) -> Vec2 {
        Vec2::new(
            self.tuning.spawn_x,
            self.viewport.height - self.tuning.spawn_height,
        )
    }

    /// (Re)build the active level from its description and respawn the player
    pub fn load_level(&mut self) {
        self.won = false;
        match self.levels.get(self.current_level) {
            Some(desc) => match desc.validate(self.current_level, self.viewport) {
                Ok(()) => self.level = desc.resolve(self.viewport),
                Err(err) => {
                    // Levels were checked at startup; a resize can still break them
                    log::warn!(
                        "{} on a {}x{} canvas, keeping the previous layout",
                        err,
                        self.viewport.width,
                        self.viewport.height
                    );
                    self.keep_previous_layout();
                }
            },
            None => {
                log::error!("Level {} missing from level set", self.current_level);
                self.keep_previous_layout();
            }
        }
        let spawn = self.spawn_point();
        self.player.reset_to(spawn);
        log::info!(
            "Level {}/{} loaded ({} platforms)",
            self.current_level,
            self.level_count(),
            self.level.platforms.len()
        );
    }

    /// Reuse the current geometry with the coin re-armed, or a plain floor if there is none
    fn keep_previous_layout(&mut self) {
        if self.level.platforms.is_empty() {
            self.level = LevelSet::floor_level(self.viewport);
        } else {
            self.level.coin.collected = false;
        }
    }

    /// Back to level 1
    pub fn restart(&mut self) {
        self.current_level = 1;
        self.load_level();
    }

    /// Track a new canvas size; takes effect at the next level load
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput) {
        if input.reload_level {
            self.load_level();
            return;
        }
        if self.won {
            if input.restart {
                log::info!("Restarting from level 1");
                self.restart();
            }
            return;
        }

        let tuning = &self.tuning;
        let player = &mut self.player;

        // Horizontal control is a direct assignment, no acceleration
        player.vel.x = if input.left {
            -tuning.move_speed
        } else if input.right {
            tuning.move_speed
        } else {
            0.0
        };

        player.try_jump(input.jump, tuning.jump_impulse);
        player.integrate(tuning.gravity);

        // List order decides ties: once landed vy is 0 and later overlaps are skipped
        for platform in &self.level.platforms {
            if player.rect().overlaps(platform) && player.vel.y > 0.0 {
                player.land_on(platform.y);
            }
        }

        let coin = &mut self.level.coin;
        if !coin.collected && player.rect().overlaps(&coin.rect) {
            coin.collected = true;
            log::debug!("Coin collected on level {}", self.current_level);
        }

        if coin.collected && player.rect().overlaps(&self.level.door) {
            if self.current_level < self.level_count() {
                self.current_level += 1;
                self.load_level();
            } else {
                self.won = true;
                log::info!("All {} levels completed", self.level_count());
            }
        }
    }
}
