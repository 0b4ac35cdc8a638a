//! Endless runner
//!
//! One state type covers both runner variants; [`RunnerConfig`] picks the
//! obstacle model (single recycled square or spawned triangles) and physics.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::TickInput;
use super::player::Player;
use super::rect::Rect;
use super::state::Viewport;
use crate::consts::GROUND_OFFSET;
use crate::tuning::{ObstacleModel, RunnerConfig};

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    /// Size class; 1 for the classic square, 1..=max_kind for spawned ones
    pub kind: u8,
}

/// Complete runner state
#[derive(Debug, Clone)]
pub struct RunnerState {
    pub config: RunnerConfig,
    pub viewport: Viewport,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    /// Scroll speed in pixels per tick
    pub speed: f32,
    /// Ticks survived
    pub score: u64,
    pub game_over: bool,
    /// Ticks until the next spawn (spawner model only)
    pub next_spawn: u32,
    rng: Pcg32,
}

impl RunnerState {
    pub fn new(config: RunnerConfig, viewport: Viewport, seed: u64) -> Self {
        let player = Player::new(Vec2::new(config.player_x, 0.0), config.player_size);
        let mut state = Self {
            speed: config.initial_speed,
            config,
            viewport,
            player,
            obstacles: Vec::new(),
            score: 0,
            game_over: false,
            next_spawn: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Top of the ground line
    pub fn ground_y(&self) -> f32 {
        self.viewport.height - GROUND_OFFSET
    }

    /// Put everything back to the start of a run
    pub fn reset(&mut self) {
        let ground = self.ground_y();
        self.player.reset_to(Vec2::new(self.config.player_x, ground - self.player.size.y));

        self.obstacles.clear();
        match &self.config.obstacles {
            ObstacleModel::SingleRecycled { size, .. } => {
                self.obstacles.push(Obstacle {
                    rect: Rect::new(self.viewport.width, ground - size, *size, *size),
                    kind: 1,
                });
            }
            ObstacleModel::MultiSpawned {
                first_spawn_ticks, ..
            } => {
                self.next_spawn = *first_spawn_ticks;
            }
        }

        self.speed = self.config.initial_speed;
        self.score = 0;
        self.game_over = false;
    }

    /// Follow a canvas resize; grounded things stay on the ground
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let ground = self.ground_y();
        for obstacle in &mut self.obstacles {
            obstacle.rect.y = ground - obstacle.rect.h;
        }
        if !self.player.jumping {
            self.player.land_on(ground);
        }
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput) {
        if self.game_over {
            if input.restart {
                log::info!("Runner restarted");
                self.reset();
            }
            return;
        }

        self.player.try_jump(input.jump, self.config.jump_impulse);
        self.player.integrate(self.config.gravity);

        let ground = self.ground_y();
        if self.player.bottom() >= ground {
            self.player.land_on(ground);
        }

        self.advance_obstacles();

        let player = self.player.rect();
        if self.obstacles.iter().any(|o| player.overlaps(&o.rect)) {
            self.game_over = true;
            log::info!("Game over, score {}", self.score);
        }

        self.speed += self.config.speed_ramp;
        self.score += 1;
    }

    /// Scroll, then recycle or drop whatever left the screen, then spawn
    fn advance_obstacles(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.rect.x -= self.speed;
        }

        let width = self.viewport.width;
        let ground = self.ground_y();

        match &self.config.obstacles {
            ObstacleModel::SingleRecycled { max_offset, .. } => {
                for obstacle in &mut self.obstacles {
                    if obstacle.rect.x < -obstacle.rect.w {
                        obstacle.rect.x = width + self.rng.random::<f32>() * max_offset;
                    }
                }
            }
            ObstacleModel::MultiSpawned {
                unit_width,
                height,
                max_kind,
                min_spawn_ticks,
                max_spawn_ticks,
                ..
            } => {
                self.obstacles.retain(|o| o.rect.x >= -o.rect.w);

                self.next_spawn = self.next_spawn.saturating_sub(1);
                if self.next_spawn == 0 {
                    let kind = self.rng.random_range(1..=(*max_kind).max(1));
                    let w = kind as f32 * unit_width;
                    self.obstacles.push(Obstacle {
                        rect: Rect::new(width, ground - height, w, *height),
                        kind,
                    });
                    self.next_spawn = self
                        .rng
                        .random_range(*min_spawn_ticks..=(*max_spawn_ticks).max(*min_spawn_ticks))
                        .max(1);
                    log::debug!("Spawned kind {} obstacle, next in {} ticks", kind, self.next_spawn);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn classic() -> RunnerState {
        RunnerState::new(RunnerConfig::classic(), VIEWPORT, 42)
    }

    fn spawner() -> RunnerState {
        RunnerState::new(RunnerConfig::spawner(), VIEWPORT, 42)
    }

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_layout() {
        let s = classic();
        assert_eq!(s.ground_y(), 560.0);
        assert_eq!(s.player.pos, Vec2::new(80.0, 540.0));
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.obstacles[0].rect, Rect::new(800.0, 540.0, 20.0, 20.0));
        assert_eq!(s.speed, 4.0);
    }

    #[test]
    fn test_obstacle_scrolls_by_speed() {
        let mut s = classic();
        s.tick(&TickInput::default());
        assert_eq!(s.obstacles[0].rect.x, 800.0 - 4.0);
        assert_eq!(s.score, 1);
        assert!(s.speed > 4.0);
    }

    #[test]
    fn test_grounded_player_stays_put() {
        let mut s = classic();
        s.tick(&TickInput::default());
        assert_eq!(s.player.pos.y, 540.0);
        assert_eq!(s.player.vel.y, 0.0);
        assert!(!s.player.jumping);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut s = classic();
        s.obstacles.clear();
        s.tick(&jump());
        assert_eq!(s.player.vel.y, -12.0 + 0.6);
        assert!(s.player.jumping);

        for _ in 0..60 {
            s.tick(&TickInput::default());
        }
        assert_eq!(s.player.pos.y, 540.0);
        assert!(!s.player.jumping);
    }

    #[test]
    fn test_recycle_past_right_edge() {
        let mut s = classic();
        s.obstacles[0].rect.x = -19.0;
        s.tick(&TickInput::default());
        let x = s.obstacles[0].rect.x;
        assert!((800.0..1000.0).contains(&x), "recycled to {}", x);
    }

    #[test]
    fn test_collision_ends_run_and_freezes() {
        let mut s = classic();
        s.obstacles[0].rect.x = 90.0;
        s.tick(&TickInput::default());
        assert!(s.game_over);

        let snapshot = (s.score, s.speed, s.obstacles.clone());
        for _ in 0..10 {
            s.tick(&jump());
        }
        assert_eq!((s.score, s.speed, s.obstacles.clone()), snapshot);
    }

    #[test]
    fn test_restart_same_tick() {
        let mut s = classic();
        for _ in 0..30 {
            s.tick(&TickInput::default());
        }
        s.game_over = true;

        s.tick(&TickInput {
            restart: true,
            ..Default::default()
        });
        assert_eq!(s.score, 0);
        assert_eq!(s.speed, 4.0);
        assert!(!s.game_over);
        assert_eq!(s.obstacles[0].rect.x, 800.0);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut s = classic();
        s.tick(&TickInput::default());
        s.tick(&TickInput {
            restart: true,
            ..Default::default()
        });
        assert_eq!(s.score, 2);
    }

    #[test]
    fn test_spawner_starts_empty() {
        let s = spawner();
        assert!(s.obstacles.is_empty());
        assert_eq!(s.next_spawn, 60);
    }

    #[test]
    fn test_spawn_when_countdown_hits_zero() {
        let mut s = spawner();
        s.next_spawn = 1;
        s.tick(&TickInput::default());

        assert_eq!(s.obstacles.len(), 1);
        let o = &s.obstacles[0];
        assert!((1..=3).contains(&o.kind));
        assert_eq!(o.rect.w, o.kind as f32 * 35.0);
        assert_eq!(o.rect.x, 800.0);
        assert_eq!(o.rect.bottom(), 560.0);
        assert!((70..=160).contains(&s.next_spawn));
    }

    #[test]
    fn test_no_spawn_before_countdown() {
        let mut s = spawner();
        s.next_spawn = 5;
        s.tick(&TickInput::default());
        assert!(s.obstacles.is_empty());
        assert_eq!(s.next_spawn, 4);
    }

    #[test]
    fn test_spawned_obstacles_are_dropped_off_screen() {
        let mut s = spawner();
        s.obstacles.push(Obstacle {
            rect: Rect::new(-69.0, 525.0, 70.0, 35.0),
            kind: 2,
        });
        s.obstacles.push(Obstacle {
            rect: Rect::new(400.0, 525.0, 35.0, 35.0),
            kind: 1,
        });
        s.tick(&TickInput::default());
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.obstacles[0].kind, 1);
    }

    #[test]
    fn test_resize_keeps_things_grounded() {
        let mut s = classic();
        s.resize(Viewport {
            width: 1000.0,
            height: 700.0,
        });
        assert_eq!(s.ground_y(), 660.0);
        assert_eq!(s.player.bottom(), 660.0);
        assert_eq!(s.obstacles[0].rect.bottom(), 660.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = spawner();
        let mut b = spawner();
        for i in 0..500 {
            let input = if i % 37 == 0 { jump() } else { TickInput::default() };
            a.tick(&input);
            b.tick(&input);
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.score, b.score);
        assert_eq!(a.game_over, b.game_over);
    }

    proptest! {
        #[test]
        fn prop_obstacles_stay_in_bounds(
            seed in any::<u64>(),
            use_spawner in any::<bool>(),
            jumps in prop::collection::vec(any::<bool>(), 1..400),
        ) {
            let config = if use_spawner { RunnerConfig::spawner() } else { RunnerConfig::classic() };
            let bound = VIEWPORT.width + config.obstacles.spawn_offset_bound();
            let mut s = RunnerState::new(config, VIEWPORT, seed);

            for jump in jumps {
                if s.game_over {
                    break;
                }
                let before: Vec<Obstacle> = s.obstacles.clone();
                let speed = s.speed;
                s.tick(&TickInput { jump, ..Default::default() });

                for o in &s.obstacles {
                    prop_assert!(o.rect.x <= bound);
                }
                if use_spawner {
                    // Anything that vanished had scrolled past -width
                    let survivors = before
                        .iter()
                        .filter(|o| o.rect.x - speed >= -o.rect.w)
                        .count();
                    prop_assert!(s.obstacles.len() >= survivors);
                    prop_assert!(s.obstacles.len() <= survivors + 1);
                } else {
                    let prev = &before[0];
                    let now = &s.obstacles[0];
                    if now.rect.x > prev.rect.x {
                        prop_assert!(prev.rect.x - speed < -prev.rect.w);
                    }
                }
            }
        }
    }
}
