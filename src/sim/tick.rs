//! One simulation step for whichever game is running

use super::input::TickInput;
use super::state::Game;

/// Advance the game by one frame
///
/// There is no delta time: one call is one display refresh.
pub fn tick(game: &mut Game, input: &TickInput) {
    match game {
        Game::Platformer(state) => state.tick(input),
        Game::Runner(state) => state.tick(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelSet;
    use crate::sim::state::{GameKind, Viewport};

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn test_tick_dispatches_to_runner() {
        let mut game = Game::new(GameKind::RunnerClassic, VIEWPORT, 7, LevelSet::single_floor());
        tick(&mut game, &TickInput::default());
        match &game {
            Game::Runner(runner) => {
                assert_eq!(runner.score, 1);
                assert_eq!(runner.obstacles[0].rect.x, 796.0);
            }
            Game::Platformer(_) => panic!("expected runner"),
        }
    }

    #[test]
    fn test_tick_dispatches_to_platformer() {
        let mut game = Game::new(GameKind::Platformer, VIEWPORT, 7, LevelSet::single_floor());
        tick(&mut game, &TickInput::default());
        match &game {
            Game::Platformer(p) => {
                // Spawn overlaps the floor, so the first tick lands on it
                assert_eq!(p.player.bottom(), 580.0);
                assert!(!p.player.jumping);
            }
            Game::Runner(_) => panic!("expected platformer"),
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = Game::new(GameKind::RunnerSpawner, VIEWPORT, 99999, LevelSet::single_floor());
        let mut b = Game::new(GameKind::RunnerSpawner, VIEWPORT, 99999, LevelSet::single_floor());

        let inputs = [
            TickInput::default(),
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        match (&a, &b) {
            (Game::Runner(a), Game::Runner(b)) => {
                assert_eq!(a.score, b.score);
                assert_eq!(a.obstacles, b.obstacles);
                assert_eq!(a.player, b.player);
            }
            _ => panic!("expected runners"),
        }
    }
}
