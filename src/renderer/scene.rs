//! Scene building: game state to a triangle list in canvas pixels

use super::shapes::{self, STROKE_WIDTH};
use super::vertex::{Vertex, colors};
use crate::sim::{Game, PlatformerState, Rect, RunnerState, Viewport};
use crate::tuning::ObstacleModel;
use crate::ui;

const COIN_SEGMENTS: u32 = 24;

/// Build every vertex for one frame, back to front
pub fn build(game: &Game) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(256);
    match game {
        Game::Platformer(p) => platformer(p, &mut vertices),
        Game::Runner(r) => runner(r, &mut vertices),
    }
    if game.is_terminal() {
        overlay(game.viewport(), &mut vertices);
    }
    vertices
}

fn platformer(state: &PlatformerState, out: &mut Vec<Vertex>) {
    for platform in &state.level.platforms {
        out.extend(shapes::rect(platform, colors::INK));
    }

    let coin = &state.level.coin;
    if !coin.collected {
        // Drawn as a circle inscribed in its collision box
        out.extend(shapes::circle(
            coin.rect.center(),
            coin.rect.w / 2.0,
            colors::INK,
            COIN_SEGMENTS,
        ));
    }

    out.extend(shapes::rect_outline(
        &state.level.door,
        STROKE_WIDTH,
        colors::INK,
    ));
    out.extend(shapes::rect(&state.player.rect(), colors::INK));
}

fn runner(state: &RunnerState, out: &mut Vec<Vertex>) {
    let ground = Rect::new(0.0, state.ground_y(), state.viewport.width, STROKE_WIDTH);
    out.extend(shapes::rect(&ground, colors::INK));
    out.extend(shapes::rect(&state.player.rect(), colors::INK));

    for obstacle in &state.obstacles {
        match state.config.obstacles {
            ObstacleModel::SingleRecycled { .. } => {
                out.extend(shapes::rect(&obstacle.rect, colors::INK));
            }
            ObstacleModel::MultiSpawned { .. } => {
                out.extend(shapes::spikes(
                    &obstacle.rect,
                    obstacle.kind as u32,
                    colors::INK,
                ));
            }
        }
    }
}

/// Dimmed backdrop plus the restart button; the words come from the HUD
fn overlay(viewport: Viewport, out: &mut Vec<Vertex>) {
    let screen = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    out.extend(shapes::rect(&screen, colors::OVERLAY));
    out.extend(shapes::rect(&ui::restart_button(viewport), colors::BUTTON));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameKind, LevelSet};

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_platformer_scene() {
        let mut game = Game::new(GameKind::Platformer, VIEWPORT, 1, LevelSet::single_floor());
        let vertices = build(&game);
        // floor + coin + door outline + player
        assert_eq!(vertices.len(), 6 + COIN_SEGMENTS as usize * 3 + 24 + 6);
        assert!(!has_color(&vertices, colors::BUTTON));

        if let Game::Platformer(p) = &mut game {
            p.level.coin.collected = true;
        }
        assert_eq!(build(&game).len(), 6 + 24 + 6);
    }

    #[test]
    fn test_overlay_only_when_terminal() {
        let mut game = Game::new(GameKind::RunnerClassic, VIEWPORT, 1, LevelSet::single_floor());
        let running = build(&game);
        assert!(!has_color(&running, colors::OVERLAY));

        if let Game::Runner(r) = &mut game {
            r.game_over = true;
        }
        let over = build(&game);
        assert_eq!(over.len(), running.len() + 12);
        assert!(has_color(&over, colors::OVERLAY));
        assert!(has_color(&over, colors::BUTTON));
        // Button is drawn last, on top of the backdrop
        assert_eq!(over.last().map(|v| v.color), Some(colors::BUTTON));
    }

    #[test]
    fn test_spawned_obstacles_are_spikes() {
        let mut game = Game::new(GameKind::RunnerSpawner, VIEWPORT, 1, LevelSet::single_floor());
        let base = build(&game).len();
        if let Game::Runner(r) = &mut game {
            r.obstacles.push(crate::sim::Obstacle {
                rect: Rect::new(400.0, 525.0, 105.0, 35.0),
                kind: 3,
            });
        }
        assert_eq!(build(&game).len(), base + 9);
    }
}
