//! HUD text and the restart overlay
//!
//! The canvas only gets shapes; words go into DOM elements layered on top.
//! Everything here is plain data so the browser side stays a thin copy step.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Game, Rect, Viewport};

/// Text for the win / game-over overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button_label: &'static str,
}

/// Everything the HUD shows this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    /// Top-left status line ("Level 2", "Score: 120")
    pub status: String,
    pub overlay: Option<Overlay>,
}

/// Restart button, centered horizontally just below the canvas middle
pub fn restart_button(viewport: Viewport) -> Rect {
    Rect::new(
        viewport.width / 2.0 - RESTART_BUTTON_WIDTH / 2.0,
        viewport.height / 2.0 + RESTART_BUTTON_OFFSET_Y,
        RESTART_BUTTON_WIDTH,
        RESTART_BUTTON_HEIGHT,
    )
}

/// True when `point` hits the restart button while it is on screen
pub fn restart_hit(game: &Game, point: Vec2) -> bool {
    game.is_terminal() && restart_button(game.viewport()).contains(point)
}

pub fn hud_text(game: &Game) -> HudText {
    match game {
        Game::Platformer(p) => HudText {
            status: format!("Level {}", p.current_level),
            overlay: p.won.then_some(Overlay {
                title: "YOU WIN!",
                subtitle: "All levels completed!",
                button_label: "Restart (Enter)",
            }),
        },
        Game::Runner(r) => HudText {
            status: format!("Score: {}", r.score),
            overlay: r.game_over.then_some(Overlay {
                title: "GAME OVER",
                subtitle: "Press Enter to Restart",
                button_label: "Restart",
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameKind, LevelSet};

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn test_restart_button_geometry() {
        assert_eq!(restart_button(VIEWPORT), Rect::new(325.0, 360.0, 150.0, 50.0));
    }

    #[test]
    fn test_hud_text_per_game() {
        let mut game = Game::new(GameKind::Platformer, VIEWPORT, 1, LevelSet::single_floor());
        assert_eq!(hud_text(&game).status, "Level 1");
        assert!(hud_text(&game).overlay.is_none());

        if let Game::Platformer(p) = &mut game {
            p.won = true;
        }
        let overlay = hud_text(&game).overlay.unwrap();
        assert_eq!(overlay.title, "YOU WIN!");

        let mut game = Game::new(GameKind::RunnerClassic, VIEWPORT, 1, LevelSet::single_floor());
        if let Game::Runner(r) = &mut game {
            r.score = 42;
            r.game_over = true;
        }
        let hud = hud_text(&game);
        assert_eq!(hud.status, "Score: 42");
        assert_eq!(hud.overlay.unwrap().title, "GAME OVER");
    }

    #[test]
    fn test_restart_hit_needs_overlay() {
        let mut game = Game::new(GameKind::RunnerSpawner, VIEWPORT, 1, LevelSet::single_floor());
        let center = Vec2::new(400.0, 385.0);
        assert!(!restart_hit(&game, center));

        if let Game::Runner(r) = &mut game {
            r.game_over = true;
        }
        assert!(restart_hit(&game, center));
        // Edges do not count
        assert!(!restart_hit(&game, Vec2::new(325.0, 385.0)));
    }
}
