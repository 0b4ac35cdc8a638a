//! The player box shared by every game

use glam::Vec2;

use super::rect::Rect;

/// A player square driven by gravity and jump input
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity in pixels per tick; x stays 0 in the runners
    pub vel: Vec2,
    /// Airborne flag: a new jump is only allowed while this is false
    pub jumping: bool,
}

impl Player {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
            vel: Vec2::ZERO,
            jumping: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Put the player at `pos`, at rest and grounded
    pub fn reset_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.jumping = false;
    }

    /// Apply the jump impulse if jump is held and the player is grounded
    pub fn try_jump(&mut self, jump_held: bool, impulse: f32) -> bool {
        if jump_held && !self.jumping {
            self.vel.y = impulse;
            self.jumping = true;
            true
        } else {
            false
        }
    }

    /// One Euler step: gravity into velocity, then velocity into position
    pub fn integrate(&mut self, gravity: f32) {
        self.vel.y += gravity;
        self.pos += self.vel;
    }

    /// Snap the bottom edge onto `top` and come to rest
    pub fn land_on(&mut self, top: f32) {
        self.pos.y = top - self.size.y;
        self.vel.y = 0.0;
        self.jumping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_only_when_grounded() {
        let mut player = Player::new(Vec2::ZERO, 20.0);
        assert!(player.try_jump(true, -12.0));
        assert_eq!(player.vel.y, -12.0);
        assert!(player.jumping);

        player.vel.y = -3.0;
        assert!(!player.try_jump(true, -12.0));
        assert_eq!(player.vel.y, -3.0);
    }

    #[test]
    fn test_no_jump_without_input() {
        let mut player = Player::new(Vec2::ZERO, 20.0);
        assert!(!player.try_jump(false, -12.0));
        assert!(!player.jumping);
    }

    #[test]
    fn test_integrate_and_land() {
        let mut player = Player::new(Vec2::new(10.0, 100.0), 50.0);
        player.vel.x = 8.0;
        player.integrate(0.5);
        assert_eq!(player.vel.y, 0.5);
        assert_eq!(player.pos, Vec2::new(18.0, 100.5));

        player.jumping = true;
        player.land_on(200.0);
        assert_eq!(player.bottom(), 200.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.jumping);
    }
}
