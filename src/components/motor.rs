//! Platformer motor component.
//!
//! [`PlatformerMotor`] holds the horizontal movement parameters of a
//! character: how fast it accelerates while input is held, how fast it brakes
//! when input is released, the maximum horizontal speed and the jump impulse.
//! The accumulated `current_speed` is integrated each tick by
//! [`integrate_speed`](PlatformerMotor::integrate_speed) and written to the
//! rigid body by the motor system.
//!
//! Invariants kept by the integration:
//! - `current_speed` never exceeds `max_speed` in magnitude.
//! - Braking moves `current_speed` toward zero and clamps at zero; it never
//!   crosses to the other sign without new input.

use bevy_ecs::prelude::Component;

const DEFAULT_ACCELERATION: f32 = 480.0;
const DEFAULT_BRAKING: f32 = 600.0;
const DEFAULT_MAX_SPEED: f32 = 140.0;
const DEFAULT_JUMP_IMPULSE: f32 = 320.0;

/// Horizontal movement state and tuning for a platformer character.
#[derive(Component, Clone, Copy, Debug)]
pub struct PlatformerMotor {
    /// Speed gained per second while input is held, in px/s^2.
    pub acceleration: f32,
    /// Speed lost per second while no input is held, in px/s^2.
    pub braking: f32,
    /// Maximum horizontal speed magnitude, in px/s.
    pub max_speed: f32,
    /// Vertical velocity impulse applied on jump, in px/s.
    pub jump_impulse: f32,
    /// Accumulated horizontal speed, signed. Positive is rightward.
    pub current_speed: f32,
    /// Horizontal input axis for this tick, in [-1, 1].
    pub move_input: f32,
}

impl Default for PlatformerMotor {
    fn default() -> Self {
        Self::new(
            DEFAULT_ACCELERATION,
            DEFAULT_BRAKING,
            DEFAULT_MAX_SPEED,
            DEFAULT_JUMP_IMPULSE,
        )
    }
}

impl PlatformerMotor {
    /// Create a motor with the given tuning and zero accumulated speed.
    pub fn new(acceleration: f32, braking: f32, max_speed: f32, jump_impulse: f32) -> Self {
        Self {
            acceleration,
            braking,
            max_speed,
            jump_impulse,
            current_speed: 0.0,
            move_input: 0.0,
        }
    }

    /// Advance `current_speed` by one tick of `dt` seconds.
    ///
    /// With input held, speed grows toward the input sign and clamps to
    /// `[-max_speed, max_speed]`. Without input, speed decays by `braking`
    /// and clamps at zero from whichever side it came.
    pub fn integrate_speed(&mut self, dt: f32) {
        if self.move_input != 0.0 {
            self.current_speed += self.acceleration * dt * self.move_input.signum();
            self.current_speed = self.current_speed.clamp(-self.max_speed, self.max_speed);
        } else if self.current_speed > 0.0 {
            self.current_speed -= self.braking * dt;
            self.current_speed = self.current_speed.clamp(0.0, self.max_speed);
        } else if self.current_speed < 0.0 {
            self.current_speed += self.braking * dt;
            self.current_speed = self.current_speed.clamp(-self.max_speed, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn motor() -> PlatformerMotor {
        PlatformerMotor::new(10.0, 10.0, 100.0, 50.0)
    }

    // ==================== ACCELERATION TESTS ====================

    #[test]
    fn test_accelerates_toward_input_sign() {
        let mut m = motor();
        m.move_input = 1.0;
        m.integrate_speed(0.5);
        assert!(approx_eq(m.current_speed, 5.0));

        let mut m = motor();
        m.move_input = -1.0;
        m.integrate_speed(0.5);
        assert!(approx_eq(m.current_speed, -5.0));
    }

    #[test]
    fn test_speed_never_exceeds_max_magnitude() {
        let mut m = motor();
        m.move_input = 1.0;
        for _ in 0..500 {
            m.integrate_speed(0.1);
            assert!(m.current_speed.abs() <= m.max_speed + EPSILON);
        }
        assert!(approx_eq(m.current_speed, m.max_speed));
    }

    #[test]
    fn test_negative_input_clamps_at_negative_max() {
        let mut m = motor();
        m.move_input = -1.0;
        for _ in 0..500 {
            m.integrate_speed(0.1);
        }
        assert!(approx_eq(m.current_speed, -m.max_speed));
    }

    #[test]
    fn test_direction_reversal_passes_through_zero() {
        let mut m = motor();
        m.move_input = 1.0;
        for _ in 0..20 {
            m.integrate_speed(0.1);
        }
        assert!(m.current_speed > 0.0);
        m.move_input = -1.0;
        for _ in 0..60 {
            m.integrate_speed(0.1);
        }
        assert!(m.current_speed < 0.0);
    }

    // ==================== BRAKING TESTS ====================

    #[test]
    fn test_braking_decays_positive_speed_to_zero() {
        let mut m = motor();
        m.current_speed = 30.0;
        m.move_input = 0.0;
        for _ in 0..100 {
            m.integrate_speed(0.1);
            // never crosses zero
            assert!(m.current_speed >= 0.0);
        }
        assert!(approx_eq(m.current_speed, 0.0));
    }

    #[test]
    fn test_braking_decays_negative_speed_to_zero() {
        let mut m = motor();
        m.current_speed = -30.0;
        m.move_input = 0.0;
        for _ in 0..100 {
            m.integrate_speed(0.1);
            assert!(m.current_speed <= 0.0);
        }
        assert!(approx_eq(m.current_speed, 0.0));
    }

    #[test]
    fn test_braking_is_monotone() {
        let mut m = motor();
        m.current_speed = 25.0;
        m.move_input = 0.0;
        let mut last = m.current_speed;
        for _ in 0..50 {
            m.integrate_speed(0.1);
            assert!(m.current_speed <= last);
            last = m.current_speed;
        }
    }

    #[test]
    fn test_braking_with_large_dt_stops_exactly_at_zero() {
        // One oversized step would overshoot without the clamp.
        let mut m = motor();
        m.current_speed = 3.0;
        m.move_input = 0.0;
        m.integrate_speed(10.0);
        assert!(approx_eq(m.current_speed, 0.0));
    }

    #[test]
    fn test_zero_input_at_rest_is_stable() {
        let mut m = motor();
        m.integrate_speed(0.1);
        assert!(approx_eq(m.current_speed, 0.0));
    }

    #[test]
    fn test_default_tuning_is_positive() {
        let m = PlatformerMotor::default();
        assert!(m.acceleration > 0.0);
        assert!(m.braking > 0.0);
        assert!(m.max_speed > 0.0);
        assert!(m.jump_impulse > 0.0);
        assert!(approx_eq(m.current_speed, 0.0));
    }
}
