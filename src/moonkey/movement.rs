//! Moonkey motion: buffered variable-height jumps and charge-limited dashes.
//!
//! Everything here is plain data advanced one tick at a time. The systems in
//! `controller` feed it input and copy the result into the physics body.

use bevy::prelude::*;

use crate::core::MoonkeyTuning;

/// Dash charges with a shared recharge cooldown.
///
/// One charge comes back every `cooldown` seconds while below `max`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DashCharges {
    charges: u32,
    max: u32,
    cooldown: f32,
    cooldown_remaining: f32,
}

impl DashCharges {
    pub fn new(max: u32, cooldown: f32) -> Self {
        Self {
            charges: max,
            max,
            cooldown: cooldown.max(0.0),
            cooldown_remaining: 0.0,
        }
    }

    pub fn charges(&self) -> u32 {
        self.charges
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn can_dash(&self) -> bool {
        self.charges > 0
    }

    /// Spend a charge. Refused, without side effects, when none are left.
    pub fn try_consume(&mut self) -> bool {
        if self.charges == 0 {
            return false;
        }
        if self.charges == self.max {
            self.cooldown_remaining = self.cooldown;
        }
        self.charges -= 1;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if self.charges >= self.max {
            self.cooldown_remaining = 0.0;
            return;
        }

        self.cooldown_remaining -= dt;
        while self.cooldown_remaining <= 0.0 && self.charges < self.max {
            self.charges += 1;
            if self.charges < self.max {
                self.cooldown_remaining += self.cooldown;
            } else {
                self.cooldown_remaining = 0.0;
            }
        }
    }
}

/// One tick's worth of player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotorInput {
    /// Horizontal direction in `[-1, 1]`.
    pub axis: f32,
    /// Jump was pressed this tick.
    pub jump_pressed: bool,
    /// Jump is being held down.
    pub jump_held: bool,
    pub dash_pressed: bool,
}

/// Physics-facing situation of the moonkey for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorContext {
    pub grounded: bool,
    /// False while attacking or dying.
    pub can_move: bool,
    pub velocity: Vec2,
    pub dt: f32,
}

/// What the motor decided this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorOutput {
    pub velocity: Vec2,
    pub jumped: bool,
    pub dashed: bool,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct MoonkeyMotor {
    /// -1 facing left, 1 facing right.
    look_direction: f32,
    jump_pressed: bool,
    jump_buffer: u32,
    jump_hold: f32,
    boosting: bool,
    dash_remaining: f32,
}

impl Default for MoonkeyMotor {
    fn default() -> Self {
        Self {
            look_direction: 1.0,
            jump_pressed: false,
            jump_buffer: 0,
            jump_hold: 0.0,
            boosting: false,
            dash_remaining: 0.0,
        }
    }
}

impl MoonkeyMotor {
    pub fn look_direction(&self) -> f32 {
        self.look_direction
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_remaining > 0.0
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub fn jump_buffered(&self) -> bool {
        self.jump_pressed
    }

    pub fn step(
        &mut self,
        input: MotorInput,
        context: MotorContext,
        charges: &mut DashCharges,
        tuning: &MoonkeyTuning,
    ) -> MotorOutput {
        let mut output = MotorOutput {
            velocity: context.velocity,
            jumped: false,
            dashed: false,
        };

        if input.jump_pressed {
            self.jump_pressed = true;
            self.jump_buffer = tuning.jump_buffer_frames;
        }

        if self.is_dashing() {
            self.dash_remaining -= context.dt;
            output.velocity = if self.is_dashing() {
                Vec2::new(self.look_direction * tuning.dash_speed, 0.0)
            } else {
                self.dash_remaining = 0.0;
                Vec2::ZERO
            };
            self.count_down_jump_buffer();
            return output;
        }

        if context.can_move && input.axis != 0.0 {
            self.look_direction = input.axis.signum();
        }

        if input.dash_pressed && context.can_move && charges.try_consume() {
            self.dash_remaining = tuning.dash_time;
            self.boosting = false;
            output.velocity = Vec2::new(self.look_direction * tuning.dash_speed, 0.0);
            output.dashed = true;
            self.count_down_jump_buffer();
            return output;
        }

        output.velocity.x = if context.can_move {
            input.axis.clamp(-1.0, 1.0) * tuning.move_speed
        } else {
            0.0
        };

        if self.jump_pressed && context.grounded && context.can_move {
            output.velocity.y = tuning.jump_speed;
            output.jumped = true;
            self.jump_pressed = false;
            self.jump_buffer = 0;
            self.boosting = true;
            self.jump_hold = tuning.jump_hold_time;
        } else if self.boosting {
            if input.jump_held && self.jump_hold > 0.0 {
                self.jump_hold -= context.dt;
                output.velocity.y = output.velocity.y.max(tuning.jump_speed);
            } else {
                self.boosting = false;
                self.jump_hold = 0.0;
            }
        }

        self.count_down_jump_buffer();
        output
    }

    fn count_down_jump_buffer(&mut self) {
        if !self.jump_pressed {
            return;
        }
        self.jump_buffer = self.jump_buffer.saturating_sub(1);
        if self.jump_buffer == 0 {
            self.jump_pressed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn tuning() -> MoonkeyTuning {
        MoonkeyTuning::default()
    }

    fn context(grounded: bool) -> MotorContext {
        MotorContext {
            grounded,
            can_move: true,
            velocity: Vec2::ZERO,
            dt: DT,
        }
    }

    #[test]
    fn third_dash_waits_for_one_cooldown() {
        let mut charges = DashCharges::new(2, 1.0);

        assert!(charges.try_consume());
        assert!(charges.try_consume());
        assert!(!charges.can_dash());
        assert!(!charges.try_consume());

        charges.tick(0.5);
        assert!(!charges.can_dash());

        charges.tick(0.5);
        assert_eq!(charges.charges(), 1);
        assert!(charges.try_consume());
    }

    #[test]
    fn charges_never_exceed_max() {
        let mut charges = DashCharges::new(2, 1.0);
        charges.try_consume();
        charges.tick(10.0);

        assert_eq!(charges.charges(), 2);
        assert_relative_eq!(charges.cooldown_remaining(), 0.0);
    }

    #[test]
    fn buffered_jump_fires_on_landing() {
        let tuning = tuning();
        let mut motor = MoonkeyMotor::default();
        let mut charges = DashCharges::new(2, 1.0);

        let pressed = MotorInput {
            jump_pressed: true,
            jump_held: true,
            ..default()
        };
        let out = motor.step(pressed, context(false), &mut charges, &tuning);
        assert!(!out.jumped);
        assert!(motor.jump_buffered());

        let out = motor.step(MotorInput::default(), context(true), &mut charges, &tuning);
        assert!(out.jumped);
        assert_relative_eq!(out.velocity.y, tuning.jump_speed);
    }

    #[test]
    fn jump_buffer_expires() {
        let tuning = MoonkeyTuning {
            jump_buffer_frames: 3,
            ..default()
        };
        let mut motor = MoonkeyMotor::default();
        let mut charges = DashCharges::new(2, 1.0);

        let pressed = MotorInput {
            jump_pressed: true,
            ..default()
        };
        motor.step(pressed, context(false), &mut charges, &tuning);
        for _ in 0..3 {
            motor.step(MotorInput::default(), context(false), &mut charges, &tuning);
        }

        let out = motor.step(MotorInput::default(), context(true), &mut charges, &tuning);
        assert!(!out.jumped);
    }

    #[test]
    fn releasing_jump_ends_the_boost() {
        let tuning = tuning();
        let mut motor = MoonkeyMotor::default();
        let mut charges = DashCharges::new(2, 1.0);

        let held = MotorInput {
            jump_pressed: true,
            jump_held: true,
            ..default()
        };
        motor.step(held, context(true), &mut charges, &tuning);
        assert!(motor.is_boosting());

        let falling = MotorContext {
            velocity: Vec2::new(0.0, 2.0),
            ..context(false)
        };
        let still_held = MotorInput {
            jump_held: true,
            ..default()
        };
        let out = motor.step(still_held, falling, &mut charges, &tuning);
        assert_relative_eq!(out.velocity.y, tuning.jump_speed);

        let out = motor.step(MotorInput::default(), falling, &mut charges, &tuning);
        assert!(!motor.is_boosting());
        assert_relative_eq!(out.velocity.y, 2.0);
    }

    #[test]
    fn dash_locks_movement_then_stops() {
        let tuning = MoonkeyTuning {
            dash_time: 2.5 * DT,
            ..default()
        };
        let mut motor = MoonkeyMotor::default();
        let mut charges = DashCharges::new(2, 1.0);

        let dash_left = MotorInput {
            axis: -1.0,
            dash_pressed: true,
            ..default()
        };
        let out = motor.step(dash_left, context(true), &mut charges, &tuning);
        assert!(out.dashed);
        assert_relative_eq!(out.velocity.x, -tuning.dash_speed);

        // Steering the other way does nothing mid-dash.
        let steer_right = MotorInput {
            axis: 1.0,
            ..default()
        };
        let out = motor.step(steer_right, context(true), &mut charges, &tuning);
        assert_relative_eq!(out.velocity.x, -tuning.dash_speed);
        assert_relative_eq!(motor.look_direction(), -1.0);

        motor.step(steer_right, context(true), &mut charges, &tuning);
        let out = motor.step(steer_right, context(true), &mut charges, &tuning);
        assert!(!motor.is_dashing());
        assert_eq!(out.velocity, Vec2::ZERO);
    }

    #[test]
    fn no_charges_no_dash() {
        let tuning = tuning();
        let mut motor = MoonkeyMotor::default();
        let mut charges = DashCharges::new(0, 1.0);

        let dash = MotorInput {
            dash_pressed: true,
            ..default()
        };
        let out = motor.step(dash, context(true), &mut charges, &tuning);
        assert!(!out.dashed);
        assert!(!motor.is_dashing());
    }

    #[test]
    fn attacking_blocks_horizontal_movement() {
        let tuning = tuning();
        let mut motor = MoonkeyMotor::default();
        let mut charges = DashCharges::new(2, 1.0);

        let busy = MotorContext {
            can_move: false,
            ..context(true)
        };
        let input = MotorInput {
            axis: 1.0,
            jump_pressed: true,
            dash_pressed: true,
            ..default()
        };
        let out = motor.step(input, busy, &mut charges, &tuning);

        assert_eq!(out.velocity, Vec2::ZERO);
        assert!(!out.jumped);
        assert_eq!(charges.charges(), 2);
    }
}
