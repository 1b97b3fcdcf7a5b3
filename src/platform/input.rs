//! Input aggregation
//!
//! Keys, the on-screen joystick and pointer clicks all funnel into one
//! `TickInput` per tick. Held directions persist between ticks; actions are
//! one-shot and cleared by `take`. Clicks are hit-tested against the regions
//! the renderer laid out for the previous frame.

use glam::Vec2;

use crate::renderer::frame::{HitRegions, UiAction};
use crate::sim::TickInput;

/// Joystick deflection below this fraction of its radius is ignored
pub const JOYSTICK_DEAD_ZONE: f32 = 0.3;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    ToggleFlying,
    ToggleBeam,
    Interact,
    Exit,
    Confirm,
    Cancel,
    Restart,
    Answer(usize),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Key> {
        let key = match key {
            "ArrowLeft" | "a" | "A" => Key::Left,
            "ArrowRight" | "d" | "D" => Key::Right,
            "ArrowUp" | "w" | "W" => Key::Up,
            "ArrowDown" | "s" | "S" => Key::Down,
            "f" | "F" => Key::ToggleFlying,
            "b" | "B" => Key::ToggleBeam,
            "e" | "E" | " " => Key::Interact,
            "x" | "X" => Key::Exit,
            "Enter" | "y" | "Y" => Key::Confirm,
            "Escape" | "n" | "N" => Key::Cancel,
            "r" | "R" => Key::Restart,
            "1" => Key::Answer(0),
            "2" => Key::Answer(1),
            "3" => Key::Answer(2),
            "4" => Key::Answer(3),
            _ => return None,
        };
        Some(key)
    }

    fn is_direction(self) -> bool {
        matches!(self, Key::Left | Key::Right | Key::Up | Key::Down)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Held {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl Held {
    fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Up => self.up = down,
            Key::Down => self.down = down,
            _ => {}
        }
    }

    fn vector(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Collects raw input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    held: Held,
    joystick: Vec2,
    pending: TickInput,
    hit_regions: HitRegions,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if key.is_direction() {
            self.held.set(key, true);
            return;
        }
        let pending = &mut self.pending;
        match key {
            Key::ToggleFlying => pending.toggle_flying = true,
            Key::ToggleBeam => pending.toggle_beam = true,
            Key::Interact => pending.interact = true,
            Key::Exit => pending.exit = true,
            Key::Confirm => pending.confirm_exit = true,
            Key::Cancel => pending.cancel_exit = true,
            Key::Restart => pending.restart = true,
            Key::Answer(index) => pending.answer = Some(index),
            Key::Left | Key::Right | Key::Up | Key::Down => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.set(key, false);
    }

    /// Joystick deflection, each axis -1..1 relative to the stick radius
    pub fn set_joystick(&mut self, deflection: Vec2) {
        let deflection = deflection.clamp_length_max(1.0);
        self.joystick = if deflection.length() < JOYSTICK_DEAD_ZONE {
            Vec2::ZERO
        } else {
            deflection
        };
    }

    pub fn release_joystick(&mut self) {
        self.joystick = Vec2::ZERO;
    }

    /// Regions laid out by the last rendered frame
    pub fn set_hit_regions(&mut self, regions: HitRegions) {
        self.hit_regions = regions;
    }

    /// Pointer click in world coordinates; ignored unless it lands on a
    /// control that is currently visible
    pub fn click(&mut self, point: Vec2) -> Option<UiAction> {
        let action = self.hit_regions.resolve(point)?;
        self.apply(action);
        Some(action)
    }

    fn apply(&mut self, action: UiAction) {
        let pending = &mut self.pending;
        match action {
            UiAction::Interact => pending.interact = true,
            UiAction::Exit => pending.exit = true,
            UiAction::ConfirmExit => pending.confirm_exit = true,
            UiAction::CancelExit => pending.cancel_exit = true,
            UiAction::Answer(index) => pending.answer = Some(index),
            UiAction::Restart => pending.restart = true,
        }
    }

    /// Current movement intent; the joystick wins over keys while deflected
    pub fn movement(&self) -> Vec2 {
        if self.joystick != Vec2::ZERO {
            return self.joystick;
        }
        self.held.vector().normalize_or_zero()
    }

    /// Input for the next tick. One-shot actions are consumed.
    pub fn take(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.movement = self.movement();
        input
    }

    /// Drop everything, e.g. when the page loses focus
    pub fn clear(&mut self) {
        self.held = Held::default();
        self.joystick = Vec2::ZERO;
        self.pending = TickInput::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rect;
    use proptest::prelude::*;

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("w"), Some(Key::Up));
        assert_eq!(Key::from_dom(" "), Some(Key::Interact));
        assert_eq!(Key::from_dom("3"), Some(Key::Answer(2)));
        assert_eq!(Key::from_dom("Tab"), None);
    }

    #[test]
    fn test_diagonal_is_normalised() {
        let mut input = InputAggregator::new();
        input.key_down(Key::Right);
        input.key_down(Key::Down);
        let movement = input.take().movement;
        assert!((movement.length() - 1.0).abs() < 1e-6);
        assert!(movement.x > 0.0 && movement.y > 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputAggregator::new();
        input.key_down(Key::Left);
        input.key_down(Key::Right);
        assert_eq!(input.take().movement, Vec2::ZERO);
    }

    #[test]
    fn test_held_keys_persist_actions_do_not() {
        let mut input = InputAggregator::new();
        input.key_down(Key::Left);
        input.key_down(Key::Interact);
        let first = input.take();
        assert!(first.interact);
        let second = input.take();
        assert!(!second.interact);
        assert_eq!(second.movement, Vec2::new(-1.0, 0.0));
        input.key_up(Key::Left);
        assert_eq!(input.take().movement, Vec2::ZERO);
    }

    #[test]
    fn test_joystick_dead_zone() {
        let mut input = InputAggregator::new();
        input.set_joystick(Vec2::new(0.2, 0.1));
        assert_eq!(input.movement(), Vec2::ZERO);
        input.set_joystick(Vec2::new(0.6, 0.0));
        assert_eq!(input.movement(), Vec2::new(0.6, 0.0));
        input.release_joystick();
        assert_eq!(input.movement(), Vec2::ZERO);
    }

    #[test]
    fn test_click_routes_through_hit_regions() {
        let mut input = InputAggregator::new();
        assert_eq!(input.click(Vec2::new(10.0, 10.0)), None);

        let mut regions = HitRegions::default();
        regions.push(Rect::new(0.0, 0.0, 80.0, 30.0), UiAction::ConfirmExit);
        regions.push(Rect::new(100.0, 0.0, 80.0, 30.0), UiAction::CancelExit);
        input.set_hit_regions(regions);

        assert_eq!(input.click(Vec2::new(120.0, 15.0)), Some(UiAction::CancelExit));
        assert_eq!(input.click(Vec2::new(90.0, 15.0)), None);
        let tick = input.take();
        assert!(tick.cancel_exit && !tick.confirm_exit);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut input = InputAggregator::new();
        input.key_down(Key::Up);
        input.key_down(Key::Restart);
        input.clear();
        assert_eq!(input.take(), TickInput::default());
    }

    proptest! {
        #[test]
        fn prop_movement_never_exceeds_unit(
            x in -3.0f32..3.0,
            y in -3.0f32..3.0,
            left: bool,
            up: bool,
        ) {
            let mut input = InputAggregator::new();
            if left { input.key_down(Key::Left); }
            if up { input.key_down(Key::Up); }
            prop_assert!(input.movement().length() <= 1.0 + 1e-6);
            input.set_joystick(Vec2::new(x, y));
            prop_assert!(input.movement().length() <= 1.0 + 1e-6);
        }
    }
}
