//! Input domain: per-player control state sampled once per frame and
//! consumed once per fixed step.

use bevy::prelude::*;

/// Slack when comparing the accumulated sprint timer to its trigger.
const SPRINT_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Run,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Run,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn is_direction(self) -> bool {
        matches!(
            self,
            Action::Left | Action::Right | Action::Up | Action::Down
        )
    }
}

/// Small bit set of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn of(actions: &[Action]) -> Self {
        actions.iter().fold(Self::default(), |set, a| set.with(*a))
    }

    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn union(self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 | other.0)
    }

    pub fn difference(self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 & !other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

impl Horizontal {
    pub fn sign(self) -> f32 {
        match self {
            Horizontal::Left => -1.0,
            Horizontal::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

#[derive(Component, Debug, Clone)]
pub struct Controls {
    keys_held: ActionSet,
    pad_held: ActionSet,
    held: ActionSet,
    pressed: ActionSet,
    released: ActionSet,
    pending_pressed: ActionSet,
    pending_released: ActionSet,
    /// Held keyboard directions, oldest press first.
    key_recency: Vec<Action>,
    sprint_timer: f32,
    sprint_trigger: f32,
}

impl Controls {
    pub fn new(sprint_trigger: f32) -> Self {
        Self {
            keys_held: ActionSet::default(),
            pad_held: ActionSet::default(),
            held: ActionSet::default(),
            pressed: ActionSet::default(),
            released: ActionSet::default(),
            pending_pressed: ActionSet::default(),
            pending_released: ActionSet::default(),
            key_recency: Vec::new(),
            sprint_timer: 0.0,
            sprint_trigger,
        }
    }

    /// Fold in one frame of device state. Edges accumulate until the next
    /// [`Controls::begin_step`].
    pub fn record(&mut self, keys: ActionSet, pad: ActionSet) {
        let newly_pressed_keys = keys.difference(self.keys_held);
        for action in Action::ALL {
            if action.is_direction() && newly_pressed_keys.contains(action) {
                self.key_recency.retain(|a| *a != action);
                self.key_recency.push(action);
            }
        }
        self.key_recency.retain(|a| keys.contains(*a));

        let held = keys.union(pad);
        self.pending_pressed = self.pending_pressed.union(held.difference(self.held));
        self.pending_released = self.pending_released.union(self.held.difference(held));
        self.keys_held = keys;
        self.pad_held = pad;
        self.held = held;
    }

    /// Make the edges gathered since the last step visible to this step.
    pub fn begin_step(&mut self) {
        self.pressed = std::mem::take(&mut self.pending_pressed);
        self.released = std::mem::take(&mut self.pending_released);
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    pub fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    pub fn was_released(&self, action: Action) -> bool {
        self.released.contains(action)
    }

    /// Most recently pressed held keyboard direction on the axis, falling
    /// back to the gamepad when no key on the axis is held.
    fn axis<T>(&self, negative: (Action, T), positive: (Action, T)) -> Option<T> {
        let (neg_action, neg) = negative;
        let (pos_action, pos) = positive;
        match self
            .key_recency
            .iter()
            .rev()
            .find(|a| **a == neg_action || **a == pos_action)
        {
            Some(a) if *a == neg_action => return Some(neg),
            Some(_) => return Some(pos),
            None => {}
        }
        match (
            self.pad_held.contains(neg_action),
            self.pad_held.contains(pos_action),
        ) {
            (true, false) => Some(neg),
            (false, true) => Some(pos),
            _ => None,
        }
    }

    pub fn horizontal(&self) -> Option<Horizontal> {
        self.axis(
            (Action::Left, Horizontal::Left),
            (Action::Right, Horizontal::Right),
        )
    }

    pub fn vertical(&self) -> Option<Vertical> {
        self.axis((Action::Down, Vertical::Down), (Action::Up, Vertical::Up))
    }

    pub fn is_moving(&self) -> bool {
        self.horizontal().is_some()
    }

    /// Holding the direction opposite to the current horizontal velocity.
    pub fn is_turning(&self, velocity_x: f32) -> bool {
        self.horizontal()
            .is_some_and(|dir| dir.sign() * velocity_x < 0.0)
    }

    pub fn is_running(&self) -> bool {
        self.is_moving() && self.is_held(Action::Run)
    }

    pub fn is_sprinting(&self) -> bool {
        self.is_running() && self.sprint_reached()
    }

    fn sprint_reached(&self) -> bool {
        self.sprint_timer >= self.sprint_trigger - SPRINT_EPSILON
    }

    pub fn sprint_timer(&self) -> f32 {
        self.sprint_timer
    }

    /// Grows while running on the ground without turning. A sprint already
    /// reached survives a jump; anything else resets it.
    pub fn tick_sprint(&mut self, dt: f32, grounded: bool, velocity_x: f32) {
        let running = self.is_running() && !self.is_turning(velocity_x);
        if running && grounded {
            self.sprint_timer = (self.sprint_timer + dt).min(self.sprint_trigger);
        } else if !(running && self.sprint_reached()) {
            self.sprint_timer = 0.0;
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(1.0)
    }
}
