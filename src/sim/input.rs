//! Movement intent built from discrete key transitions.
//!
//! The window layer reports `Down`/`Up` transitions of abstract
//! [`Control`]s. [`InputState`] tracks which movement controls are held and
//! derives an [`Intent`] from them through [`AXIS_RULES`], so holding two
//! opposite keys always cancels instead of depending on press order.

use bitflags::bitflags;

bitflags! {
    /// Movement controls currently held down.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Held: u8 {
        const FORWARD    = 0x01;
        const BACKWARD   = 0x02;
        const TURN_LEFT  = 0x04;
        const TURN_RIGHT = 0x08;
    }
}

/// Abstract controls, independent of the physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    ToggleMinimap,
    Quit,
}

impl Control {
    fn held_bit(self) -> Option<Held> {
        match self {
            Control::Forward => Some(Held::FORWARD),
            Control::Backward => Some(Held::BACKWARD),
            Control::TurnLeft => Some(Held::TURN_LEFT),
            Control::TurnRight => Some(Held::TURN_RIGHT),
            Control::ToggleMinimap | Control::Quit => None,
        }
    }
}

/// One input transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Control),
    Up(Control),
    /// Window closed.
    Close,
}

/// Walk/turn direction, each in `{-1, 0, 1}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    /// +1 forward, -1 backward.
    pub walk: i8,
    /// +1 turn right (angle grows), -1 turn left.
    pub turn: i8,
}

/// `(positive held, negative held) -> direction`. Opposites cancel.
pub const AXIS_RULES: [((bool, bool), i8); 4] = [
    ((false, false), 0),
    ((true, false), 1),
    ((false, true), -1),
    ((true, true), 0),
];

fn axis(held: Held, positive: Held, negative: Held) -> i8 {
    let key = (held.contains(positive), held.contains(negative));
    AXIS_RULES
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(0, |&(_, v)| v)
}

impl Intent {
    /// Derive the intent from the held set, clamped to `{-1, 0, 1}`.
    pub fn from_held(held: Held) -> Self {
        Self {
            walk: axis(held, Held::FORWARD, Held::BACKWARD).clamp(-1, 1),
            turn: axis(held, Held::TURN_RIGHT, Held::TURN_LEFT).clamp(-1, 1),
        }
    }
}

/// Accumulates transitions between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    held: Held,
    pub intent: Intent,
    pub running: bool,
    pub minimap: bool,
}

impl InputState {
    pub fn new(minimap: bool) -> Self {
        Self {
            held: Held::empty(),
            intent: Intent::default(),
            running: true,
            minimap,
        }
    }

    #[inline]
    pub fn held(&self) -> Held {
        self.held
    }

    /// Apply one transition and re-derive the intent.
    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Close | KeyEvent::Down(Control::Quit) => self.running = false,
            KeyEvent::Down(Control::ToggleMinimap) => self.minimap = !self.minimap,
            KeyEvent::Down(c) => {
                if let Some(bit) = c.held_bit() {
                    self.held.insert(bit);
                }
            }
            KeyEvent::Up(c) => {
                if let Some(bit) = c.held_bit() {
                    self.held.remove(bit);
                }
            }
        }
        self.intent = Intent::from_held(self.held);
    }

    /// Apply a batch of transitions in order.
    pub fn apply_all<I: IntoIterator<Item = KeyEvent>>(&mut self, events: I) {
        for ev in events {
            self.apply(ev);
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(false)
    }
}
