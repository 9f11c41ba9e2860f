//! Window, keyboard and log plumbing around `minifb`.
//!
//! Only this module names `minifb`; the rest of the crate sees abstract
//! [`Control`]s and [`KeyEvent`]s.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use smallvec::SmallVec;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::renderer::Rgba;
use crate::sim::{Control, KeyEvent};

#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("could not open a {width}×{height} window: {source}")]
    Open {
        width: usize,
        height: usize,
        #[source]
        source: minifb::Error,
    },

    #[error("could not present frame: {0}")]
    Present(#[from] minifb::Error),
}

/// Transitions gathered in one poll; a frame rarely has more than a few.
pub type Events = SmallVec<[KeyEvent; 8]>;

/// Physical key → control. Unbound keys are ignored.
pub fn control_for(key: Key) -> Option<Control> {
    match key {
        Key::Up | Key::W => Some(Control::Forward),
        Key::Down | Key::S => Some(Control::Backward),
        Key::Left | Key::A => Some(Control::TurnLeft),
        Key::Right | Key::D => Some(Control::TurnRight),
        Key::M => Some(Control::ToggleMinimap),
        Key::Escape => Some(Control::Quit),
        _ => None,
    }
}

/// Translate this frame's pressed/released lists into events, presses
/// first. `open == false` appends a [`KeyEvent::Close`].
pub fn translate(pressed: &[Key], released: &[Key], open: bool) -> Events {
    let mut events: Events = pressed
        .iter()
        .filter_map(|&k| control_for(k).map(KeyEvent::Down))
        .collect();
    events.extend(
        released
            .iter()
            .filter_map(|&k| control_for(k).map(KeyEvent::Up)),
    );
    if !open {
        events.push(KeyEvent::Close);
    }
    events
}

/// The game window.
pub struct Display {
    window: Window,
}

impl Display {
    pub fn open(title: &str, width: usize, height: usize) -> Result<Self, FrontendError> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|source| FrontendError::Open {
                width,
                height,
                source,
            })?;
        Ok(Self { window })
    }

    /// Key transitions since the last [`present`](Self::present).
    pub fn poll_events(&self) -> Events {
        translate(
            &self.window.get_keys_pressed(KeyRepeat::No),
            &self.window.get_keys_released(),
            self.window.is_open(),
        )
    }

    /// Push a finished frame to the screen (this also pumps window events).
    pub fn present(&mut self, fb: &[Rgba], w: usize, h: usize) -> Result<(), FrontendError> {
        self.window.update_with_buffer(fb, w, h)?;
        Ok(())
    }
}

/// Install the global `tracing` subscriber: `RUST_LOG` if set, else `info`,
/// written to stderr.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a second call finds the subscriber already installed
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
