//! Per-frame input: logical keys, tri-state key tracking and the sampler
//! capability the frame loop pulls from.
//!
//! A platform layer feeds raw key transitions into a [`KeyboardState`] and
//! accumulates relative pointer motion. Once per frame the loop calls
//! [`InputSampler::sample`] and works only with the returned [`InputSample`].

use bitflags::bitflags;

use crate::math::Vec2;

/// Logical keys the core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Shift,
    Space,
    Escape,
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub const COUNT: usize = 11;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Shift,
        Key::Space,
        Key::Escape,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// What happened to a key during the current sample.
    ///
    /// `PRESSED` and `RELEASED` are edges that only live for one sample;
    /// `HELD` persists until the key goes up.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyInteraction: u8 {
        const PRESSED = 1 << 1;
        const RELEASED = 1 << 2;
        const HELD = 1 << 3;
    }
}

/// Tri-state flags for every [`Key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardState {
    keys: [KeyInteraction; Key::COUNT],
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the one-sample edges, keeping `HELD`.
    pub fn begin_sample(&mut self) {
        for flags in &mut self.keys {
            flags.remove(KeyInteraction::PRESSED | KeyInteraction::RELEASED);
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys[key.index()].insert(KeyInteraction::PRESSED | KeyInteraction::HELD);
    }

    pub fn key_up(&mut self, key: Key) {
        let flags = &mut self.keys[key.index()];
        flags.insert(KeyInteraction::RELEASED);
        flags.remove(KeyInteraction::HELD);
    }

    pub fn interaction(&self, key: Key) -> KeyInteraction {
        self.keys[key.index()]
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.interaction(key).contains(KeyInteraction::PRESSED)
    }

    pub fn released(&self, key: Key) -> bool {
        self.interaction(key).contains(KeyInteraction::RELEASED)
    }

    pub fn held(&self, key: Key) -> bool {
        self.interaction(key).contains(KeyInteraction::HELD)
    }

    /// Marks every key as released, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for key in Key::ALL {
            if self.held(key) {
                self.key_up(key);
            }
        }
    }
}

/// Everything the core reads from the platform for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    /// Pointer displacement in device pixels since the previous sample.
    pub pointer_delta: Vec2,
    pub keys: KeyboardState,
    /// The platform asked the application to close.
    pub quit: bool,
}

impl InputSample {
    /// A sample with no motion, no keys and no quit request.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Quit on a platform request or when Escape is released.
    pub fn wants_quit(&self) -> bool {
        self.quit || self.keys.released(Key::Escape)
    }
}

/// Source of per-frame input, called once at frame start.
pub trait InputSampler {
    fn sample(&mut self) -> InputSample;
}

/// Replays a fixed list of samples, then reports idle input with `quit` set.
///
/// Useful for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    samples: std::collections::VecDeque<InputSample>,
}

impl ScriptedInput {
    pub fn new(samples: impl IntoIterator<Item = InputSample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// `frames` idle samples followed by a quit.
    pub fn idle_frames(frames: usize) -> Self {
        Self::new(std::iter::repeat(InputSample::idle()).take(frames))
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl InputSampler for ScriptedInput {
    fn sample(&mut self) -> InputSample {
        self.samples.pop_front().unwrap_or(InputSample {
            quit: true,
            ..InputSample::idle()
        })
    }
}
