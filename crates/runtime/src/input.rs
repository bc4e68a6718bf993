//! Input sources for the headless driver.
//!
//! A windowed front end would decode real keyboard and mouse events into
//! [`InputFrame`]s. Without a window the driver pulls them from an
//! [`InputSource`] instead.

use glam::Vec2;
use scene::{InputFrame, MovementKeys};

/// Produces one decoded input sample per frame.
pub trait InputSource {
    fn sample(&mut self, dt: f32) -> InputFrame;
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn sample(&mut self, dt: f32) -> InputFrame {
        (**self).sample(dt)
    }
}

/// No capture, so the camera never moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct Idle;

impl InputSource for Idle {
    fn sample(&mut self, _dt: f32) -> InputFrame {
        InputFrame::default()
    }
}

/// Synthetic input that pans the view and drifts forward.
///
/// Each frame reports a constant horizontal mouse delta; the vertical delta
/// alternates sign every `swing_frames` frames so pitch sweeps up and down.
#[derive(Debug, Clone)]
pub struct Orbit {
    pub delta: Vec2,
    pub swing_frames: u32,
    pub drift: bool,
    frame: u32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self::new(Vec2::new(40.0, 12.0), 90)
    }
}

impl Orbit {
    #[must_use]
    pub fn new(delta: Vec2, swing_frames: u32) -> Self {
        Self {
            delta,
            swing_frames: swing_frames.max(1),
            drift: true,
            frame: 0,
        }
    }
}

impl InputSource for Orbit {
    fn sample(&mut self, _dt: f32) -> InputFrame {
        let upward = (self.frame / self.swing_frames) % 2 == 0;
        self.frame = self.frame.wrapping_add(1);
        let dy = if upward { -self.delta.y } else { self.delta.y };
        InputFrame {
            keys: MovementKeys {
                forward: self.drift,
                ..MovementKeys::default()
            },
            mouse_delta: Vec2::new(self.delta.x, dy),
            captured: true,
        }
    }
}

/// Replays a fixed list of samples, then idles.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    frames: std::collections::VecDeque<InputFrame>,
}

impl Scripted {
    #[must_use]
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for Scripted {
    fn sample(&mut self, _dt: f32) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}
