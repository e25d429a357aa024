//! Playback controller: a cursor over a finished Frame Store.
//!
//! The controller never sleeps and never spawns threads. `play` arms a
//! deadline; the host's event loop asks how long it may block
//! ([`PlaybackController::time_until_tick`]) and then calls
//! [`PlaybackController::tick`], which advances at most one frame. Render,
//! timer and input handling therefore all run on the host's thread.

use std::time::{Duration, Instant};

use algoviz_protocol::Snapshot;
use serde::{Deserialize, Serialize};

use crate::model::FrameStore;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);
pub const MIN_DELAY: Duration = Duration::from_millis(1);
pub const MAX_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "Stopped"),
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// What a renderer receives: the snapshot at the cursor plus enough
/// context to draw a progress indicator.
#[derive(Debug, Clone, Copy)]
pub struct FrameRef<'a> {
    pub index: usize,
    pub total: usize,
    pub state: PlaybackState,
    pub snapshot: &'a Snapshot,
}

/// Draws one snapshot. Indices are not necessarily consecutive: jumps and
/// backward steps move the cursor arbitrarily.
pub trait Renderer {
    fn render(&mut self, frame: FrameRef<'_>);
}

#[derive(Debug)]
pub struct PlaybackController {
    store: FrameStore,
    position: usize,
    state: PlaybackState,
    delay: Duration,
    deadline: Option<Instant>,
}

impl PlaybackController {
    /// Take ownership of a finished Frame Store. The cursor starts at 0.
    pub fn new(store: FrameStore, delay: Duration) -> Self {
        Self {
            store,
            position: 0,
            state: PlaybackState::Stopped,
            delay: clamp_delay(delay),
            deadline: None,
        }
    }

    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.store.len()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.store.at(self.position).ok()
    }

    /// When the next tick is due, if playing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// How long the host may block before calling `tick`.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Start (or resume) playing. At the last frame this rewinds to 0 first.
    /// The renderer hears about the change of state once, at the cursor.
    pub fn play(&mut self, now: Instant, renderer: &mut dyn Renderer) {
        if self.store.len() < 2 {
            return;
        }
        let was = self.state;
        if self.is_at_end() {
            self.position = 0;
        }
        self.state = PlaybackState::Playing;
        self.deadline = Some(now + self.delay);
        log::debug!("playback: play from frame {}", self.position);
        if was != PlaybackState::Playing {
            self.render(renderer);
        }
    }

    pub fn pause(&mut self, renderer: &mut dyn Renderer) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.deadline = None;
            log::debug!("playback: paused at frame {}", self.position);
            self.render(renderer);
        }
    }

    pub fn toggle(&mut self, now: Instant, renderer: &mut dyn Renderer) {
        if self.state == PlaybackState::Playing {
            self.pause(renderer);
        } else {
            self.play(now, renderer);
        }
    }

    /// Cancel the timer and go to `Stopped` without moving the cursor.
    pub fn stop(&mut self) {
        self.deadline = None;
        self.state = PlaybackState::Stopped;
    }

    /// Pause and move one frame on. Past the end the cursor stays put and
    /// only a pause is drawn.
    pub fn step_forward(&mut self, renderer: &mut dyn Renderer) {
        let paused = self.cancel_timer();
        if self.position + 1 < self.store.len() {
            self.position += 1;
            self.render(renderer);
        } else if paused {
            self.render(renderer);
        }
    }

    pub fn step_back(&mut self, renderer: &mut dyn Renderer) {
        let paused = self.cancel_timer();
        if self.position > 0 {
            self.position -= 1;
            self.render(renderer);
        } else if paused {
            self.render(renderer);
        }
    }

    pub fn jump_to_start(&mut self, renderer: &mut dyn Renderer) {
        self.cancel_timer();
        self.position = 0;
        self.render(renderer);
    }

    pub fn jump_to_end(&mut self, renderer: &mut dyn Renderer) {
        self.cancel_timer();
        self.position = self.store.len().saturating_sub(1);
        self.render(renderer);
    }

    /// Change the inter-frame delay. An already scheduled tick keeps its
    /// deadline; the new delay applies from the next re-arm.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = clamp_delay(delay);
    }

    /// Advance one frame if a tick is due. Returns whether a frame was rendered.
    pub fn tick(&mut self, now: Instant, renderer: &mut dyn Renderer) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if self.state != PlaybackState::Playing || now < deadline {
            return false;
        }
        if self.is_at_end() {
            self.stop();
            return false;
        }

        self.position += 1;
        if self.is_at_end() {
            self.stop();
            log::debug!("playback: reached last frame {}", self.position);
        } else {
            self.deadline = Some(now + self.delay);
        }
        self.render(renderer);
        true
    }

    /// Re-render the current frame, e.g. after the host's surface resized.
    pub fn redraw(&self, renderer: &mut dyn Renderer) {
        self.render(renderer);
    }

    /// Returns whether a running playback was paused.
    fn cancel_timer(&mut self) -> bool {
        self.deadline = None;
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            return true;
        }
        false
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        if let Ok(snapshot) = self.store.at(self.position) {
            renderer.render(FrameRef {
                index: self.position,
                total: self.store.len(),
                state: self.state,
                snapshot,
            });
        }
    }
}

/// Clamp into `MIN_DELAY..=MAX_DELAY`.
pub fn clamp_delay(delay: Duration) -> Duration {
    delay.clamp(MIN_DELAY, MAX_DELAY)
}
