/// Core game interface driven by the engine loop
use std::time::Duration;

use crossterm::event::Event;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::core::audio::SoundCue;

/// Handle given to the game on every callback so it can reach the engine
pub struct Context {
    pub tx: UnboundedSender<SoundCue>,
}

impl Context {
    /// Queue a sound; the engine plays it on its next wake-up
    pub fn play(&self, cue: SoundCue) {
        if self.tx.send(cue).is_err() {
            warn!(?cue, "audio channel closed, dropping cue");
        }
    }
}

/// What the engine should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main game trait; the engine owns the terminal and calls into this
pub trait Game {
    /// `None` disables `on_tick`; the loop still wakes up for input
    fn tick_rate(&self) -> Option<Duration>;

    /// Advance animations by `dt` milliseconds
    fn on_tick(&mut self, dt: u32, ctx: &Context);

    /// Terminal area changed (also called once before the first frame)
    fn on_resize(&mut self, _width: u16, _height: u16) {}

    /// Keyboard and mouse events not consumed by the engine
    fn handle_event(&mut self, event: Event, ctx: &Context) -> Flow;

    fn render(&self, frame: &mut ratatui::Frame);
}
