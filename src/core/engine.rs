use crate::core::audio::AudioSink;
use crate::core::game::{Context, Flow, Game};
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Wake-up period for games that do not tick
const IDLE_WAKEUP: Duration = Duration::from_millis(250);

pub struct Engine<G: Game> {
    game: G,
    audio: Box<dyn AudioSink>,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G, audio: Box<dyn AudioSink>) -> Self {
        Self { game, audio }
    }

    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<G> {
        // set up the channel the game uses to queue sounds
        let (outbox_tx, mut outbox_rx) = tokio::sync::mpsc::unbounded_channel();
        let ctx = Context { tx: outbox_tx };

        let mut events = EventStream::new();
        let size = terminal.size()?;
        self.game.on_resize(size.width, size.height);

        let tick_rate = self.game.tick_rate();
        let mut ticker = tokio::time::interval(tick_rate.unwrap_or(IDLE_WAKEUP));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();

        info!(?tick_rate, "engine started");

        loop {
            terminal.draw(|f| self.game.render(f))?;

            tokio::select! {
                // 1. SOUND: cues queued by the game during the last callback
                Some(cue) = outbox_rx.recv() => {
                    self.audio.play(cue);
                }

                // 2. INPUT: keyboard, mouse and resize events
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.dispatch(event, &ctx) == Flow::Quit {
                                break;
                            }
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }

                // 3. TICK: animation heartbeat
                _ = ticker.tick() => {
                    if tick_rate.is_some() {
                        let dt = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
                        last_tick = Instant::now();
                        self.game.on_tick(dt, &ctx);
                    }
                }
            }
        }

        // play whatever was queued by the final event
        while let Ok(cue) = outbox_rx.try_recv() {
            self.audio.play(cue);
        }

        info!("engine stopped");
        Ok(self.game)
    }

    fn dispatch(&mut self, event: Event, ctx: &Context) -> Flow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Press => Flow::Continue,
            Event::Key(key) if is_quit_key(&key) => Flow::Quit,
            Event::Resize(width, height) => {
                debug!(width, height, "resize");
                self.game.on_resize(width, height);
                Flow::Continue
            }
            other => self.game.handle_event(other, ctx),
        }
    }
}

/// Esc, `q` and Ctrl+C leave the game from any screen
pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::Silent;
    use crossterm::event::KeyEventState;
    use tokio::sync::mpsc::unbounded_channel;

    /// Records what reaches the game and quits on `x`.
    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        sizes: Vec<(u16, u16)>,
    }

    impl Game for Recorder {
        fn tick_rate(&self) -> Option<Duration> {
            None
        }

        fn on_tick(&mut self, _dt: u32, _ctx: &Context) {}

        fn on_resize(&mut self, width: u16, height: u16) {
            self.sizes.push((width, height));
        }

        fn handle_event(&mut self, event: Event, _ctx: &Context) -> Flow {
            let quit = matches!(&event, Event::Key(k) if k.code == KeyCode::Char('x'));
            self.events.push(event);
            if quit {
                Flow::Quit
            } else {
                Flow::Continue
            }
        }

        fn render(&self, _frame: &mut ratatui::Frame) {}
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn dispatch_filters_and_forwards() {
        let (tx, _rx) = unbounded_channel();
        let ctx = Context { tx };
        let mut engine = Engine::new(Recorder::default(), Box::new(Silent));

        let release = key(KeyCode::Char('a'), KeyEventKind::Release);
        assert_eq!(engine.dispatch(release, &ctx), Flow::Continue);
        assert!(engine.game.events.is_empty());

        let release_quit = key(KeyCode::Char('q'), KeyEventKind::Release);
        assert_eq!(engine.dispatch(release_quit, &ctx), Flow::Continue);

        assert_eq!(engine.dispatch(Event::Resize(100, 40), &ctx), Flow::Continue);
        assert_eq!(engine.game.sizes, vec![(100, 40)]);
        assert!(engine.game.events.is_empty());

        let press = key(KeyCode::Char('a'), KeyEventKind::Press);
        assert_eq!(engine.dispatch(press.clone(), &ctx), Flow::Continue);
        assert_eq!(engine.game.events, vec![press]);

        let quit = key(KeyCode::Char('x'), KeyEventKind::Press);
        assert_eq!(engine.dispatch(quit, &ctx), Flow::Quit);

        let esc = key(KeyCode::Esc, KeyEventKind::Press);
        assert_eq!(engine.dispatch(esc, &ctx), Flow::Quit);
        assert_eq!(engine.game.events.len(), 2);
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&KeyEvent::from(KeyCode::Esc)));
        assert!(is_quit_key(&KeyEvent::from(KeyCode::Char('q'))));
        assert!(is_quit_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_key(&KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_quit_key(&KeyEvent::from(KeyCode::Char('r'))));
    }
}
