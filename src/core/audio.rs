//! Sound cues and the sinks that play them
use std::io::Write;

use tracing::debug;

/// Game events that have a sound attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Start,
    MoveX,
    MoveO,
    Win,
    Draw,
    Restart,
}

impl SoundCue {
    /// Number of bell strokes used to render this cue on a terminal
    pub fn strokes(self) -> usize {
        match self {
            SoundCue::Win | SoundCue::Draw => 2,
            _ => 1,
        }
    }
}

/// Anything that can play a cue
pub trait AudioSink: Send {
    fn play(&mut self, cue: SoundCue);
}

/// Rings the terminal bell
pub struct Bell<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> Bell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Bell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> AudioSink for Bell<W> {
    fn play(&mut self, cue: SoundCue) {
        let bells = "\x07".repeat(cue.strokes());
        // Best effort; a missing bell never stops the game.
        match self.out.write_all(bells.as_bytes()).and_then(|_| self.out.flush()) {
            Ok(()) => debug!(?cue, "bell"),
            Err(e) => debug!(?cue, error = %e, "bell failed"),
        }
    }
}

/// Swallows every cue (`--mute`)
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, cue: SoundCue) {
        debug!(?cue, "muted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_writes_one_bel_per_stroke() {
        let mut bell = Bell::new(Vec::new());
        bell.play(SoundCue::MoveX);
        bell.play(SoundCue::Win);
        assert_eq!(bell.into_inner(), b"\x07\x07\x07".to_vec());
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bell_survives_a_broken_writer() {
        let mut bell = Bell::new(Broken);
        bell.play(SoundCue::Win);
        bell.play(SoundCue::MoveO);
        let _ = bell.into_inner();
    }
}
