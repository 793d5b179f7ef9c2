//! Cosmetic state layered on top of the rules: glow on fresh marks, confetti
//! after a win and the fade-in when the board first appears.
//!
//! None of it feeds back into [`super::state::GameState`]; it only reacts to
//! placements and is wiped on restart.

use rand::Rng;

use super::state::{Placement, SIZE};

/// Fading highlight on recently placed marks.
#[derive(Debug, Clone)]
pub struct Glow {
    remaining: [[u32; SIZE]; SIZE],
    duration: u32,
}

impl Glow {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            remaining: [[0; SIZE]; SIZE],
            duration: duration_ms,
        }
    }

    pub fn ignite(&mut self, row: usize, col: usize) {
        if row < SIZE && col < SIZE {
            self.remaining[row][col] = self.duration;
        }
    }

    pub fn tick(&mut self, dt: u32) {
        for t in self.remaining.iter_mut().flatten() {
            *t = t.saturating_sub(dt);
        }
    }

    /// 1.0 right after placement, 0.0 once faded.
    pub fn intensity(&self, row: usize, col: usize) -> f32 {
        if self.duration == 0 || row >= SIZE || col >= SIZE {
            return 0.0;
        }
        self.remaining[row][col] as f32 / self.duration as f32
    }

    pub fn is_active(&self) -> bool {
        self.remaining.iter().flatten().any(|&t| t > 0)
    }

    pub fn clear(&mut self) {
        self.remaining = [[0; SIZE]; SIZE];
    }
}

const GLYPHS: [char; 5] = ['*', '+', '•', '✦', '○'];
/// Downward acceleration in cells per second squared.
const GRAVITY: f32 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub glyph: char,
    /// Index into the renderer's confetti palette.
    pub hue: usize,
    pub ttl_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
}

impl Confetti {
    /// Throws `count` particles up and outwards from `origin`.
    pub fn burst<R: Rng>(&mut self, origin: (f32, f32), count: usize, rng: &mut R) {
        self.particles.extend((0..count).map(|_| Particle {
            x: origin.0,
            y: origin.1,
            vx: rng.random_range(-30.0..30.0),
            vy: rng.random_range(-25.0..-5.0),
            glyph: GLYPHS[rng.random_range(0..GLYPHS.len())],
            hue: rng.random_range(0..4),
            ttl_ms: rng.random_range(1500..2500),
        }));
    }

    pub fn tick(&mut self, dt: u32) {
        let secs = dt as f32 / 1000.0;
        for p in &mut self.particles {
            p.vy += GRAVITY * secs;
            p.x += p.vx * secs;
            p.y += p.vy * secs;
            p.ttl_ms = p.ttl_ms.saturating_sub(dt);
        }
        self.particles.retain(|p| p.ttl_ms > 0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Linear fade from 0.0 to 1.0 over a fixed duration.
#[derive(Debug, Clone)]
pub struct Transition {
    elapsed: u32,
    duration: u32,
}

impl Transition {
    /// Starts already finished, so the board is fully visible by default.
    pub fn new(duration_ms: u32) -> Self {
        Self {
            elapsed: duration_ms,
            duration: duration_ms,
        }
    }

    pub fn start(&mut self) {
        self.elapsed = 0;
    }

    pub fn tick(&mut self, dt: u32) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        self.elapsed as f32 / self.duration as f32
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Everything the presentation animates.
#[derive(Debug, Clone)]
pub struct Effects {
    pub glow: Glow,
    pub confetti: Confetti,
    pub transition: Transition,
    confetti_count: usize,
}

impl Effects {
    pub fn new(glow_ms: u32, confetti_count: usize, transition_ms: u32) -> Self {
        Self {
            glow: Glow::new(glow_ms),
            confetti: Confetti::default(),
            transition: Transition::new(transition_ms),
            confetti_count,
        }
    }

    /// Reacts to an accepted move; `origin` is where a winning burst starts.
    pub fn on_placement<R: Rng>(&mut self, placement: &Placement, origin: (f32, f32), rng: &mut R) {
        self.glow.ignite(placement.row, placement.col);
        if matches!(placement.outcome, super::state::Outcome::Won { .. }) {
            self.confetti.burst(origin, self.confetti_count, rng);
        }
    }

    pub fn tick(&mut self, dt: u32) {
        self.glow.tick(dt);
        self.confetti.tick(dt);
        self.transition.tick(dt);
    }

    /// Drops glow and confetti. The transition is left alone.
    pub fn reset(&mut self) {
        self.glow.clear();
        self.confetti.clear();
    }
}
