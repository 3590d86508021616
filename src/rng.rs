/// Random draws for the simulation.
///
/// All randomness enters through `RngSource::roll`, so a test can hand the
/// simulation a fixed sequence of draws and know exactly what will spawn.

use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

pub trait RngSource {
    /// Raw uniform draw; implementors must return a value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Checked draw used by the simulation.
    ///
    /// # Panics
    /// If the source breaks its contract and yields a value outside `[0, 1)`.
    fn roll(&mut self) -> f64 {
        let r = self.next_unit();
        assert!(
            (0.0..1.0).contains(&r),
            "RngSource produced {} which is outside [0, 1)",
            r
        );
        r
    }
}

impl RngSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RngSource for ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Map one roll into `[lo, hi)`.
pub fn range(rng: &mut impl RngSource, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.roll() as f32
}

// ── Scripted source ───────────────────────────────────────────────────────────

/// Replays a fixed list of draws.  Once the script runs out every further
/// draw returns `fallback`.
#[derive(Clone, Debug)]
pub struct ScriptedRolls {
    script: Vec<f64>,
    cursor: usize,
    fallback: f64,
}

impl ScriptedRolls {
    /// The fallback of 0.999 keeps every probabilistic spawn from firing.
    pub fn new(script: impl Into<Vec<f64>>) -> Self {
        ScriptedRolls {
            script: script.into(),
            cursor: 0,
            fallback: 0.999,
        }
    }

    /// A source that never triggers a spawn.
    pub fn quiet() -> Self {
        ScriptedRolls::new(Vec::new())
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of draws taken so far, script and fallback alike.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.cursor)
    }
}

impl RngSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        let r = self.script.get(self.cursor).copied().unwrap_or(self.fallback);
        self.cursor += 1;
        r
    }
}
