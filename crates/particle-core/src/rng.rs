/// Reproducible pseudo-random stream used to lay out the particle field.
///
/// Each draw is `frac(sin(s) * 10000)` for a counter `s` that increments after
/// every draw. The formula is fixed so the arrangement is identical across
/// devices and across implementations; it is not a general-purpose RNG.
#[derive(Clone, Debug)]
pub struct SeededSequence {
    counter: f64,
}

impl SeededSequence {
    pub fn new(seed: u32) -> Self {
        Self {
            counter: seed as f64,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        let x = self.counter.sin() * 10000.0;
        self.counter += 1.0;
        x - x.floor()
    }

    /// Counter value the next draw will use.
    pub fn counter(&self) -> f64 {
        self.counter
    }
}

impl Iterator for SeededSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }
}
