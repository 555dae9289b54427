// Speed curves sampled by normalized animation time

/// A single curve key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise-linear curve mapping normalized time to a speed multiplier.
///
/// Keys are kept sorted by time. Sampling before the first key or after the
/// last key clamps to the end values. An empty curve evaluates to 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpeedCurve {
    keys: Vec<CurveKey>,
}

impl SpeedCurve {
    /// Create a curve from (time, value) pairs in any order
    pub fn new(keys: &[(f32, f32)]) -> Self {
        let mut keys: Vec<CurveKey> = keys
            .iter()
            .map(|&(time, value)| CurveKey { time, value })
            .collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A flat curve
    pub fn constant(value: f32) -> Self {
        Self::new(&[(0.0, value), (1.0, value)])
    }

    /// Straight line from `start` at t=0 to `end` at t=1
    pub fn linear(start: f32, end: f32) -> Self {
        Self::new(&[(0.0, start), (1.0, end)])
    }

    /// Add a key, keeping the keys sorted
    pub fn with_key(mut self, time: f32, value: f32) -> Self {
        let index = self.keys.partition_point(|k| k.time <= time);
        self.keys.insert(index, CurveKey { time, value });
        self
    }

    /// Sample the curve at `time`
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };

        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        let upper = self.keys.partition_point(|k| k.time <= time);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        a.value + (b.value - a.value) * ((time - a.time) / span)
    }
}
