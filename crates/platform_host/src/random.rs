//! Uniform random source used for icon placement.

use std::cell::Cell;

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

/// Host random source: `Math.random` in the browser, a time-seeded xorshift elsewhere.
#[derive(Debug)]
pub struct HostRandom {
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    state: Cell<u64>,
}

impl Default for HostRandom {
    fn default() -> Self {
        Self {
            state: Cell::new(crate::time::unix_time_ms_now() | 1),
        }
    }
}

impl RandomSource for HostRandom {
    fn next_unit(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Math::random()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut x = self.state.get();
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.state.set(x);
            (x >> 11) as f64 / (1u64 << 53) as f64
        }
    }
}

/// Deterministic source that cycles through a fixed list of values.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: Cell<usize>,
}

impl SequenceRandom {
    /// Creates a source cycling through `values`, each clamped into `[0, 1)`.
    ///
    /// An empty list behaves like a constant `0.0`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: Cell::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let index = self.cursor.get() % self.values.len();
        self.cursor.set(index + 1);
        self.values[index].clamp(0.0, 0.999_999)
    }
}
