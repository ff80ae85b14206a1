use crate::error::GeneratorError;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

/// A seeded stream of noise, drawn one whole column at a time.
///
/// Each generation owns its stream, so concurrent callers never share state.
/// The order in which columns are requested is part of the output contract:
/// reordering draws changes every value after the first moved column.
pub struct NoiseStream {
    rng: StdRng,
}

impl NoiseStream {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `len` draws from a zero-mean normal distribution.
    pub fn gaussian(&mut self, std_dev: f64, len: usize) -> Result<Vec<f64>, GeneratorError> {
        let dist = Normal::new(0.0, std_dev).map_err(|e| {
            GeneratorError::InvalidProfile(format!("noise std dev {}: {}", std_dev, e))
        })?;
        Ok((0..len).map(|_| self.rng.sample(dist)).collect())
    }

    /// `len` integers drawn uniformly from `[low, high)`.
    pub fn uniform_int(
        &mut self,
        low: i64,
        high: i64,
        len: usize,
    ) -> Result<Vec<i64>, GeneratorError> {
        if low >= high {
            return Err(GeneratorError::InvalidProfile(format!(
                "empty integer range [{}, {})",
                low, high
            )));
        }
        Ok((0..len).map(|_| self.rng.gen_range(low..high)).collect())
    }
}
