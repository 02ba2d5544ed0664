//! Non-coherent filler noise for placeholder textures.
//!
//! Each generator reseeds its own RNG on every call, so output depends only
//! on the seed and the requested size.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::SampleGrid;

/// Independent uniform samples in [0, 1)
#[derive(Debug, Clone, Copy)]
pub struct UniformFiller {
    pub seed: u64,
}

impl UniformFiller {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn generate(&self, size: (usize, usize)) -> SampleGrid {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        SampleGrid::from_fn(size.0, size.1, |_, _| rng.gen::<f32>())
    }
}

/// Normally distributed samples (Marsaglia polar method)
#[derive(Debug, Clone, Copy)]
pub struct GaussianFiller {
    pub seed: u64,
    pub mean: f64,
    pub std_dev: f64,
}

impl GaussianFiller {
    pub fn new(seed: u64, mean: f64, std_dev: f64) -> Self {
        Self {
            seed,
            mean,
            std_dev,
        }
    }

    pub fn generate(&self, size: (usize, usize)) -> SampleGrid {
        let mut sampler = PolarSampler::new(ChaCha8Rng::seed_from_u64(self.seed));
        SampleGrid::from_fn(size.0, size.1, |_, _| {
            (self.mean + self.std_dev * sampler.next_standard()) as f32
        })
    }
}

/// Yields standard normal deviates two at a time, caching the spare
struct PolarSampler<R> {
    rng: R,
    spare: Option<f64>,
}

impl<R: Rng> PolarSampler<R> {
    fn new(rng: R) -> Self {
        Self { rng, spare: None }
    }

    fn next_standard(&mut self) -> f64 {
        if let Some(spare) = self.spare.take() {
            return spare;
        }
        loop {
            let u = self.rng.gen::<f64>() * 2.0 - 1.0;
            let v = self.rng.gen::<f64>() * 2.0 - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let factor = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * factor);
                return u * factor;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_range_and_reproducibility() {
        let filler = UniformFiller::new(3);
        let a = filler.generate((32, 32));
        let b = filler.generate((32, 32));
        assert!(a.bitwise_eq(&b));
        assert!(a.min() >= 0.0 && a.max() < 1.0);
        assert!(!a.bitwise_eq(&UniformFiller::new(4).generate((32, 32))));
    }

    #[test]
    fn test_gaussian_moments() {
        let filler = GaussianFiller::new(11, 2.0, 0.5);
        let grid = filler.generate((100, 100));
        let n = grid.len() as f64;
        let mean = grid.values().iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = grid
            .values()
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        assert!((mean - 2.0).abs() < 0.05, "mean {}", mean);
        assert!((var.sqrt() - 0.5).abs() < 0.05, "std dev {}", var.sqrt());
    }

    #[test]
    fn test_gaussian_reproducible() {
        let filler = GaussianFiller::new(99, 0.0, 1.0);
        assert!(filler.generate((8, 8)).bitwise_eq(&filler.generate((8, 8))));
    }
}
