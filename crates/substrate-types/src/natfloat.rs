//! Natural distributions for sampled quantities.
//!
//! A [`NatFloat`] describes a value centred on `avg` that deviates by at
//! most `var` in either direction. The [`DistributionShape`] controls how
//! samples cluster inside that band:
//!
//! | Shape             | Draws | Clustering                     |
//! |-------------------|-------|--------------------------------|
//! | `uniform`         | 1     | flat across `[min, max]`       |
//! | `triangle`        | 2     | linear peak at `avg`           |
//! | `gaussian`        | 3     | bell around `avg`              |
//! | `narrowgaussian`  | 6     | tight bell around `avg`        |
//! | `inversegaussian` | 3     | pushed towards `min` and `max` |
//!
//! Sampling is driven by a caller-supplied source of uniform `[0, 1)`
//! draws so the same shape logic works with seeded generators and fixed
//! test sequences.

use serde::{Deserialize, Serialize};

/// How samples are distributed between `avg - var` and `avg + var`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionShape {
    /// Every value in the band is equally likely.
    #[default]
    Uniform,
    /// Mean of two draws.
    Triangle,
    /// Mean of three draws.
    Gaussian,
    /// Mean of six draws.
    NarrowGaussian,
    /// Gaussian folded outwards towards the band edges.
    InverseGaussian,
}

impl DistributionShape {
    /// Draw a value in `[-1, 1]` with this shape.
    fn unit_sample(self, uniform: &mut impl FnMut() -> f64) -> f64 {
        match self {
            Self::Uniform => centered(uniform()),
            Self::Triangle => centered(mean_of(uniform, 2)),
            Self::Gaussian => centered(mean_of(uniform, 3)),
            Self::NarrowGaussian => centered(mean_of(uniform, 6)),
            Self::InverseGaussian => {
                let v = centered(mean_of(uniform, 3));
                if v > 0.0 { 1.0 - v } else { -1.0 - v }
            }
        }
    }
}

/// Map a `[0, 1)` value onto `[-1, 1)`.
fn centered(draw: f64) -> f64 {
    draw.mul_add(2.0, -1.0)
}

/// Mean of `count` uniform draws.
fn mean_of(uniform: &mut impl FnMut() -> f64, count: u8) -> f64 {
    let mut total = 0.0;
    for _ in 0..count {
        total += uniform();
    }
    total / f64::from(count)
}

/// A value `avg ± var` with a configurable distribution shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NatFloat {
    /// Centre of the distribution.
    #[serde(default)]
    pub avg: f32,
    /// Maximum deviation from `avg` in either direction.
    #[serde(default)]
    pub var: f32,
    /// Shape of the distribution inside the band.
    #[serde(default)]
    pub dist: DistributionShape,
}

impl Default for NatFloat {
    fn default() -> Self {
        Self::constant(0.0)
    }
}

impl NatFloat {
    /// A distribution that always yields `value`.
    pub const fn constant(value: f32) -> Self {
        Self {
            avg: value,
            var: 0.0,
            dist: DistributionShape::Uniform,
        }
    }

    /// Create a distribution from its parts.
    pub const fn new(avg: f32, var: f32, dist: DistributionShape) -> Self {
        Self { avg, var, dist }
    }

    /// Smallest value this distribution can produce.
    pub fn min(&self) -> f32 {
        self.avg - self.var.abs()
    }

    /// Largest value this distribution can produce.
    pub fn max(&self) -> f32 {
        self.avg + self.var.abs()
    }

    /// Draw a sample using `uniform` as the source of `[0, 1)` values.
    ///
    /// A zero `var` returns `avg` without consuming any draws.
    pub fn sample(&self, mut uniform: impl FnMut() -> f64) -> f32 {
        if self.var.abs() <= f32::EPSILON {
            return self.avg;
        }
        let unit = self.dist.unit_sample(&mut uniform);
        let value = f64::from(self.var).mul_add(unit, f64::from(self.avg));
        // The result lies inside [avg - var, avg + var], both of which are f32.
        #[allow(clippy::cast_possible_truncation)]
        let value = value as f32;
        value.max(self.min()).min(self.max())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn fixed(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut i = 0_usize;
        move || {
            let v = values.get(i % values.len()).copied().unwrap_or(0.0);
            i = i.wrapping_add(1);
            v
        }
    }

    #[test]
    fn constant_ignores_draws() {
        let nat = NatFloat::constant(2.0);
        let mut calls = 0_u32;
        let v = nat.sample(|| {
            calls = calls.saturating_add(1);
            0.9
        });
        assert_eq!(v, 2.0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn uniform_maps_edges() {
        let nat = NatFloat::new(10.0, 4.0, DistributionShape::Uniform);
        assert_eq!(nat.sample(fixed(&[0.0])), 6.0);
        assert_eq!(nat.sample(fixed(&[0.5])), 10.0);
        assert_eq!(nat.sample(fixed(&[0.75])), 12.0);
    }

    #[test]
    fn triangle_averages_two_draws() {
        let nat = NatFloat::new(10.0, 4.0, DistributionShape::Triangle);
        // mean(0.0, 1.0) = 0.5 -> centre
        assert_eq!(nat.sample(fixed(&[0.0, 1.0])), 10.0);
    }

    #[test]
    fn inverse_gaussian_pushes_outwards() {
        let nat = NatFloat::new(0.0, 1.0, DistributionShape::InverseGaussian);
        // A centred gaussian draw folds to an edge.
        let v = nat.sample(fixed(&[0.5]));
        assert!((v.abs() - 1.0).abs() < 1e-6, "expected an edge, got {v}");
    }

    #[test]
    fn samples_stay_in_band() {
        let shapes = [
            DistributionShape::Uniform,
            DistributionShape::Triangle,
            DistributionShape::Gaussian,
            DistributionShape::NarrowGaussian,
            DistributionShape::InverseGaussian,
        ];
        let draws = [0.0, 0.13, 0.42, 0.5, 0.77, 0.999];
        for shape in shapes {
            let nat = NatFloat::new(5.0, 3.0, shape);
            let mut source = fixed(&draws);
            for _ in 0..50 {
                let v = nat.sample(&mut source);
                assert!(v >= nat.min() && v <= nat.max(), "{shape:?} gave {v}");
            }
        }
    }

    #[test]
    fn min_max_use_absolute_var() {
        let nat = NatFloat::new(1.0, -0.5, DistributionShape::Uniform);
        assert_eq!(nat.min(), 0.5);
        assert_eq!(nat.max(), 1.5);
    }
}
