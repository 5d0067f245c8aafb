//! Octave-composed elevation built on [`NoiseField`]

use serde::{Deserialize, Serialize};

use super::noise_field::NoiseField;

/// Anything that maps ground coordinates to an elevation.
///
/// Meshing, normal estimation and shadow marching are written against this
/// trait so they can run over synthetic fields as well as noise terrain.
pub trait HeightField: Sync {
    fn height(&self, x: f64, z: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64 + Sync> HeightField for F {
    fn height(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}

/// Parameters of the octave sum. Defaults define the reference terrain and
/// should not be changed casually.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightParams {
    /// Octave `i` samples at frequency `base_frequency^i`
    pub base_frequency: f64,
    /// Octaves `1..=octaves` are summed
    pub octaves: u32,
    /// Octave indices left out of the sum (band-pass)
    pub skipped_octaves: Vec<u32>,
    /// Accumulator start value
    pub initial_value: f64,
    pub divisor: f64,
    pub offset: f64,
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            base_frequency: 1.65,
            octaves: 12,
            skipped_octaves: vec![3, 5, 7],
            initial_value: -15.0,
            divisor: 3.0,
            offset: -6.0,
        }
    }
}

/// Fractal terrain height: a band-passed sum of noise octaves.
#[derive(Clone, Debug)]
pub struct HeightFunction {
    noise: NoiseField,
    params: HeightParams,
    /// Frequencies of the octaves that survive the skip-set, low to high
    frequencies: Vec<f64>,
}

impl HeightFunction {
    pub fn new(seed: u32, params: HeightParams) -> Self {
        let frequencies = (1..=params.octaves)
            .filter(|i| !params.skipped_octaves.contains(i))
            .map(|i| params.base_frequency.powi(i as i32))
            .collect();

        Self {
            noise: NoiseField::new(seed),
            params,
            frequencies,
        }
    }

    pub fn params(&self) -> &HeightParams {
        &self.params
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Number of octaves actually summed
    pub fn active_octaves(&self) -> usize {
        self.frequencies.len()
    }
}

impl HeightField for HeightFunction {
    fn height(&self, x: f64, z: f64) -> f64 {
        let sum = self.frequencies.iter().fold(self.params.initial_value, |acc, &freq| {
            acc + freq * self.noise.sample(x / freq, 0.0, z / freq)
        });
        sum / self.params.divisor + self.params.offset
    }
}
