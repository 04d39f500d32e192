use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{Error, Result};
use crate::utils::broadcast_add;

/// A fully connected layer: `inputs × neurons` weights and a `1 × neurons` bias row
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub inputs: usize,
    pub neurons: usize,
    pub weights: Array2<f64>,
    pub bias: Array2<f64>,
}

impl Layer {
    /// Constructs a layer whose weights and bias are independent draws from
    /// Uniform[0, 1) taken from `rng`.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Number of inputs to this layer
    /// * `neurons` - Number of neurons in this layer
    /// * `rng` - Random source; seed it for reproducible parameters
    pub fn random<R: Rng + ?Sized>(inputs: usize, neurons: usize, rng: &mut R) -> Result<Self> {
        let dist = Uniform::new(0.0_f64, 1.0).map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let weights = Array2::from_shape_fn((inputs, neurons), |_| dist.sample(&mut *rng));
        let bias = Array2::from_shape_fn((1, neurons), |_| dist.sample(&mut *rng));

        Ok(Layer {
            inputs,
            neurons,
            weights,
            bias,
        })
    }

    /// `input · W + b`, with the bias broadcast over every row of `input`.
    pub fn affine(&self, input: &Array2<f64>) -> Result<Array2<f64>> {
        if input.ncols() != self.inputs {
            return Err(Error::ShapeMismatch(format!(
                "layer expects {} inputs, got {} columns",
                self.inputs,
                input.ncols()
            )));
        }
        broadcast_add(&input.dot(&self.weights), &self.bias)
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.bias.len()
    }
}
