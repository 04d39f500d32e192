use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use ndarray::Axis;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::hyperparameters::NetworkConfig;
use crate::layer::Layer;
use crate::loss::Loss;
use crate::optimizer::Optimizer;
use crate::utils::{argmax_rows, sum_along_axis, Matrix, Normalization};

/// Trained weights of the hidden and output layers
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub hidden: Layer,
    pub output: Layer,
}

impl Parameters {
    /// Draws all four matrices from Uniform[0, 1), hidden layer first.
    pub fn random<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Self> {
        let hidden = Layer::random(config.input_neurons, config.hidden_neurons, rng)?;
        let output = Layer::random(config.hidden_neurons, config.output_neurons, rng)?;
        Ok(Parameters { hidden, output })
    }

    pub fn w_hidden(&self) -> &Matrix {
        &self.hidden.weights
    }

    pub fn b_hidden(&self) -> &Matrix {
        &self.hidden.bias
    }

    pub fn w_out(&self) -> &Matrix {
        &self.output.weights
    }

    pub fn b_out(&self) -> &Matrix {
        &self.output.bias
    }

    pub fn parameter_count(&self) -> usize {
        self.hidden.parameter_count() + self.output.parameter_count()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "w_hidden =\n{:.6}\n", self.w_hidden())?;
        writeln!(f, "b_hidden =\n{:.6}\n", self.b_hidden())?;
        writeln!(f, "w_out =\n{:.6}\n", self.w_out())?;
        write!(f, "b_out =\n{:.6}", self.b_out())
    }
}

/// Gradient of the loss for each parameter matrix, same shapes as [`Parameters`]
#[derive(Debug, Clone)]
pub struct Gradients {
    pub w_hidden: Matrix,
    pub b_hidden: Matrix,
    pub w_out: Matrix,
    pub b_out: Matrix,
}

/// Intermediate matrices of one forward pass over a batch
#[derive(Debug, Clone)]
pub struct ForwardPass {
    pub hidden_input: Matrix,
    pub hidden_activation: Matrix,
    pub output_input: Matrix,
    pub output: Matrix,
}

#[derive(Debug, Clone)]
pub struct TrainReport {
    pub epochs_run: usize,
    /// Loss per completed epoch, measured before that epoch's update
    pub losses: Vec<f64>,
    pub final_loss: Option<f64>,
    pub cancelled: bool,
}

/// Single-hidden-layer classifier.
///
/// Parameters stay `None` until [`Network::train`] runs, so inference can never
/// pick up uninitialized weights.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    params: Option<Parameters>,
    loss: Loss,
}

impl Network {
    pub fn new(config: NetworkConfig) -> Self {
        Network {
            config,
            params: None,
            loss: Loss::CrossEntropy,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.params.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.params.is_some()
    }

    pub fn forward(&self, params: &Parameters, x: &Matrix) -> Result<ForwardPass> {
        let hidden_input = params.hidden.affine(x)?;
        let hidden_activation = self.config.hidden_activation.apply_matrix(&hidden_input);
        let output_input = params.output.affine(&hidden_activation)?;
        let output = self.config.normalization.apply(&output_input)?;

        Ok(ForwardPass {
            hidden_input,
            hidden_activation,
            output_input,
            output,
        })
    }

    /// Backpropagates cross-entropy loss through the cached forward pass.
    ///
    /// With per-row softmax the output error is `output - y`. With whole-matrix
    /// softmax every probability shares one denominator, and the error of the
    /// same loss becomes `sum(y) * output - y` (`N * output - y` for one-hot rows).
    pub fn backward(
        &self,
        params: &Parameters,
        x: &Matrix,
        y: &Matrix,
        pass: &ForwardPass,
    ) -> Result<Gradients> {
        let n = x.nrows() as f64;

        let output_error = match self.config.normalization {
            Normalization::PerRow => &pass.output - y,
            Normalization::Global => &pass.output * y.sum() - y,
        };
        let w_out = pass.hidden_activation.t().dot(&output_error) / n;
        let b_out = sum_along_axis(Axis(0), &output_error)? / n;

        let hidden_error = output_error.dot(&params.output.weights.t())
            * self.config.hidden_activation.derivative_matrix(&pass.hidden_input);
        let w_hidden = x.t().dot(&hidden_error) / n;
        let b_hidden = sum_along_axis(Axis(0), &hidden_error)? / n;

        Ok(Gradients {
            w_hidden,
            b_hidden,
            w_out,
            b_out,
        })
    }

    /// Trains for exactly `num_epochs` full-batch epochs.
    ///
    /// # Arguments
    ///
    /// * `x` - Features, one sample per row
    /// * `y` - One-hot labels, one sample per row
    /// * `rng` - Source for parameter initialization
    pub fn train<R: Rng + ?Sized>(&mut self, x: &Matrix, y: &Matrix, rng: &mut R) -> Result<TrainReport> {
        let never = AtomicBool::new(false);
        self.train_until(x, y, rng, &never)
    }

    /// Like [`Network::train`], but stops before the next epoch once `stop` is set.
    /// Parameters reached so far are kept.
    pub fn train_until<R: Rng + ?Sized>(
        &mut self,
        x: &Matrix,
        y: &Matrix,
        rng: &mut R,
        stop: &AtomicBool,
    ) -> Result<TrainReport> {
        self.config.validate()?;
        self.check_shapes(x, y)?;

        info!(
            samples = x.nrows(),
            hidden = self.config.hidden_neurons,
            epochs = self.config.num_epochs,
            learning_rate = self.config.learning_rate,
            "starting training"
        );

        let mut params = Parameters::random(&self.config, rng)?;
        let optimizer = Optimizer::new(self.config.learning_rate);
        let mut losses = Vec::with_capacity(self.config.num_epochs);
        let mut cancelled = false;

        for epoch in 0..self.config.num_epochs {
            if stop.load(Ordering::Relaxed) {
                warn!(epoch, "training cancelled");
                cancelled = true;
                break;
            }

            let pass = self.forward(&params, x)?;
            let loss = self.loss.calculate(&pass.output, y);
            let grads = self.backward(&params, x, y, &pass)?;
            optimizer.step(&mut params, &grads);
            losses.push(loss);

            debug!(epoch, loss, "epoch complete");
            let interval = self.config.log_interval;
            if interval > 0 && (epoch + 1) % interval == 0 {
                info!(epoch = epoch + 1, loss, "training progress");
            }
        }

        let final_loss = losses.last().copied();
        info!(epochs_run = losses.len(), ?final_loss, "training finished");
        self.params = Some(params);

        Ok(TrainReport {
            epochs_run: losses.len(),
            losses,
            final_loss,
            cancelled,
        })
    }

    /// Class probabilities for `x` using the trained parameters.
    pub fn predict(&self, x: &Matrix) -> Result<Matrix> {
        let params = self.params.as_ref().ok_or(Error::NotTrained)?;
        Ok(self.forward(params, x)?.output)
    }

    /// Fraction of rows whose most probable class matches the one-hot label.
    pub fn accuracy(&self, x: &Matrix, y: &Matrix) -> Result<f64> {
        self.check_shapes(x, y)?;
        let predicted = argmax_rows(&self.predict(x)?);
        let expected = argmax_rows(y);
        let correct = predicted.iter().zip(&expected).filter(|(p, e)| p == e).count();
        Ok(correct as f64 / x.nrows() as f64)
    }

    fn check_shapes(&self, x: &Matrix, y: &Matrix) -> Result<()> {
        if x.nrows() != y.nrows() {
            return Err(Error::ShapeMismatch(format!(
                "{} input rows but {} label rows",
                x.nrows(),
                y.nrows()
            )));
        }
        if x.nrows() == 0 {
            return Err(Error::ShapeMismatch("no samples".to_string()));
        }
        if x.ncols() != self.config.input_neurons {
            return Err(Error::ShapeMismatch(format!(
                "expected {} input columns, got {}",
                self.config.input_neurons,
                x.ncols()
            )));
        }
        if y.ncols() != self.config.output_neurons {
            return Err(Error::ShapeMismatch(format!(
                "expected {} label columns, got {}",
                self.config.output_neurons,
                y.ncols()
            )));
        }
        Ok(())
    }
}
