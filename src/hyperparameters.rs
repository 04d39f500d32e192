use crate::activation::ActivationType;
use crate::error::{Error, Result};
use crate::utils::Normalization;

/// Shape and training hyperparameters of a single-hidden-layer network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Features per sample
    pub input_neurons: usize,

    /// Number of classes
    pub output_neurons: usize,

    pub hidden_neurons: usize,

    /// Full passes over the dataset; there is no early stopping
    pub num_epochs: usize,

    /// Step size for gradient descent
    pub learning_rate: f64,

    pub hidden_activation: ActivationType,

    /// How the output layer turns scores into probabilities
    pub normalization: Normalization,

    /// Emit an info-level progress line every `log_interval` epochs; 0 disables it
    pub log_interval: usize,
}

/// Defaults: 4-3-3 network, 5000 epochs, learning rate 0.3,
/// whole-matrix softmax.
///
/// On unscaled iris features these settings do not learn. Uniform[0, 1) init
/// makes every weight positive, and the first steps at rate 0.3 push every
/// hidden pre-activation below zero. Once the ReLU units are dead the output is
/// constant, so the network settles on uniform probabilities and chance accuracy
/// (loss `ln(N * classes)` with `Global`, `ln(classes)` with `PerRow`). Use a
/// rate around 0.01 or standardize the features to get a working classifier.
impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            input_neurons: 4,
            output_neurons: 3,
            hidden_neurons: 3,
            num_epochs: 5000,
            learning_rate: 0.3,
            hidden_activation: ActivationType::ReLU,
            normalization: Normalization::Global,
            log_interval: 500,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("input_neurons", self.input_neurons),
            ("output_neurons", self.output_neurons),
            ("hidden_neurons", self.hidden_neurons),
            ("num_epochs", self.num_epochs),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be > 0", name)));
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NetworkConfig::default();

        assert_eq!(config.input_neurons, 4);
        assert_eq!(config.output_neurons, 3);
        assert_eq!(config.hidden_neurons, 3);
        assert_eq!(config.num_epochs, 5000);
        assert_eq!(config.learning_rate, 0.3);
        assert_eq!(config.hidden_activation, ActivationType::ReLU);
        assert_eq!(config.normalization, Normalization::Global);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_counts_rejected() {
        let config = NetworkConfig { hidden_neurons: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = NetworkConfig { num_epochs: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_learning_rate_rejected() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = NetworkConfig { learning_rate: lr, ..Default::default() };
            assert!(config.validate().is_err(), "accepted learning rate {}", lr);
        }
    }
}
