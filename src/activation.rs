use ndarray::Array2;

/// ReLU: 0 for x <= 0, x otherwise.
pub fn relu(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        x
    }
}

/// Derivative of ReLU with respect to the pre-activation `x`.
pub fn relu_derivative(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        1.0
    }
}

/// Logistic sigmoid. Saturates to 0 or 1 for extreme inputs instead of overflowing.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed through its OUTPUT.
///
/// `s` must already be `sigmoid(x)`; passing the raw input gives a wrong slope.
/// This differs from [`relu_derivative`], which takes the pre-activation.
pub fn sigmoid_derivative(s: f64) -> f64 {
    s * (1.0 - s)
}

/// Hidden layer activation function
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActivationType {
    #[default]
    ReLU,
    Sigmoid,
}

impl ActivationType {
    /// Applies the activation function to a given input
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            ActivationType::ReLU => relu(x),
            ActivationType::Sigmoid => sigmoid(x),
        }
    }

    /// Derivative with respect to the pre-activation `x`, for both variants.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationType::ReLU => relu_derivative(x),
            ActivationType::Sigmoid => sigmoid_derivative(sigmoid(x)),
        }
    }

    pub fn apply_matrix(&self, x: &Array2<f64>) -> Array2<f64> {
        x.mapv(|v| self.apply(v))
    }

    pub fn derivative_matrix(&self, x: &Array2<f64>) -> Array2<f64> {
        x.mapv(|v| self.derivative(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    #[test]
    fn test_relu() {
        assert_eq!(relu(-4.56), 0.0);
        assert_eq!(relu(0.0), 0.0);
        assert_eq!(relu(2.5), 2.5);
        assert_eq!(relu_derivative(-1.0), 0.0);
        assert_eq!(relu_derivative(0.0), 0.0);
        assert_eq!(relu_derivative(0.001), 1.0);
    }

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);

        let mut prev = sigmoid(-20.0);
        for i in -19..=20 {
            let s = sigmoid(i as f64);
            assert!(s > prev);
            assert!(s > 0.0 && s < 1.0);
            prev = s;
        }

        assert!(sigmoid(-1000.0).is_finite());
        assert!(sigmoid(1000.0).is_finite());
    }

    #[test]
    fn test_sigmoid_derivative_takes_output() {
        assert_abs_diff_eq!(sigmoid_derivative(sigmoid(0.0)), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(sigmoid_derivative(0.9), 0.09, epsilon = 1e-12);
        assert_abs_diff_eq!(ActivationType::Sigmoid.derivative(0.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_helpers() {
        let m = arr2(&[[-1.0, 2.0], [0.0, 3.0]]);
        assert_eq!(ActivationType::ReLU.apply_matrix(&m), arr2(&[[0.0, 2.0], [0.0, 3.0]]));
        assert_eq!(ActivationType::ReLU.derivative_matrix(&m), arr2(&[[0.0, 1.0], [0.0, 1.0]]));
    }
}
