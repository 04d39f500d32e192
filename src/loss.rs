use ndarray::Array2;

#[derive(Debug, Clone, Copy, Default)]
pub enum Loss {
    #[default]
    CrossEntropy,
}

impl Loss {
    /// Mean loss over the rows of `prediction` against one-hot `target` rows.
    pub fn calculate(&self, prediction: &Array2<f64>, target: &Array2<f64>) -> f64 {
        match self {
            Loss::CrossEntropy => {
                // Cross entropy loss: -Σ(target * log(prediction)) / N
                // Also add small epsilon to avoid log(0)
                let epsilon = 1e-15;
                let samples = prediction.nrows().max(1) as f64;
                let safe_pred = prediction.mapv(|x| x.max(epsilon).min(1.0 - epsilon));
                -(target * &safe_pred.mapv(f64::ln)).sum() / samples
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    #[test]
    fn test_cross_entropy() {
        let target = arr2(&[[1.0, 0.0], [0.0, 1.0]]);

        let perfect = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        assert_abs_diff_eq!(Loss::CrossEntropy.calculate(&perfect, &target), 0.0, epsilon = 1e-9);

        let even = arr2(&[[0.5, 0.5], [0.5, 0.5]]);
        assert_abs_diff_eq!(
            Loss::CrossEntropy.calculate(&even, &target),
            std::f64::consts::LN_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_cross_entropy_zero_prediction_is_finite() {
        let target = arr2(&[[1.0, 0.0]]);
        let wrong = arr2(&[[0.0, 1.0]]);
        let loss = Loss::CrossEntropy.calculate(&wrong, &target);
        assert!(loss.is_finite());
        assert!(loss > 30.0);
    }
}
