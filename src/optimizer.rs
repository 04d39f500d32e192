use crate::model::{Gradients, Parameters};

/// Plain gradient descent
#[derive(Debug, Clone)]
pub struct Optimizer {
    pub learning_rate: f64,
}

impl Optimizer {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    /// `param -= learning_rate * gradient` for all four parameter matrices.
    pub fn step(&self, params: &mut Parameters, grads: &Gradients) {
        let lr = -self.learning_rate;
        params.hidden.weights.scaled_add(lr, &grads.w_hidden);
        params.hidden.bias.scaled_add(lr, &grads.b_hidden);
        params.output.weights.scaled_add(lr, &grads.w_out);
        params.output.bias.scaled_add(lr, &grads.b_out);
    }
}
