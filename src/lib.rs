mod activation;
mod error;
mod hyperparameters;
mod layer;
mod loss;
mod model;
mod optimizer;
mod utils;
pub mod data;

pub use activation::{relu, relu_derivative, sigmoid, sigmoid_derivative, ActivationType};
pub use data::{Dataset, Vocabulary};
pub use error::{Error, Result};
pub use hyperparameters::NetworkConfig;
pub use layer::Layer;
pub use loss::Loss;
pub use model::{ForwardPass, Gradients, Network, Parameters, TrainReport};
pub use optimizer::Optimizer;
pub use utils::{argmax_rows, broadcast_add, softmax, softmax_rows, sum_along_axis, Matrix, Normalization};
