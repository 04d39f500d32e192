use irisnet::{Error, Layer};
use ndarray::arr2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_layer_initialization() {
    let mut rng = StdRng::seed_from_u64(1);
    let layer = Layer::random(
        4, // inputs
        3, // neurons
        &mut rng,
    )
    .unwrap();

    assert_eq!(layer.inputs, 4);
    assert_eq!(layer.neurons, 3);
    assert_eq!(layer.weights.dim(), (4, 3));
    assert_eq!(layer.bias.dim(), (1, 3));
}

#[test]
fn test_initial_values_are_unit_uniform() {
    let mut rng = StdRng::seed_from_u64(2);
    let layer = Layer::random(20, 10, &mut rng).unwrap();

    for &w in layer.weights.iter().chain(layer.bias.iter()) {
        assert!((0.0..1.0).contains(&w), "{} outside [0, 1)", w);
    }

    // independent draws, not a constant fill
    let first = layer.weights[[0, 0]];
    assert!(layer.weights.iter().any(|&w| w != first));
}

#[test]
fn test_seeded_initialization_is_reproducible() {
    let a = Layer::random(4, 3, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = Layer::random(4, 3, &mut StdRng::seed_from_u64(42)).unwrap();
    let c = Layer::random(4, 3, &mut StdRng::seed_from_u64(43)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_affine_broadcasts_bias() {
    let layer = Layer {
        inputs: 2,
        neurons: 3,
        weights: arr2(&[[1.0, 0.0, 2.0], [0.0, 1.0, -1.0]]),
        bias: arr2(&[[0.5, -0.5, 0.0]]),
    };
    let input = arr2(&[[1.0, 2.0], [3.0, 4.0]]);

    let output = layer.affine(&input).unwrap();

    assert_eq!(output, arr2(&[[1.5, 1.5, 0.0], [3.5, 3.5, 2.0]]));
}

#[test]
fn test_affine_invalid_input_size() {
    let mut rng = StdRng::seed_from_u64(3);
    let layer = Layer::random(3, 2, &mut rng).unwrap();

    let invalid_input = arr2(&[[1.0, 2.0]]);
    let err = layer.affine(&invalid_input).unwrap_err();

    assert!(matches!(err, Error::ShapeMismatch(_)));
}

#[test]
fn test_parameter_count() {
    let mut rng = StdRng::seed_from_u64(4);
    let layer = Layer::random(3, 4, &mut rng).unwrap();

    // Parameter count should be weights + biases
    assert_eq!(layer.parameter_count(), 3 * 4 + 4);
}
