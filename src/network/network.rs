use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::activation::{sigmoid, sigmoid_slope};
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;

/// Input → hidden → output sigmoid network trained one record at a time.
///
/// Every buffer is sized once in the constructor. `forward` and `backward`
/// overwrite the scratch vectors in place and never reallocate them.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,

    input_vector: Vec<f64>,

    hidden_in: Vec<f64>,    // Σ wih[h][i] * input[i]
    hidden_out: Vec<f64>,   // sigmoid(hidden_in)
    hidden_error: Vec<f64>, // Σ who[o][h] * output_error[o]

    output_in: Vec<f64>,
    output_out: Vec<f64>,
    output_error: Vec<f64>,
    output_target: Vec<f64>,

    weights_input_hidden: Matrix,  // hidden_nodes × input_nodes
    weights_hidden_output: Matrix, // output_nodes × hidden_nodes
}

impl Network {
    /// Builds a network whose weights are seeded from the wall clock.
    pub fn new(config: NetworkConfig) -> Network {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Network::with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a network drawing its initial weights from `rng`.
    ///
    /// Input→hidden weights are drawn first, row by row, then hidden→output.
    pub fn with_rng<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Network {
        let weights_input_hidden = Matrix::uniform(config.hidden_nodes, config.input_nodes, rng);
        let weights_hidden_output = Matrix::uniform(config.output_nodes, config.hidden_nodes, rng);
        Network::from_weights(config, weights_input_hidden, weights_hidden_output)
    }

    /// Builds a network around fixed weight matrices.
    ///
    /// # Panics
    /// Panics if the matrix shapes do not match `config`.
    pub fn from_weights(config: NetworkConfig, weights_input_hidden: Matrix, weights_hidden_output: Matrix) -> Network {
        let (i, h, o) = (config.input_nodes, config.hidden_nodes, config.output_nodes);
        assert_eq!(
            weights_input_hidden.shape(),
            (h, i),
            "input→hidden weights must be hidden_nodes × input_nodes"
        );
        assert_eq!(
            weights_hidden_output.shape(),
            (o, h),
            "hidden→output weights must be output_nodes × hidden_nodes"
        );

        Network {
            config,
            input_vector: vec![0.0; i],
            hidden_in: vec![0.0; h],
            hidden_out: vec![0.0; h],
            hidden_error: vec![0.0; h],
            output_in: vec![0.0; o],
            output_out: vec![0.0; o],
            output_error: vec![0.0; o],
            output_target: vec![0.0; o],
            weights_input_hidden,
            weights_hidden_output,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Buffer the next record's scaled features are written into.
    pub fn input_mut(&mut self) -> &mut [f64] {
        &mut self.input_vector
    }

    /// Buffer the next record's target encoding is written into.
    pub fn target_mut(&mut self) -> &mut [f64] {
        &mut self.output_target
    }

    pub fn input(&self) -> &[f64] {
        &self.input_vector
    }

    pub fn hidden_in(&self) -> &[f64] {
        &self.hidden_in
    }

    pub fn hidden_out(&self) -> &[f64] {
        &self.hidden_out
    }

    pub fn hidden_error(&self) -> &[f64] {
        &self.hidden_error
    }

    pub fn output_in(&self) -> &[f64] {
        &self.output_in
    }

    pub fn output(&self) -> &[f64] {
        &self.output_out
    }

    pub fn output_error(&self) -> &[f64] {
        &self.output_error
    }

    pub fn target(&self) -> &[f64] {
        &self.output_target
    }

    pub fn weights_input_hidden(&self) -> &Matrix {
        &self.weights_input_hidden
    }

    pub fn weights_hidden_output(&self) -> &Matrix {
        &self.weights_hidden_output
    }

    /// Propagates the current input vector through both layers and returns
    /// the output activations.
    pub fn forward(&mut self) -> &[f64] {
        self.weights_input_hidden
            .mul_vec_into(&self.input_vector, &mut self.hidden_in);
        for (out, &sum) in self.hidden_out.iter_mut().zip(self.hidden_in.iter()) {
            *out = sigmoid(sum);
        }

        self.weights_hidden_output
            .mul_vec_into(&self.hidden_out, &mut self.output_in);
        for (out, &sum) in self.output_out.iter_mut().zip(self.output_in.iter()) {
            *out = sigmoid(sum);
        }

        &self.output_out
    }

    /// One online update from the activations of the last `forward` call and
    /// the current target vector. Returns the record's mean squared output error.
    ///
    /// The hidden error is taken through the hidden→output weights before
    /// they are updated, and both updates use the activations of the same
    /// forward pass.
    pub fn backward(&mut self) -> f64 {
        let lr = self.config.learning_rate;

        for ((err, &target), &out) in self
            .output_error
            .iter_mut()
            .zip(self.output_target.iter())
            .zip(self.output_out.iter())
        {
            *err = target - out;
        }

        self.weights_hidden_output
            .transpose_mul_vec_into(&self.output_error, &mut self.hidden_error);

        let output_delta: Vec<f64> = self
            .output_error
            .iter()
            .zip(self.output_out.iter())
            .map(|(&err, &out)| err * sigmoid_slope(out))
            .collect();
        self.weights_hidden_output
            .add_outer(lr, &output_delta, &self.hidden_out);

        let hidden_delta: Vec<f64> = self
            .hidden_error
            .iter()
            .zip(self.hidden_out.iter())
            .map(|(&err, &out)| err * sigmoid_slope(out))
            .collect();
        self.weights_input_hidden
            .add_outer(lr, &hidden_delta, &self.input_vector);

        self.squared_error()
    }

    /// Mean of `output_error²` from the last `backward` call.
    pub fn squared_error(&self) -> f64 {
        if self.output_error.is_empty() {
            return 0.0;
        }
        self.output_error.iter().map(|e| e * e).sum::<f64>() / self.output_error.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: NetworkConfig) -> Network {
        Network::with_rng(config, &mut StdRng::seed_from_u64(42))
    }

    #[test]
    fn buffers_match_config() {
        let net = seeded(NetworkConfig::new(5, 4, 3, 1, 0.1));
        assert_eq!(net.input().len(), 5);
        assert_eq!(net.hidden_in().len(), 4);
        assert_eq!(net.hidden_error().len(), 4);
        assert_eq!(net.output().len(), 3);
        assert_eq!(net.target().len(), 3);
        assert_eq!(net.weights_input_hidden().shape(), (4, 5));
        assert_eq!(net.weights_hidden_output().shape(), (3, 4));
        assert!(net
            .weights_input_hidden()
            .data
            .iter()
            .chain(net.weights_hidden_output().data.iter())
            .flatten()
            .all(|&w| (-0.5..0.5).contains(&w)));
    }

    #[test]
    fn same_seed_same_weights() {
        let a = seeded(NetworkConfig::new(3, 3, 2, 1, 0.1));
        let b = seeded(NetworkConfig::new(3, 3, 2, 1, 0.1));
        assert_eq!(a.weights_input_hidden(), b.weights_input_hidden());
        assert_eq!(a.weights_hidden_output(), b.weights_hidden_output());
    }

    #[test]
    fn forward_is_deterministic() {
        let mut net = seeded(NetworkConfig::new(4, 6, 3, 1, 0.1));
        net.input_mut().copy_from_slice(&[0.01, 0.5, 0.99, 0.2]);
        let first = net.forward().to_vec();
        let hidden = net.hidden_out().to_vec();
        for _ in 0..3 {
            assert_eq!(net.forward(), first.as_slice());
            assert_eq!(net.hidden_out(), hidden.as_slice());
        }
        assert!(first.iter().all(|&y| y > 0.0 && y < 1.0));
    }

    #[test]
    fn forward_matches_hand_computation() {
        let config = NetworkConfig::new(2, 1, 1, 1, 0.5);
        let wih = Matrix::from_data(vec![vec![1.0, -1.0]]);
        let who = Matrix::from_data(vec![vec![2.0]]);
        let mut net = Network::from_weights(config, wih, who);
        net.input_mut().copy_from_slice(&[0.75, 0.25]);
        net.forward();
        assert_eq!(net.hidden_in(), &[0.5]);
        assert_eq!(net.hidden_out(), &[sigmoid(0.5)]);
        assert_eq!(net.output_in(), &[2.0 * sigmoid(0.5)]);
        assert_eq!(net.output(), &[sigmoid(2.0 * sigmoid(0.5))]);
    }

    #[test]
    fn backward_uses_pre_update_output_weights() {
        let config = NetworkConfig::new(1, 1, 1, 1, 1.0);
        let mut net = Network::from_weights(
            config,
            Matrix::from_data(vec![vec![0.3]]),
            Matrix::from_data(vec![vec![-0.4]]),
        );
        net.input_mut()[0] = 1.0;
        net.forward();
        net.target_mut()[0] = 0.99;

        let h = net.hidden_out()[0];
        let y = net.output()[0];
        let err = 0.99 - y;
        let expected_hidden_error = -0.4 * err;
        let expected_who = -0.4 + err * y * (1.0 - y) * h;
        let expected_wih = 0.3 + expected_hidden_error * h * (1.0 - h) * 1.0;

        let mse = net.backward();
        assert!((net.output_error()[0] - err).abs() < 1e-15);
        assert!((net.hidden_error()[0] - expected_hidden_error).abs() < 1e-15);
        assert!((net.weights_hidden_output().data[0][0] - expected_who).abs() < 1e-15);
        assert!((net.weights_input_hidden().data[0][0] - expected_wih).abs() < 1e-15);
        assert!((mse - err * err).abs() < 1e-15);
    }

    #[test]
    fn training_moves_output_towards_target() {
        let mut net = seeded(NetworkConfig::new(3, 5, 2, 1, 0.3));
        net.input_mut().copy_from_slice(&[0.9, 0.1, 0.5]);
        net.target_mut().copy_from_slice(&[0.99, 0.01]);
        net.forward();
        let before = net.backward();
        for _ in 0..50 {
            net.forward();
            net.backward();
        }
        net.forward();
        let after = net.backward();
        assert!(after < before);
        assert_eq!(net.weights_input_hidden().shape(), (5, 3));
        assert_eq!(net.weights_hidden_output().shape(), (2, 5));
    }
}
