/// Logistic sigmoid `eˣ / (1 + eˣ)`.
///
/// Evaluated in the equivalent form `1 / (1 + e⁻ˣ)` for non-negative `x` so
/// that large inputs do not overflow `eˣ` into `inf / inf`.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let ex = x.exp();
        ex / (1.0 + ex)
    }
}

/// Derivative of the sigmoid expressed through its output `fx = sigmoid(x)`.
///
/// The backward pass already holds the activated values, so no second
/// evaluation of `exp` is needed.
pub fn sigmoid_slope(fx: f64) -> f64 {
    fx * (1.0 - fx)
}
