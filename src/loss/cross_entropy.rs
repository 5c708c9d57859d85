/// Categorical cross-entropy for a Softmax output layer and one-hot targets.
pub struct CrossEntropyLoss;

/// Floor applied to the true-class probability before `ln`.
const EPS: f64 = 1e-15;

impl CrossEntropyLoss {
    /// `-ln(max(predicted[true], ε))`, summed over the target's hot entries.
    ///
    /// An all-zero target (label outside the output layer) contributes 0.
    pub fn loss(predicted: &[f64], target: &[f64]) -> f64 {
        predicted
            .iter()
            .zip(target)
            .filter(|(_, t)| **t > 0.5)
            .map(|(p, _)| -p.max(EPS).ln())
            .sum()
    }

    /// Gradient of softmax + cross-entropy with respect to the logits:
    /// `predicted - target`. This is the output layer's error vector.
    pub fn derivative(predicted: &[f64], target: &[f64]) -> Vec<f64> {
        predicted.iter().zip(target).map(|(p, t)| p - t).collect()
    }
}

/// One-hot target of length `size` for a zero-based class index.
/// An index outside `0..size` yields all zeros.
pub fn one_hot(index: usize, size: usize) -> Vec<f64> {
    let mut target = vec![0.0; size];
    if let Some(slot) = target.get_mut(index) {
        *slot = 1.0;
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn loss_is_negative_log_of_true_class() {
        let loss = CrossEntropyLoss::loss(&[0.2, 0.5, 0.3], &[0.0, 1.0, 0.0]);
        assert_abs_diff_eq!(loss, -(0.5f64).ln());
    }

    #[test]
    fn loss_is_clamped_at_zero_probability() {
        let loss = CrossEntropyLoss::loss(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(loss.is_finite());
        assert_abs_diff_eq!(loss, -(1e-15f64).ln());
    }

    #[test]
    fn untargeted_sample_has_no_loss() {
        assert_eq!(CrossEntropyLoss::loss(&[0.5, 0.5], &one_hot(7, 2)), 0.0);
    }

    #[test]
    fn derivative_is_prediction_minus_target() {
        let g = CrossEntropyLoss::derivative(&[0.25, 0.75], &[1.0, 0.0]);
        assert_eq!(g, vec![-0.75, 0.75]);
    }

    #[test]
    fn one_hot_marks_single_slot() {
        assert_eq!(one_hot(1, 3), vec![0.0, 1.0, 0.0]);
        assert_eq!(one_hot(3, 3), vec![0.0; 3]);
    }
}
