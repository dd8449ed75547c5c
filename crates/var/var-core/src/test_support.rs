//! Seeded simulation helpers for unit tests

use rand::prelude::*;
use rand_distr::Normal;

/// Simulate `y_t = c + sum_i A_i y_{t-i} + scale * e_t`, discarding a burn-in.
///
/// `coefs[i]` is `A_{i+1}` in row-major `k x k` layout.
pub(crate) fn simulate(
    intercept: &[f64],
    coefs: &[Vec<Vec<f64>>],
    n: usize,
    scale: f64,
    seed: u64,
) -> Vec<Vec<f64>> {
    let k = intercept.len();
    let p = coefs.len();
    let burn = 100;
    let mut rng = StdRng::seed_from_u64(seed);
    let shock = Normal::new(0.0, scale).unwrap();
    let mut data: Vec<Vec<f64>> = vec![vec![0.0; k]; p.max(1)];

    while data.len() < n + burn + p.max(1) {
        let t = data.len();
        let mut next = intercept.to_vec();
        for (i, a) in coefs.iter().enumerate() {
            let prev = &data[t - 1 - i];
            for r in 0..k {
                next[r] += (0..k).map(|c| a[r][c] * prev[c]).sum::<f64>();
            }
        }
        for v in next.iter_mut() {
            *v += shock.sample(&mut rng);
        }
        data.push(next);
    }

    data.split_off(data.len() - n)
}
