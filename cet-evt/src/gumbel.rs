//! Minimum-oriented Type-I extreme value (Gumbel) distribution.
//!
//! CDF: F(x) = 1 - exp(-exp(z)), z = (x - mu) / beta.
//! Fitted by maximum likelihood via data-scaled coordinate descent.

use serde::Serialize;

/// Fitted Gumbel parameters: location mu, scale beta (> 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GumbelParams {
    pub location: f64,
    pub scale: f64,
}

impl GumbelParams {
    /// Inverse CDF. Defined for p in (0, 1).
    pub fn quantile(&self, p: f64) -> f64 {
        self.location + self.scale * (-(1.0 - p).ln()).ln()
    }
}

/// Log-density of a single observation.
fn log_pdf(x: f64, mu: f64, beta: f64) -> f64 {
    if beta <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let z = (x - mu) / beta;
    -beta.ln() + z - z.exp()
}

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// MLE fit via coordinate descent with data-scaled step sizes, started
/// from the method-of-moments estimate (for the minimum-oriented form:
/// mean = mu - gamma*beta, var = pi^2 beta^2 / 6). Callers should supply
/// at least two observations; with fewer the moments start is degenerate.
pub fn fit(data: &[f64]) -> GumbelParams {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n.max(1.0);
    let std = (data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n.max(1.0)).sqrt();

    let mut beta = (std * 6.0_f64.sqrt() / std::f64::consts::PI).max(1e-8);
    let mut mu = mean + EULER_MASCHERONI * beta;

    let neg_ll = |mu: f64, beta: f64| -> f64 {
        let ll: f64 = data.iter().map(|&x| log_pdf(x, mu, beta)).sum();
        if ll.is_nan() || ll.is_infinite() {
            f64::INFINITY
        } else {
            -ll
        }
    };

    let base_steps = [0.5, 0.2, 0.05, 0.01, 0.002];
    for &base in &base_steps {
        let mu_step = base * std.max(1e-8);
        let beta_step = base * beta.max(0.1);

        for _ in 0..200 {
            let mut improved = false;

            for &delta in &[-mu_step, mu_step] {
                if neg_ll(mu + delta, beta) < neg_ll(mu, beta) {
                    mu += delta;
                    improved = true;
                }
            }
            for &delta in &[-beta_step, beta_step] {
                let new_beta = beta + delta;
                if new_beta > 1e-6 && neg_ll(mu, new_beta) < neg_ll(mu, beta) {
                    beta = new_beta;
                    improved = true;
                }
            }

            if !improved {
                break;
            }
        }
    }

    GumbelParams {
        location: mu,
        scale: beta,
    }
}
