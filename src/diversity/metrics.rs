//! Spread statistics over the verb counts of a generated dataset.
//!
//! A dataset that leans on a handful of opening verbs ("Write", "Explain")
//! scores low entropy and a high Gini coefficient; one that spreads its
//! instructions across many verbs scores the reverse.

use std::collections::HashMap;

/// Share of the total held by each non-empty verb.
fn shares(distribution: &HashMap<String, usize>) -> impl Iterator<Item = f64> + '_ {
    let total = distribution.values().sum::<usize>() as f64;
    distribution
        .values()
        .filter(|&&count| count > 0)
        .map(move |&count| count as f64 / total)
}

/// Shannon entropy (nats) of the verb distribution.
///
/// Equals `ln(k)` when `k` verbs are used equally often, and 0 when every
/// instruction opens with the same verb or the distribution is empty.
///
/// # Example
///
/// ```
/// use instruct_forge::diversity::shannon_entropy;
/// use std::collections::HashMap;
///
/// let mut verbs = HashMap::new();
/// verbs.insert("write".to_string(), 10);
/// verbs.insert("explain".to_string(), 10);
///
/// let entropy = shannon_entropy(&verbs);
/// assert!((entropy - 2.0_f64.ln()).abs() < 1e-10);
/// ```
pub fn shannon_entropy(distribution: &HashMap<String, usize>) -> f64 {
    if distribution.values().all(|&count| count == 0) {
        return 0.0;
    }
    shares(distribution).map(|p| -p * p.ln()).sum()
}

/// Entropy relative to an even spread over the verbs seen, in `[0, 1]`.
///
/// 1 means no verb is favoured over another. A single verb scores 0.
pub fn normalized_entropy(distribution: &HashMap<String, usize>) -> f64 {
    let verbs = distribution.len();
    if verbs < 2 {
        return 0.0;
    }
    (shannon_entropy(distribution) / (verbs as f64).ln()).clamp(0.0, 1.0)
}

/// Gini coefficient of the verb counts.
///
/// Computed as the mean absolute difference between every pair of verb
/// counts, divided by twice the mean count. 0 means every verb opens the same
/// number of instructions; values approach 1 as one verb takes over.
pub fn gini_coefficient(distribution: &HashMap<String, usize>) -> f64 {
    let counts: Vec<f64> = distribution.values().map(|&count| count as f64).collect();
    let n = counts.len() as f64;
    let total: f64 = counts.iter().sum();
    if total == 0.0 {
        return 0.0;
    }

    let pairwise: f64 = counts
        .iter()
        .flat_map(|a| counts.iter().map(move |b| (a - b).abs()))
        .sum();

    pairwise / (2.0 * n * total)
}
