//! Approximate skill matching for near-spellings ("ReactJS" vs "React.js").

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;
use tracing::debug;

/// Normalized Levenshtein similarity scaled to 0–100.
fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Token-set similarity on a 0–100 scale.
///
/// Both strings are split into whitespace token sets. The shared tokens
/// (sorted, joined) are compared against each side's shared + leftover
/// tokens, and the best pairwise ratio wins. When one side's tokens are a
/// subset of the other's the score is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let shared = shared.join(" ");
    let with_shared = |rest: &[&str]| {
        let rest = rest.join(" ");
        if shared.is_empty() {
            rest
        } else {
            format!("{shared} {rest}")
        }
    };
    let combined_a = with_shared(&only_a);
    let combined_b = with_shared(&only_b);

    let mut best = ratio(&combined_a, &combined_b);
    if !shared.is_empty() {
        best = best
            .max(ratio(&shared, &combined_a))
            .max(ratio(&shared, &combined_b));
    }
    best
}

/// Highest-scoring candidate at or above `cutoff`. Ties keep the earliest
/// candidate.
fn best_candidate(query: &str, candidates: &[String], cutoff: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        let score = token_set_ratio(query, candidate);
        if score < cutoff {
            continue;
        }
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((idx, score));
        }
    }
    best
}

/// Greedy one-to-one fuzzy matching.
///
/// Job keys are visited in sorted order against the sorted resume `pool`;
/// each accepted match removes its resume candidate from the pool. The
/// result is therefore fully determined by the input sets. Returns the
/// matched job keys.
pub fn match_fuzzy(job_keys: &[String], pool: &mut Vec<String>, threshold: f64) -> Vec<String> {
    let mut jobs: Vec<&String> = job_keys.iter().collect();
    jobs.sort();
    pool.sort();

    let mut matched = Vec::new();
    for job in jobs {
        if pool.is_empty() {
            break;
        }
        if let Some((idx, score)) = best_candidate(job, pool, threshold) {
            let consumed = pool.remove(idx);
            debug!("Fuzzy match: '{job}' ~ '{consumed}' ({score:.1})");
            matched.push(job.clone());
        }
    }
    matched
}
