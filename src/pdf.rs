//! Distribution-safety utilities: pure functions over action lists and probability/weight
//! arrays.
//!
//! These are the shared building blocks of the explorers, but they are also usable on their
//! own (e.g. to post-process a logged distribution with
//! [`enforce_minimum_probability`]). All of them are deterministic given their inputs; the
//! only one that draws randomness, [`sample_ranking`], takes an explicit [`DecisionRng`].

use crate::rng::DecisionRng;
use crate::{Action, ExploreError};

/// Check that `actions` is a permutation of `1..=n` (n = `actions.len()`).
///
/// Every value must lie in `[1, n]` and appear at most once. This is run after every
/// caller-policy invocation, so a buggy policy surfaces as
/// [`ErrorKind::InvalidActionSet`](crate::ErrorKind::InvalidActionSet) instead of a skewed
/// log.
pub fn validate_actions(actions: &[Action]) -> Result<(), ExploreError> {
    let n = actions.len() as u32;
    let mut seen = vec![false; actions.len()];
    for &a in actions {
        if a < 1 || a > n {
            return Err(ExploreError::ActionOutOfRange { action: a, n });
        }
        let slot = (a - 1) as usize;
        if seen[slot] {
            return Err(ExploreError::DuplicateAction(a));
        }
        seen[slot] = true;
    }
    Ok(())
}

/// Move `action` to slot 0 of `actions`, swapping it with the current head.
///
/// If `action` is absent from the list, slot 0 is **overwritten** with it, which can break
/// the permutation invariant. The explorers only ever call this with ids drawn from
/// `[1, n]`, for which the swap branch always applies.
pub fn put_action_to_list(action: Action, actions: &mut [Action]) {
    if let Some(pos) = actions.iter().position(|&a| a == action) {
        actions.swap(0, pos);
    } else if let Some(head) = actions.first_mut() {
        *head = action;
    }
}

/// Sample a full ranking without replacement from a probability distribution.
///
/// Writes a permutation of `1..=n` into `actions` (`n = pdf.len() = actions.len()`) and
/// returns the probability of the **first** draw, the propensity the caller reports.
///
/// Each round draws `u` in `[0, 1)` and walks the cumulative sum over the not-yet-chosen
/// actions, selecting the first whose cumulative bucket exceeds `u`; if the remaining mass
/// never does (possible after earlier removals), the last remaining candidate is taken as a
/// numerical fallback. Only the first round operates on the full distribution, so the
/// returned propensity is exact.
///
/// # Errors
///
/// [`ExploreError::UnitWeight`] if any weight equals exactly `1.0` while more than one
/// candidate remains: a deterministic distribution cannot produce a unique-action ordering.
/// [`ExploreError::LengthMismatch`] if `pdf` and `actions` disagree on length, and
/// [`ExploreError::ZeroActions`] on empty input.
pub fn sample_ranking(
    pdf: &[f32],
    rng: &mut DecisionRng,
    actions: &mut [Action],
) -> Result<f32, ExploreError> {
    let n = pdf.len();
    if n == 0 {
        return Err(ExploreError::ZeroActions);
    }
    if actions.len() != n {
        return Err(ExploreError::LengthMismatch {
            expected: n,
            got: actions.len(),
        });
    }
    if n > 1 {
        if let Some(index) = pdf.iter().position(|&w| w == 1.0) {
            return Err(ExploreError::UnitWeight { index });
        }
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut first_draw_prob = 0.0f32;
    for slot in 0..n {
        let pick = if remaining.len() == 1 {
            0
        } else {
            let u = rng.uniform_unit();
            let mut cum = 0.0f32;
            let mut pick = remaining.len() - 1;
            for (pos, &i) in remaining.iter().enumerate() {
                cum += pdf[i];
                if u < cum {
                    pick = pos;
                    break;
                }
            }
            pick
        };
        let chosen = remaining.swap_remove(pick);
        if slot == 0 {
            first_draw_prob = pdf[chosen];
        }
        actions[slot] = chosen as u32 + 1;
    }
    Ok(first_draw_prob)
}

/// Fill `pdf` with the epsilon-greedy distribution for a known top action.
///
/// Every entry gets `epsilon / n`, then `pdf[top_action]` gains the remaining `1 - epsilon`
/// exploit mass. `top_action` is a 0-based index into `pdf`. Empty `pdf` is a no-op.
pub fn epsilon_greedy(
    epsilon: f32,
    top_action: u32,
    pdf: &mut [f32],
) -> Result<(), ExploreError> {
    let n = pdf.len();
    if n == 0 {
        return Ok(());
    }
    if !epsilon.is_finite() || !(0.0..=1.0).contains(&epsilon) {
        return Err(ExploreError::EpsilonOutOfRange(epsilon));
    }
    if top_action as usize >= n {
        return Err(ExploreError::TopActionOutOfRange { top_action, n });
    }
    let base = epsilon / n as f32;
    for p in pdf.iter_mut() {
        *p = base;
    }
    pdf[top_action as usize] += 1.0 - epsilon;
    Ok(())
}

/// Fill `pdf` with the softmax distribution of `scores` at inverse temperature `lambda`.
///
/// Uses the standard max-trick for numerical stability: `pdf[i] = exp(lambda * (s_i - max))`,
/// then normalizes by the sum. If the sum is not positive (possible with non-finite scores)
/// the weights are **left unnormalized** (documented behavior, not an error).
pub fn softmax(lambda: f32, scores: &[f32], pdf: &mut [f32]) -> Result<(), ExploreError> {
    if pdf.len() != scores.len() {
        return Err(ExploreError::LengthMismatch {
            expected: scores.len(),
            got: pdf.len(),
        });
    }
    if scores.is_empty() {
        return Ok(());
    }
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for (p, &s) in pdf.iter_mut().zip(scores) {
        let w = (lambda * (s - max)).exp();
        sum += w;
        *p = w;
    }
    if sum > 0.0 {
        for p in pdf.iter_mut() {
            *p /= sum;
        }
    }
    Ok(())
}

/// Convert ensemble vote counts into a probability distribution.
///
/// `pdf[i] = vote_counts[i] / total`.
///
/// # Errors
///
/// [`ExploreError::ZeroTotalWeight`] when no votes were cast.
pub fn bag(vote_counts: &[u32], pdf: &mut [f32]) -> Result<(), ExploreError> {
    if pdf.len() != vote_counts.len() {
        return Err(ExploreError::LengthMismatch {
            expected: vote_counts.len(),
            got: pdf.len(),
        });
    }
    let total: u32 = vote_counts.iter().sum();
    if total == 0 {
        return Err(ExploreError::ZeroTotalWeight);
    }
    for (p, &v) in pdf.iter_mut().zip(vote_counts) {
        *p = v as f32 / total as f32;
    }
    Ok(())
}

/// Raise every too-small probability to a floor of `min_prob / n`, rescaling the rest.
///
/// Entries at or below the floor are set to it; with `zero_aware` set, exact zeros
/// participate too, otherwise zeros are skipped entirely (left at zero and excluded from
/// rescaling). The mass granted to floored entries is taken proportionally from the
/// untouched ones.
///
/// `min_prob > 0.999` is a special case: the distribution collapses to uniform over the
/// support, meaning all entries when `zero_aware` and only the currently-nonzero ones
/// otherwise (an all-zero pdf is then left unchanged).
///
/// Applying the function twice with the same `min_prob` is idempotent: floored entries are
/// re-floored to the same value and the rescale factor becomes 1.
///
/// # Errors
///
/// [`ExploreError::FloorInfeasible`] when the floored entries would claim more than `0.999`
/// of the total mass.
pub fn enforce_minimum_probability(
    min_prob: f32,
    zero_aware: bool,
    pdf: &mut [f32],
) -> Result<(), ExploreError> {
    let n = pdf.len();
    if n == 0 {
        return Ok(());
    }

    if min_prob > 0.999 {
        if zero_aware {
            let uniform = 1.0 / n as f32;
            for p in pdf.iter_mut() {
                *p = uniform;
            }
        } else {
            let support = pdf.iter().filter(|&&p| p > 0.0).count();
            if support > 0 {
                let uniform = 1.0 / support as f32;
                for p in pdf.iter_mut() {
                    if *p > 0.0 {
                        *p = uniform;
                    }
                }
            }
        }
        return Ok(());
    }

    let floor = min_prob / n as f32;
    let mut touched = vec![false; n];
    let mut touched_mass = 0.0f32;
    let mut untouched_sum = 0.0f32;
    for (i, p) in pdf.iter_mut().enumerate() {
        if *p == 0.0 && !zero_aware {
            continue;
        }
        if *p <= floor {
            *p = floor;
            touched[i] = true;
            touched_mass += floor;
        } else {
            untouched_sum += *p;
        }
    }
    if touched_mass > 0.999 {
        return Err(ExploreError::FloorInfeasible { touched_mass });
    }
    if untouched_sum > 0.0 {
        let scale = (1.0 - touched_mass) / untouched_sum;
        for (i, p) in pdf.iter_mut().enumerate() {
            if !touched[i] && *p > 0.0 {
                *p *= scale;
            }
        }
    }
    Ok(())
}
