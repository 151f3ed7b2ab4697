//! Epsilon-greedy exploration over a caller-supplied ranking [`Policy`].
//!
//! With probability `1 - epsilon` the policy's greedy head is kept; otherwise a uniformly
//! drawn action id is swapped to the front. The reported propensity is exact either way:
//! `1 - epsilon + epsilon/n` for the greedy action (the uniform draw can land on it too),
//! `epsilon/n` for any other.

use crate::explorer::{ActionCount, ExploreFlag};
use crate::pdf::{put_action_to_list, validate_actions};
use crate::rng::DecisionRng;
use crate::{Action, ChoiceKind, Explorer, ExplorerDecision, ExploreError, Policy,
            VariableActionContext};

/// Epsilon-greedy explorer.
#[derive(Debug)]
pub struct EpsilonGreedyExplorer<C: ?Sized, P> {
    policy: P,
    epsilon: f32,
    count: ActionCount<C>,
    explore: ExploreFlag,
}

impl<C: ?Sized, P> EpsilonGreedyExplorer<C, P> {
    /// Create an explorer for a fixed action count.
    ///
    /// # Errors
    ///
    /// `epsilon` outside `[0, 1]` or `num_actions == 0`.
    pub fn new(policy: P, epsilon: f32, num_actions: u32) -> Result<Self, ExploreError> {
        Ok(Self {
            policy,
            epsilon: check_epsilon(epsilon)?,
            count: ActionCount::fixed(num_actions)?,
            explore: ExploreFlag::new(true),
        })
    }

    /// Create an explorer that reads the action count from the context on every decision.
    pub fn with_variable_actions(policy: P, epsilon: f32) -> Result<Self, ExploreError>
    where
        C: VariableActionContext,
    {
        Ok(Self {
            policy,
            epsilon: check_epsilon(epsilon)?,
            count: ActionCount::variable(),
            explore: ExploreFlag::new(true),
        })
    }

    /// The configured epsilon.
    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

fn check_epsilon(epsilon: f32) -> Result<f32, ExploreError> {
    if !epsilon.is_finite() || !(0.0..=1.0).contains(&epsilon) {
        return Err(ExploreError::EpsilonOutOfRange(epsilon));
    }
    Ok(epsilon)
}

impl<C: ?Sized, P: Policy<C>> Explorer<C> for EpsilonGreedyExplorer<C, P> {
    fn choose_action(
        &self,
        seed: u64,
        ctx: &C,
        actions: &mut [Action],
    ) -> Result<ExplorerDecision, ExploreError> {
        let n = self.count.resolve(ctx, actions)?;
        self.policy.choose_action(ctx, actions);
        validate_actions(actions)?;

        if !self.explore.get() {
            return Ok(ExplorerDecision {
                probability: 1.0,
                should_log: true,
                kind: ChoiceKind::Exploit,
            });
        }

        let mut rng = DecisionRng::from_seed(seed);
        let base = self.epsilon / n as f32;
        let greedy_prob = 1.0 - self.epsilon + base;
        let greedy = actions[0];

        let u = rng.uniform_unit();
        if u < 1.0 - self.epsilon {
            return Ok(ExplorerDecision {
                probability: greedy_prob,
                should_log: true,
                kind: ChoiceKind::Exploit,
            });
        }

        let drawn = rng.uniform_int(1, n);
        put_action_to_list(drawn, actions);
        if drawn == greedy {
            // The uniform draw landed on the greedy action: exploit-case propensity.
            Ok(ExplorerDecision {
                probability: greedy_prob,
                should_log: true,
                kind: ChoiceKind::Exploit,
            })
        } else {
            Ok(ExplorerDecision {
                probability: base,
                should_log: true,
                kind: ChoiceKind::UniformExplore,
            })
        }
    }

    fn enable_explore(&self, enabled: bool) {
        self.explore.set(enabled);
    }
}
