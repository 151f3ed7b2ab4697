//! Generic-distribution exploration: the caller's [`Scorer`] supplies the sampling weights
//! directly.
//!
//! Weights must be nonnegative with a positive sum; they are normalized and a full ranking
//! is sampled without replacement. The reported propensity is the normalized weight of the
//! chosen action.

use crate::explorer::{ActionCount, ExploreFlag};
use crate::pdf::sample_ranking;
use crate::rng::DecisionRng;
use crate::softmax::greedy_ranking;
use crate::{Action, ChoiceKind, Explorer, ExplorerDecision, ExploreError, Scorer,
            VariableActionContext};

/// Generic-distribution explorer.
#[derive(Debug)]
pub struct GenericExplorer<C: ?Sized, S> {
    scorer: S,
    count: ActionCount<C>,
    explore: ExploreFlag,
}

impl<C: ?Sized, S> GenericExplorer<C, S> {
    /// Create an explorer for a fixed action count.
    pub fn new(scorer: S, num_actions: u32) -> Result<Self, ExploreError> {
        Ok(Self {
            scorer,
            count: ActionCount::fixed(num_actions)?,
            explore: ExploreFlag::new(true),
        })
    }

    /// Create an explorer that reads the action count from the context on every decision.
    pub fn with_variable_actions(scorer: S) -> Self
    where
        C: VariableActionContext,
    {
        Self {
            scorer,
            count: ActionCount::variable(),
            explore: ExploreFlag::new(true),
        }
    }
}

impl<C: ?Sized, S: Scorer<C>> Explorer<C> for GenericExplorer<C, S> {
    fn choose_action(
        &self,
        seed: u64,
        ctx: &C,
        actions: &mut [Action],
    ) -> Result<ExplorerDecision, ExploreError> {
        let n = self.count.resolve(ctx, actions)?;
        let weights = self.scorer.score_actions(ctx);
        if weights.len() != n as usize {
            return Err(ExploreError::ScoreLengthMismatch {
                expected: n,
                got: weights.len(),
            });
        }
        let mut total = 0.0f32;
        for (index, &w) in weights.iter().enumerate() {
            if w < 0.0 {
                return Err(ExploreError::NegativeWeight { index, weight: w });
            }
            total += w;
        }
        if total <= 0.0 {
            return Err(ExploreError::ZeroTotalWeight);
        }

        if !self.explore.get() {
            greedy_ranking(&weights, actions);
            return Ok(ExplorerDecision {
                probability: 1.0,
                should_log: true,
                kind: ChoiceKind::Exploit,
            });
        }

        let pdf: Vec<f32> = weights.iter().map(|w| w / total).collect();
        let mut rng = DecisionRng::from_seed(seed);
        let probability = sample_ranking(&pdf, &mut rng, actions)?;
        Ok(ExplorerDecision {
            probability,
            should_log: true,
            kind: ChoiceKind::SampledFromRanking,
        })
    }

    fn enable_explore(&self, enabled: bool) {
        self.explore.set(enabled);
    }
}
