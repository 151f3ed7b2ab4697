//! Softmax (Boltzmann) exploration over a caller-supplied [`Scorer`].
//!
//! Scores are turned into a distribution with inverse temperature `lambda` (max-shifted for
//! numerical stability), then a full ranking is sampled without replacement; the propensity
//! of the first draw is reported. With exploration disabled the stable argmax is swapped to
//! the front with probability 1.

use crate::explorer::{ActionCount, ExploreFlag};
use crate::pdf::{sample_ranking, softmax};
use crate::rng::DecisionRng;
use crate::{Action, ChoiceKind, Explorer, ExplorerDecision, ExploreError, Scorer,
            VariableActionContext};

/// Softmax explorer.
#[derive(Debug)]
pub struct SoftmaxExplorer<C: ?Sized, S> {
    scorer: S,
    lambda: f32,
    count: ActionCount<C>,
    explore: ExploreFlag,
}

impl<C: ?Sized, S> SoftmaxExplorer<C, S> {
    /// Create an explorer for a fixed action count.
    ///
    /// `lambda` must be finite; larger values sharpen the distribution toward the argmax,
    /// negative values invert the preference.
    pub fn new(scorer: S, lambda: f32, num_actions: u32) -> Result<Self, ExploreError> {
        Ok(Self {
            scorer,
            lambda: check_lambda(lambda)?,
            count: ActionCount::fixed(num_actions)?,
            explore: ExploreFlag::new(true),
        })
    }

    /// Create an explorer that reads the action count from the context on every decision.
    pub fn with_variable_actions(scorer: S, lambda: f32) -> Result<Self, ExploreError>
    where
        C: VariableActionContext,
    {
        Ok(Self {
            scorer,
            lambda: check_lambda(lambda)?,
            count: ActionCount::variable(),
            explore: ExploreFlag::new(true),
        })
    }

    /// The configured inverse temperature.
    #[must_use]
    pub fn lambda(&self) -> f32 {
        self.lambda
    }
}

fn check_lambda(lambda: f32) -> Result<f32, ExploreError> {
    if !lambda.is_finite() {
        return Err(ExploreError::LambdaNotFinite(lambda));
    }
    Ok(lambda)
}

/// Write the identity ranking with the stable argmax of `scores` swapped to the front.
pub(crate) fn greedy_ranking(scores: &[f32], actions: &mut [Action]) {
    for (i, a) in actions.iter_mut().enumerate() {
        *a = i as u32 + 1;
    }
    let mut best = 0usize;
    for (i, &s) in scores.iter().enumerate() {
        if s > scores[best] {
            best = i;
        }
    }
    actions.swap(0, best);
}

impl<C: ?Sized, S: Scorer<C>> Explorer<C> for SoftmaxExplorer<C, S> {
    fn choose_action(
        &self,
        seed: u64,
        ctx: &C,
        actions: &mut [Action],
    ) -> Result<ExplorerDecision, ExploreError> {
        let n = self.count.resolve(ctx, actions)?;
        let scores = self.scorer.score_actions(ctx);
        if scores.len() != n as usize {
            return Err(ExploreError::ScoreLengthMismatch {
                expected: n,
                got: scores.len(),
            });
        }

        if !self.explore.get() {
            greedy_ranking(&scores, actions);
            return Ok(ExplorerDecision {
                probability: 1.0,
                should_log: true,
                kind: ChoiceKind::Exploit,
            });
        }

        let mut pdf = vec![0.0f32; scores.len()];
        softmax(self.lambda, &scores, &mut pdf)?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::validate_actions;

    #[derive(Debug)]
    struct FixedScores(Vec<f32>);

    impl Scorer<()> for FixedScores {
        fn score_actions(&self, _ctx: &()) -> Vec<f32> {
            self.0.clone()
        }
    }

    #[test]
    fn rejects_non_finite_lambda() {
        let err =
            SoftmaxExplorer::<(), _>::new(FixedScores(vec![0.0]), f32::INFINITY, 1).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn score_count_must_match_actions() {
        let ex = SoftmaxExplorer::<(), _>::new(FixedScores(vec![0.1, 0.2]), 1.0, 3).unwrap();
        let mut actions = [0u32; 3];
        assert_eq!(
            ex.choose_action(1, &(), &mut actions).unwrap_err(),
            ExploreError::ScoreLengthMismatch { expected: 3, got: 2 }
        );
    }

    #[test]
    fn sampling_produces_a_permutation_with_valid_propensity() {
        let ex =
            SoftmaxExplorer::<(), _>::new(FixedScores(vec![0.5, 1.5, 1.0, -0.5]), 0.8, 4).unwrap();
        for seed in 0..100u64 {
            let mut actions = [0u32; 4];
            let d = ex.choose_action(seed, &(), &mut actions).unwrap();
            validate_actions(&actions).unwrap();
            assert!(d.probability > 0.0 && d.probability <= 1.0);
            assert!(d.should_log);
            assert_eq!(d.kind, ChoiceKind::SampledFromRanking);
        }
    }

    #[test]
    fn reported_propensity_matches_the_softmax_weight_of_the_head() {
        let scores = vec![0.5f32, 1.5, 1.0, -0.5];
        let ex = SoftmaxExplorer::<(), _>::new(FixedScores(scores.clone()), 0.8, 4).unwrap();
        let mut pdf = vec![0.0f32; 4];
        softmax(0.8, &scores, &mut pdf).unwrap();

        for seed in 0..50u64 {
            let mut actions = [0u32; 4];
            let d = ex.choose_action(seed, &(), &mut actions).unwrap();
            let head = (actions[0] - 1) as usize;
            assert!((d.probability - pdf[head]).abs() < 1e-6);
        }
    }

    #[test]
    fn disabled_exploration_takes_the_argmax() {
        let ex =
            SoftmaxExplorer::<(), _>::new(FixedScores(vec![0.1, 0.9, 0.4]), 2.0, 3).unwrap();
        ex.enable_explore(false);
        let mut actions = [0u32; 3];
        let d = ex.choose_action(42, &(), &mut actions).unwrap();
        assert_eq!(actions[0], 2);
        validate_actions(&actions).unwrap();
        assert!((d.probability - 1.0).abs() < 1e-6);
        assert_eq!(d.kind, ChoiceKind::Exploit);
    }

    #[test]
    fn same_seed_reproduces_the_ranking() {
        let ex =
            SoftmaxExplorer::<(), _>::new(FixedScores(vec![0.3, 0.1, 0.6, 0.2]), 1.0, 4).unwrap();
        let mut a = [0u32; 4];
        let mut b = [0u32; 4];
        let da = ex.choose_action(9001, &(), &mut a).unwrap();
        let db = ex.choose_action(9001, &(), &mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!(da, db);
    }

    #[test]
    fn single_action_degenerates_to_certainty() {
        let ex = SoftmaxExplorer::<(), _>::new(FixedScores(vec![3.0]), 1.0, 1).unwrap();
        let mut actions = [0u32; 1];
        let d = ex.choose_action(5, &(), &mut actions).unwrap();
        assert_eq!(actions, [1]);
        assert!((d.probability - 1.0).abs() < 1e-6);
    }
}
