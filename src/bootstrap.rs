//! Bootstrap (bagging) exploration over an ensemble of independently trained policies.
//!
//! One bag is drawn uniformly per decision and its ranking is returned; the propensity is
//! the fraction of bags whose own top pick agrees with that choice, so ensemble
//! disagreement shows up directly in the logged probability.
//!
//! All bags rank into the caller's action slice, which is decision-local scratch. The
//! active bag's full ranking is copied out to an owned buffer before later bags overwrite
//! the slice, then restored before returning. The copy is an explicit named step, not an
//! artifact of buffer reuse.

use crate::explorer::{ActionCount, ExploreFlag};
use crate::pdf::validate_actions;
use crate::rng::DecisionRng;
use crate::{Action, ChoiceKind, Explorer, ExplorerDecision, ExploreError, Policy,
            VariableActionContext};

/// Bootstrap explorer over `bags.len()` policies.
///
/// For heterogeneous ensembles use `Vec<Box<dyn Policy<C>>>`; the blanket `Policy` impl for
/// `Box<P>` makes that a valid bag type.
#[derive(Debug)]
pub struct BootstrapExplorer<C: ?Sized, P> {
    bags: Vec<P>,
    count: ActionCount<C>,
    explore: ExploreFlag,
}

impl<C: ?Sized, P> BootstrapExplorer<C, P> {
    /// Create an explorer for a fixed action count.
    ///
    /// # Errors
    ///
    /// [`ExploreError::NoBags`] for an empty ensemble, [`ExploreError::ZeroActions`] for a
    /// zero action count.
    pub fn new(bags: Vec<P>, num_actions: u32) -> Result<Self, ExploreError> {
        if bags.is_empty() {
            return Err(ExploreError::NoBags);
        }
        Ok(Self {
            bags,
            count: ActionCount::fixed(num_actions)?,
            explore: ExploreFlag::new(true),
        })
    }

    /// Create an explorer that reads the action count from the context on every decision.
    pub fn with_variable_actions(bags: Vec<P>) -> Result<Self, ExploreError>
    where
        C: VariableActionContext,
    {
        if bags.is_empty() {
            return Err(ExploreError::NoBags);
        }
        Ok(Self {
            bags,
            count: ActionCount::variable(),
            explore: ExploreFlag::new(true),
        })
    }

    /// Number of bags in the ensemble.
    #[must_use]
    pub fn bags(&self) -> usize {
        self.bags.len()
    }
}

impl<C: ?Sized, P: Policy<C>> Explorer<C> for BootstrapExplorer<C, P> {
    fn choose_action(
        &self,
        seed: u64,
        ctx: &C,
        actions: &mut [Action],
    ) -> Result<ExplorerDecision, ExploreError> {
        let n = self.count.resolve(ctx, actions)?;

        if !self.explore.get() {
            self.bags[0].choose_action(ctx, actions);
            validate_actions(actions)?;
            return Ok(ExplorerDecision {
                probability: 1.0,
                should_log: true,
                kind: ChoiceKind::Exploit,
            });
        }

        let bags = self.bags.len() as u32;
        let mut rng = DecisionRng::from_seed(seed);
        let active = rng.uniform_int(0, bags - 1) as usize;

        let mut votes = vec![0u32; n as usize];
        let mut active_ranking: Vec<Action> = Vec::with_capacity(n as usize);
        for (i, bag) in self.bags.iter().enumerate() {
            bag.choose_action(ctx, actions);
            validate_actions(actions)?;
            votes[(actions[0] - 1) as usize] += 1;
            if i == active {
                // Copy-out: later bags reuse the same scratch slice.
                active_ranking.extend_from_slice(actions);
            }
        }
        actions.copy_from_slice(&active_ranking);

        let chosen_votes = votes[(actions[0] - 1) as usize];
        Ok(ExplorerDecision {
            probability: chosen_votes as f32 / bags as f32,
            should_log: true,
            kind: ChoiceKind::BagVote {
                votes: chosen_votes,
                bags,
            },
        })
    }

    fn enable_explore(&self, enabled: bool) {
        self.explore.set(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(Vec<Action>);

    impl Policy<()> for Fixed {
        fn choose_action(&self, _ctx: &(), actions: &mut [Action]) {
            actions.copy_from_slice(&self.0);
        }
    }

    #[test]
    fn empty_ensemble_is_rejected() {
        let err = BootstrapExplorer::<(), Fixed>::new(vec![], 3).unwrap_err();
        assert_eq!(err, ExploreError::NoBags);
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn unanimous_bags_report_certainty() {
        let bags = vec![Fixed(vec![2, 1, 3]), Fixed(vec![2, 3, 1]), Fixed(vec![2, 1, 3])];
        let ex = BootstrapExplorer::<(), _>::new(bags, 3).unwrap();
        for seed in 0..20u64 {
            let mut actions = [0u32; 3];
            let d = ex.choose_action(seed, &(), &mut actions).unwrap();
            assert_eq!(actions[0], 2);
            assert!((d.probability - 1.0).abs() < 1e-6);
            assert_eq!(d.kind, ChoiceKind::BagVote { votes: 3, bags: 3 });
        }
    }

    #[test]
    fn returned_ranking_is_the_active_bags_ranking() {
        // Two bags with fully distinct rankings: the output must equal one of them exactly,
        // proving the copy-out/copy-in discipline survives the scratch reuse.
        let a = vec![1, 2, 3];
        let b = vec![3, 2, 1];
        let ex =
            BootstrapExplorer::<(), _>::new(vec![Fixed(a.clone()), Fixed(b.clone())], 3).unwrap();
        let mut saw_a = false;
        let mut saw_b = false;
        for seed in 0..50u64 {
            let mut actions = [0u32; 3];
            let d = ex.choose_action(seed, &(), &mut actions).unwrap();
            validate_actions(&actions).unwrap();
            assert!((d.probability - 0.5).abs() < 1e-6, "heads disagree 1-of-2");
            if actions == a[..] {
                saw_a = true;
            } else if actions == b[..] {
                saw_b = true;
            } else {
                panic!("ranking {actions:?} belongs to no bag");
            }
        }
        assert!(saw_a && saw_b, "both bags should be active across 50 seeds");
    }

    #[test]
    fn votes_count_agreement_on_the_chosen_head() {
        // Three bags: two agree on head 1, one prefers head 3.
        let bags = vec![Fixed(vec![1, 2, 3]), Fixed(vec![1, 3, 2]), Fixed(vec![3, 2, 1])];
        let ex = BootstrapExplorer::<(), _>::new(bags, 3).unwrap();
        for seed in 0..50u64 {
            let mut actions = [0u32; 3];
            let d = ex.choose_action(seed, &(), &mut actions).unwrap();
            match actions[0] {
                1 => assert!((d.probability - 2.0 / 3.0).abs() < 1e-6),
                3 => assert!((d.probability - 1.0 / 3.0).abs() < 1e-6),
                other => panic!("impossible head {other}"),
            }
        }
    }

    #[test]
    fn disabled_exploration_uses_bag_zero() {
        let bags = vec![Fixed(vec![2, 1, 3]), Fixed(vec![3, 2, 1])];
        let ex = BootstrapExplorer::<(), _>::new(bags, 3).unwrap();
        ex.enable_explore(false);
        let mut actions = [0u32; 3];
        let d = ex.choose_action(99, &(), &mut actions).unwrap();
        assert_eq!(actions, [2, 1, 3]);
        assert!((d.probability - 1.0).abs() < 1e-6);
        assert_eq!(d.kind, ChoiceKind::Exploit);
    }

    #[test]
    fn boxed_bags_allow_heterogeneous_ensembles() {
        let bags: Vec<Box<dyn Policy<()>>> =
            vec![Box::new(Fixed(vec![1, 2])), Box::new(Fixed(vec![2, 1]))];
        let ex = BootstrapExplorer::<(), _>::new(bags, 2).unwrap();
        let mut actions = [0u32; 2];
        let d = ex.choose_action(3, &(), &mut actions).unwrap();
        validate_actions(&actions).unwrap();
        assert!((d.probability - 0.5).abs() < 1e-6);
    }

    #[test]
    fn same_seed_picks_the_same_bag() {
        let bags = vec![Fixed(vec![1, 2, 3]), Fixed(vec![3, 2, 1])];
        let ex = BootstrapExplorer::<(), _>::new(bags, 3).unwrap();
        let mut a = [0u32; 3];
        let mut b = [0u32; 3];
        assert_eq!(
            ex.choose_action(1234, &(), &mut a).unwrap(),
            ex.choose_action(1234, &(), &mut b).unwrap()
        );
        assert_eq!(a, b);
    }
}
