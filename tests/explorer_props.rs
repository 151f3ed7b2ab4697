//! Property tests over all explorer variants.

use explo::{
    Action, BootstrapExplorer, EpsilonGreedyExplorer, Explorer, GenericExplorer, Policy, Scorer,
    SoftmaxExplorer, TauFirstExplorer,
};
use proptest::prelude::*;

/// Policy that rotates the identity ranking by a fixed offset.
struct Rotate(usize);

impl Policy<()> for Rotate {
    fn choose_action(&self, _ctx: &(), actions: &mut [Action]) {
        let n = actions.len();
        for (i, a) in actions.iter_mut().enumerate() {
            *a = ((i + self.0) % n) as u32 + 1;
        }
    }
}

struct FixedScores(Vec<f32>);

impl Scorer<()> for FixedScores {
    fn score_actions(&self, _ctx: &()) -> Vec<f32> {
        self.0.clone()
    }
}

fn assert_permutation(actions: &[Action]) {
    let mut sorted: Vec<Action> = actions.to_vec();
    sorted.sort_unstable();
    let expect: Vec<Action> = (1..=actions.len() as u32).collect();
    assert_eq!(sorted, expect, "not a permutation: {actions:?}");
}

proptest! {
    /// Epsilon-greedy: probability in [0,1], permutation preserved, always logged.
    #[test]
    fn epsilon_greedy_invariants(
        seed in any::<u64>(),
        epsilon in 0.0f32..=1.0,
        n in 1u32..9,
        rot in 0usize..8,
    ) {
        let ex = EpsilonGreedyExplorer::<(), _>::new(Rotate(rot), epsilon, n).unwrap();
        let mut actions = vec![0u32; n as usize];
        let d = ex.choose_action(seed, &(), &mut actions).unwrap();
        prop_assert!((0.0..=1.0).contains(&d.probability));
        prop_assert!(d.probability > 0.0);
        prop_assert!(d.should_log);
        assert_permutation(&actions);
    }

    /// Softmax: bounded scores, permutation preserved, propensity valid.
    #[test]
    fn softmax_invariants(
        seed in any::<u64>(),
        lambda in 0.0f32..2.0,
        scores in proptest::collection::vec(-2.0f32..2.0, 1..8),
    ) {
        let n = scores.len() as u32;
        let ex = SoftmaxExplorer::<(), _>::new(FixedScores(scores), lambda, n).unwrap();
        let mut actions = vec![0u32; n as usize];
        let d = ex.choose_action(seed, &(), &mut actions).unwrap();
        prop_assert!(d.probability > 0.0 && d.probability <= 1.0);
        assert_permutation(&actions);
    }

    /// Generic: positive weights, head propensity equals its normalized weight.
    #[test]
    fn generic_invariants(
        seed in any::<u64>(),
        weights in proptest::collection::vec(0.05f32..1.0, 2..8),
    ) {
        let n = weights.len() as u32;
        let total: f32 = weights.iter().sum();
        let ex = GenericExplorer::<(), _>::new(FixedScores(weights.clone()), n).unwrap();
        let mut actions = vec![0u32; n as usize];
        let d = ex.choose_action(seed, &(), &mut actions).unwrap();
        assert_permutation(&actions);
        let head = (actions[0] - 1) as usize;
        prop_assert!((d.probability - weights[head] / total).abs() < 1e-5);
    }

    /// Tau-first: single-threaded drive logs exactly tau decisions at 1/n, then stops.
    #[test]
    fn tau_first_budget_is_exact(
        tau in 0u64..6,
        n in 1u32..7,
        calls in 0u64..12,
        seed in any::<u64>(),
    ) {
        let ex = TauFirstExplorer::<(), _>::new(Rotate(1), tau, n).unwrap();
        let mut logged = 0u64;
        for i in 0..calls {
            let mut actions = vec![0u32; n as usize];
            let d = ex.choose_action(seed.wrapping_add(i), &(), &mut actions).unwrap();
            assert_permutation(&actions);
            if d.should_log {
                logged += 1;
                prop_assert!((d.probability - 1.0 / n as f32).abs() < 1e-6);
            } else {
                prop_assert!((d.probability - 1.0).abs() < 1e-6);
            }
        }
        prop_assert_eq!(logged, tau.min(calls));
    }

    /// Bootstrap: propensity is votes/bags, ranking comes from one of the bags.
    #[test]
    fn bootstrap_invariants(
        seed in any::<u64>(),
        n in 1u32..6,
        bag_rots in proptest::collection::vec(0usize..6, 1..5),
    ) {
        let bags: Vec<Rotate> = bag_rots.iter().map(|&r| Rotate(r)).collect();
        let bag_count = bags.len() as u32;
        let ex = BootstrapExplorer::<(), _>::new(bags, n).unwrap();
        let mut actions = vec![0u32; n as usize];
        let d = ex.choose_action(seed, &(), &mut actions).unwrap();
        assert_permutation(&actions);
        // Propensity is a vote fraction: k/bags for some 1 <= k <= bags.
        let votes = (d.probability * bag_count as f32).round() as u32;
        prop_assert!(votes >= 1 && votes <= bag_count);
        prop_assert!((d.probability - votes as f32 / bag_count as f32).abs() < 1e-6);
    }

    /// Every variant is deterministic per seed.
    #[test]
    fn decisions_are_reproducible(seed in any::<u64>(), n in 2u32..7) {
        let mut a = vec![0u32; n as usize];
        let mut b = vec![0u32; n as usize];

        let eg = EpsilonGreedyExplorer::<(), _>::new(Rotate(1), 0.5, n).unwrap();
        let da = eg.choose_action(seed, &(), &mut a).unwrap();
        let db = eg.choose_action(seed, &(), &mut b).unwrap();
        prop_assert_eq!(da, db);
        prop_assert_eq!(&a, &b);

        let scores: Vec<f32> = (0..n).map(|i| i as f32 * 0.1).collect();
        let sm = SoftmaxExplorer::<(), _>::new(FixedScores(scores), 1.0, n).unwrap();
        let da = sm.choose_action(seed, &(), &mut a).unwrap();
        let db = sm.choose_action(seed, &(), &mut b).unwrap();
        prop_assert_eq!(da, db);
        prop_assert_eq!(&a, &b);
    }
}
