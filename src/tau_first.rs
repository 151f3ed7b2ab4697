//! Tau-first exploration: a fixed budget of purely uniform decisions, then pure
//! exploitation.
//!
//! The remaining budget is the one piece of contended shared mutable state in this crate.
//! It is decremented with an atomic compare-and-swap loop, so when one explorer instance
//! serves many threads exactly `tau` decisions **system-wide** are exploratory, not `tau`
//! per thread. Exploratory decisions report propensity `1/n` and are flagged for logging;
//! once the budget is exhausted the explorer is a pass-through with probability 1 and
//! `should_log = false`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::explorer::{ActionCount, ExploreFlag};
use crate::pdf::{put_action_to_list, validate_actions};
use crate::rng::DecisionRng;
use crate::{Action, ChoiceKind, Explorer, ExplorerDecision, ExploreError, Policy,
            VariableActionContext};

/// Tau-first explorer.
#[derive(Debug)]
pub struct TauFirstExplorer<C: ?Sized, P> {
    policy: P,
    tau: AtomicU64,
    count: ActionCount<C>,
    explore: ExploreFlag,
}

impl<C: ?Sized, P> TauFirstExplorer<C, P> {
    /// Create an explorer for a fixed action count with an exploration budget of `tau`.
    pub fn new(policy: P, tau: u64, num_actions: u32) -> Result<Self, ExploreError> {
        Ok(Self {
            policy,
            tau: AtomicU64::new(tau),
            count: ActionCount::fixed(num_actions)?,
            explore: ExploreFlag::new(true),
        })
    }

    /// Create an explorer that reads the action count from the context on every decision.
    pub fn with_variable_actions(policy: P, tau: u64) -> Self
    where
        C: VariableActionContext,
    {
        Self {
            policy,
            tau: AtomicU64::new(tau),
            count: ActionCount::variable(),
            explore: ExploreFlag::new(true),
        }
    }

    /// Remaining exploration budget.
    #[must_use]
    pub fn remaining_tau(&self) -> u64 {
        self.tau.load(Ordering::Acquire)
    }

    /// Consume one unit of budget if any remains. Each successful call corresponds to
    /// exactly one exploratory decision, across all threads sharing this instance.
    fn try_consume_tau(&self) -> bool {
        self.tau
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |t| t.checked_sub(1))
            .is_ok()
    }
}

impl<C: ?Sized, P: Policy<C>> Explorer<C> for TauFirstExplorer<C, P> {
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
                should_log: false,
                kind: ChoiceKind::Exploit,
            });
        }

        if self.try_consume_tau() {
            let mut rng = DecisionRng::from_seed(seed);
            let drawn = rng.uniform_int(1, n);
            put_action_to_list(drawn, actions);
            Ok(ExplorerDecision {
                probability: 1.0 / n as f32,
                should_log: true,
                kind: ChoiceKind::TauExplore,
            })
        } else {
            Ok(ExplorerDecision {
                probability: 1.0,
                should_log: false,
                kind: ChoiceKind::TauExhausted,
            })
        }
    }

    fn enable_explore(&self, enabled: bool) {
        self.explore.set(enabled);
    }
}
