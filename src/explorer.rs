//! Common surface shared by every exploration strategy.
//!
//! An [`Explorer`] turns one seeded decision into a mutated action ranking plus an
//! audit-friendly [`ExplorerDecision`]: the propensity of the chosen action, whether the
//! decision is worth logging for off-policy learning, and a typed [`ChoiceKind`] note
//! explaining why this choice happened.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Action, ExploreError, VariableActionContext};

/// Why a decision came out the way it did.
///
/// Notes are intentionally small, typed, and stable. Prefer adding new variants over
/// changing existing semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChoiceKind {
    /// The deterministic greedy choice was kept (or exploration is disabled).
    Exploit,
    /// A uniformly drawn action id was swapped to the front.
    UniformExplore,
    /// The full ranking was sampled without replacement from a score distribution.
    SampledFromRanking,
    /// A tau-budget exploratory decision (uniform draw, budget decremented).
    TauExplore,
    /// The tau budget is exhausted; the explorer is a pure pass-through.
    TauExhausted,
    /// Chosen by bootstrap voting; `votes` of `bags` policies agreed on the head.
    BagVote { votes: u32, bags: u32 },
}

/// Outcome of a single explorer call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorerDecision {
    /// Probability with which slot 0 of the action list was selected.
    pub probability: f32,
    /// Whether this decision should be handed to the caller's recorder.
    pub should_log: bool,
    /// Audit note describing the branch taken.
    pub kind: ChoiceKind,
}

/// One interchangeable action-selection strategy.
///
/// Implementations hold immutable configuration plus (at most) one piece of shared mutable
/// state; `choose_action` takes `&self` so a single instance can serve concurrent decisions.
pub trait Explorer<C: ?Sized> {
    /// Select an action for `ctx`, reordering `actions` in place so slot 0 is the choice.
    ///
    /// `seed` is the salted per-decision seed; the same seed and inputs reproduce the same
    /// decision bit-for-bit. On success `actions` is a permutation of `1..=n`.
    fn choose_action(
        &self,
        seed: u64,
        ctx: &C,
        actions: &mut [Action],
    ) -> Result<ExplorerDecision, ExploreError>;

    /// Toggle exploration. Disabling makes the explorer follow its deterministic greedy
    /// branch. The flag is atomic; toggling happens-before all subsequent decisions.
    fn enable_explore(&self, enabled: bool);
}

/// How an explorer learns the number of candidate actions.
///
/// `Variable` carries a plain function pointer captured from
/// [`VariableActionContext::number_of_actions`] by the `variable_actions` constructors, so
/// `Explorer` impls need no extra context bounds in fixed mode.
pub enum ActionCount<C: ?Sized> {
    /// The action count was fixed at construction.
    Fixed(u32),
    /// The action count is read from the context on every decision.
    Variable(fn(&C) -> u32),
}

impl<C: ?Sized> ActionCount<C> {
    pub(crate) fn fixed(num_actions: u32) -> Result<Self, ExploreError> {
        if num_actions == 0 {
            return Err(ExploreError::ZeroActions);
        }
        Ok(Self::Fixed(num_actions))
    }

    pub(crate) fn variable() -> Self
    where
        C: VariableActionContext,
    {
        Self::Variable(|ctx| ctx.number_of_actions())
    }

    /// Resolve `n` for this decision and check it against the caller's slice.
    pub(crate) fn resolve(&self, ctx: &C, actions: &[Action]) -> Result<u32, ExploreError> {
        let n = match self {
            Self::Fixed(n) => *n,
            Self::Variable(f) => f(ctx),
        };
        if n == 0 {
            return Err(ExploreError::ZeroActions);
        }
        if actions.len() != n as usize {
            return Err(ExploreError::ActionLengthMismatch {
                expected: n,
                got: actions.len(),
            });
        }
        Ok(n)
    }
}

// Manual impls: deriving would put unwanted bounds on `C`.
impl<C: ?Sized> Clone for ActionCount<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for ActionCount<C> {}

impl<C: ?Sized> fmt::Debug for ActionCount<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            Self::Variable(_) => f.write_str("Variable"),
        }
    }
}

/// Atomic explore-enabled flag shared by all explorer variants.
#[derive(Debug)]
pub(crate) struct ExploreFlag(AtomicBool);

impl ExploreFlag {
    pub(crate) fn new(enabled: bool) -> Self {
        Self(AtomicBool::new(enabled))
    }

    pub(crate) fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }
}
