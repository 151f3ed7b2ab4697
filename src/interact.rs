//! Capability traits supplied by the caller: ranking policies, scorers, decision recorders,
//! and the optional variable-action-count context capability.
//!
//! All capability methods take `&self`: one explorer instance is expected to serve many
//! threads concurrently, so thread-safety of `Policy`/`Scorer`/`Recorder` implementations is
//! a **caller precondition**, not something this crate enforces with locks. A blocked or
//! slow capability call blocks the decision that made it; there is no timeout or
//! cancellation.
//!
//! Blanket impls for `&T` and `Box<T>` let callers pass borrowed capabilities and build
//! heterogeneous bags (`Vec<Box<dyn Policy<C>>>`) without wrapper types.

use crate::Action;

/// Ranks the candidate actions for a context.
///
/// `choose_action` must write a full ranking into `actions` (slot 0 = top pick) such that
/// the slice remains a permutation of `1..=n`; explorers validate this after every call and
/// surface violations as [`ErrorKind::InvalidActionSet`](crate::ErrorKind::InvalidActionSet).
pub trait Policy<C: ?Sized> {
    fn choose_action(&self, ctx: &C, actions: &mut [Action]);
}

/// Scores every candidate action for a context.
///
/// The returned vector must have exactly `n` entries (checked by the consuming explorer).
/// What the scores mean is explorer-specific: softmax treats them as logits, the generic
/// explorer as nonnegative sampling weights.
pub trait Scorer<C: ?Sized> {
    fn score_actions(&self, ctx: &C) -> Vec<f32>;
}

/// Receives decisions worth keeping for off-policy learning.
///
/// Invoked only after a fully validated decision, and only when the explorer flags the
/// decision for logging. `actions` is the mutated ranking (slot 0 = chosen action) and
/// `probability` the propensity under which that action was selected.
pub trait Recorder<C: ?Sized> {
    fn record(&self, ctx: &C, actions: &[Action], probability: f32, unique_key: &str);
}

/// Context capability consulted by explorers constructed in variable-action mode.
pub trait VariableActionContext {
    fn number_of_actions(&self) -> u32;
}

impl<C: ?Sized, P: Policy<C> + ?Sized> Policy<C> for &P {
    fn choose_action(&self, ctx: &C, actions: &mut [Action]) {
        (**self).choose_action(ctx, actions);
    }
}

impl<C: ?Sized, P: Policy<C> + ?Sized> Policy<C> for Box<P> {
    fn choose_action(&self, ctx: &C, actions: &mut [Action]) {
        (**self).choose_action(ctx, actions);
    }
}

impl<C: ?Sized, S: Scorer<C> + ?Sized> Scorer<C> for &S {
    fn score_actions(&self, ctx: &C) -> Vec<f32> {
        (**self).score_actions(ctx)
    }
}

impl<C: ?Sized, S: Scorer<C> + ?Sized> Scorer<C> for Box<S> {
    fn score_actions(&self, ctx: &C) -> Vec<f32> {
        (**self).score_actions(ctx)
    }
}

impl<C: ?Sized, R: Recorder<C> + ?Sized> Recorder<C> for &R {
    fn record(&self, ctx: &C, actions: &[Action], probability: f32, unique_key: &str) {
        (**self).record(ctx, actions, probability, unique_key);
    }
}

impl<C: ?Sized, R: Recorder<C> + ?Sized> Recorder<C> for Box<R> {
    fn record(&self, ctx: &C, actions: &[Action], probability: f32, unique_key: &str) {
        (**self).record(ctx, actions, probability, unique_key);
    }
}

/// Recorder that discards every decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl<C: ?Sized> Recorder<C> for NoopRecorder {
    fn record(&self, _ctx: &C, _actions: &[Action], _probability: f32, _unique_key: &str) {}
}
