//! The decision orchestrator: seed derivation, explorer dispatch, conditional recording.
//!
//! [`DecisionEngine`] is the one call a serving loop makes per decision. It derives the
//! salted per-decision seed from the application id and the decision's unique key, runs the
//! explorer, and, only when the explorer flags the decision, hands the mutated ranking
//! and its propensity to the caller's [`Recorder`]. Errors surface before any recorder
//! call, so a failed decision has no external effects.

use crate::stable_hash::{salted_seed, stable_hash64};
use crate::{Action, Explorer, ExplorerDecision, ExploreError, Recorder};

/// Orchestrates seeded exploration and propensity logging for one application.
///
/// The engine is stateless apart from the pre-hashed application id, so a single instance
/// can serve concurrent decisions; recorder thread-safety is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct DecisionEngine<R> {
    app_hash: u64,
    recorder: R,
}

impl<R> DecisionEngine<R> {
    /// Create an engine for `app_id`. The id is hashed once and salts every decision seed.
    pub fn new(app_id: &str, recorder: R) -> Self {
        Self {
            app_hash: stable_hash64(app_id),
            recorder,
        }
    }

    /// Access the recorder.
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Make one decision.
    ///
    /// `unique_key` must be distinct per decision for the exploration to be uniform across
    /// decisions; reusing a key reproduces the earlier decision bit-for-bit (which is also
    /// how replays work). On success `actions` holds the final ranking with the chosen
    /// action in slot 0, and the returned envelope carries its propensity.
    pub fn choose_action<C: ?Sized, E>(
        &self,
        explorer: &E,
        unique_key: &str,
        ctx: &C,
        actions: &mut [Action],
    ) -> Result<ExplorerDecision, ExploreError>
    where
        E: Explorer<C>,
        R: Recorder<C>,
    {
        let seed = salted_seed(self.app_hash, unique_key);
        let decision = explorer.choose_action(seed, ctx, actions)?;
        if decision.should_log {
            self.recorder
                .record(ctx, actions, decision.probability, unique_key);
        }
        Ok(decision)
    }
}

/// A compact, log-ready row for one recorded decision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionLogRow {
    pub unique_key: String,
    /// The chosen action (slot 0 of the ranking).
    pub chosen: Action,
    /// Full ranking snapshot at record time.
    pub ranking: Vec<Action>,
    /// Propensity of the chosen action.
    pub probability: f32,
}

impl DecisionLogRow {
    #[must_use]
    pub fn new(unique_key: &str, actions: &[Action], probability: f32) -> Self {
        Self {
            unique_key: unique_key.to_string(),
            chosen: actions.first().copied().unwrap_or(0),
            ranking: actions.to_vec(),
            probability,
        }
    }
}

/// Recorder that appends every decision to an in-memory list.
///
/// Useful in tests and harnesses; production callers typically write rows to their own
/// sink instead.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    rows: std::sync::Mutex<Vec<DecisionLogRow>>,
}

impl MemoryRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the rows recorded so far.
    pub fn rows(&self) -> Vec<DecisionLogRow> {
        self.rows.lock().expect("recorder lock poisoned").clone()
    }

    /// Number of rows recorded so far.
    pub fn len(&self) -> usize {
        self.rows.lock().expect("recorder lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: ?Sized> Recorder<C> for MemoryRecorder {
    fn record(&self, _ctx: &C, actions: &[Action], probability: f32, unique_key: &str) {
        self.rows
            .lock()
            .expect("recorder lock poisoned")
            .push(DecisionLogRow::new(unique_key, actions, probability));
    }
}
