//! `explo`: deterministic decision-time exploration for contextual-bandit personalization.
//!
//! Designed for the inline action-selection step of a live serving loop (ranking,
//! recommendation, model-version routing): given a context and `n` candidate actions, pick
//! one, report the **propensity** under which it was picked, and decide whether the
//! decision is worth logging for later off-policy learning. The engine never trains a
//! model; it consumes a caller-supplied ranking [`Policy`] or [`Scorer`] and wraps it in an
//! interchangeable exploration strategy.
//!
//! **Goals:**
//! - **Deterministic by default**: the same application id + unique decision key reproduce
//!   a decision bit-for-bit; randomness comes from a stable hash, never from global state.
//! - **Concurrent serving**: explorers take `&self` and hold immutable configuration plus
//!   at most one piece of atomic shared state, so one instance serves many threads.
//! - **Exact propensities**: every reported probability is the true selection probability
//!   of slot 0 under the strategy, which is the quantity unbiased off-policy evaluation needs.
//! - **No partial effects**: validation happens before the recorder is invoked; a failed
//!   decision leaves no trace.
//!
//! **Exploration strategies:**
//! - [`EpsilonGreedyExplorer`]: keep the policy's greedy pick with probability
//!   `1 - epsilon`, otherwise swap a uniformly drawn action to the front.
//! - [`SoftmaxExplorer`]: Boltzmann sampling of a full ranking from max-shifted scores.
//! - [`GenericExplorer`]: the scorer's nonnegative weights *are* the distribution.
//! - [`TauFirstExplorer`]: a fixed system-wide budget of uniform decisions, then pure
//!   pass-through (and nothing further worth logging).
//! - [`BootstrapExplorer`]: an ensemble of policies votes; disagreement shows up as a
//!   sub-certain propensity for the active bag's pick.
//!
//! **Orchestration:** [`DecisionEngine`] ties seed derivation ([`stable_hash64`] +
//! [`salted_seed`]), explorer dispatch, and conditional [`Recorder`] logging into one call.
//!
//! **Distribution safety:** the [`pdf`] module's utilities (sampling without replacement,
//! minimum-probability enforcement, vote-to-probability conversion, epsilon/softmax
//! distribution builders) are usable standalone, independent of the explorers.
//!
//! **Non-goals:**
//! - No model training, feature hashing, serialization, or networking: those live with the
//!   caller that wires a trained model into a `Policy`/`Scorer`.
//! - No bit-exact reproduction of any particular PRNG stream; only determinism and
//!   uniformity are contractual.
//! - No persistence or wire format: this is a pure in-process call contract.
//!
//! # Example
//!
//! ```rust
//! use explo::{Action, DecisionEngine, EpsilonGreedyExplorer, MemoryRecorder, Policy};
//!
//! struct GreedyByLength;
//!
//! // A toy policy: rank actions by a property of the context.
//! impl Policy<str> for GreedyByLength {
//!     fn choose_action(&self, ctx: &str, actions: &mut [Action]) {
//!         for (i, a) in actions.iter_mut().enumerate() {
//!             *a = i as u32 + 1;
//!         }
//!         if ctx.len() % 2 == 1 {
//!             actions.swap(0, 1);
//!         }
//!     }
//! }
//!
//! let engine = DecisionEngine::new("my-ranker", MemoryRecorder::new());
//! let explorer = EpsilonGreedyExplorer::<str, _>::new(GreedyByLength, 0.2, 4).unwrap();
//!
//! let mut actions = [0 as Action; 4];
//! let decision = engine
//!     .choose_action(&explorer, "request-123", "some context", &mut actions)
//!     .unwrap();
//!
//! assert!(decision.probability > 0.0 && decision.probability <= 1.0);
//! assert_eq!(engine.recorder().len(), 1); // epsilon-greedy logs every decision
//! ```

#![forbid(unsafe_code)]

/// A 1-based action identifier in `[1, num_actions]`.
pub type Action = u32;

/// Tolerance under which a full probability distribution must sum to 1.
pub const PROB_SUM_TOL: f32 = 1e-4;

pub const EXPLO_VERSION: &str = env!("CARGO_PKG_VERSION");

mod stable_hash;
pub use stable_hash::*;

mod rng;
pub use rng::DecisionRng;

mod error;
pub use error::{ErrorKind, ExploreError};

mod interact;
pub use interact::*;

pub mod pdf;

mod explorer;
pub use explorer::{ActionCount, ChoiceKind, Explorer, ExplorerDecision};

mod epsilon_greedy;
pub use epsilon_greedy::EpsilonGreedyExplorer;

mod softmax;
pub use softmax::SoftmaxExplorer;

mod generic;
pub use generic::GenericExplorer;

mod tau_first;
pub use tau_first::TauFirstExplorer;

mod bootstrap;
pub use bootstrap::BootstrapExplorer;

mod engine;
pub use engine::{DecisionEngine, DecisionLogRow, MemoryRecorder};
