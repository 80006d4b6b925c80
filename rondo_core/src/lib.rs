//! # rondo
//!
//! Engine for small turn based games played by many agents.
//! Agents act one after another in a fixed cyclic order, once every agent of a round
//! has acted the joint action is mapped to rewards, and the episode keeps per agent
//! bookkeeping (cumulative rewards, termination and truncation flags) until it is drained.
//!
//! The engine is strictly sequential and deterministic: given the same seed and the same
//! sequence of actions it produces the same episode.
//!
//! ## Layout
//! - [`domain`] - scheme binding together action, agent and reward types,
//! - [`env`] - turn scheduler, round buffer, episode lifecycle and the generic environment,
//! - [`payoff`] - payoff table and reward policies,
//! - [`pool`] - shared resource grid used by resource games.
//! ## Licence: MIT

/// Traits and generic implementations of agent (player) side.
pub mod agent;
/// Generic structs binding types used between _agents_ and _environment_.
pub mod domain;
/// Structures used for error handling in the engine.
pub mod error;
/// Turn scheduling, round collection, episode bookkeeping and the environment itself.
pub mod env;
/// Payoff tables and policies reducing payoff signals to rewards.
pub mod payoff;
/// Shared resource grid.
pub mod pool;
/// Episode configuration.
pub mod config;
