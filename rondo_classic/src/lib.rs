//! Classic games played on the rondo engine:
//! 1. [Rock-paper-scissors](https://en.wikipedia.org/wiki/Rock_paper_scissors), two agents with zero sum matrix,
//! 2. [Prisoners' dilemma](https://en.wikipedia.org/wiki/Prisoner's_dilemma), two agents with symmetric reward table,
//! 3. [Tragedy of the commons](https://en.wikipedia.org/wiki/Tragedy_of_the_commons), many agents sharing a resource pool.

/// Module for definition of identifiers and errors shared by classic games.
pub mod domain;
/// Generic two player game driven by pairwise reward policy.
pub mod pairwise;
/// Rock-paper-scissors.
pub mod rps;
/// Iterated prisoners' dilemma.
pub mod prisoners;
/// Tragedy of the commons.
pub mod commons;
/// Module for classic policies definitions
pub mod policy;
