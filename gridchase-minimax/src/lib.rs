#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements bounded-depth adversarial tree search for the
//! grid-chase game: one maximizing runner against any number of chasers
//! that move after it each round. You provide an evaluation function that
//! turns a leaf state into a total-ordered float score; the agents provide
//! the tree walk.
//!
//! We lean on the `gridchase-game-types` crate for the engine contract. The
//! agents are generic over its capability traits and never see a concrete
//! board, so any engine that can enumerate actions and generate successors
//! can be searched.

use std::{error::Error, fmt};

use gridchase_game_types::AgentIndex;

pub mod adversarial;

/// Observation hook the search agents report node expansions through.
///
/// The agents call [`SearchInstruments::observe_expansion`] immediately
/// before every successor generation, which makes expansion counts and the
/// round bookkeeping visible to callers without changing the search result.
pub trait SearchInstruments {
    /// `agent` is about to be expanded after `depth` completed rounds.
    fn observe_expansion(&self, agent: AgentIndex, depth: usize);
}

impl<InstrumentsType: SearchInstruments> SearchInstruments for &InstrumentsType {
    fn observe_expansion(&self, agent: AgentIndex, depth: usize) {
        InstrumentsType::observe_expansion(self, agent, depth)
    }
}

#[derive(Debug, Clone, Copy)]
/// An empty struct that implements [SearchInstruments] as a no-op which can
/// be used when you don't want to observe the search
pub struct Instruments {}

impl SearchInstruments for Instruments {
    fn observe_expansion(&self, _agent: AgentIndex, _depth: usize) {}
}

#[derive(Debug, Copy, Clone)]
/// This type is used to represent that the runner had no legal actions, or
/// the root was already terminal, at the moment an action was requested
///
/// That situation is outside the engine contract, so it is surfaced to the
/// caller instead of silently answering with an arbitrary move.
pub struct NoLegalActions;

impl fmt::Display for NoLegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the runner has no legal actions at the searched root")
    }
}

impl Error for NoLegalActions {}

#[cfg(test)]
mod fixtures;
