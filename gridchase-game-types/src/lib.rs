#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Value types and capability traits for the grid-chase game engine.
//!
//! The engine itself lives outside this workspace. The search crates never
//! see a concrete board: they bound their type parameters on the narrow
//! capability traits defined here and the engine implements the ones it can
//! honor. Each trait covers exactly one operation, so an agent's `where`
//! clause documents precisely which parts of the engine it touches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies whose turn it is. The runner is always agent `0`; chasers are
/// `1..num_agents` and move in ascending index order within a round.
pub type AgentIndex = usize;

/// The agent index of the maximizing agent.
pub const RUNNER: AgentIndex = 0;

/// A cell on the grid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column, increasing eastward.
    pub x: i32,
    /// Row, increasing northward.
    pub y: i32,
}

impl Position {
    /// Sum of absolute coordinate differences. This is the only distance
    /// metric the evaluators use.
    pub fn manhattan_distance(&self, other: &Position) -> i64 {
        i64::from((self.x - other.x).abs()) + i64::from((self.y - other.y).abs())
    }

    /// The cell one step in the direction of `action`.
    pub fn shifted(&self, action: Action) -> Position {
        let (dx, dy) = action.vector();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One move from the closed action alphabet.
///
/// Engines enumerate these per agent, per state, in an order that is
/// significant: search tie-breaks keep the first action enumerated, so the
/// order must be stable across repeated calls on the same state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Move one cell north.
    North,
    /// Move one cell south.
    South,
    /// Move one cell east.
    East,
    /// Move one cell west.
    West,
    /// Stay on the current cell.
    Stay,
}

impl Action {
    /// All actions, in the conventional enumeration order.
    pub fn all() -> [Action; 5] {
        [
            Action::North,
            Action::South,
            Action::East,
            Action::West,
            Action::Stay,
        ]
    }

    /// A stable index for this action, matching the order of [`Action::all`].
    pub fn as_index(&self) -> usize {
        match self {
            Action::North => 0,
            Action::South => 1,
            Action::East => 2,
            Action::West => 3,
            Action::Stay => 4,
        }
    }

    /// The unit grid offset this action applies to a position.
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Action::North => (0, 1),
            Action::South => (0, -1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
            Action::Stay => (0, 0),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::North => "north",
            Action::South => "south",
            Action::East => "east",
            Action::West => "west",
            Action::Stay => "stay",
        };
        write!(f, "{}", name)
    }
}

/// Position and remaining scared turns of one chaser.
///
/// While `scared_turns` is positive the chaser poses no threat. The engine
/// owns the countdown; the search core only reads it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaserState {
    /// Where the chaser currently stands.
    pub position: Position,
    /// Turns of scaredness remaining; zero means dangerous.
    pub scared_turns: u32,
}

/// A game that knows how many agents are playing.
pub trait AgentCountableGame {
    /// Total number of agents, runner included. Always at least 1.
    fn num_agents(&self) -> usize;
}

/// A game that can enumerate the legal actions of an agent.
pub trait ActionEnumerableGame {
    /// The legal actions for `agent` at this state, possibly empty.
    ///
    /// The returned order is the tie-break order and must be stable across
    /// repeated calls on the same state.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Action>;
}

/// A game that can produce successor states.
pub trait SimulableGame: Sized {
    /// The state after `agent` takes `action`. The input state is never
    /// mutated; successors are fresh values.
    fn generate_successor(&self, agent: AgentIndex, action: Action) -> Self;

    /// The state after the runner takes `action`. Shorthand for
    /// [`SimulableGame::generate_successor`] with [`RUNNER`], used by
    /// one-ply evaluation.
    fn generate_runner_successor(&self, action: Action) -> Self {
        self.generate_successor(RUNNER, action)
    }
}

/// A game that can report whether it has been won or lost.
pub trait EndstateDeterminableGame {
    /// True if this state is a won terminal state.
    fn is_win(&self) -> bool;

    /// True if this state is a lost terminal state.
    fn is_lose(&self) -> bool;
}

/// A game with an intrinsic scalar score.
pub trait ScoreGettableGame {
    /// The score the engine would display for this state.
    fn score(&self) -> f64;
}

/// A game that can report the runner's position.
pub trait RunnerPositionGettableGame {
    /// The runner's current cell.
    fn runner_position(&self) -> Position;
}

/// A game that can enumerate the remaining food.
pub trait FoodGettableGame {
    /// Every cell that still holds food.
    fn food_positions(&self) -> Vec<Position>;
}

/// A game that can enumerate the remaining capsules.
pub trait CapsuleGettableGame {
    /// Every cell that still holds a capsule.
    fn capsule_positions(&self) -> Vec<Position>;
}

/// A game that can report its chasers.
pub trait ChaserGettableGame {
    /// One entry per chaser, in agent-index order.
    fn chaser_states(&self) -> Vec<ChaserState>;
}
