//! Depth-limited search over the round-robin agent order: the runner moves,
//! then every chaser moves once in ascending index order, and only then
//! does the depth counter tick. Three interchangeable agents share that
//! tree: [`MinimaxAgent`] assumes the chasers conspire against the runner,
//! [`AlphaBetaAgent`] computes the same answer while pruning subtrees that
//! cannot matter, and [`ExpectimaxAgent`] models the chasers as uniformly
//! random.
//!
//! All three score leaves with an injected [`Scorable`] evaluator and break
//! ties toward the first action in engine enumeration order, so a fixed
//! engine, evaluator and depth always produce the same move.
//!
//! ```rust
//! use gridchase_game_types::{
//!     Action, ActionEnumerableGame, AgentCountableGame, AgentIndex,
//!     EndstateDeterminableGame, ScoreGettableGame, SimulableGame,
//! };
//! use gridchase_minimax::adversarial::{
//!     AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent, SearchOptions,
//! };
//!
//! // A two-agent game scripted as a literal tree: the runner moves, the
//! // single chaser replies, and the round ends on the scored leaves.
//! #[derive(Debug, Clone)]
//! struct Scripted(Vec<(Action, Scripted)>, f64);
//!
//! fn leaf(value: f64) -> Scripted {
//!     Scripted(vec![], value)
//! }
//!
//! impl ActionEnumerableGame for Scripted {
//!     fn legal_actions(&self, _agent: AgentIndex) -> Vec<Action> {
//!         self.0.iter().map(|(action, _)| *action).collect()
//!     }
//! }
//!
//! impl AgentCountableGame for Scripted {
//!     fn num_agents(&self) -> usize {
//!         2
//!     }
//! }
//!
//! impl SimulableGame for Scripted {
//!     fn generate_successor(&self, _agent: AgentIndex, action: Action) -> Self {
//!         let (_, successor) = self.0.iter().find(|(a, _)| *a == action).unwrap();
//!         successor.clone()
//!     }
//! }
//!
//! impl EndstateDeterminableGame for Scripted {
//!     fn is_win(&self) -> bool {
//!         false
//!     }
//!
//!     fn is_lose(&self) -> bool {
//!         false
//!     }
//! }
//!
//! impl ScoreGettableGame for Scripted {
//!     fn score(&self) -> f64 {
//!         self.1
//!     }
//! }
//!
//! // This is the evaluation function that scores the leaves of the search
//! // tree. Here it just reads the engine score back out.
//! fn score_evaluation(state: &Scripted) -> decorum::N64 {
//!     state.score().into()
//! }
//!
//! let root = Scripted(
//!     vec![
//!         (
//!             Action::North,
//!             Scripted(
//!                 vec![
//!                     (Action::North, leaf(3.0)),
//!                     (Action::South, leaf(5.0)),
//!                 ],
//!                 0.0,
//!             ),
//!         ),
//!         (
//!             Action::South,
//!             Scripted(
//!                 vec![
//!                     (Action::North, leaf(2.0)),
//!                     (Action::South, leaf(9.0)),
//!                 ],
//!                 0.0,
//!             ),
//!         ),
//!     ],
//!     0.0,
//! );
//!
//! let options = SearchOptions { depth: 1 };
//!
//! // The adversarial chaser answers North with min(3, 5) = 3 and South
//! // with min(2, 9) = 2, so the runner goes North.
//! let minimax = MinimaxAgent::new_with_options(score_evaluation, options);
//! assert_eq!(minimax.choose_action(&root).unwrap(), Action::North);
//!
//! // Pruning never changes the answer, only the number of nodes expanded.
//! let alphabeta = AlphaBetaAgent::new_with_options(score_evaluation, options);
//! assert_eq!(alphabeta.choose_action(&root).unwrap(), Action::North);
//!
//! // A uniformly random chaser averages instead: (3 + 5) / 2 = 4 under
//! // North but (2 + 9) / 2 = 5.5 under South, so the runner goes South.
//! let expectimax = ExpectimaxAgent::new_with_options(score_evaluation, options);
//! assert_eq!(expectimax.choose_action(&root).unwrap(), Action::South);
//! ```

use gridchase_game_types::{
    ActionEnumerableGame, AgentCountableGame, EndstateDeterminableGame, SimulableGame,
};

mod score;
pub use score::Scorable;

mod minimax;
pub use minimax::MinimaxAgent;

mod alphabeta;
pub use alphabeta::AlphaBetaAgent;

mod expectimax;
pub use expectimax::ExpectimaxAgent;

/// The combined engine surface the adversarial agents search against.
///
/// Blanket-implemented for every game that provides the four capabilities,
/// so engines implement the narrow traits and get this one for free.
pub trait SearchableGame:
    ActionEnumerableGame + AgentCountableGame + SimulableGame + EndstateDeterminableGame
{
}

impl<GameType> SearchableGame for GameType where
    GameType: ActionEnumerableGame + AgentCountableGame + SimulableGame + EndstateDeterminableGame
{
}

#[derive(Debug, Clone, Copy)]
/// Construction-time options shared by the adversarial search agents
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use gridchase_minimax::adversarial::SearchOptions;
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// ```
pub struct SearchOptions {
    /// How many full rounds (one runner move plus one move from every
    /// chaser) to search before leaves are handed to the evaluator.
    pub depth: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { depth: 2 }
    }
}
