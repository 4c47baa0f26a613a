//! A reflex agent chooses an action at each choice point by examining its
//! alternatives via the one-ply evaluation function, without looking any
//! deeper into the game tree.

use itertools::Itertools;
use parking_lot::Mutex;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::info_span;

use gridchase_game_types::{
    Action, ActionEnumerableGame, ChaserGettableGame, FoodGettableGame,
    RunnerPositionGettableGame, SimulableGame, RUNNER,
};
use gridchase_minimax::NoLegalActions;

use crate::eval::reflex_evaluation;

/// Zero-depth strategy: score every legal runner action with
/// [reflex_evaluation](crate::eval::reflex_evaluation) and pick uniformly
/// at random among the actions attaining the maximum.
///
/// The random source is injected so that games replay identically under a
/// fixed seed.
#[derive(Debug)]
pub struct ReflexAgent {
    rng: Mutex<StdRng>,
}

impl ReflexAgent {
    /// Construct an agent breaking ties with `rng`.
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Construct an agent whose tie-breaks replay identically for `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Pick the best immediate action at `state`.
    pub fn choose_action<GameType>(&self, state: &GameType) -> Result<Action, NoLegalActions>
    where
        GameType: ActionEnumerableGame
            + SimulableGame
            + RunnerPositionGettableGame
            + FoodGettableGame
            + ChaserGettableGame,
    {
        info_span!("reflex", chosen_action = tracing::field::Empty).in_scope(|| {
            let legal_actions = state.legal_actions(RUNNER);
            let scores = legal_actions
                .iter()
                .map(|action| reflex_evaluation(state, *action))
                .collect_vec();
            let best_score = scores.iter().copied().max().ok_or(NoLegalActions)?;

            let best_actions = legal_actions
                .iter()
                .zip(scores.iter())
                .filter(|(_, score)| **score == best_score)
                .map(|(action, _)| *action)
                .collect_vec();
            let chosen = *best_actions
                .choose(&mut *self.rng.lock())
                .expect("at least one action attains the maximum score");

            tracing::Span::current().record("chosen_action", format!("{}", chosen).as_str());

            Ok(chosen)
        })
    }
}
