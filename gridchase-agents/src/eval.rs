//! The bundled evaluation functions and the name registry the agents are
//! configured through.

use std::error::Error;
use std::fmt;

use decorum::{Infinite, N64};
use itertools::Itertools;

use gridchase_game_types::{
    Action, CapsuleGettableGame, ChaserGettableGame, FoodGettableGame,
    RunnerPositionGettableGame, ScoreGettableGame, SimulableGame,
};

/// The engine surface the bundled evaluation functions read.
///
/// Blanket-implemented, like
/// [`SearchableGame`](gridchase_minimax::adversarial::SearchableGame).
pub trait EvaluatableGame:
    ScoreGettableGame
    + RunnerPositionGettableGame
    + FoodGettableGame
    + ChaserGettableGame
    + CapsuleGettableGame
{
}

impl<GameType> EvaluatableGame for GameType where
    GameType: ScoreGettableGame
        + RunnerPositionGettableGame
        + FoodGettableGame
        + ChaserGettableGame
        + CapsuleGettableGame
{
}

/// A state evaluation function as stored by the registry.
pub type EvalFn<GameType> = fn(&GameType) -> N64;

/// The evaluator name the search agents fall back to.
pub const DEFAULT_EVALUATOR: &str = "score";

/// Returns the state's intrinsic score unmodified.
///
/// This is the same score the engine would display, and the default leaf
/// estimator for depth-limited adversarial search.
pub fn score_evaluation<GameType: ScoreGettableGame>(state: &GameType) -> N64 {
    state.score().into()
}

/// One-ply heuristic for the reflex agent: score the state that taking
/// `action` would lead to.
///
/// A wasted move (the runner ends where it started) or a move that ends
/// within one cell of any chaser is vetoed with negative infinity; a move
/// onto the last food wins and scores positive infinity. Everything else
/// prefers fewer remaining food cells and a shorter total food distance,
/// plus a small bonus for having scared chasers on the clock.
pub fn reflex_evaluation<GameType>(state: &GameType, action: Action) -> N64
where
    GameType: SimulableGame + RunnerPositionGettableGame + FoodGettableGame + ChaserGettableGame,
{
    let successor = state.generate_runner_successor(action);
    let new_position = successor.runner_position();
    let chasers = successor.chaser_states();

    let food_distances = successor
        .food_positions()
        .iter()
        .map(|food| food.manhattan_distance(&new_position))
        .collect_vec();
    let near_chaser = chasers
        .iter()
        .any(|chaser| chaser.position.manhattan_distance(&new_position) < 2);

    if state.runner_position() == new_position || near_chaser {
        return N64::NEG_INFINITY;
    }
    if food_distances.is_empty() {
        return N64::INFINITY;
    }

    let distance_sum: i64 = food_distances.iter().sum();
    let scared_sum: u32 = chasers.iter().map(|chaser| chaser.scared_turns).sum();

    let mut score = N64::from(1000.0) / N64::from(distance_sum as f64)
        + N64::from(10000.0) / N64::from(food_distances.len() as f64);
    if scared_sum > 0 {
        score = score + N64::from(100.0) / N64::from(f64::from(scared_sum));
    }

    score
}

/// Multi-feature leaf estimator for deeper search.
///
/// Starts from the raw score, rewards being near (many) food cells,
/// penalizes being near chasers and penalizes leaving capsules on the
/// board. The 0.1 summand keeps the chaser term finite when a chaser
/// stands on the runner's cell.
pub fn feature_evaluation<GameType: EvaluatableGame>(state: &GameType) -> N64 {
    let position = state.runner_position();

    let mut score = N64::from(state.score());
    for food in state.food_positions() {
        score = score + N64::from(1.0) / N64::from(food.manhattan_distance(&position) as f64);
    }
    for chaser in state.chaser_states() {
        score = score
            - N64::from(1.0)
                / N64::from(chaser.position.manhattan_distance(&position) as f64 + 0.1);
    }

    score - N64::from(state.capsule_positions().len() as f64)
}

/// Resolve an evaluator name to its implementation.
///
/// This is a plain lookup populated at compile time; nothing is evaluated
/// dynamically. `"score"` is [score_evaluation], `"feature"` (historically
/// also `"better"`) is [feature_evaluation].
pub fn evaluator_by_name<GameType: EvaluatableGame>(name: &str) -> Option<EvalFn<GameType>> {
    match name {
        "score" => Some(score_evaluation::<GameType> as EvalFn<GameType>),
        "feature" | "better" => Some(feature_evaluation::<GameType> as EvalFn<GameType>),
        _ => None,
    }
}

/// The evaluator name handed to a factory did not resolve.
#[derive(Debug, Clone)]
pub struct UnknownEvaluator {
    /// The name that failed to resolve.
    pub name: String,
}

impl fmt::Display for UnknownEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no evaluation function is registered as {:?}", self.name)
    }
}

impl Error for UnknownEvaluator {}
