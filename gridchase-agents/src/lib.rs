//! Agent collection for the grid-chase engine contract.
//!
//! The adversarial searchers live in the `gridchase-minimax` crate; this
//! crate supplies the evaluation functions they are configured with, the
//! zero-depth [ReflexAgent], and the name registries a launcher resolves
//! agents and evaluators through.

pub use gridchase_game_types::Action;
pub use gridchase_minimax::adversarial::{
    AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent, SearchOptions,
};

use gridchase_game_types::{
    ActionEnumerableGame, ChaserGettableGame, FoodGettableGame, RunnerPositionGettableGame,
    SimulableGame,
};
use gridchase_minimax::adversarial::{Scorable, SearchableGame};
use gridchase_minimax::SearchInstruments;
use rand::{rngs::StdRng, SeedableRng};

pub mod eval;
pub mod reflex;

#[cfg(test)]
mod fixtures;

pub use eval::{
    evaluator_by_name, feature_evaluation, reflex_evaluation, score_evaluation, EvalFn,
    EvaluatableGame, UnknownEvaluator, DEFAULT_EVALUATOR,
};
pub use reflex::ReflexAgent;

/// A ready-to-play agent behind the common interface.
pub type BoxedAgent<GameType> = Box<dyn ChaseAI<GameType> + Send + Sync>;

/// A boxed [AgentFactory].
pub type BoxedFactory<GameType> = Box<dyn AgentFactory<GameType> + Send + Sync>;

/// The interface a launcher drives: given the current state, hand back one
/// action.
pub trait ChaseAI<GameType> {
    /// Pick an action at `state`.
    fn choose_action(
        &self,
        state: &GameType,
    ) -> Result<Action, Box<dyn std::error::Error + Send + Sync>>;
}

impl<GameType, ScorableType, InstrumentsType> ChaseAI<GameType>
    for MinimaxAgent<ScorableType, InstrumentsType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
    InstrumentsType: SearchInstruments,
{
    fn choose_action(
        &self,
        state: &GameType,
    ) -> Result<Action, Box<dyn std::error::Error + Send + Sync>> {
        Ok(MinimaxAgent::choose_action(self, state)?)
    }
}

impl<GameType, ScorableType, InstrumentsType> ChaseAI<GameType>
    for AlphaBetaAgent<ScorableType, InstrumentsType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
    InstrumentsType: SearchInstruments,
{
    fn choose_action(
        &self,
        state: &GameType,
    ) -> Result<Action, Box<dyn std::error::Error + Send + Sync>> {
        Ok(AlphaBetaAgent::choose_action(self, state)?)
    }
}

impl<GameType, ScorableType, InstrumentsType> ChaseAI<GameType>
    for ExpectimaxAgent<ScorableType, InstrumentsType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
    InstrumentsType: SearchInstruments,
{
    fn choose_action(
        &self,
        state: &GameType,
    ) -> Result<Action, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ExpectimaxAgent::choose_action(self, state)?)
    }
}

impl<GameType> ChaseAI<GameType> for ReflexAgent
where
    GameType: ActionEnumerableGame
        + SimulableGame
        + RunnerPositionGettableGame
        + FoodGettableGame
        + ChaserGettableGame,
{
    fn choose_action(
        &self,
        state: &GameType,
    ) -> Result<Action, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ReflexAgent::choose_action(self, state)?)
    }
}

/// Builds agents by name so a launcher can select a strategy without
/// knowing any concrete type.
pub trait AgentFactory<GameType> {
    /// The name this agent is selected by.
    fn name(&self) -> String;

    /// Build an agent using the named evaluation function and `options`.
    fn create(
        &self,
        evaluator_name: &str,
        options: SearchOptions,
    ) -> Result<BoxedAgent<GameType>, UnknownEvaluator>;
}

/// Builds [ReflexAgent]s. The reflex agent carries its own one-ply
/// heuristic, so the evaluator name is ignored; the optional seed makes
/// the built agents replay identically.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflexFactory {
    /// Seed for the built agents' tie-break RNG; entropy when `None`.
    pub seed: Option<u64>,
}

impl<GameType> AgentFactory<GameType> for ReflexFactory
where
    GameType: ActionEnumerableGame
        + SimulableGame
        + RunnerPositionGettableGame
        + FoodGettableGame
        + ChaserGettableGame
        + 'static,
{
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    fn create(
        &self,
        _evaluator_name: &str,
        _options: SearchOptions,
    ) -> Result<BoxedAgent<GameType>, UnknownEvaluator> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Box::new(ReflexAgent::new(rng)))
    }
}

/// Builds [MinimaxAgent]s over a registry evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxFactory;

impl<GameType> AgentFactory<GameType> for MinimaxFactory
where
    GameType: SearchableGame + EvaluatableGame + 'static,
{
    fn name(&self) -> String {
        "minimax".to_owned()
    }

    fn create(
        &self,
        evaluator_name: &str,
        options: SearchOptions,
    ) -> Result<BoxedAgent<GameType>, UnknownEvaluator> {
        let evaluator = resolve::<GameType>(evaluator_name)?;

        Ok(Box::new(MinimaxAgent::new_with_options(evaluator, options)))
    }
}

/// Builds [AlphaBetaAgent]s over a registry evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBetaFactory;

impl<GameType> AgentFactory<GameType> for AlphaBetaFactory
where
    GameType: SearchableGame + EvaluatableGame + 'static,
{
    fn name(&self) -> String {
        "alphabeta".to_owned()
    }

    fn create(
        &self,
        evaluator_name: &str,
        options: SearchOptions,
    ) -> Result<BoxedAgent<GameType>, UnknownEvaluator> {
        let evaluator = resolve::<GameType>(evaluator_name)?;

        Ok(Box::new(AlphaBetaAgent::new_with_options(
            evaluator, options,
        )))
    }
}

/// Builds [ExpectimaxAgent]s over a registry evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectimaxFactory;

impl<GameType> AgentFactory<GameType> for ExpectimaxFactory
where
    GameType: SearchableGame + EvaluatableGame + 'static,
{
    fn name(&self) -> String {
        "expectimax".to_owned()
    }

    fn create(
        &self,
        evaluator_name: &str,
        options: SearchOptions,
    ) -> Result<BoxedAgent<GameType>, UnknownEvaluator> {
        let evaluator = resolve::<GameType>(evaluator_name)?;

        Ok(Box::new(ExpectimaxAgent::new_with_options(
            evaluator, options,
        )))
    }
}

fn resolve<GameType: EvaluatableGame>(name: &str) -> Result<EvalFn<GameType>, UnknownEvaluator> {
    evaluator_by_name::<GameType>(name).ok_or_else(|| UnknownEvaluator {
        name: name.to_owned(),
    })
}

/// Every bundled agent factory, in registry order.
pub fn all_factories<GameType>() -> Vec<BoxedFactory<GameType>>
where
    GameType: SearchableGame + EvaluatableGame + 'static,
{
    vec![
        Box::new(ReflexFactory::default()),
        Box::new(MinimaxFactory),
        Box::new(AlphaBetaFactory),
        Box::new(ExpectimaxFactory),
    ]
}
