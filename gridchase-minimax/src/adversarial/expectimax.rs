use decorum::{Infinite, N64};
use derivative::Derivative;
use gridchase_game_types::{Action, AgentIndex, RUNNER};
use tracing::info_span;

use super::{Scorable, SearchOptions, SearchableGame};
use crate::{Instruments, NoLegalActions, SearchInstruments};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Depth-limited expectimax over the round-robin agent order.
///
/// The runner turn is the same maximum as in
/// [`MinimaxAgent`](super::MinimaxAgent), but every chaser turn is a chance
/// node: each legal chaser action is weighted equally and the node's value
/// is the arithmetic mean of its children, folded in engine enumeration
/// order so the floating-point result is reproducible. Nothing prunes,
/// because an unexplored sibling can always move an average.
pub struct ExpectimaxAgent<ScorableType, InstrumentsType = Instruments> {
    #[derivative(Debug = "ignore")]
    evaluator: ScorableType,
    options: SearchOptions,
    instruments: InstrumentsType,
}

impl<ScorableType> ExpectimaxAgent<ScorableType> {
    /// Construct an agent searching the default number of rounds.
    pub fn new(evaluator: ScorableType) -> Self {
        Self::new_with_options(evaluator, Default::default())
    }

    /// Construct an agent with explicit [SearchOptions].
    pub fn new_with_options(evaluator: ScorableType, options: SearchOptions) -> Self {
        Self {
            evaluator,
            options,
            instruments: Instruments {},
        }
    }
}

impl<ScorableType, InstrumentsType> ExpectimaxAgent<ScorableType, InstrumentsType>
where
    InstrumentsType: SearchInstruments,
{
    /// Construct an agent that reports every node expansion to
    /// `instruments`.
    pub fn with_instruments(
        evaluator: ScorableType,
        options: SearchOptions,
        instruments: InstrumentsType,
    ) -> Self {
        Self {
            evaluator,
            options,
            instruments,
        }
    }

    /// Pick the expectimax action at `state`.
    ///
    /// Ties keep the first action in engine enumeration order, so rerunning
    /// on the same state always returns the same move.
    pub fn choose_action<GameType>(&self, state: &GameType) -> Result<Action, NoLegalActions>
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        info_span!(
            "expectimax",
            depth = self.options.depth,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let (score, action) = self.search(state);
            let action = action.ok_or(NoLegalActions)?;

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", format!("{:?}", score).as_str());
            current_span.record("chosen_action", format!("{}", action).as_str());

            Ok(action)
        })
    }

    /// Run the search and return the root value together with the chosen
    /// action. The action is `None` when the root was scored as a leaf
    /// instead of searched.
    pub fn search<GameType>(&self, state: &GameType) -> (N64, Option<Action>)
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        self.max_value(state, 0)
    }

    fn max_value<GameType>(&self, state: &GameType, depth: usize) -> (N64, Option<Action>)
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        if depth == self.options.depth || state.is_win() || state.is_lose() {
            return (self.evaluator.score(state), None);
        }

        let mut max_score = N64::NEG_INFINITY;
        let mut best_action = None;
        for action in state.legal_actions(RUNNER) {
            self.instruments.observe_expansion(RUNNER, depth);
            let successor = state.generate_successor(RUNNER, action);
            let score = self.expect_value(&successor, 1, depth);
            if score > max_score {
                max_score = score;
                best_action = Some(action);
            }
        }

        (max_score, best_action)
    }

    fn expect_value<GameType>(&self, state: &GameType, agent: AgentIndex, depth: usize) -> N64
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        let actions = state.legal_actions(agent);
        // A boxed-in chaser is an implicit leaf, not an error.
        if actions.is_empty() {
            return self.evaluator.score(state);
        }

        let last_chaser = agent + 1 == state.num_agents();
        let action_count = actions.len();
        let mut total_score = N64::from(0.0);
        for action in actions {
            self.instruments.observe_expansion(agent, depth);
            let successor = state.generate_successor(agent, action);
            let score = if last_chaser {
                self.max_value(&successor, depth + 1).0
            } else {
                self.expect_value(&successor, agent + 1, depth)
            };
            total_score = total_score + score;
        }

        total_score / N64::from(action_count as f64)
    }
}
