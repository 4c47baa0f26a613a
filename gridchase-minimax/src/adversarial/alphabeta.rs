use std::cmp::{max, min};

use decorum::{Infinite, N64};
use derivative::Derivative;
use gridchase_game_types::{Action, AgentIndex, RUNNER};
use tracing::info_span;

use super::{Scorable, SearchOptions, SearchableGame};
use crate::{Instruments, NoLegalActions, SearchInstruments};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// [`MinimaxAgent`](super::MinimaxAgent) with alpha-beta pruning.
///
/// The same tree, the same tie-breaks and the same answer, but sibling
/// subtrees that can no longer change the root decision are skipped. The
/// cutoff comparisons are deliberately strict (`>` and `<`, not `>=` and
/// `<=`): a child that merely equals the incoming bound does not prune, so
/// node-expansion counts are reproducible against that convention.
pub struct AlphaBetaAgent<ScorableType, InstrumentsType = Instruments> {
    #[derivative(Debug = "ignore")]
    evaluator: ScorableType,
    options: SearchOptions,
    instruments: InstrumentsType,
}

impl<ScorableType> AlphaBetaAgent<ScorableType> {
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

impl<ScorableType, InstrumentsType> AlphaBetaAgent<ScorableType, InstrumentsType>
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

    /// Pick the minimax action at `state`, pruning as it goes.
    ///
    /// For any state, depth and evaluator this returns exactly the action
    /// [`MinimaxAgent`](super::MinimaxAgent) would; only the number of
    /// expanded nodes differs.
    pub fn choose_action<GameType>(&self, state: &GameType) -> Result<Action, NoLegalActions>
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        info_span!(
            "alphabeta",
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
        self.max_value(state, 0, N64::NEG_INFINITY, N64::INFINITY)
    }

    fn max_value<GameType>(
        &self,
        state: &GameType,
        depth: usize,
        alpha: N64,
        beta: N64,
    ) -> (N64, Option<Action>)
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        if depth == self.options.depth || state.is_win() || state.is_lose() {
            return (self.evaluator.score(state), None);
        }

        let mut alpha = alpha;
        let mut max_score = N64::NEG_INFINITY;
        let mut best_action = None;
        for action in state.legal_actions(RUNNER) {
            self.instruments.observe_expansion(RUNNER, depth);
            let successor = state.generate_successor(RUNNER, action);
            let score = self.min_value(&successor, 1, depth, alpha, beta);
            if score > max_score {
                max_score = score;
                best_action = Some(action);
            }
            if max_score > beta {
                return (max_score, best_action);
            }
            alpha = max(alpha, max_score);
        }

        (max_score, best_action)
    }

    fn min_value<GameType>(
        &self,
        state: &GameType,
        agent: AgentIndex,
        depth: usize,
        alpha: N64,
        beta: N64,
    ) -> N64
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        let actions = state.legal_actions(agent);
        // A boxed-in chaser is an implicit leaf, not an error.
        if actions.is_empty() {
            return self.evaluator.score(state);
        }

        let mut beta = beta;
        let last_chaser = agent + 1 == state.num_agents();
        let mut min_score = N64::INFINITY;
        for action in actions {
            self.instruments.observe_expansion(agent, depth);
            let successor = state.generate_successor(agent, action);
            let score = if last_chaser {
                self.max_value(&successor, depth + 1, alpha, beta).0
            } else {
                self.min_value(&successor, agent + 1, depth, alpha, beta)
            };
            if score < min_score {
                min_score = score;
            }
            if min_score < alpha {
                return min_score;
            }
            beta = min(beta, min_score);
        }

        min_score
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::adversarial::MinimaxAgent;
    use crate::fixtures::{
        random_tree, scenario_tree, score_evaluation, CountingInstruments, TreeGame, TreeNode,
    };

    #[test]
    fn prunes_the_worked_scenario_without_changing_the_answer() {
        let game = scenario_tree();
        let counter = CountingInstruments::default();
        let agent = AlphaBetaAgent::with_instruments(
            score_evaluation,
            SearchOptions { depth: 1 },
            &counter,
        );

        let (score, action) = agent.search(&game);

        assert_eq!(action, Some(Action::North));
        assert_eq!(score, N64::from(3.0));
        // The second branch is cut after its first reply: min(2, ..) can
        // never beat the alpha of 3 established under North.
        assert_eq!(counter.expansions(), 5);
    }

    #[test]
    fn a_child_equal_to_the_bound_does_not_prune() {
        // Same shape as the worked scenario, but the first reply under
        // South scores exactly alpha = 3. The strict `<` keeps expanding.
        let game = TreeGame::new(
            2,
            TreeNode::Branch(vec![
                (
                    Action::North,
                    TreeNode::Branch(vec![
                        (Action::North, TreeNode::Leaf(3.0)),
                        (Action::South, TreeNode::Leaf(5.0)),
                    ]),
                ),
                (
                    Action::South,
                    TreeNode::Branch(vec![
                        (Action::North, TreeNode::Leaf(3.0)),
                        (Action::South, TreeNode::Leaf(9.0)),
                    ]),
                ),
            ]),
        );
        let counter = CountingInstruments::default();
        let agent = AlphaBetaAgent::with_instruments(
            score_evaluation,
            SearchOptions { depth: 1 },
            &counter,
        );

        let (score, action) = agent.search(&game);

        assert_eq!(action, Some(Action::North));
        assert_eq!(score, N64::from(3.0));
        assert_eq!(counter.expansions(), 6);
    }

    #[test]
    fn matches_minimax_on_random_trees() {
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let num_agents = rng.gen_range(2..=3);
            let rounds = rng.gen_range(1..=2);
            let game = random_tree(&mut rng, num_agents, rounds);
            let options = SearchOptions { depth: rounds };

            let minimax_counter = CountingInstruments::default();
            let minimax =
                MinimaxAgent::with_instruments(score_evaluation, options, &minimax_counter);
            let alphabeta_counter = CountingInstruments::default();
            let alphabeta =
                AlphaBetaAgent::with_instruments(score_evaluation, options, &alphabeta_counter);

            assert_eq!(
                alphabeta.search(&game),
                minimax.search(&game),
                "seed {} diverged",
                seed
            );
            assert!(
                alphabeta_counter.expansions() <= minimax_counter.expansions(),
                "seed {} expanded more nodes than plain minimax",
                seed
            );
        }
    }

    #[test]
    fn cutoffs_expand_strictly_fewer_nodes() {
        let game = scenario_tree();
        let minimax_counter = CountingInstruments::default();
        MinimaxAgent::with_instruments(
            score_evaluation,
            SearchOptions { depth: 1 },
            &minimax_counter,
        )
        .search(&game);
        let alphabeta_counter = CountingInstruments::default();
        AlphaBetaAgent::with_instruments(
            score_evaluation,
            SearchOptions { depth: 1 },
            &alphabeta_counter,
        )
        .search(&game);

        assert!(alphabeta_counter.expansions() < minimax_counter.expansions());
    }
}
