//! A minimal walls-free board used by the unit tests. Real engines live
//! outside the workspace; this one implements just enough of the contract
//! to exercise the evaluators and agents.

use serde::Deserialize;

use gridchase_game_types::{
    Action, ActionEnumerableGame, AgentCountableGame, AgentIndex, CapsuleGettableGame,
    ChaserGettableGame, ChaserState, EndstateDeterminableGame, FoodGettableGame, Position,
    RunnerPositionGettableGame, ScoreGettableGame, SimulableGame, RUNNER,
};

#[derive(Debug, Clone, Deserialize)]
pub struct GridGame {
    pub runner: Position,
    pub chasers: Vec<ChaserState>,
    pub food: Vec<Position>,
    #[serde(default)]
    pub capsules: Vec<Position>,
    #[serde(default)]
    pub score: f64,
}

impl GridGame {
    /// An empty board with only the runner on it.
    pub fn open(runner: Position) -> Self {
        Self {
            runner,
            chasers: vec![],
            food: vec![],
            capsules: vec![],
            score: 0.0,
        }
    }
}

impl AgentCountableGame for GridGame {
    fn num_agents(&self) -> usize {
        1 + self.chasers.len()
    }
}

impl ActionEnumerableGame for GridGame {
    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Action> {
        Action::all().to_vec()
    }
}

impl SimulableGame for GridGame {
    fn generate_successor(&self, agent: AgentIndex, action: Action) -> Self {
        let mut next = self.clone();
        if agent == RUNNER {
            next.runner = self.runner.shifted(action);
            if let Some(eaten) = next.food.iter().position(|food| *food == next.runner) {
                next.food.remove(eaten);
                next.score += 10.0;
            }
            if let Some(eaten) = next.capsules.iter().position(|c| *c == next.runner) {
                next.capsules.remove(eaten);
                for chaser in &mut next.chasers {
                    chaser.scared_turns = 40;
                }
            }
            next.score -= 1.0;
        } else {
            let chaser = &mut next.chasers[agent - 1];
            chaser.position = chaser.position.shifted(action);
            chaser.scared_turns = chaser.scared_turns.saturating_sub(1);
        }

        next
    }
}

impl EndstateDeterminableGame for GridGame {
    fn is_win(&self) -> bool {
        self.food.is_empty()
    }

    fn is_lose(&self) -> bool {
        self.chasers
            .iter()
            .any(|chaser| chaser.scared_turns == 0 && chaser.position == self.runner)
    }
}

impl ScoreGettableGame for GridGame {
    fn score(&self) -> f64 {
        self.score
    }
}

impl RunnerPositionGettableGame for GridGame {
    fn runner_position(&self) -> Position {
        self.runner
    }
}

impl FoodGettableGame for GridGame {
    fn food_positions(&self) -> Vec<Position> {
        self.food.clone()
    }
}

impl CapsuleGettableGame for GridGame {
    fn capsule_positions(&self) -> Vec<Position> {
        self.capsules.clone()
    }
}

impl ChaserGettableGame for GridGame {
    fn chaser_states(&self) -> Vec<ChaserState> {
        self.chasers.clone()
    }
}
