//! Scripted games and observing instruments for the unit tests.

use std::cell::{Cell, RefCell};

use decorum::N64;
use gridchase_game_types::{
    Action, ActionEnumerableGame, AgentCountableGame, AgentIndex, EndstateDeterminableGame,
    ScoreGettableGame, SimulableGame,
};
use itertools::Itertools;
use rand::{rngs::StdRng, Rng};

use crate::SearchInstruments;

/// One node of a scripted game tree.
#[derive(Debug, Clone)]
pub enum TreeNode {
    /// An inner node: the moving agent's actions and their subtrees, in
    /// enumeration order.
    Branch(Vec<(Action, TreeNode)>),
    /// A node with no legal actions and a fixed evaluator score.
    Leaf(f64),
}

/// A game whose transitions are read off a literal tree. The tree level
/// implies whose turn it is, so transitions ignore the agent index the
/// search passes in.
#[derive(Debug, Clone)]
pub struct TreeGame {
    num_agents: usize,
    node: TreeNode,
}

impl TreeGame {
    pub fn new(num_agents: usize, node: TreeNode) -> Self {
        Self { num_agents, node }
    }
}

impl ActionEnumerableGame for TreeGame {
    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Action> {
        match &self.node {
            TreeNode::Branch(children) => children.iter().map(|(action, _)| *action).collect(),
            TreeNode::Leaf(_) => vec![],
        }
    }
}

impl AgentCountableGame for TreeGame {
    fn num_agents(&self) -> usize {
        self.num_agents
    }
}

impl SimulableGame for TreeGame {
    fn generate_successor(&self, _agent: AgentIndex, action: Action) -> Self {
        let TreeNode::Branch(children) = &self.node else {
            panic!("a leaf was asked for a successor");
        };
        let child = children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, child)| child.clone())
            .expect("the scripted tree was asked for an unknown action");

        TreeGame::new(self.num_agents, child)
    }
}

impl EndstateDeterminableGame for TreeGame {
    fn is_win(&self) -> bool {
        false
    }

    fn is_lose(&self) -> bool {
        false
    }
}

impl ScoreGettableGame for TreeGame {
    fn score(&self) -> f64 {
        match &self.node {
            TreeNode::Branch(_) => 0.0,
            TreeNode::Leaf(value) => *value,
        }
    }
}

/// The raw-score leaf evaluator the search tests run with.
pub fn score_evaluation(state: &TreeGame) -> N64 {
    state.score().into()
}

/// Counts how many successors the search generated.
#[derive(Debug, Default)]
pub struct CountingInstruments {
    expansions: Cell<usize>,
}

impl CountingInstruments {
    pub fn expansions(&self) -> usize {
        self.expansions.get()
    }
}

impl SearchInstruments for CountingInstruments {
    fn observe_expansion(&self, _agent: AgentIndex, _depth: usize) {
        self.expansions.set(self.expansions.get() + 1);
    }
}

/// Records every `(agent, depth)` expansion in search order.
#[derive(Debug, Default)]
pub struct RecordingInstruments {
    events: RefCell<Vec<(AgentIndex, usize)>>,
}

impl RecordingInstruments {
    pub fn events(&self) -> Vec<(AgentIndex, usize)> {
        self.events.borrow().clone()
    }
}

impl SearchInstruments for RecordingInstruments {
    fn observe_expansion(&self, agent: AgentIndex, depth: usize) {
        self.events.borrow_mut().push((agent, depth));
    }
}

/// The two-agent tree from the module docs: North is answered by replies
/// worth 3 or 5, South by replies worth 2 or 9.
pub fn scenario_tree() -> TreeGame {
    TreeGame::new(
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
                    (Action::North, TreeNode::Leaf(2.0)),
                    (Action::South, TreeNode::Leaf(9.0)),
                ]),
            ),
        ]),
    )
}

/// A tree with exactly one action per node, deep enough for `rounds` full
/// rounds of `num_agents` agents. Useful for asserting the expansion order.
pub fn chain_tree(num_agents: usize, rounds: usize) -> TreeGame {
    let mut node = TreeNode::Leaf(1.0);
    for _ in 0..rounds * num_agents {
        node = TreeNode::Branch(vec![(Action::North, node)]);
    }

    TreeGame::new(num_agents, node)
}

/// A seeded arbitrary tree covering `rounds` full rounds: uneven branching,
/// occasional boxed-in agents, integer leaf scores.
pub fn random_tree(rng: &mut StdRng, num_agents: usize, rounds: usize) -> TreeGame {
    fn subtree(rng: &mut StdRng, levels_left: usize) -> TreeNode {
        // Now and then an agent is boxed in before the depth limit.
        if levels_left == 0 || rng.gen_ratio(1, 12) {
            return TreeNode::Leaf(f64::from(rng.gen_range(-50..=50)));
        }

        let branching = rng.gen_range(1..=3);
        let children = Action::all()
            .into_iter()
            .take(branching)
            .map(|action| (action, subtree(rng, levels_left - 1)))
            .collect_vec();

        TreeNode::Branch(children)
    }

    let levels = rounds * num_agents;
    let children = Action::all()
        .into_iter()
        .take(rng.gen_range(2..=3))
        .map(|action| (action, subtree(rng, levels - 1)))
        .collect_vec();

    TreeGame::new(num_agents, TreeNode::Branch(children))
}
