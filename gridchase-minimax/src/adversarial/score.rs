use decorum::N64;

/// This trait is used to control something that can turn a leaf game state
/// into a score
///
/// We use this trait to be able to swap evaluation functions without
/// touching the agents. Scores are total-ordered floats: infinities are
/// legal (the bundled one-ply heuristic uses them as veto values), NaN is
/// not.
pub trait Scorable<GameType> {
    /// Convert the given state into a leaf score.
    fn score(&self, state: &GameType) -> N64;
}

impl<GameType, FnLike: Fn(&GameType) -> N64> Scorable<GameType> for FnLike {
    fn score(&self, state: &GameType) -> N64 {
        (self)(state)
    }
}
