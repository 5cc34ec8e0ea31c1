/// Turn bookkeeping for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Number of resolved turns. Rejected commands and resets leave it as is.
    pub turn: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter and returns the number of the turn just opened.
    pub fn advance(&mut self) -> u64 {
        self.turn += 1;
        self.turn
    }
}
