/// Everything a user can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
    ToggleMute,
    Advance,
    Retreat,
    IncrementTempo,
    DecrementTempo,
}

/// Tempo step for the increment/decrement commands.
pub const TEMPO_STEP: i32 = 1;
