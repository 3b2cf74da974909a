use crate::model::game_state::GameState;

pub enum EngineCommand {
    /// Start (or restart) a run from the fixed scenario seed.
    StartGame,
    /// Play the chosen action's machine prompt against the current state.
    Choose { prompt: String },
}

pub enum EngineResponse {
    /// The full next state after a turn resolved. Failures never get a
    /// variant of their own: the requester folds them into a terminal
    /// fallback scene, so this is the only thing the UI ever receives.
    SceneReady { state: GameState },
}
