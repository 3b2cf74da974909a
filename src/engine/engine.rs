use std::sync::mpsc::{Receiver, Sender};

use crate::engine::llm_client::LlmClient;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::reconcile::reconcile;
use crate::engine::requester;
use crate::model::game_state::GameState;

/// Owns the single authoritative GameState and the network client.
/// Runs on its own thread; commands arrive one at a time and each is
/// resolved fully before the next is read, so exactly one request is
/// ever outstanding.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    client: LlmClient,
    state: Option<GameState>,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        client: LlmClient,
    ) -> Self {
        Self {
            rx,
            tx,
            client,
            state: None,
        }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::StartGame => {
                    let scene = requester::request_initial_scene(&self.client);
                    let state = GameState::start_of_run(scene);
                    self.state = Some(state.clone());
                    let _ = self.tx.send(EngineResponse::SceneReady { state });
                }

                EngineCommand::Choose { prompt } => {
                    let Some(previous) = &self.state else {
                        tracing::warn!("choice received before any game started, ignoring");
                        continue;
                    };

                    let scene =
                        requester::request_next_scene(&self.client, &prompt, previous);
                    let next = reconcile(previous, scene);
                    self.state = Some(next.clone());
                    let _ = self.tx.send(EngineResponse::SceneReady { state: next });
                }
            }
        }
    }
}
