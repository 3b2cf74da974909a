use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::scene::SceneResult;

/// Item name -> quantity. Every present key holds a strictly positive
/// count; items that drop to zero or below are removed, never stored.
pub type Inventory = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    pub location: String,
    pub fortification: i64,
}

/// The full client-side game state. Replaced wholesale every accepted
/// turn; lives only for a single session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub story: String,
    pub choices: Vec<Choice>,
    pub inventory: Inventory,
    pub base: Base,
    pub is_game_over: bool,
    pub game_over_text: String,
}

impl GameState {
    /// State at the start of a fresh run: the opening scene's story and
    /// choices, an empty inventory, and the fixed starting base.
    pub fn start_of_run(scene: SceneResult) -> Self {
        Self {
            story: scene.story,
            choices: scene.choices,
            inventory: Inventory::new(),
            base: Base {
                location: "Abandoned Warehouse".to_string(),
                fortification: 0,
            },
            is_game_over: false,
            game_over_text: String::new(),
        }
    }
}
