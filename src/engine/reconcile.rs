use crate::model::game_state::GameState;
use crate::model::scene::SceneResult;

/// Folds a scene result into the previous state, producing the next
/// state. Pure: `previous` is never mutated, so the UI can keep
/// reading the old state while a transition is in flight.
///
/// - inventory deltas are additive; any item landing at or below zero
///   is removed rather than stored
/// - base changes are a shallow override, never additive
/// - story, choices, and the game-over fields replace wholesale
pub fn reconcile(previous: &GameState, result: SceneResult) -> GameState {
    let mut inventory = previous.inventory.clone();
    if let Some(changes) = &result.inventory_changes {
        for (item, delta) in changes {
            let quantity = inventory.get(item).copied().unwrap_or(0) + delta;
            if quantity > 0 {
                inventory.insert(item.clone(), quantity);
            } else {
                inventory.remove(item);
            }
        }
    }

    let mut base = previous.base.clone();
    if let Some(changes) = result.base_changes {
        if let Some(location) = changes.location {
            base.location = location;
        }
        if let Some(fortification) = changes.fortification {
            base.fortification = fortification;
        }
    }

    GameState {
        story: result.story,
        choices: result.choices,
        inventory,
        base,
        is_game_over: result.is_game_over,
        game_over_text: result.game_over_text,
    }
}
