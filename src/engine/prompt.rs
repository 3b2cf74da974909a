use crate::model::game_state::{GameState, Inventory};

/// Fixed scenario seed for a fresh run.
pub const INITIAL_PROMPT: &str = "Start a new game. I've just woken up in an abandoned warehouse with no memory of how I got here. The city outside is eerily quiet. This warehouse will be my initial base.";

/// Builds the per-turn prompt: current state serialized inline, then
/// the player's chosen action verbatim.
pub fn turn_prompt(action_prompt: &str, state: &GameState) -> String {
    let mut prompt = String::new();

    prompt.push_str("CURRENT STATE:\n");
    prompt.push_str(&format!(
        "- Inventory: {{{}}}\n",
        inventory_line(&state.inventory)
    ));
    prompt.push_str(&format!(
        "- Base: {{Location: {}, Fortification: {}}}\n\n",
        state.base.location, state.base.fortification
    ));

    prompt.push_str("PLAYER ACTION:\n");
    prompt.push_str(&format!("\"{}\"\n", action_prompt));

    prompt
}

/// Comma-joined `item: count` pairs, or the literal `empty` marker.
fn inventory_line(inventory: &Inventory) -> String {
    if inventory.is_empty() {
        return "empty".to_string();
    }
    inventory
        .iter()
        .map(|(item, count)| format!("{}: {}", item, count))
        .collect::<Vec<_>>()
        .join(", ")
}
