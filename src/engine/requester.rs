use anyhow::Result;

use crate::engine::llm_client::LlmClient;
use crate::engine::prompt::{turn_prompt, INITIAL_PROMPT};
use crate::model::game_state::{Choice, GameState};
use crate::model::scene::{decode_scene, SceneResult};

/// Requests the opening scene of a new run.
pub fn request_initial_scene(client: &LlmClient) -> SceneResult {
    scene_or_fallback(client.generate(INITIAL_PROMPT))
}

/// Requests the next scene for a chosen action against the current state.
pub fn request_next_scene(
    client: &LlmClient,
    action_prompt: &str,
    state: &GameState,
) -> SceneResult {
    scene_or_fallback(client.generate(&turn_prompt(action_prompt, state)))
}

/// Every failure mode of a turn (transport error, timeout, non-JSON
/// payload, schema violation) collapses into the same fixed terminal
/// scene. The caller always gets something displayable; nothing is
/// retried and no raw error escapes as narrative.
fn scene_or_fallback(raw: Result<String>) -> SceneResult {
    let decoded =
        raw.and_then(|text| decode_scene(&text).map_err(anyhow::Error::msg));

    match decoded {
        Ok(scene) => scene,
        Err(e) => {
            tracing::warn!("scene generation failed, serving fallback: {:#}", e);
            fallback_scene()
        }
    }
}

/// The fixed terminal scene served when generation fails.
pub fn fallback_scene() -> SceneResult {
    SceneResult {
        story: "An unexpected silence falls. The connection to your instincts has been severed by a strange, otherworldly force. The path ahead is unclear.".to_string(),
        choices: vec![Choice {
            text: "Try to reconnect...".to_string(),
            prompt: "Try to start the game again.".to_string(),
        }],
        inventory_changes: None,
        base_changes: None,
        is_game_over: true,
        game_over_text: "The system failed. You are lost in the static.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn transport_failure_yields_the_exact_fallback() {
        let scene = scene_or_fallback(Err(anyhow!("connection refused")));
        assert_eq!(scene, fallback_scene());
        assert!(scene.is_game_over);
        assert_eq!(
            scene.game_over_text,
            "The system failed. You are lost in the static."
        );
        assert_eq!(scene.choices.len(), 1);
        assert_eq!(scene.choices[0].text, "Try to reconnect...");
    }

    #[test]
    fn non_json_payload_yields_the_fallback() {
        let scene = scene_or_fallback(Ok("<html>502 Bad Gateway</html>".to_string()));
        assert_eq!(scene, fallback_scene());
    }

    #[test]
    fn schema_violation_yields_the_fallback() {
        // valid JSON, but one choice on a non-terminal scene
        let scene = scene_or_fallback(Ok(
            r#"{"story":"s","choices":[{"text":"a","prompt":"p"}],
                "isGameOver":false,"gameOverText":""}"#
                .to_string(),
        ));
        assert_eq!(scene, fallback_scene());
    }

    #[test]
    fn well_formed_payload_passes_through() {
        let scene = scene_or_fallback(Ok(
            r#"{"story":"The door creaks.","choices":[
                {"text":"Open it","prompt":"I open the door."},
                {"text":"Wait","prompt":"I wait and listen."}],
                "isGameOver":false,"gameOverText":""}"#
                .to_string(),
        ));
        assert_eq!(scene.story, "The door creaks.");
        assert!(!scene.is_game_over);
    }

    #[test]
    fn fallback_is_deterministic() {
        assert_eq!(fallback_scene(), fallback_scene());
    }
}
