use serde::{Deserialize, Serialize};

use crate::model::game_state::{Choice, Inventory};

/// One unit of generated narrative: story text, the player's next
/// choices, and optional state deltas. This is the untrusted payload
/// coming back from the model; run it through [`decode_scene`] before
/// folding it into a `GameState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneResult {
    pub story: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub inventory_changes: Option<Inventory>,
    #[serde(default)]
    pub base_changes: Option<BaseChanges>,
    pub is_game_over: bool,
    pub game_over_text: String,
}

/// Partial override of the base. Absent fields keep their previous
/// values; present fields replace them unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseChanges {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub fortification: Option<i64>,
}

/// Decode raw model output into a validated SceneResult.
///
/// The model is asked for bare JSON, but some responses still arrive
/// wrapped in a markdown fence, so that is stripped first.
pub fn decode_scene(raw: &str) -> Result<SceneResult, String> {
    let payload = strip_fence(raw.trim());

    let scene: SceneResult = serde_json::from_str(payload)
        .map_err(|e| format!("invalid scene JSON: {}", e))?;

    validate_scene(&scene)?;
    Ok(scene)
}

/// Shape checks serde cannot express: the schema promises 2-4 choices
/// per scene. Terminal scenes are exempt so a game-over screen may
/// carry a single "restart" choice. A non-terminal scene with zero
/// choices would strand the player, so it is rejected here too.
fn validate_scene(scene: &SceneResult) -> Result<(), String> {
    if !scene.is_game_over && !(2..=4).contains(&scene.choices.len()) {
        return Err(format!(
            "expected 2-4 choices, got {}",
            scene.choices.len()
        ));
    }

    for (i, choice) in scene.choices.iter().enumerate() {
        if choice.text.trim().is_empty() || choice.prompt.trim().is_empty() {
            return Err(format!("choice {} has an empty text or prompt", i));
        }
    }

    Ok(())
}

fn strip_fence(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix("```") else {
        return raw;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> String {
        r#"{
            "story": "The stairwell reeks of rot.",
            "choices": [
                {"text": "Go up", "prompt": "I climb the stairs."},
                {"text": "Hide", "prompt": "I hide under the stairs."}
            ],
            "inventoryChanges": {"scrap": 2},
            "baseChanges": {"fortification": 1},
            "isGameOver": false,
            "gameOverText": ""
        }"#
        .to_string()
    }

    #[test]
    fn decodes_a_full_scene() {
        let scene = decode_scene(&valid_payload()).unwrap();
        assert_eq!(scene.story, "The stairwell reeks of rot.");
        assert_eq!(scene.choices.len(), 2);
        assert_eq!(scene.inventory_changes.unwrap().get("scrap"), Some(&2));
        assert_eq!(scene.base_changes.unwrap().fortification, Some(1));
        assert!(!scene.is_game_over);
    }

    #[test]
    fn delta_maps_are_optional() {
        let scene = decode_scene(
            r#"{"story":"s","choices":[{"text":"a","prompt":"p"},{"text":"b","prompt":"q"}],
                "isGameOver":false,"gameOverText":""}"#,
        )
        .unwrap();
        assert!(scene.inventory_changes.is_none());
        assert!(scene.base_changes.is_none());
    }

    #[test]
    fn tolerates_a_markdown_fence() {
        let fenced = format!("```json\n{}\n```", valid_payload());
        assert!(decode_scene(&fenced).is_ok());
    }

    #[test]
    fn rejects_non_json() {
        assert!(decode_scene("the model rambled instead").is_err());
    }

    #[test]
    fn rejects_missing_required_field() {
        // no "story"
        let err = decode_scene(
            r#"{"choices":[],"isGameOver":false,"gameOverText":""}"#,
        )
        .unwrap_err();
        assert!(err.contains("invalid scene JSON"));
    }

    #[test]
    fn rejects_wrong_delta_type() {
        assert!(decode_scene(
            r#"{"story":"s","choices":[{"text":"a","prompt":"p"},{"text":"b","prompt":"q"}],
                "inventoryChanges":{"scrap":"lots"},"isGameOver":false,"gameOverText":""}"#,
        )
        .is_err());
    }

    #[test]
    fn rejects_too_few_or_too_many_choices() {
        let one = r#"{"story":"s","choices":[{"text":"a","prompt":"p"}],
            "isGameOver":false,"gameOverText":""}"#;
        assert!(decode_scene(one).is_err());

        let five: Vec<String> = (0..5)
            .map(|i| format!(r#"{{"text":"c{}","prompt":"p{}"}}"#, i, i))
            .collect();
        let payload = format!(
            r#"{{"story":"s","choices":[{}],"isGameOver":false,"gameOverText":""}}"#,
            five.join(",")
        );
        assert!(decode_scene(&payload).is_err());
    }

    #[test]
    fn terminal_scene_may_have_a_single_choice() {
        let scene = decode_scene(
            r#"{"story":"s","choices":[{"text":"Again","prompt":"restart"}],
                "isGameOver":true,"gameOverText":"You died."}"#,
        )
        .unwrap();
        assert!(scene.is_game_over);
    }

    #[test]
    fn rejects_blank_choice_text() {
        assert!(decode_scene(
            r#"{"story":"s","choices":[{"text":"  ","prompt":"p"},{"text":"b","prompt":"q"}],
                "isGameOver":false,"gameOverText":""}"#,
        )
        .is_err());
    }
}
