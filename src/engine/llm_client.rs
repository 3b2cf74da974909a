use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-2.5-flash";
const TEMPERATURE: f32 = 0.8;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_INSTRUCTION: &str = "You are the game master for a gritty, text-based zombie survival game with crafting and base-building. Your goal is to create a suspenseful, challenging story.

**Game Mechanics:**
1.  **State Management:** You will be given the player's last action and their current state (inventory and base status).
2.  **Resource Management:** The world is bleak. Resources like scrap, wood, food, and meds are scarce. Your scenarios should reflect this.
3.  **Crafting:** Simple crafting is possible. A 'shiv' can be made from 'scrap'. A 'spear' from 'wood' and 'scrap'. Present crafting choices only when the player might have the resources.
4.  **Base Building:** Players can fortify their base location using materials like 'wood' or 'scrap'. This fortification level should provide defense in relevant scenarios.
5.  **Story Generation:** Based on the player's action and state, generate the next story segment, a set of choices, and any resulting changes to their inventory or base.
6.  **JSON Output:** Always respond in the JSON format defined by the response schema. The story should be immersive and the choices distinct and meaningful.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Blocking Gemini client. Lives on the engine thread, so blocking on
/// the wire is fine; the UI thread never touches it.
pub struct LlmClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    /// Reads `GEMINI_API_KEY` (or the legacy `API_KEY`) from the
    /// environment. A missing key is fatal at startup.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .context("GEMINI_API_KEY environment variable not set")?;

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    /// One structured-output generation call. Returns the raw text
    /// payload, which the caller decodes as a scene.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                response_mime_type: "application/json".to_string(),
                response_schema: scene_schema(),
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, MODEL
        );

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .context("generateContent request failed")?
            .error_for_status()
            .context("generateContent returned an error status")?
            .json::<GenerateContentResponse>()
            .context("generateContent response was not valid JSON")?;

        resp.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .context("model returned no candidates")
    }
}

/// The structured-output contract: story, 2-4 choices, optional sparse
/// inventory deltas, optional partial base override, game-over fields.
/// The item list under inventoryChanges is advisory; the model may
/// still invent other keys and the client accepts them.
fn scene_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "story": {
                "type": "STRING",
                "description": "The next part of the story in a suspenseful, second-person perspective. Describe the environment and events. Should be one to two paragraphs long."
            },
            "choices": {
                "type": "ARRAY",
                "description": "A list of 2 to 4 choices the player can make. These should include narrative choices, scavenging for specific materials (scrap, wood, food), crafting items, and fortifying the base.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": {
                            "type": "STRING",
                            "description": "The text displayed on the choice button for the player. E.g., 'Search for scrap metal', 'Barricade the windows with wood', 'Craft a shiv from scrap'."
                        },
                        "prompt": {
                            "type": "STRING",
                            "description": "The prompt to send back to the AI if this choice is selected. E.g., 'I search the garage for scrap metal.'"
                        }
                    },
                    "required": ["text", "prompt"]
                }
            },
            "inventoryChanges": {
                "type": "OBJECT",
                "description": "Optional. An object representing changes to the player's inventory. Positive numbers for items gained, negative for items used/lost. E.g., { 'scrap': 5, 'food': -1 }. Only include items that have changed.",
                "properties": {
                    "scrap": { "type": "INTEGER" },
                    "wood": { "type": "INTEGER" },
                    "food": { "type": "INTEGER" },
                    "meds": { "type": "INTEGER" },
                    "shiv": { "type": "INTEGER" },
                    "spear": { "type": "INTEGER" }
                }
            },
            "baseChanges": {
                "type": "OBJECT",
                "description": "Optional. An object representing changes to the player's base. E.g., { 'fortification': 1 }.",
                "properties": {
                    "location": { "type": "STRING" },
                    "fortification": { "type": "INTEGER" }
                }
            },
            "isGameOver": {
                "type": "BOOLEAN",
                "description": "Set to true if the player's action has resulted in their death or the end of this particular story arc."
            },
            "gameOverText": {
                "type": "STRING",
                "description": "If isGameOver is true, this text describes the player's final moments or the outcome of their story."
            }
        },
        "required": ["story", "choices", "isGameOver", "gameOverText"]
    })
}
