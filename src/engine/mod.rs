pub mod engine;
pub mod protocol;

pub mod llm_client;
pub mod prompt;
pub mod reconcile;
pub mod requester;
