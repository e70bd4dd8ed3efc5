//! JSON response types and formatting for CLI output.

use serde::Serialize;
use serde_json::Value;

use crate::memory_types::{ConversationTurn, FactTable};
use crate::relevance::RelevantMemory;

/// Response for a recorded exchange.
#[derive(Serialize)]
pub struct AddResponse {
    pub status: String,
    pub timestamp: String,
    pub retained: usize,
    pub extracted_facts: Vec<String>,
}

/// Response for a fact upsert.
#[derive(Serialize)]
pub struct FactResponse {
    pub status: String,
    pub key: String,
    pub value: Value,
}

/// Response listing all facts.
#[derive(Serialize)]
pub struct FactsResponse<'a> {
    pub facts: &'a FactTable,
}

/// Response for history listing.
#[derive(Serialize)]
pub struct HistoryResponse<'a> {
    pub turns: &'a [ConversationTurn],
}

/// Response for relevance search.
#[derive(Serialize)]
pub struct SearchResponse {
    pub keywords: Vec<String>,
    pub results: Vec<RelevantMemory>,
}

/// Response carrying a rendered text block.
#[derive(Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// Response for assembled prompt context.
#[derive(Serialize)]
pub struct PromptResponse {
    pub system_prompt: String,
    pub history: String,
    pub relevant: String,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}
