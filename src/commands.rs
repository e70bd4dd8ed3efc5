//! Command handlers for the mneme CLI.

use crate::config;
use crate::context::PromptContext;
use crate::errors::Error;
use crate::memory::MemoryStore;
use crate::output::*;
use crate::relevance::{RelevanceRetriever, extract_keywords};
use serde_json::Value;
use std::process::ExitCode;

/// Base prompt used by `prompt` when none is supplied.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant with memory of past conversations.";

/// Commands supported by the mneme CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Record an exchange (facts like "my name is ..." are extracted)
    Add {
        /// What the user said
        user_input: String,
        /// What the assistant answered
        ai_response: String,
    },
    /// Set a fact about the user
    Fact {
        /// Fact name
        key: String,
        /// Fact value (parsed as JSON when valid, otherwise stored as text)
        value: String,
    },
    /// List stored facts
    Facts,
    History {
        /// Only show the most recent N turns
        #[arg(short = 'r', long)]
        recent: Option<usize>,
    },
    Search {
        /// Query text
        query: String,

        /// Minimum relevance score (default from config: 0.3)
        #[arg(short = 't', long)]
        threshold: Option<f64>,
    },
    /// Show the relevant-memory block for a query
    Context {
        /// Query text
        query: String,
    },
    /// Show the memory-derived prompt context for a query
    Prompt {
        /// Query text
        query: String,

        /// Base system prompt to extend
        #[arg(short = 's', long)]
        system: Option<String>,
    },
    Version,
}

/// Execute a CLI command.
pub fn execute(
    command: &Commands,
    store: &mut MemoryStore,
    config: &config::Config,
    json: bool,
) -> Result<ExitCode, Error> {
    match command {
        Commands::Add {
            user_input,
            ai_response,
        } => handle_add(store, user_input, ai_response, json),
        Commands::Fact { key, value } => handle_fact(store, key, value, json),
        Commands::Facts => handle_facts(store, json),
        Commands::History { recent } => handle_history(store, *recent, json),
        Commands::Search { query, threshold } => handle_search(
            store,
            query,
            threshold.unwrap_or(config.relevance_threshold),
            json,
        ),
        Commands::Context { query } => {
            handle_context(store, query, config.relevance_threshold, json)
        }
        Commands::Prompt { query, system } => handle_prompt(
            store,
            query,
            system.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT),
            config,
            json,
        ),
        Commands::Version => handle_version(json),
    }
}

fn handle_add(
    store: &mut MemoryStore,
    user_input: &str,
    ai_response: &str,
    json: bool,
) -> Result<ExitCode, Error> {
    let extracted = store.record_exchange(user_input, ai_response)?;
    let timestamp = store
        .turns()
        .last()
        .map(|t| t.timestamp.clone())
        .unwrap_or_default();

    if json {
        print_json(&AddResponse {
            status: "added".to_string(),
            timestamp,
            retained: store.turns().len(),
            extracted_facts: extracted,
        });
    } else {
        println!(
            "Recorded turn at {} ({} of {} retained)",
            timestamp,
            store.turns().len(),
            store.memory_limit()
        );
        for key in extracted {
            println!("Remembered {}", key);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_fact(
    store: &mut MemoryStore,
    key: &str,
    raw: &str,
    json: bool,
) -> Result<ExitCode, Error> {
    if key.trim().is_empty() {
        return Err(Error::InvalidInput("fact key cannot be empty".to_string()));
    }
    let value = parse_fact_value(raw);
    store.set_fact(key, value.clone())?;

    if json {
        print_json(&FactResponse {
            status: "set".to_string(),
            key: key.to_string(),
            value,
        });
    } else {
        println!("Set {} = {}", key, value);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_facts(store: &MemoryStore, json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&FactsResponse {
            facts: store.facts(),
        });
    } else {
        for (key, value) in store.facts() {
            println!("{}: {}", key, value);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_history(
    store: &MemoryStore,
    recent: Option<usize>,
    json: bool,
) -> Result<ExitCode, Error> {
    if json {
        let turns = store.turns();
        let start = recent.map_or(0, |n| turns.len().saturating_sub(n));
        print_json(&HistoryResponse {
            turns: &turns[start..],
        });
    } else {
        let text = match recent {
            Some(n) => store.render_recent_history(n),
            None => store.render_history(),
        };
        print!("{}", text);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_search(
    store: &MemoryStore,
    query: &str,
    threshold: f64,
    json: bool,
) -> Result<ExitCode, Error> {
    validate_threshold(threshold)?;
    let results = RelevanceRetriever::with_threshold(threshold).find_relevant(store.turns(), query);

    if json {
        print_json(&SearchResponse {
            keywords: extract_keywords(query),
            results,
        });
    } else {
        for memory in results {
            println!(
                "{} [relevance: {:.2}]\n  {}\n",
                memory.timestamp,
                memory.relevance,
                memory.content.replace('\n', "\n  ")
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_context(
    store: &MemoryStore,
    query: &str,
    threshold: f64,
    json: bool,
) -> Result<ExitCode, Error> {
    let text = RelevanceRetriever::with_threshold(threshold).relevant_context(store.turns(), query);
    if json {
        print_json(&TextResponse { text });
    } else {
        print!("{}", text);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_prompt(
    store: &MemoryStore,
    query: &str,
    base: &str,
    config: &config::Config,
    json: bool,
) -> Result<ExitCode, Error> {
    let context = PromptContext::assemble(
        store,
        query,
        config.relevance_threshold,
        config.history_window,
    );
    let system_prompt = context.system_prompt(base);

    if json {
        print_json(&PromptResponse {
            system_prompt,
            history: context.history,
            relevant: context.relevant,
        });
    } else {
        println!("{}", system_prompt);
        if !context.history.is_empty() {
            println!();
            print!("{}", context.history);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}

/// Interpret a fact value: valid JSON keeps its type, anything else is text.
fn parse_fact_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn validate_threshold(threshold: f64) -> Result<(), Error> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(Error::InvalidInput(format!(
            "threshold must be between 0.0 and 1.0, got {threshold}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fact_value_json() {
        assert_eq!(parse_fact_value("42"), json!(42));
        assert_eq!(parse_fact_value("true"), json!(true));
        assert_eq!(parse_fact_value(r#"["a","b"]"#), json!(["a", "b"]));
        assert_eq!(parse_fact_value(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn test_parse_fact_value_text() {
        assert_eq!(parse_fact_value("casual"), json!("casual"));
        assert_eq!(parse_fact_value("two words"), json!("two words"));
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(1.0).is_ok());
        assert!(matches!(validate_threshold(1.01), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_threshold(f64::NAN), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_execute_fact_then_facts() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = MemoryStore::open(dir.path().join("memory.json"), 10).unwrap();
        let config = config::Config::default();

        execute(
            &Commands::Fact {
                key: "tone".to_string(),
                value: "formal".to_string(),
            },
            &mut store,
            &config,
            true,
        )
        .unwrap();
        assert_eq!(store.fact("tone"), Some(&json!("formal")));
    }

    #[test]
    fn test_execute_search_rejects_bad_threshold() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = MemoryStore::open(dir.path().join("memory.json"), 10).unwrap();
        let config = config::Config::default();

        let result = execute(
            &Commands::Search {
                query: "pip".to_string(),
                threshold: Some(2.0),
            },
            &mut store,
            &config,
            false,
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
