use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use crate::assistant::sampler::DEFAULT_CONTEXT_DOCUMENTS;
use crate::catalog::store::is_bare_name;
use crate::catalog::MalformedDocumentPolicy;
use crate::llm_client::DEFAULT_MODEL;

/// Placeholder value shipped in the sample `.env`; treated as unset.
const API_KEY_PLACEHOLDER: &str = "your_groq_api_key_here";

/// Application configuration loaded from environment variables.
/// Fails at startup if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the source JSON documents.
    pub data_path: PathBuf,
    /// Optional JSON file replacing the built-in category registry.
    pub category_registry_path: Option<PathBuf>,
    pub malformed_policy: MalformedDocumentPolicy,
    /// Documents sampled into the assistant's system prompt.
    pub context_documents: Vec<String>,
    pub groq_api_key: Option<String>,
    pub assistant_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let malformed_policy = match optional_env("MALFORMED_DOCUMENT_POLICY") {
            Some(raw) => raw
                .parse::<MalformedDocumentPolicy>()
                .map_err(|e| anyhow!(e))
                .context("MALFORMED_DOCUMENT_POLICY must be 'skip' or 'fail'")?,
            None => MalformedDocumentPolicy::default(),
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_path: optional_env("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            category_registry_path: optional_env("CATEGORY_REGISTRY_PATH").map(PathBuf::from),
            malformed_policy,
            context_documents: match optional_env("CONTEXT_DOCUMENTS") {
                Some(raw) => parse_document_list(&raw).context("Invalid CONTEXT_DOCUMENTS")?,
                None => default_context_documents(),
            },
            groq_api_key: api_key(optional_env("GROQ_API_KEY")),
            assistant_model: optional_env("ASSISTANT_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn api_key(raw: Option<String>) -> Option<String> {
    raw.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && k != API_KEY_PLACEHOLDER)
}

/// Comma-separated bare filenames; blanks and repeats are dropped.
fn parse_document_list(raw: &str) -> Result<Vec<String>> {
    let mut documents: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !is_bare_name(name) {
            bail!("'{name}' is not a bare document filename");
        }
        if !documents.iter().any(|d| d == name) {
            documents.push(name.to_string());
        }
    }
    Ok(documents)
}

pub fn default_context_documents() -> Vec<String> {
    DEFAULT_CONTEXT_DOCUMENTS
        .iter()
        .map(|d| d.to_string())
        .collect()
}
