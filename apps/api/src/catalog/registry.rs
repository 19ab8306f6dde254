//! Category registry: the fixed set of categories and their source documents.
//!
//! Built once at startup and shared read-only via `AppState`.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::catalog::models::CategoryMetadata;
use crate::catalog::store::is_bare_name;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate category key '{0}'")]
    DuplicateKey(String),

    #[error("category '{category}' lists invalid document name '{name}'")]
    InvalidDocumentName { category: String, name: String },
}

#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<CategoryMetadata>,
}

impl CategoryRegistry {
    pub fn new(categories: Vec<CategoryMetadata>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.as_str()) {
                return Err(RegistryError::DuplicateKey(category.id.clone()));
            }
            if let Some(name) = category.documents.iter().find(|d| !is_bare_name(d)) {
                return Err(RegistryError::InvalidDocumentName {
                    category: category.id.clone(),
                    name: name.clone(),
                });
            }
        }
        Ok(Self { categories })
    }

    /// Loads a replacement registry from a JSON array of category records.
    pub fn from_json_file(path: &Path) -> Result<Self, RegistryError> {
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: shown.clone(),
            source,
        })?;
        let categories: Vec<CategoryMetadata> =
            serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
                path: shown.clone(),
                source,
            })?;
        info!("Loaded {} categories from {shown}", categories.len());
        Self::new(categories)
    }

    /// The built-in content-hub categories.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|b| CategoryMetadata {
                id: b.id.to_string(),
                title: b.title.to_string(),
                emoji: b.emoji.to_string(),
                image: b.image.to_string(),
                description: b.description.to_string(),
                color_hint: b.color_hint.to_string(),
                documents: b.documents.iter().map(|d| d.to_string()).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Category keys in declaration order.
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn metadata_for(&self, key: &str) -> Option<&CategoryMetadata> {
        self.categories.iter().find(|c| c.id == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryMetadata> {
        self.categories.iter()
    }
}

struct BuiltinCategory {
    id: &'static str,
    title: &'static str,
    emoji: &'static str,
    image: &'static str,
    description: &'static str,
    color_hint: &'static str,
    documents: &'static [&'static str],
}

const BUILTIN: &[BuiltinCategory] = &[
    BuiltinCategory {
        id: "money-finance",
        title: "Money & Finance",
        emoji: "💰",
        image: "/assets/concept-hub/money.jpg",
        description: "Personal finance, stock market, investing, taxes, and wealth building.",
        color_hint: "#ffd700",
        documents: &["money.json"],
    },
    BuiltinCategory {
        id: "career-skills",
        title: "Career Skills",
        emoji: "🚀",
        image: "/assets/concept-hub/career.png",
        description: "Essential skills to accelerate your professional growth.",
        color_hint: "#9370db",
        documents: &["career.json", "career1.json"],
    },
    BuiltinCategory {
        id: "life-skills",
        title: "Life Skills",
        emoji: "🧠",
        image: "/assets/concept-hub/life.jpg",
        description: "Navigate adult life with confidence and emotional intelligence.",
        color_hint: "#40e0d0",
        documents: &["life.json"],
    },
    BuiltinCategory {
        id: "real-world",
        title: "Real-World Knowledge",
        emoji: "🌍",
        image: "/assets/concept-hub/real-world.png",
        description: "Understanding how the world works, from taxes to law.",
        color_hint: "#ff4500",
        documents: &["real.json"],
    },
    BuiltinCategory {
        id: "business-freelancing",
        title: "Business & Freelancing",
        emoji: "🧑‍💼",
        image: "/assets/concept-hub/business-freelancing.png",
        description: "Start your own venture or thrive as a freelancer.",
        color_hint: "#4169e1",
        documents: &["buisness.json"],
    },
    BuiltinCategory {
        id: "offbeat-careers",
        title: "Offbeat Careers",
        emoji: "🛫",
        image: "/assets/concept-hub/offbeat-careers.png",
        description: "Explore unconventional paths and turning passions into careers.",
        color_hint: "#ff69b4",
        documents: &["offbeat.json"],
    },
];
