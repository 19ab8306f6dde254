use serde::{Deserialize, Serialize};

/// Display metadata for one content-hub category plus the source documents
/// that feed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetadata {
    pub id: String,
    pub title: String,
    pub emoji: String,
    pub image: String,
    pub description: String,
    pub color_hint: String,
    /// Source document filenames, in merge order.
    #[serde(default)]
    pub documents: Vec<String>,
}

impl CategoryMetadata {
    /// First whitespace-delimited token of the title. Grouped documents are
    /// matched against this token.
    pub fn title_token(&self) -> &str {
        self.title.split_whitespace().next().unwrap_or("")
    }
}

/// Uniform content item produced from any recognised document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub creator: String,
    pub topic: String,
    pub video_id: Option<String>,
    pub info: String,
}

/// A category as served to clients: metadata plus its aggregated entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    pub emoji: String,
    pub image: String,
    pub description: String,
    pub color_hint: String,
    pub sources: Vec<NormalizedEntry>,
}

impl Category {
    pub fn new(meta: &CategoryMetadata, sources: Vec<NormalizedEntry>) -> Self {
        Self {
            id: meta.id.clone(),
            title: meta.title.clone(),
            emoji: meta.emoji.clone(),
            image: meta.image.clone(),
            description: meta.description.clone(),
            color_hint: meta.color_hint.clone(),
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(title: &str) -> CategoryMetadata {
        CategoryMetadata {
            id: "x".to_string(),
            title: title.to_string(),
            emoji: String::new(),
            image: String::new(),
            description: String::new(),
            color_hint: String::new(),
            documents: vec![],
        }
    }

    #[test]
    fn test_title_token() {
        assert_eq!(meta("Money & Finance").title_token(), "Money");
        assert_eq!(meta("Real-World Knowledge").title_token(), "Real-World");
        assert_eq!(meta("").title_token(), "");
    }

    #[test]
    fn test_category_wire_format() {
        let category = Category::new(
            &meta("Life Skills"),
            vec![NormalizedEntry {
                name: Some("A".to_string()),
                link: None,
                creator: String::new(),
                topic: String::new(),
                video_id: None,
                info: "YouTube Tutorial".to_string(),
            }],
        );
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["colorHint"], json!(""));
        assert_eq!(value["sources"][0]["name"], json!("A"));
        assert_eq!(value["sources"][0]["videoId"], json!(null));
        assert!(value["sources"][0].get("link").is_none());
        assert!(value.get("documents").is_none());
    }
}
