use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::document::ParsedDocument;

/// A named, persisted bundle of style examples plus optional custom
/// instructions, reusable across generations.
///
/// Persisted as one human-readable JSON file per `id`. The id is derived
/// from the creation timestamp at second granularity; `usage_count` is the
/// only field mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    pub created_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
    pub examples: Vec<ParsedDocument>,
    pub usage_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blueprint_round_trips_through_json() {
        let blueprint = Blueprint {
            id: "20240315120000".to_string(),
            name: "MVA standard".to_string(),
            created_date: Utc::now(),
            custom_instructions: Some("Keep the prayer for relief short.".to_string()),
            examples: vec![ParsedDocument::new("smith-v-jones.txt", "COMPLAINT ...")],
            usage_count: 3,
        };

        let json = serde_json::to_string_pretty(&blueprint).unwrap();
        let restored: Blueprint = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, blueprint.id);
        assert_eq!(restored.usage_count, 3);
        assert_eq!(restored.examples.len(), 1);
    }

    #[test]
    fn test_missing_custom_instructions_deserializes_as_none() {
        let json = r#"{
            "id": "20240315120000",
            "name": "bare",
            "created_date": "2024-03-15T12:00:00Z",
            "examples": [],
            "usage_count": 0
        }"#;
        let blueprint: Blueprint = serde_json::from_str(json).unwrap();
        assert_eq!(blueprint.custom_instructions, None);
    }
}
