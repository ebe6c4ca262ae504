//! Capability descriptors — the static metadata the engine resolves against.
//!
//! A descriptor declares what a capability does (description, category),
//! how callers tend to phrase it (example phrasings), and which parameters
//! its action accepts. Descriptors are immutable once indexed; replacing
//! one requires an explicit re-registration followed by a re-index.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability category — an open string enum.
///
/// The known variants carry resolution semantics (the relevance scorer
/// boosts "System Monitoring" and "Application Control" queries); anything
/// else round-trips through `Custom` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Launching or controlling applications.
    ApplicationControl,
    /// CPU, memory, disk, and network inspection.
    SystemMonitoring,
    /// File and directory operations.
    FileSystem,
    /// Running shell commands.
    CommandExecution,
    /// Clock and calendar queries.
    TimeAndDate,
    /// Any category string not recognized above.
    Custom(String),
}

impl Category {
    /// The display string used in documents, YAML, and logs.
    pub fn as_str(&self) -> &str {
        match self {
            Category::ApplicationControl => "Application Control",
            Category::SystemMonitoring => "System Monitoring",
            Category::FileSystem => "File System",
            Category::CommandExecution => "Command Execution",
            Category::TimeAndDate => "Time and Date",
            Category::Custom(s) => s,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Application Control" => Category::ApplicationControl,
            "System Monitoring" => Category::SystemMonitoring,
            "File System" => Category::FileSystem,
            "Command Execution" => Category::CommandExecution,
            "Time and Date" => Category::TimeAndDate,
            _ => Category::Custom(s),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::from(s.to_string())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

/// Static metadata describing one capability.
///
/// `name` is the stable, globally unique key; the catalog enforces
/// uniqueness. Parameters map a parameter name to a human-readable hint
/// (a `BTreeMap` so rendered documents are deterministic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    /// Unique identifier, e.g. `open_calculator`.
    pub name: String,

    /// Free-text description of what the capability does.
    pub description: String,

    /// Category used by the relevance scorer's keyword boosts.
    pub category: Category,

    /// Declared parameters: name to human-readable hint. May be empty.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    /// Example phrasings a caller might use. Ordered; may be empty.
    #[serde(default)]
    pub examples: Vec<String>,
}

impl CapabilityDescriptor {
    /// Create a descriptor with no parameters or examples.
    pub fn new(name: impl Into<String>, description: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category,
            parameters: BTreeMap::new(),
            examples: Vec::new(),
        }
    }

    /// Attach example phrasings.
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a declared parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, hint: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), hint.into());
        self
    }

    /// Render the descriptor as a flat text document for embedding.
    ///
    /// The rendering combines name, description, category, examples, and
    /// parameter names into one document; it is regenerated on every index
    /// rebuild, so it never drifts from the live descriptor.
    pub fn to_document(&self) -> IndexedDocument {
        let examples = self.examples.join(", ");
        let parameters = if self.parameters.is_empty() {
            "None".to_string()
        } else {
            self.parameters
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        let text = format!(
            "Capability: {}\nDescription: {}\nCategory: {}\nExamples: {}\nParameters: {}",
            self.name, self.description, self.category, examples, parameters
        );

        IndexedDocument {
            name: self.name.clone(),
            text,
        }
    }
}

/// A flattened text rendering of one descriptor, used solely as embedding
/// input. One-to-one with a live descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDocument {
    /// The descriptor's stable name.
    pub name: String,
    /// The embeddable text.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for name in [
            "Application Control",
            "System Monitoring",
            "File System",
            "Command Execution",
            "Time and Date",
        ] {
            let cat = Category::from(name);
            assert!(!matches!(cat, Category::Custom(_)));
            assert_eq!(cat.as_str(), name);
        }

        let custom = Category::from("Weather");
        assert_eq!(custom, Category::Custom("Weather".to_string()));
        assert_eq!(custom.as_str(), "Weather");
    }

    #[test]
    fn test_to_document_includes_all_fields() {
        let descriptor = CapabilityDescriptor::new(
            "open_calculator",
            "Open the system calculator application",
            Category::ApplicationControl,
        )
        .with_examples(["Open calculator", "Launch calculator"]);

        let doc = descriptor.to_document();
        assert_eq!(doc.name, "open_calculator");
        assert!(doc.text.contains("Capability: open_calculator"));
        assert!(doc.text.contains("Description: Open the system calculator"));
        assert!(doc.text.contains("Category: Application Control"));
        assert!(doc.text.contains("Open calculator, Launch calculator"));
        assert!(doc.text.contains("Parameters: None"));
    }

    #[test]
    fn test_to_document_lists_parameter_names() {
        let descriptor = CapabilityDescriptor::new(
            "delete_file",
            "Delete a file from the system",
            Category::FileSystem,
        )
        .with_parameter("file_path", "Path to the file to delete");

        let doc = descriptor.to_document();
        assert!(doc.text.contains("Parameters: file_path"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = r#"
name: get_weather
description: Fetch the weather forecast
category: Custom
examples:
  - "What's the weather"
parameters:
  city: "City to look up"
"#;
        let descriptor: CapabilityDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(descriptor.name, "get_weather");
        assert_eq!(descriptor.category, Category::Custom("Custom".to_string()));
        assert_eq!(descriptor.examples.len(), 1);
        assert_eq!(
            descriptor.parameters.get("city").map(String::as_str),
            Some("City to look up")
        );
    }
}
