//! Capability execution boundary.
//!
//! The engine never inspects execution results; it only records their
//! summaries in session memory. Everything a capability produces is decided
//! once here as a tagged [`ExecutionOutcome`] — downstream code never
//! re-sniffs payloads.

pub mod actions;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{CapabilityCatalog, InMemoryCatalog};

/// The result envelope produced by executing a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The capability ran and produced a value.
    Success {
        /// Structured result payload.
        value: Value,
    },
    /// The capability could not run or failed while running.
    Failure {
        /// Human-readable failure description.
        message: String,
    },
}

impl ExecutionOutcome {
    /// Wrap a structured payload as a success.
    pub fn success(value: impl Into<Value>) -> Self {
        ExecutionOutcome::Success {
            value: value.into(),
        }
    }

    /// Wrap a failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        ExecutionOutcome::Failure {
            message: message.into(),
        }
    }

    /// True for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }

    /// One-line summary suitable for the session history.
    pub fn summary(&self) -> String {
        match self {
            ExecutionOutcome::Success { value } => format!("success: {}", value),
            ExecutionOutcome::Failure { message } => format!("failure: {}", message),
        }
    }
}

/// A capability's executable action.
///
/// Actions are in-process trait objects registered alongside descriptors.
/// There is deliberately no dynamic code loading; custom capabilities are
/// registered programmatically with their own `CapabilityAction`.
pub trait CapabilityAction: Send + Sync {
    /// Run the action with best-effort extracted parameters.
    fn execute(&self, params: &BTreeMap<String, String>) -> ExecutionOutcome;
}

impl<F> CapabilityAction for F
where
    F: Fn(&BTreeMap<String, String>) -> ExecutionOutcome + Send + Sync,
{
    fn execute(&self, params: &BTreeMap<String, String>) -> ExecutionOutcome {
        self(params)
    }
}

/// Invokes a named capability from the catalog.
pub struct Executor {
    catalog: Arc<InMemoryCatalog>,
}

impl Executor {
    /// Create an executor over the given catalog.
    pub fn new(catalog: Arc<InMemoryCatalog>) -> Self {
        Self { catalog }
    }

    /// Execute a capability by name.
    ///
    /// Missing capabilities, missing actions, and missing required
    /// parameters all surface as `Failure` — the caller reports the
    /// summary back to session memory either way.
    pub fn execute(&self, name: &str, params: &BTreeMap<String, String>) -> ExecutionOutcome {
        let Some(descriptor) = self.catalog.descriptor(name) else {
            return ExecutionOutcome::failure(format!("capability '{}' is not registered", name));
        };

        if !descriptor.parameters.is_empty() && params.is_empty() {
            let required: Vec<&str> = descriptor.parameters.keys().map(String::as_str).collect();
            return ExecutionOutcome::failure(format!(
                "capability '{}' requires parameters: {}",
                name,
                required.join(", ")
            ));
        }

        let Some(action) = self.catalog.action(name) else {
            return ExecutionOutcome::failure(format!("capability '{}' has no action", name));
        };

        let outcome = action.execute(params);
        log::info!(
            "executed capability '{}': {}",
            name,
            if outcome.is_success() { "success" } else { "failure" }
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CapabilityDescriptor, Category};
    use serde_json::json;

    fn catalog_with_echo() -> Arc<InMemoryCatalog> {
        let catalog = InMemoryCatalog::new();
        let descriptor = CapabilityDescriptor::new(
            "echo",
            "Echo the given text back",
            Category::Custom("Test".to_string()),
        );
        catalog
            .register_with_action(
                descriptor,
                Arc::new(|_params: &BTreeMap<String, String>| {
                    ExecutionOutcome::success(json!({"echo": true}))
                }),
            )
            .unwrap();
        Arc::new(catalog)
    }

    #[test]
    fn test_execute_success_envelope() {
        let executor = Executor::new(catalog_with_echo());
        let outcome = executor.execute("echo", &BTreeMap::new());
        assert!(outcome.is_success());
        assert!(outcome.summary().starts_with("success:"));
    }

    #[test]
    fn test_execute_unknown_capability_is_failure() {
        let executor = Executor::new(catalog_with_echo());
        let outcome = executor.execute("missing", &BTreeMap::new());
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_missing_required_parameters() {
        let catalog = InMemoryCatalog::new();
        let descriptor = CapabilityDescriptor::new(
            "delete_file",
            "Delete a file from the system",
            Category::FileSystem,
        )
        .with_parameter("file_path", "Path to the file to delete");
        catalog
            .register_with_action(
                descriptor,
                Arc::new(|_: &BTreeMap<String, String>| ExecutionOutcome::success(json!(true))),
            )
            .unwrap();

        let executor = Executor::new(Arc::new(catalog));
        let outcome = executor.execute("delete_file", &BTreeMap::new());
        match outcome {
            ExecutionOutcome::Failure { message } => assert!(message.contains("file_path")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serde_tagging() {
        let outcome = ExecutionOutcome::failure("boom");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["message"], "boom");
    }
}
