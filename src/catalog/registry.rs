//! Capability catalog — registration and lookup of capability descriptors.
//!
//! The engine reads descriptors through the [`CapabilityCatalog`] trait;
//! [`InMemoryCatalog`] is the concrete registry, holding descriptors and
//! their executable actions. Registration is either programmatic or from
//! YAML bundles (a single descriptor document or a `capabilities:` list).
//!
//! The catalog itself never touches the embedding index. After any
//! mutation the owner must call the engine's `on_catalog_changed()` so the
//! new descriptor set becomes queryable.

use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;

use crate::executor::CapabilityAction;

use super::descriptor::CapabilityDescriptor;

/// Read-only catalog view consumed by the resolution engine.
pub trait CapabilityCatalog: Send + Sync {
    /// All registered descriptors. Used to (re)build the embedding index.
    fn list_descriptors(&self) -> Vec<CapabilityDescriptor>;

    /// Look up a single descriptor by its stable name.
    fn descriptor(&self, name: &str) -> Option<CapabilityDescriptor>;
}

struct CatalogEntry {
    descriptor: CapabilityDescriptor,
    action: Option<Arc<dyn CapabilityAction>>,
}

/// In-memory capability registry.
#[derive(Default)]
pub struct InMemoryCatalog {
    entries: DashMap<String, CatalogEntry>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor without an action.
    ///
    /// Fails on duplicate names; use [`InMemoryCatalog::replace`] for an
    /// explicit re-registration.
    pub fn register(&self, descriptor: CapabilityDescriptor) -> Result<(), anyhow::Error> {
        self.insert(descriptor, None)
    }

    /// Register a descriptor together with its executable action.
    pub fn register_with_action(
        &self,
        descriptor: CapabilityDescriptor,
        action: Arc<dyn CapabilityAction>,
    ) -> Result<(), anyhow::Error> {
        self.insert(descriptor, Some(action))
    }

    fn insert(
        &self,
        descriptor: CapabilityDescriptor,
        action: Option<Arc<dyn CapabilityAction>>,
    ) -> Result<(), anyhow::Error> {
        if self.entries.contains_key(&descriptor.name) {
            return Err(anyhow::anyhow!(
                "capability '{}' already exists",
                descriptor.name
            ));
        }
        log::debug!("registered capability '{}'", descriptor.name);
        self.entries.insert(
            descriptor.name.clone(),
            CatalogEntry { descriptor, action },
        );
        Ok(())
    }

    /// Replace an existing descriptor (or insert a new one), keeping any
    /// previously registered action unless a new one is given.
    pub fn replace(
        &self,
        descriptor: CapabilityDescriptor,
        action: Option<Arc<dyn CapabilityAction>>,
    ) {
        let name = descriptor.name.clone();
        let action = action.or_else(|| {
            self.entries
                .get(&name)
                .and_then(|entry| entry.action.clone())
        });
        self.entries
            .insert(name, CatalogEntry { descriptor, action });
    }

    /// Register descriptors from a YAML string.
    ///
    /// Accepts either a single descriptor document or a `capabilities:`
    /// list. Returns how many descriptors were registered.
    pub fn register_from_yaml(&self, content: &str) -> Result<usize, anyhow::Error> {
        if let Ok(descriptor) = serde_yaml::from_str::<CapabilityDescriptor>(content) {
            self.register(descriptor)?;
            return Ok(1);
        }

        let bundle: DescriptorBundle = serde_yaml::from_str(content)?;
        let count = bundle.capabilities.len();
        for descriptor in bundle.capabilities {
            self.register(descriptor)?;
        }
        Ok(count)
    }

    /// Register descriptors from a YAML file on disk.
    pub fn register_from_file(&self, path: impl AsRef<Path>) -> Result<usize, anyhow::Error> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let count = self.register_from_yaml(&content)?;
        log::info!(
            "loaded {} capabilities from {}",
            count,
            path.as_ref().display()
        );
        Ok(count)
    }

    /// The action registered for a capability, if any.
    pub fn action(&self, name: &str) -> Option<Arc<dyn CapabilityAction>> {
        self.entries.get(name).and_then(|entry| entry.action.clone())
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CapabilityCatalog for InMemoryCatalog {
    fn list_descriptors(&self) -> Vec<CapabilityDescriptor> {
        self.entries
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    fn descriptor(&self, name: &str) -> Option<CapabilityDescriptor> {
        self.entries.get(name).map(|entry| entry.descriptor.clone())
    }
}

#[derive(Debug, serde::Deserialize)]
struct DescriptorBundle {
    capabilities: Vec<CapabilityDescriptor>,
}
