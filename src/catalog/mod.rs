//! Capability catalog: descriptors, registration, and the built-in set.

mod builtin;
mod descriptor;
mod registry;

pub use descriptor::{CapabilityDescriptor, Category, IndexedDocument};
pub use registry::{CapabilityCatalog, InMemoryCatalog};
