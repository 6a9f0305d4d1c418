//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration shared by the reconciler and the editor.
///
/// Deserializable so deployments can load it from JSON; every field has a
/// default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Locale used to resolve leaves and to key bare-string writes.
    pub primary_locale: String,
    /// Name of the reserved shared namespace.
    pub shared_namespace: String,
    /// Overlay subtrees merged into every page document (overwriting).
    pub overlay_sections: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            primary_locale: "en".to_owned(),
            shared_namespace: "__shared__".to_owned(),
            overlay_sections: vec!["footer".to_owned()],
        }
    }
}
