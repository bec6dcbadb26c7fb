//! JSON format exporter.

use super::ExportConfig;
use crate::scene::Scene;

/// Export a scene to JSON.
pub fn export(scene: &Scene, config: &ExportConfig) -> Result<String, serde_json::Error> {
    if config.pretty_print {
        serde_json::to_string_pretty(scene)
    } else {
        serde_json::to_string(scene)
    }
}
