//! Render command - Load a topology, build its scene and present it
//!
//! Table output summarizes the scene. JSON and SVG come from the core
//! exporters, so every presenter shows the same scene.

use crate::output::{Output, OutputConfig, Outputter, TableOutput};
use crate::source::Source;
use anyhow::{Context, Result};
use colored::Colorize;
use netviz_core::exporter::{json, svg, ExportConfig};
use netviz_core::{GraphLoader, RenderOptions, Scene, SceneRenderer};
use serde::Serialize;

/// A rendered scene plus where it came from.
#[derive(Debug, Serialize)]
pub struct SceneReport {
    pub source: String,
    pub node_count: usize,
    pub options: RenderOptions,
    pub scene: Scene,
}

impl SceneReport {
    fn summary(&self, config: &OutputConfig) -> String {
        let pairs = vec![
            ("Source", self.source.clone()),
            ("Nodes", self.node_count.to_string()),
            ("Resolve", self.options.resolution.to_string()),
            ("Missing neighbor", self.options.missing_neighbor.to_string()),
            ("Glyphs", self.scene.glyphs.len().to_string()),
            ("Labels", self.scene.labels.len().to_string()),
            ("Segments", self.scene.segments.len().to_string()),
            ("Skipped edges", self.scene.skipped_edges.len().to_string()),
        ];
        TableOutput::format_key_value(&pairs, config)
    }

    fn heading(&self, text: &str, config: &OutputConfig) -> String {
        if config.use_colors() {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Outputter for SceneReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut lines = vec![self.summary(config)];

        let glyph_rows: Vec<Vec<String>> = self
            .scene
            .glyphs
            .iter()
            .map(|g| {
                let label = self
                    .scene
                    .label_for(g.node_index)
                    .map(|l| l.text.clone())
                    .unwrap_or_default();
                vec![
                    g.node_index.to_string(),
                    g.node_id.to_string(),
                    g.shape.name().to_string(),
                    g.fill.as_str().to_string(),
                    label,
                ]
            })
            .collect();
        lines.push(String::new());
        lines.push(self.heading("Glyphs", config));
        lines.push(TableOutput::from_rows(
            &["Row", "Id", "Shape", "Fill", "Label"],
            &glyph_rows,
            config,
        ));

        let segment_rows: Vec<Vec<String>> = self
            .scene
            .segments
            .iter()
            .map(|s| {
                vec![
                    s.from_index.to_string(),
                    s.to_index.to_string(),
                    s.start.to_string(),
                    s.end.to_string(),
                ]
            })
            .collect();
        lines.push(String::new());
        lines.push(self.heading("Segments", config));
        lines.push(TableOutput::from_rows(
            &["From", "To", "Start", "End"],
            &segment_rows,
            config,
        ));

        if !self.scene.skipped_edges.is_empty() {
            lines.push(String::new());
            lines.push(self.heading("Skipped edges", config));
            for skipped in &self.scene.skipped_edges {
                lines.push(format!(
                    "  row {} -> {}: {}",
                    skipped.node_index, skipped.reference, skipped.reason
                ));
            }
        }

        lines.join("\n")
    }

    fn to_json(&self, config: &OutputConfig) -> String {
        let export = ExportConfig {
            pretty_print: !config.compact,
            ..ExportConfig::default()
        };
        json::export(&self.scene, &export)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn to_svg(&self, _config: &OutputConfig) -> String {
        svg::export(&self.scene, &ExportConfig::default())
    }
}

pub fn run(source: &Source, options: RenderOptions, output: &OutputConfig) -> Result<()> {
    // Store handle is dropped inside fetch, before rendering starts
    let columns = source.fetch()?;
    let table = GraphLoader::load(columns)
        .with_context(|| format!("Failed to load topology from {}", source))?;

    let scene = SceneRenderer::new(options)
        .render(&table)
        .with_context(|| format!("Failed to render topology from {}", source))?;

    tracing::info!(
        glyphs = scene.glyphs.len(),
        segments = scene.segments.len(),
        "rendered scene"
    );

    let report = SceneReport {
        source: source.to_string(),
        node_count: table.len(),
        options,
        scene,
    };
    Output::with_config(report, output.clone()).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use netviz_core::{MissingNeighborPolicy, NodeRecord, RawColumns};
    use std::path::PathBuf;

    fn report(options: RenderOptions) -> SceneReport {
        let records = vec![
            NodeRecord {
                id: 1,
                type_code: 0,
                radius: 1.0,
                x: 10.0,
                y: 10.0,
                neighbors: "1,5".to_string(),
            },
            NodeRecord {
                id: 2,
                type_code: 1,
                radius: 1.0,
                x: 20.0,
                y: 10.0,
                neighbors: String::new(),
            },
        ];
        let table = GraphLoader::load(RawColumns::from_records(&records)).unwrap();
        let scene = SceneRenderer::new(options).render(&table).unwrap();
        SceneReport {
            source: Source::File(PathBuf::from("t.json")).to_string(),
            node_count: table.len(),
            options,
            scene,
        }
    }

    fn plain() -> OutputConfig {
        OutputConfig {
            no_color: true,
            ..OutputConfig::new(OutputFormat::Table)
        }
    }

    #[test]
    fn test_table_lists_skipped_edges() {
        let options =
            RenderOptions::default().with_missing_neighbor(MissingNeighborPolicy::Skip);
        let output = report(options).to_table(&plain());

        assert!(output.contains("Segments"));
        assert!(output.contains("Skipped edges"));
        assert!(output.contains("row 0 -> 5"));
    }

    #[test]
    fn test_json_is_the_exported_scene() {
        let options =
            RenderOptions::default().with_missing_neighbor(MissingNeighborPolicy::Skip);
        let report = report(options);
        let config = OutputConfig::new(OutputFormat::Json);

        let value: serde_json::Value = serde_json::from_str(&report.to_json(&config)).unwrap();
        assert_eq!(value["glyphs"].as_array().unwrap().len(), 2);
        assert_eq!(value["segments"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_compact_json_is_one_line() {
        let options =
            RenderOptions::default().with_missing_neighbor(MissingNeighborPolicy::Skip);
        let config = OutputConfig::new(OutputFormat::Json).with_compact(true);

        let output = report(options).render(&config);
        assert!(!output.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["glyphs"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_compact_table_has_no_borders() {
        let options =
            RenderOptions::default().with_missing_neighbor(MissingNeighborPolicy::Skip);
        let report = report(options);

        assert!(report.to_table(&plain()).contains('╭'));
        assert!(!report.to_table(&plain().with_compact(true)).contains('╭'));
    }

    #[test]
    fn test_svg_is_a_document() {
        let options =
            RenderOptions::default().with_missing_neighbor(MissingNeighborPolicy::Skip);
        let output = report(options).render(&OutputConfig::new(OutputFormat::Svg));
        assert!(output.starts_with("<svg"));
        assert!(output.trim_end().ends_with("</svg>"));
    }
}
