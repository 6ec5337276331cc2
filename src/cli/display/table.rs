//! Table rendering for CLI output

use crate::domain::cluster::provision::{normalize_version, ClusterSpecRequest};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Table renderer for formatted output
#[derive(Debug, Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the database cluster about to be requested
    pub fn render_provision_summary(&self, request: &ClusterSpecRequest) -> String {
        let version = if normalize_version(&request.version).is_empty() {
            "latest".to_string()
        } else {
            request.version.clone()
        };
        let exposure = if request.external_access {
            ("external", Color::Yellow)
        } else {
            ("internal", Color::Green)
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("FIELD").set_alignment(CellAlignment::Left),
                Cell::new("VALUE").set_alignment(CellAlignment::Left),
            ]);

        let rows = [
            ("Name", request.identity.name.clone()),
            ("Kubernetes ID", request.identity.kubernetes_id.clone()),
            ("Engine", "pxc (haproxy)".to_string()),
            ("Version", version),
            ("Nodes", request.nodes.to_string()),
            ("CPU", request.cpu.clone()),
            ("Memory", request.memory.clone()),
            ("Disk", request.disk.clone()),
        ];
        for (field, value) in rows {
            table.add_row(vec![Cell::new(field), Cell::new(value)]);
        }
        table.add_row(vec![
            Cell::new("Exposure"),
            Cell::new(exposure.0).fg(exposure.1),
        ]);

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Database Cluster {} ─╮\n",
            format!("[{}]", request.identity.name).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }
}
