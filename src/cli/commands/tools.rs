use rmcp::model::Tool;
use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_required, truncate_with_ellipsis};
use crate::client::PlaneClient;
use crate::mcp::{ToolSpec, catalog};

#[derive(Tabled)]
struct ToolDisplay {
    #[tabled(rename = "Tool")]
    name: String,
    #[tabled(rename = "Required")]
    required: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&ToolSpec<PlaneClient>> for ToolDisplay {
    fn from(spec: &ToolSpec<PlaneClient>) -> Self {
        Self {
            name: spec.name.to_string(),
            required: format_required(&spec.input_schema),
            description: truncate_with_ellipsis(spec.description, 60),
        }
    }
}

/// Print the tool catalog
pub fn list_tools(format: &str) -> CliResult<String> {
    let specs = catalog::<PlaneClient>();

    match format {
        "json" => {
            let tools: Vec<Tool> = specs.iter().map(ToolSpec::to_tool).collect();
            Ok(serde_json::to_string_pretty(&tools)?)
        }
        _ => Ok(format_table(&specs)),
    }
}

fn format_table(specs: &[ToolSpec<PlaneClient>]) -> String {
    let rows: Vec<ToolDisplay> = specs.iter().map(|s| s.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}
