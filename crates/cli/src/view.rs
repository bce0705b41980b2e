use capcheck_api::{CheckResult, MountingPath};
use tabled::Tabled;

/// One row per checked capability path.
#[derive(Tabled)]
pub struct ResultRow {
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Mode")]
    pub mode: String,
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Tools")]
    pub tools: String,
    #[tabled(rename = "Message")]
    pub message: String,
}

impl ResultRow {
    pub fn from_result(result: &CheckResult) -> Self {
        let tools = if result.suitable_tools.is_empty() {
            "-".to_string()
        } else {
            result
                .suitable_tools
                .iter()
                .map(|tool| {
                    if result.mounted_tools.contains(tool) {
                        format!("{tool} (mounted)")
                    } else {
                        tool.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            path: result.required_capability_path.clone(),
            mode: result
                .type_of_check
                .map(|mode| format!("{mode:?}"))
                .unwrap_or_else(|| "-".to_string()),
            code: result.code.to_string(),
            tools,
            message: result.message.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct PathRow {
    #[tabled(rename = "Tool")]
    pub tool: String,
    #[tabled(rename = "Mounting path")]
    pub path: String,
}

impl PathRow {
    pub fn new(tool: &str, path: &MountingPath) -> Self {
        Self {
            tool: tool.to_string(),
            path: path.to_string(),
        }
    }
}

/// Mounting path rows of every result, in result order.
pub fn path_rows(results: &[CheckResult]) -> Vec<PathRow> {
    results
        .iter()
        .flat_map(|result| result.mounting_paths_by_tool.iter())
        .flat_map(|(tool, paths)| paths.iter().map(move |path| PathRow::new(tool, path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use capcheck_api::{CheckMode, ResultCode};

    #[test]
    fn test_result_row_marks_mounted_tools() {
        let mut result = CheckResult::pending("memory", "urn:sm:req", "CapabilitySet/C3", "m");
        result.type_of_check = Some(CheckMode::Instance);
        result.suitable_tools = vec!["t1".to_string(), "t2".to_string()];
        result.mounted_tools = vec!["t2".to_string()];
        result.mounting_paths_by_tool.insert(
            "t1".to_string(),
            vec![MountingPath::new(vec!["t1".into(), "X".into(), "m".into()])],
        );
        result.conclude(ResultCode::SuitableToolMounted, "ok");

        let row = ResultRow::from_result(&result);
        assert_eq!(row.mode, "Instance");
        assert_eq!(row.tools, "t1, t2 (mounted)");
        assert_eq!(row.code, "SUITABLE_TOOL_MOUNTED");

        let rows = path_rows(std::slice::from_ref(&result));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].path, "t1 -> X -> m");
    }
}
