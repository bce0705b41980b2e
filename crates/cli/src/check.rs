use crate::source::{SourceArgs, build_checker};
use crate::view::{ResultRow, path_rows};
use capcheck_api::{CapabilityPaths, CheckOutcome, UnsupportedConstraintPolicy};
use clap::{Args, ValueEnum};
use tabled::{Table, settings::Style};
use tracing::info;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Id of the submodel holding the required capabilities
    #[arg(long, value_name = "SUBMODEL_ID")]
    pub submodel: String,

    /// idShort path of a required capability container (repeatable)
    #[arg(long = "path", value_name = "ID_SHORT_PATH", required = true)]
    pub paths: Vec<String>,

    /// Id of the machine asset
    #[arg(long, value_name = "ASSET_ID")]
    pub machine: String,

    /// Force an instance check (only mounted tools count)
    #[arg(long, conflicts_with = "type_check")]
    pub instance: bool,

    /// Force a type check (all tool types count)
    #[arg(long = "type", id = "type_check")]
    pub type_check: bool,

    /// Reject constraints of unsupported shape instead of accepting them
    #[arg(long)]
    pub strict_constraints: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl CheckArgs {
    fn instance_override(&self) -> Option<bool> {
        match (self.instance, self.type_check) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn capability_paths(&self) -> CapabilityPaths {
        match self.paths.as_slice() {
            [single] => CapabilityPaths::Single(single.clone()),
            many => CapabilityPaths::Many(many.to_vec()),
        }
    }
}

pub async fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (source, mut options) = args.source.resolve()?;
    if let Some(instance) = args.instance_override() {
        options.instance_check = Some(instance);
    }
    if args.strict_constraints {
        options.unsupported_constraints = UnsupportedConstraintPolicy::Strict;
    }

    info!(
        "Checking {} path(s) of '{}' against '{}' using {}",
        args.paths.len(),
        args.submodel,
        args.machine,
        source.label()
    );

    let paths = args.capability_paths();
    let outcome = match build_checker(&source, options) {
        Ok(checker) => checker.check_all(&args.submodel, &paths, &args.machine).await,
        Err(e) => capcheck_runtime::failed_outcome(
            &source.label(),
            &args.submodel,
            &paths,
            &args.machine,
            e,
        ),
    };

    println!("{}", render(&outcome, args.format)?);
    Ok(())
}

fn render(
    outcome: &CheckOutcome,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Table => {
            let rows: Vec<ResultRow> = outcome
                .results()
                .iter()
                .map(ResultRow::from_result)
                .collect();
            let mut rendered = Table::new(&rows).with(Style::psql()).to_string();

            let paths = path_rows(outcome.results());
            if !paths.is_empty() {
                rendered.push_str("\n\n");
                rendered.push_str(&Table::new(&paths).with(Style::psql()).to_string());
            }
            Ok(rendered)
        }
    }
}
