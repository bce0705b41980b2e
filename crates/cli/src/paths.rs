use crate::source::{SourceArgs, build_checker};
use crate::view::PathRow;
use capcheck_api::CheckOptions;
use clap::Args;
use tabled::{Table, settings::Style};
use tracing::info;

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Id of the tool asset to mount
    #[arg(long, value_name = "ASSET_ID")]
    pub tool: String,

    /// Only list paths ending at this asset
    #[arg(long, value_name = "ASSET_ID")]
    pub machine: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub async fn run(args: PathsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (source, _) = args.source.resolve()?;
    let checker = build_checker(&source, CheckOptions::default())?;

    let paths = checker
        .mounting_paths(&args.tool, args.machine.as_deref())
        .await?;
    info!("Found {} mounting path(s) for '{}'", paths.len(), args.tool);

    if paths.is_empty() {
        println!("No mounting path found for '{}'", args.tool);
        return Ok(());
    }

    let rows: Vec<PathRow> = paths.iter().map(|path| PathRow::new(&args.tool, path)).collect();
    println!("{}", Table::new(&rows).with(Style::psql()));
    Ok(())
}
