use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::diagnostics::ValidationMode;

#[derive(Debug, Parser)]
#[command(name = "kira-pathways", version, about = "Metabolic pathway scoring for targeted metabolomics panels")]
pub struct Cli {
    #[arg(long, short, global = true, default_value_t = false, help = "Debug-level logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score every registry pathway against one result file.
    Run(RunArgs),
    Registry(RegistryArgs),
    Panels(PanelsArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Results file (.json or .tsv, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, help = "Engine config JSON; flags below override it")]
    pub config: Option<PathBuf>,

    #[arg(long, conflicts_with = "panel_file", help = "Built-in panel id")]
    pub panel: Option<String>,

    #[arg(long, help = "Panel file, one analyte per line")]
    pub panel_file: Option<PathBuf>,

    #[arg(long)]
    pub registry_overlay: Option<PathBuf>,

    #[arg(long)]
    pub cohort_stats: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub validate: Option<ValidationMode>,

    #[arg(long, help = "Number of threads (0 = auto)")]
    pub threads: Option<usize>,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            panel: self.panel.clone(),
            panel_file: self.panel_file.clone(),
            registry_overlay: self.registry_overlay.clone(),
            cohort_stats: self.cohort_stats.clone(),
            validation: self.validate,
            threads: self.threads,
        }
    }
}

#[derive(Debug, Args)]
pub struct RegistryArgs {
    #[command(subcommand)]
    pub command: RegistryCommand,
}

#[derive(Debug, Subcommand)]
pub enum RegistryCommand {
    List(RegistryListArgs),
    Show(RegistryShowArgs),
}

#[derive(Debug, Args)]
pub struct RegistryListArgs {
    #[arg(long)]
    pub registry_overlay: Option<PathBuf>,

    #[arg(long, help = "Only pathways of this framework code")]
    pub framework: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegistryShowArgs {
    pub id: String,

    #[arg(long)]
    pub registry_overlay: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PanelsArgs {
    #[command(subcommand)]
    pub command: PanelsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PanelsCommand {
    List,
    Audit(PanelAuditArgs),
}

#[derive(Debug, Args)]
pub struct PanelAuditArgs {
    #[arg(long, conflicts_with = "panel_file")]
    pub panel: Option<String>,

    #[arg(long)]
    pub panel_file: Option<PathBuf>,
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
