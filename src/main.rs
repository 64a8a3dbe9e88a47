use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kira_pathways::Engine;
use kira_pathways::analytes::AnalyteCatalog;
use kira_pathways::cli::{
    Cli, Commands, PanelAuditArgs, PanelsCommand, RegistryCommand, RegistryListArgs,
    RegistryShowArgs, RunArgs,
};
use kira_pathways::config::EngineConfig;
use kira_pathways::diagnostics::ValidationMode;
use kira_pathways::input::load_results;
use kira_pathways::panels::{DEFAULT_PANEL_ID, builtin_panels, load_builtin_panel, load_panel_file};
use kira_pathways::registry::PathwayRegistry;
use kira_pathways::report::{ReportContext, json::render_json, write_reports};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Registry(args) => match args.command {
            RegistryCommand::List(list) => registry_list(list),
            RegistryCommand::Show(show) => registry_show(show),
        },
        Commands::Panels(args) => match args.command {
            PanelsCommand::List => {
                panels_list();
                Ok(())
            }
            PanelsCommand::Audit(audit) => panels_audit(audit),
        },
    }
}

fn run(args: RunArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let config = base.overlay(args.overrides());

    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("configuring thread pool")?;
    }

    let engine = Engine::from_config(&config).context("initializing engine")?;
    let results = load_results(&args.input)
        .with_context(|| format!("reading results {}", args.input.display()))?;
    let run = engine.run_validated(&results, config.validation);

    let ctx = ReportContext {
        tool_version: env!("CARGO_PKG_VERSION"),
        panel_id: engine.panel_id(),
        catalog: engine.catalog(),
        registry_version: engine.registry().version(),
        frameworks: engine.registry().frameworks(),
        states: &run.states,
        n_results: results.len(),
        validation_failures: run.failures.len(),
    };
    let paths = write_reports(&ctx, &args.out)
        .with_context(|| format!("writing reports to {}", args.out.display()))?;

    let summary = kira_pathways::summarize_pathway_states(&run.states);
    println!(
        "pathways: {} computed of {} ({} significant, {} mild, {} insufficient)",
        summary.computed(),
        summary.total,
        summary.significant,
        summary.mild,
        summary.insufficient
    );
    println!("report: {}", paths.report.display());

    if config.validation == ValidationMode::Strict && !run.failures.is_empty() {
        for failure in &run.failures {
            eprintln!("{failure}");
        }
        anyhow::bail!("{} pathway(s) failed strict validation", run.failures.len());
    }
    Ok(())
}

fn load_registry(overlay: Option<&Path>) -> Result<PathwayRegistry> {
    let registry = PathwayRegistry::builtin_v1().context("loading built-in registry")?;
    match overlay {
        Some(path) => registry
            .merge_overlay_file(path)
            .with_context(|| format!("merging registry overlay {}", path.display())),
        None => Ok(registry),
    }
}

fn registry_list(args: RegistryListArgs) -> Result<()> {
    let registry = load_registry(args.registry_overlay.as_deref())?;
    println!(
        "pathways (version {}):",
        registry.version().unwrap_or("unversioned")
    );
    for def in registry.pathways() {
        if args.framework.as_deref().is_some_and(|f| f != def.framework) {
            continue;
        }
        let calc = &def.calculations;
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            def.id,
            def.framework,
            calc.pathway_score_method.as_str(),
            calc.score_strategy.as_deref().unwrap_or("-"),
            if calc.implemented { "implemented" } else { "not_implemented" },
            def.required_analytes.len()
        );
    }
    Ok(())
}

fn registry_show(args: RegistryShowArgs) -> Result<()> {
    let registry = load_registry(args.registry_overlay.as_deref())?;
    let def = registry
        .get(&args.id)
        .with_context(|| format!("unknown pathway '{}'", args.id))?;
    println!("{}", render_json(def)?);
    Ok(())
}

fn panels_list() {
    for def in builtin_panels() {
        println!("{}\t{}\t{}", def.id, def.name, def.analytes.len());
    }
}

fn panels_audit(args: PanelAuditArgs) -> Result<()> {
    let catalog = AnalyteCatalog::builtin_v1().context("loading analyte catalog")?;
    let (_, audit) = match &args.panel_file {
        Some(path) => load_panel_file(path, &catalog)
            .with_context(|| format!("loading panel {}", path.display()))?,
        None => {
            let id = args.panel.as_deref().unwrap_or(DEFAULT_PANEL_ID);
            load_builtin_panel(id, &catalog).with_context(|| format!("unknown panel '{id}'"))?
        }
    };
    println!("panel: {}", audit.panel_id);
    println!("defined: {}", audit.panel_size_defined);
    println!("known: {}", audit.panel_size_known);
    for unknown in &audit.unknown_analytes {
        println!("unknown\t{unknown}");
    }
    Ok(())
}
