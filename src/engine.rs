use tracing::{info, warn};

use crate::analytes::AnalyteCatalog;
use crate::config::EngineConfig;
use crate::diagnostics::{DiagnosticsHook, NoDiagnostics, ValidatingDiagnostics, ValidationMode};
use crate::error::{EngineError, ValidationError};
use crate::model::analyte::AnalyteResult;
use crate::model::state::PathwayState;
use crate::panels::{PanelAudit, PanelSet, load_builtin_panel, load_panel_file};
use crate::pipeline::stage4_state::{EngineContext, compute_pathway_states};
use crate::registry::{CohortStatsConfig, PathwayRegistry};
use crate::strategies::StrategyRegistry;

/// Owns the loaded collaborators and runs the registry against result sets.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: AnalyteCatalog,
    panel: PanelSet,
    panel_audit: PanelAudit,
    registry: PathwayRegistry,
    strategies: StrategyRegistry,
}

/// States plus the validation errors collected in strict mode.
#[derive(Debug, Clone)]
pub struct EngineRun {
    pub states: Vec<PathwayState>,
    pub failures: Vec<ValidationError>,
}

impl Engine {
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let catalog = AnalyteCatalog::builtin_v1()?;

        let (panel, panel_audit) = match &config.panel_file {
            Some(path) => load_panel_file(path, &catalog)?,
            None => load_builtin_panel(&config.panel, &catalog)
                .ok_or_else(|| EngineError::UnknownPanel(config.panel.clone()))?,
        };
        if !panel_audit.unknown_analytes.is_empty() {
            warn!(
                panel_id = %panel_audit.panel_id,
                unknown = panel_audit.unknown_analytes.len(),
                "panel lists analytes missing from the catalog"
            );
        }

        let mut registry = PathwayRegistry::builtin_v1()?;
        if let Some(path) = &config.registry_overlay {
            registry = registry.merge_overlay_file(path)?;
        }
        // Reapplied after the overlay so replaced definitions keep their cohort values.
        let mut cohort = CohortStatsConfig::builtin_v1()?;
        if let Some(path) = &config.cohort_stats {
            cohort = cohort.merge(CohortStatsConfig::load(path)?);
        }
        registry.apply_cohort_stats(&cohort);

        info!(
            panel_id = %panel_audit.panel_id,
            panel_size = panel.len(),
            pathways = registry.len(),
            analytes = catalog.len(),
            "engine ready"
        );

        Ok(Self {
            catalog,
            panel,
            panel_audit,
            registry,
            strategies: StrategyRegistry::builtin(),
        })
    }

    pub fn with_strategies(mut self, strategies: StrategyRegistry) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn context<'a>(&'a self, diagnostics: &'a dyn DiagnosticsHook) -> EngineContext<'a> {
        EngineContext {
            catalog: &self.catalog,
            panel: &self.panel,
            strategies: &self.strategies,
            diagnostics,
        }
    }

    pub fn run(&self, results: &[AnalyteResult], diagnostics: &dyn DiagnosticsHook) -> Vec<PathwayState> {
        compute_pathway_states(self.registry.pathways(), results, &self.context(diagnostics))
    }

    /// Runs with the validator for `mode`; `Off` skips validation entirely.
    pub fn run_validated(&self, results: &[AnalyteResult], mode: ValidationMode) -> EngineRun {
        if mode == ValidationMode::Off {
            return EngineRun {
                states: self.run(results, &NoDiagnostics),
                failures: Vec::new(),
            };
        }
        let hook = ValidatingDiagnostics::new(mode);
        let states = self.run(results, &hook);
        EngineRun {
            states,
            failures: hook.take_failures(),
        }
    }

    pub fn catalog(&self) -> &AnalyteCatalog {
        &self.catalog
    }

    pub fn panel(&self) -> &PanelSet {
        &self.panel
    }

    pub fn panel_audit(&self) -> &PanelAudit {
        &self.panel_audit
    }

    pub fn panel_id(&self) -> &str {
        &self.panel.id
    }

    pub fn registry(&self) -> &PathwayRegistry {
        &self.registry
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/engine.rs"]
mod tests;
