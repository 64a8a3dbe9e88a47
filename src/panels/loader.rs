use std::path::Path;

use tracing::debug;

use crate::analytes::AnalyteCatalog;
use crate::error::PanelError;
use crate::panels::defs::{PanelDef, find_builtin};
use crate::panels::{PanelAudit, PanelSet};

pub fn load_builtin_panel(id: &str, catalog: &AnalyteCatalog) -> Option<(PanelSet, PanelAudit)> {
    let def = find_builtin(id)?;
    Some(map_panel(def, catalog))
}

/// Reads a panel from a text file: one analyte per line, `#` starts a comment.
/// The panel id is the file stem.
pub fn load_panel_file(
    path: &Path,
    catalog: &AnalyteCatalog,
) -> Result<(PanelSet, PanelAudit), PanelError> {
    let content = std::fs::read_to_string(path).map_err(|source| PanelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<&str> = content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .collect();
    if entries.is_empty() {
        return Err(PanelError::Empty(path.to_path_buf()));
    }
    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "custom".to_string());
    Ok(build_panel(&id, &id, entries.iter().copied(), catalog))
}

fn map_panel(def: &PanelDef, catalog: &AnalyteCatalog) -> (PanelSet, PanelAudit) {
    build_panel(def.id, def.name, def.analytes.iter().copied(), catalog)
}

fn build_panel<'a>(
    id: &str,
    name: &str,
    entries: impl Iterator<Item = &'a str>,
    catalog: &AnalyteCatalog,
) -> (PanelSet, PanelAudit) {
    let mut panel = PanelSet::new(id, name, catalog.aliases().clone());
    let mut defined = 0usize;
    let mut known = 0usize;
    let mut unknown = Vec::new();

    for entry in entries {
        defined += 1;
        panel.insert(entry);
        if catalog.is_known(entry) {
            known += 1;
        } else {
            unknown.push(entry.to_string());
        }
    }

    debug!(
        panel_id = id,
        defined,
        known,
        "panel mapped against analyte catalog"
    );

    let audit = PanelAudit {
        panel_id: id.to_string(),
        panel_size_defined: defined,
        panel_size_known: known,
        unknown_analytes: unknown,
    };
    (panel, audit)
}
