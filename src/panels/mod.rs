use std::collections::HashSet;

use crate::analytes::AliasTable;

pub mod defs;
pub mod loader;

pub use defs::{DEFAULT_PANEL_ID, PanelDef, builtin_panels};
pub use loader::{load_builtin_panel, load_panel_file};

/// Answers whether the ordering panel offers an analyte, independent of
/// what any one sample returned.
pub trait PanelCatalog: Send + Sync {
    fn is_in_panel(&self, analyte_id: &str) -> bool;
}

impl<F> PanelCatalog for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_in_panel(&self, analyte_id: &str) -> bool {
        self(analyte_id)
    }
}

#[derive(Debug, Clone)]
pub struct PanelSet {
    pub id: String,
    pub name: String,
    members: HashSet<String>,
    aliases: AliasTable,
}

impl PanelSet {
    pub fn new(id: impl Into<String>, name: impl Into<String>, aliases: AliasTable) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: HashSet::new(),
            aliases,
        }
    }

    pub fn insert(&mut self, analyte: &str) -> bool {
        let key = self.aliases.resolve(analyte);
        if key.is_empty() {
            return false;
        }
        self.members.insert(key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl PanelCatalog for PanelSet {
    fn is_in_panel(&self, analyte_id: &str) -> bool {
        self.members.contains(&self.aliases.resolve(analyte_id))
    }
}

#[derive(Debug, Clone)]
pub struct PanelAudit {
    pub panel_id: String,
    pub panel_size_defined: usize,
    pub panel_size_known: usize,
    pub unknown_analytes: Vec<String>,
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/tests.rs"]
mod tests;
