use std::collections::HashMap;
use std::path::Path;

use crate::analytes::normalize::{AliasTable, clean_name};
use crate::error::CatalogError;

const BUILTIN_ANALYTES_V1: &str = include_str!("../../assets/analytes_v1.tsv");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyteDef {
    pub id: String,
    pub display_name: String,
    pub aliases: Vec<String>,
}

/// Analyte metadata: the set of recognized ids, their display names and the
/// controlled alias table used by the normalizer.
#[derive(Debug, Clone)]
pub struct AnalyteCatalog {
    defs: Vec<AnalyteDef>,
    by_key: HashMap<String, usize>,
    aliases: AliasTable,
}

impl AnalyteCatalog {
    pub fn builtin_v1() -> Result<Self, CatalogError> {
        Self::from_tsv_str(BUILTIN_ANALYTES_V1, "built-in v1")
    }

    pub fn load_tsv(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_tsv_str(&content, &path.display().to_string())
    }

    pub fn from_tsv_str(content: &str, origin: &str) -> Result<Self, CatalogError> {
        Self::from_defs(parse_catalog_tsv(content, origin)?)
    }

    pub fn from_defs(defs: Vec<AnalyteDef>) -> Result<Self, CatalogError> {
        let mut by_key = HashMap::with_capacity(defs.len());
        for (idx, def) in defs.iter().enumerate() {
            let key = clean_name(&def.id);
            if by_key.insert(key, idx).is_some() {
                return Err(CatalogError::DuplicateId(def.id.clone()));
            }
        }

        let mut aliases = AliasTable::new();
        for def in &defs {
            let mut forms: Vec<String> = def.aliases.clone();
            let key = clean_name(&def.id);
            if key.ends_with("ic") {
                forms.push(format!("{key} acid"));
            }
            for alias in forms {
                // An alias never shadows another analyte's canonical id.
                if by_key.contains_key(&clean_name(&alias)) {
                    continue;
                }
                aliases.insert(&alias, &key);
            }
        }

        Ok(Self {
            defs,
            by_key,
            aliases,
        })
    }

    /// Join key for a raw label.
    pub fn normalize(&self, raw: &str) -> String {
        self.aliases.resolve(raw)
    }

    pub fn get(&self, raw: &str) -> Option<&AnalyteDef> {
        self.by_key
            .get(&self.normalize(raw))
            .and_then(|&idx| self.defs.get(idx))
    }

    pub fn is_known(&self, raw: &str) -> bool {
        self.get(raw).is_some()
    }

    pub fn display_name(&self, raw: &str) -> Option<&str> {
        self.get(raw).map(|def| def.display_name.as_str())
    }

    /// Display name when known, otherwise the label as given.
    pub fn label_for(&self, raw: &str) -> String {
        self.display_name(raw)
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_string())
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalyteDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

fn parse_catalog_tsv(content: &str, origin: &str) -> Result<Vec<AnalyteDef>, CatalogError> {
    let mut defs = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('\t').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(CatalogError::MalformedRow {
                origin: origin.to_string(),
                line: line_no,
            });
        }
        let id = parts[0].trim();
        let display_name = parts[1].trim();
        if id.is_empty() || display_name.is_empty() {
            return Err(CatalogError::EmptyField {
                origin: origin.to_string(),
                line: line_no,
            });
        }
        let aliases = parts
            .get(2)
            .map(|field| {
                field
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        defs.push(AnalyteDef {
            id: id.to_string(),
            display_name: display_name.to_string(),
            aliases,
        });
    }
    Ok(defs)
}

#[cfg(test)]
#[path = "../../tests/src_inline/analytes/catalog.rs"]
mod tests;
