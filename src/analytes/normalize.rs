use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

/// Folds an analyte label to its bare join form: ASCII letters and digits,
/// lowercase, with Greek letters spelled out. Labels are NFKD-decomposed first
/// so accented letters keep their base and combining marks fall away.
pub fn clean_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.nfkd() {
        if ch.is_ascii() {
            push_clean(&mut out, ch);
        } else if let Some(word) = greek_name(ch).or_else(|| fold_ligature(ch)) {
            out.push_str(word);
        }
    }
    out
}

fn push_clean(out: &mut String, ch: char) {
    let lower = ch.to_ascii_lowercase();
    if lower.is_ascii_alphanumeric() {
        out.push(lower);
    }
}

fn greek_name(ch: char) -> Option<&'static str> {
    match ch {
        'α' | 'Α' => Some("alpha"),
        'β' | 'Β' => Some("beta"),
        'γ' | 'Γ' => Some("gamma"),
        'δ' | 'Δ' => Some("delta"),
        'ω' | 'Ω' => Some("omega"),
        'μ' | 'Μ' => Some("mu"),
        _ => None,
    }
}

/// Latin letters without a canonical decomposition.
fn fold_ligature(ch: char) -> Option<&'static str> {
    match ch {
        'ß' => Some("ss"),
        'æ' | 'Æ' => Some("ae"),
        'œ' | 'Œ' => Some("oe"),
        'ø' | 'Ø' => Some("o"),
        'ł' | 'Ł' => Some("l"),
        'đ' | 'Đ' => Some("d"),
        _ => None,
    }
}

/// Controlled alias table: cleaned alias -> canonical cleaned id.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `alias` for `canonical`. The first registration of an alias wins.
    pub fn insert(&mut self, alias: &str, canonical: &str) -> bool {
        let key = clean_name(alias);
        let target = clean_name(canonical);
        if key.is_empty() || key == target || self.map.contains_key(&key) {
            return false;
        }
        self.map.insert(key, target);
        true
    }

    /// Total: unknown labels resolve to their cleaned form.
    pub fn resolve(&self, raw: &str) -> String {
        let cleaned = clean_name(raw);
        match self.map.get(&cleaned) {
            Some(target) => target.clone(),
            None => cleaned,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/analytes/normalize.rs"]
mod tests;
