use std::collections::HashMap;

use crate::analytes::AnalyteCatalog;
use crate::model::state::{
    ComputedPathway, InsufficientPathway, InsufficientReason, MissingReason, PathwayState,
};
use crate::report::{ReportContext, RunSummary, format_f64_3, framework_title, group_by_framework};

pub fn render_report_text(ctx: &ReportContext<'_>, summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str("Metabolic Pathway Report\n");
    out.push_str("========================\n\n");

    out.push_str(&format!("Tool: {} {}\n", summary.tool, summary.version));
    out.push_str(&format!("Panel: {}\n", summary.panel_id));
    if let Some(version) = &summary.registry_version {
        out.push_str(&format!("Registry: {}\n", version));
    }
    out.push_str(&format!("Results read: {}\n", summary.n_results));
    out.push_str(&format!(
        "Pathways: {} total, {} significant, {} mild, {} stable, {} insufficient\n",
        summary.pathways.total,
        summary.pathways.significant,
        summary.pathways.mild,
        summary.pathways.normal,
        summary.pathways.insufficient
    ));
    out.push_str(&format!(
        "Mean completeness: {}\n",
        format_f64_3(summary.mean_completeness)
    ));
    if summary.validation_failures > 0 {
        out.push_str(&format!(
            "Validation failures: {}\n",
            summary.validation_failures
        ));
    }
    out.push('\n');

    for (code, states) in group_by_framework(ctx.states) {
        let title = framework_title(ctx.frameworks, code);
        out.push_str(&format!("{}. {}\n", code, title));
        for state in states {
            match state {
                PathwayState::Computed(c) => push_computed(&mut out, c),
                PathwayState::Insufficient(i) => {
                    push_insufficient(&mut out, ctx.catalog, i, "insufficient")
                }
                PathwayState::InsufficientData(i) => {
                    push_insufficient(&mut out, ctx.catalog, i, "insufficient data")
                }
            }
        }
        out.push('\n');
    }

    out
}

fn push_computed(out: &mut String, c: &ComputedPathway) {
    out.push_str(&format!(
        "  {} {}: {} ({}) score {} sigma {}",
        c.pathway_id,
        c.title,
        c.severity.label(),
        c.category.as_str(),
        format_f64_3(c.score),
        format_f64_3(c.sigma)
    ));
    if c.partial {
        out.push_str(" [partial]");
    }
    out.push('\n');

    if !c.drivers.is_empty() {
        let drivers: Vec<String> = c
            .drivers
            .iter()
            .map(|d| format!("{} (z {})", d.display_label, format_f64_3(d.z_score)))
            .collect();
        out.push_str(&format!("    drivers: {}\n", drivers.join(", ")));
    }
    for ratio in &c.ratios {
        let z = ratio
            .z_score
            .map(format_f64_3)
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(&format!(
            "    ratio {}: {} (z {})\n",
            ratio.label,
            format_f64_3(ratio.value),
            z
        ));
    }
    if !c.completeness.missing.is_empty() {
        out.push_str(&format!(
            "    not reported: {}\n",
            c.completeness.missing.join(", ")
        ));
    }
}

fn push_insufficient(
    out: &mut String,
    catalog: &AnalyteCatalog,
    i: &InsufficientPathway,
    status: &str,
) {
    if i.reason == InsufficientReason::NotImplemented {
        out.push_str(&format!(
            "  {} {}: not implemented\n",
            i.pathway_id, i.title
        ));
        return;
    }
    out.push_str(&format!("  {} {}: {}\n", i.pathway_id, i.title, status));
    // Reasons are keyed by analyte id, the missing list by display label.
    let reasons: HashMap<String, MissingReason> = i
        .missing_reasons
        .iter()
        .map(|(id, reason)| (catalog.label_for(id), *reason))
        .collect();
    for label in &i.missing_analytes {
        match reasons.get(label) {
            Some(reason) => out.push_str(&format!("    - {}: {}\n", label, reason.label())),
            None => out.push_str(&format!("    - {}\n", label)),
        }
    }
}
