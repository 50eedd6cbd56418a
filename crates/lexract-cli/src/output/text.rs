use super::Section;
use lexract_core::model::{LegalRecord, NarrativeBody, RecordBody, StructuredBody};
use std::fmt::{self, Write};

const ALL_PARTS: [Section; 6] = [
    Section::Summary,
    Section::Definitions,
    Section::Sections,
    Section::Eligibility,
    Section::Entitlements,
    Section::RecordKeeping,
];

/// Render a record as a Markdown report, or just one part of it.
///
/// Every part prints an explicit empty-state line when it has nothing to
/// show, so a record with no extracted items still renders fully.
pub fn format_record(record: &LegalRecord, only: Option<Section>) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_record(&mut out, record, only);
    out
}

fn write_record(out: &mut String, record: &LegalRecord, only: Option<Section>) -> fmt::Result {
    let parts: &[Section] = match only {
        Some(ref section) => std::slice::from_ref(section),
        None => &ALL_PARTS,
    };

    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match part {
            Section::Summary => write_summary(out, record)?,
            Section::Definitions => write_definitions(out, record)?,
            Section::Sections | Section::Eligibility | Section::Entitlements | Section::RecordKeeping => {
                match record.body() {
                    RecordBody::Structured(body) => write_structured_part(out, *part, body)?,
                    RecordBody::Narrative(body) => write_narrative_part(out, *part, body)?,
                }
            }
        }
    }
    Ok(())
}

fn write_summary(out: &mut String, record: &LegalRecord) -> fmt::Result {
    let title = record.document_title().trim();
    let title = if title.is_empty() { "(untitled)" } else { title };
    writeln!(out, "# Document: {title}\n")?;

    writeln!(
        out,
        "Definitions: {} | Sections: {} | Entitlements: {}\n",
        record.definitions().len(),
        record.sections().len(),
        record.entitlements().len()
    )?;

    writeln!(out, "## Executive Summary\n")?;
    let bullets = record.executive_summary().bullets();
    if !bullets.is_empty() {
        for point in &bullets {
            writeln!(out, "- {point}")?;
        }
    } else if !record.sections().is_empty() {
        // Fall back to section summaries when the model gave no summary
        for s in record.sections() {
            writeln!(out, "- **{} {}**: {}", s.section_number, s.title, s.content_summary)?;
        }
    } else {
        writeln!(out, "No summary available.")?;
    }
    Ok(())
}

fn write_definitions(out: &mut String, record: &LegalRecord) -> fmt::Result {
    writeln!(out, "## Definitions\n")?;
    if record.definitions().is_empty() {
        return writeln!(out, "No definitions found.");
    }
    for d in record.definitions() {
        writeln!(out, "- **{}**: {}", d.term, d.definition)?;
    }
    Ok(())
}

fn write_structured_part(out: &mut String, part: Section, body: &StructuredBody) -> fmt::Result {
    match part {
        Section::Sections => {
            writeln!(out, "## Legislative Sections\n")?;
            if body.sections.is_empty() {
                writeln!(out, "No sections found.")?;
            }
            for s in &body.sections {
                writeln!(out, "### Section {}: {}\n", s.section_number, s.title)?;
                writeln!(out, "{}\n", s.content_summary)?;
            }
        }
        Section::Eligibility => {
            writeln!(out, "## Eligibility Criteria\n")?;
            if body.eligibility.is_empty() {
                writeln!(out, "No eligibility criteria found.")?;
            }
            for e in &body.eligibility {
                writeln!(out, "- **{}**: {}", e.display_category(), e.criteria)?;
            }
        }
        Section::Entitlements => {
            writeln!(out, "## Payment & Entitlements\n")?;
            if body.entitlements.is_empty() {
                writeln!(out, "No entitlements found.")?;
            }
            for e in &body.entitlements {
                writeln!(out, "### {}\n", e.entitlement_name)?;
                writeln!(out, "{}", e.description)?;
                if !e.conditions.trim().is_empty() {
                    writeln!(out, "Conditions: {}", e.conditions)?;
                }
                out.push('\n');
            }
        }
        Section::RecordKeeping => {
            writeln!(out, "## Record Keeping\n")?;
            if body.record_keeping.is_empty() {
                writeln!(out, "No record keeping requirements found.")?;
            }
            for r in &body.record_keeping {
                writeln!(out, "- **Requirement**: {}", r.requirement)?;
                if !r.duration.trim().is_empty() {
                    writeln!(out, "  Duration: {}", r.duration)?;
                }
            }
        }
        Section::Summary | Section::Definitions => {}
    }
    Ok(())
}

fn write_narrative_part(out: &mut String, part: Section, body: &NarrativeBody) -> fmt::Result {
    let fields: Vec<(&str, &str)> = match part {
        Section::Sections => vec![
            ("Purpose", body.purpose.as_str()),
            ("Obligations", body.obligations.as_str()),
            ("Responsibilities", body.responsibilities.as_str()),
            ("Penalties", body.penalties.as_str()),
        ],
        Section::Eligibility => vec![("Eligibility", body.eligibility.as_str())],
        Section::Entitlements => vec![("Payments", body.payments.as_str())],
        Section::RecordKeeping => vec![("Record Keeping", body.record_keeping.as_str())],
        Section::Summary | Section::Definitions => Vec::new(),
    };

    for (i, (heading, text)) in fields.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        writeln!(out, "## {heading}\n")?;
        let text = text.trim();
        if text.is_empty() {
            writeln!(out, "Not specified.")?;
        } else {
            writeln!(out, "{text}")?;
        }
    }
    Ok(())
}
