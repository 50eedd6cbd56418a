//! Record schemas in the conventional `$defs`/`$ref` form, with the
//! `title`/`default` annotations a schema generator would emit. These are
//! the inputs to [`normalize`](super::normalize), not what goes on the wire.

use super::SchemaNode;
use crate::model::RecordShape;
use serde_json::{json, Value};

/// The record schema for `shape`, before normalization.
pub fn record_schema(shape: RecordShape) -> SchemaNode {
    let value = match shape {
        RecordShape::Structured => structured_schema(),
        RecordShape::Narrative => narrative_schema(),
    };
    SchemaNode::from(value)
}

fn structured_schema() -> Value {
    json!({
        "$defs": {
            "Definition": definition_def(),
            "LegislativeSection": object(
                "LegislativeSection",
                json!({
                    "section_number": string("Section Number", "The section number (e.g., '1.2')"),
                    "title": string("Title", "The title of the section"),
                    "content_summary": string("Content Summary", "A brief summary of the section's content")
                }),
                &["section_number", "title", "content_summary"],
            ),
            "EligibilityCriteria": object(
                "EligibilityCriteria",
                json!({
                    "criteria": string("Criteria", "A specific eligibility criterion"),
                    "category": optional_string(
                        "Category",
                        "Category of eligibility (e.g., 'Age', 'Income'). Empty string if not applicable."
                    )
                }),
                &["criteria"],
            ),
            "PaymentEntitlement": object(
                "PaymentEntitlement",
                json!({
                    "entitlement_name": string("Entitlement Name", "Name of the entitlement or payment"),
                    "description": string("Description", "Description of what is provided"),
                    "conditions": optional_string(
                        "Conditions",
                        "Conditions required to receive this entitlement. Empty string if none."
                    )
                }),
                &["entitlement_name", "description"],
            ),
            "RecordKeepingRequirement": object(
                "RecordKeepingRequirement",
                json!({
                    "requirement": string("Requirement", "The specific record-keeping requirement"),
                    "duration": optional_string(
                        "Duration",
                        "How long records must be kept. Empty string if not specified."
                    )
                }),
                &["requirement"],
            )
        },
        "properties": {
            "document_title": string("Document Title", "The title of the document"),
            "definitions": list_of("Definitions", "List of defined terms", "Definition"),
            "sections": list_of("Sections", "Key legislative sections", "LegislativeSection"),
            "eligibility": list_of(
                "Eligibility",
                "Eligibility criteria found in the document",
                "EligibilityCriteria"
            ),
            "entitlements": list_of(
                "Entitlements",
                "Payments or entitlements details",
                "PaymentEntitlement"
            ),
            "record_keeping": list_of(
                "Record Keeping",
                "Record keeping and reporting requirements",
                "RecordKeepingRequirement"
            ),
            "executive_summary": {
                "description": "5-10 bullet points summarizing the act (Purpose, Definitions, Eligibility, Obligations, Enforcement)",
                "items": { "type": "string" },
                "title": "Executive Summary",
                "type": "array",
                "default": []
            }
        },
        "required": ["document_title"],
        "title": "LegalDocument",
        "type": "object"
    })
}

fn narrative_schema() -> Value {
    json!({
        "$defs": {
            "Definition": definition_def()
        },
        "properties": {
            "document_title": string("Document Title", "The title of the document"),
            "purpose": optional_string("Purpose", "Summary of the purpose of the act"),
            "definitions": list_of("Definitions", "List of defined terms", "Definition"),
            "eligibility": optional_string("Eligibility", "Summary of who is eligible and under what criteria"),
            "obligations": optional_string("Obligations", "Summary of the duties the act imposes"),
            "responsibilities": optional_string(
                "Responsibilities",
                "Summary of the responsibilities of administering bodies"
            ),
            "payments": optional_string("Payments", "Summary of payments or entitlements provided"),
            "penalties": optional_string("Penalties", "Summary of offences, penalties and enforcement"),
            "record_keeping": optional_string(
                "Record Keeping",
                "Summary of record keeping and reporting requirements"
            ),
            "executive_summary": optional_string(
                "Executive Summary",
                "Markdown bulleted summary using '-' bullets and no HTML"
            )
        },
        "required": ["document_title"],
        "title": "LegalDocumentSummary",
        "type": "object"
    })
}

fn definition_def() -> Value {
    object(
        "Definition",
        json!({
            "term": string("Term", "The term being defined"),
            "definition": string("Definition", "The definition of the term")
        }),
        &["term", "definition"],
    )
}

fn object(title: &str, properties: Value, required: &[&str]) -> Value {
    json!({
        "properties": properties,
        "required": required,
        "title": title,
        "type": "object"
    })
}

fn string(title: &str, description: &str) -> Value {
    json!({ "description": description, "title": title, "type": "string" })
}

fn optional_string(title: &str, description: &str) -> Value {
    json!({ "default": "", "description": description, "title": title, "type": "string" })
}

fn list_of(title: &str, description: &str, def: &str) -> Value {
    json!({
        "description": description,
        "items": { "$ref": format!("#/$defs/{def}") },
        "title": title,
        "type": "array"
    })
}
