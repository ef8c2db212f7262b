use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use sheetcheck_path::{flatten, has_field};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::graph::SchemaGraph;
use crate::schema::Schema;

/// How one schema relates to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Every requirement is met.
    Valid,
    /// The record claims this kind but is malformed; fails the record.
    Unacceptable,
    /// A root schema that matched nothing: the record is not of this kind.
    /// The schema and everything extending it are skipped.
    Invalid,
}

/// Result of classifying one schema against one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaOutcome {
    pub schema: String,
    pub classification: Classification,
    /// Declared paths confirmed present.
    pub certified: BTreeSet<String>,
    /// Required paths that were absent. An unmet `AnyOf` group contributes
    /// all of its members.
    pub missing: BTreeSet<String>,
}

/// Aggregate of a presence walk over a whole graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Presence {
    pub success: bool,
    /// Union of the fields certified by every VALID schema.
    pub certified: BTreeSet<String>,
    /// Outcomes of the schemas that were classified, in evaluation order.
    pub outcomes: Vec<SchemaOutcome>,
    /// Schemas skipped because they are, or descend from, an INVALID root.
    pub dropped: BTreeSet<String>,
}

/// Full verdict for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    pub certified_fields: BTreeSet<String>,
    pub extraneous_fields: BTreeSet<String>,
    pub outcomes: Vec<SchemaOutcome>,
    pub dropped: BTreeSet<String>,
}

impl ValidationReport {
    /// Outcome for a named schema, if it was classified.
    pub fn outcome(&self, schema: &str) -> Option<&SchemaOutcome> {
        self.outcomes.iter().find(|outcome| outcome.schema == schema)
    }

    /// Schemas classified UNACCEPTABLE.
    pub fn failures(&self) -> impl Iterator<Item = &SchemaOutcome> + '_ {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.classification == Classification::Unacceptable)
    }
}

/// Classify a single schema against a record.
///
/// Fails only when the schema declares a malformed path.
pub fn classify(schema: &Schema, record: &Value) -> Result<SchemaOutcome> {
    let mut certified = BTreeSet::new();
    let mut missing = BTreeSet::new();

    for path in &schema.mandatory {
        if is_present(schema, record, path)? {
            certified.insert(path.clone());
        } else {
            missing.insert(path.clone());
        }
    }

    for path in &schema.optional {
        if is_present(schema, record, path)? {
            certified.insert(path.clone());
        }
    }

    let mut any_present = false;
    for path in &schema.any_of {
        if is_present(schema, record, path)? {
            certified.insert(path.clone());
            any_present = true;
        }
    }
    if !any_present {
        missing.extend(schema.any_of.iter().cloned());
    }

    let classification = if missing.is_empty() {
        Classification::Valid
    } else if schema.is_extension() || !certified.is_empty() {
        Classification::Unacceptable
    } else {
        Classification::Invalid
    };

    debug!(
        schema = %schema.name,
        ?classification,
        certified = certified.len(),
        missing = missing.len(),
        "classified schema"
    );

    Ok(SchemaOutcome {
        schema: schema.name.clone(),
        classification,
        certified,
        missing,
    })
}

/// Walk every schema parents-first and aggregate the outcomes.
///
/// VALID schemas contribute their certified fields. An INVALID schema is
/// dropped together with all of its descendants. UNACCEPTABLE schemas fail
/// the record but the walk continues so every deficiency is reported.
pub fn validate_presence(record: &Value, graph: &SchemaGraph) -> Result<Presence> {
    let mut presence = Presence {
        success: true,
        ..Presence::default()
    };

    for schema in graph.ordered() {
        if presence.dropped.contains(&schema.name) {
            continue;
        }

        let outcome = classify(schema, record)?;
        match outcome.classification {
            Classification::Valid => {
                presence.certified.extend(outcome.certified.iter().cloned());
            }
            Classification::Invalid => {
                let cascade = graph.descendants(&schema.name);
                debug!(
                    schema = %schema.name,
                    descendants = cascade.len(),
                    "dropping schema and its descendants"
                );
                presence.dropped.insert(schema.name.clone());
                presence.dropped.extend(cascade);
            }
            Classification::Unacceptable => {
                presence.success = false;
            }
        }
        presence.outcomes.push(outcome);
    }

    Ok(presence)
}

/// Fields present in the record that no passing schema certified.
pub fn extraneous_fields(record: &Value, certified: &BTreeSet<String>) -> BTreeSet<String> {
    flatten(record)
        .into_iter()
        .filter(|field| !certified.contains(field))
        .collect()
}

/// Validate a record against a schema graph.
pub fn validate(record: &Value, graph: &SchemaGraph) -> Result<ValidationReport> {
    let presence = validate_presence(record, graph)?;
    let extraneous = extraneous_fields(record, &presence.certified);

    debug!(
        success = presence.success,
        certified = presence.certified.len(),
        extraneous = extraneous.len(),
        dropped = presence.dropped.len(),
        "record validated"
    );

    Ok(ValidationReport {
        success: presence.success,
        certified_fields: presence.certified,
        extraneous_fields: extraneous,
        outcomes: presence.outcomes,
        dropped: presence.dropped,
    })
}

fn is_present(schema: &Schema, record: &Value, path: &str) -> Result<bool> {
    has_field(record, path).map_err(|source| SchemaError::InvalidPath {
        schema: schema.name.clone(),
        source,
    })
}
