use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, SchemaError};

/// External shape of a schema definition.
///
/// Every key defaults to empty; keys other than these four are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Names of the schemas this one extends.
    #[serde(rename = "Extends", default, deserialize_with = "null_as_empty")]
    pub extends: Vec<String>,
    /// Field paths that must all be present.
    #[serde(rename = "Mandatory", default, deserialize_with = "null_as_empty")]
    pub mandatory: Vec<String>,
    /// Field paths recognized when present, never required.
    #[serde(rename = "Optional", default, deserialize_with = "null_as_empty")]
    pub optional: Vec<String>,
    /// Field paths of which at least one must be present.
    #[serde(rename = "AnyOf", default, deserialize_with = "null_as_empty")]
    pub any_of: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One named validation schema.
///
/// Field paths are kept as written; they are parsed when a record is
/// classified so a malformed path fails that validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    /// Parent schema names, in declaration order. Never contains empty names.
    pub extends: Vec<String>,
    pub mandatory: BTreeSet<String>,
    pub optional: BTreeSet<String>,
    pub any_of: BTreeSet<String>,
}

impl Schema {
    /// An empty root schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
            mandatory: BTreeSet::new(),
            optional: BTreeSet::new(),
            any_of: BTreeSet::new(),
        }
    }

    /// Build a schema from its decoded definition.
    pub fn from_definition(name: impl Into<String>, definition: SchemaDefinition) -> Self {
        Self::new(name)
            .with_extends(definition.extends)
            .with_mandatory(definition.mandatory)
            .with_optional(definition.optional)
            .with_any_of(definition.any_of)
    }

    /// Decode a definition mapping (`Extends`, `Mandatory`, `Optional`, `AnyOf`).
    pub fn from_value(name: impl Into<String>, definition: &Value) -> Result<Self> {
        let name = name.into();
        let definition = SchemaDefinition::deserialize(definition).map_err(|source| {
            SchemaError::InvalidDefinition {
                name: name.clone(),
                source,
            }
        })?;
        Ok(Self::from_definition(name, definition))
    }

    /// Append parents. Empty names add no edge.
    pub fn with_extends<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extends.extend(
            parents
                .into_iter()
                .map(Into::into)
                .filter(|parent: &String| !parent.is_empty()),
        );
        self
    }

    pub fn with_mandatory<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_optional<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_any_of<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.any_of.extend(paths.into_iter().map(Into::into));
        self
    }

    /// True when the schema has at least one parent.
    pub fn is_extension(&self) -> bool {
        !self.extends.is_empty()
    }
}
