use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use sheetcheck_graph::{descendants, reverse_graph, topological_order, Graph};
use tracing::{info, warn};

use crate::config::GraphConfig;
use crate::engine::{validate, ValidationReport};
use crate::error::{Result, SchemaError};
use crate::schema::{Schema, SchemaDefinition};

/// Immutable set of schemas related by `Extends`.
///
/// The topological order and the children map are computed once at build
/// time. After that the graph is read-only, so one instance can serve
/// concurrent validations; a reload builds a fresh graph and swaps it in.
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    schemas: BTreeMap<String, Schema>,
    order: Vec<String>,
    children: Graph<String>,
    config: GraphConfig,
}

impl SchemaGraph {
    /// Build a graph with default config.
    pub fn build<I>(schemas: I) -> Result<Self>
    where
        I: IntoIterator<Item = Schema>,
    {
        Self::build_with_config(schemas, GraphConfig::default())
    }

    /// Build a graph with explicit config.
    pub fn build_with_config<I>(schemas: I, config: GraphConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Schema>,
    {
        let schemas: Vec<Schema> = schemas.into_iter().collect();
        if schemas.len() > config.max_schemas {
            return Err(SchemaError::TooManySchemas {
                count: schemas.len(),
                max: config.max_schemas,
            });
        }

        let mut by_name = BTreeMap::new();
        for schema in schemas {
            match by_name.entry(schema.name.clone()) {
                Entry::Occupied(_) => return Err(SchemaError::DuplicateSchema(schema.name)),
                Entry::Vacant(slot) => {
                    slot.insert(schema);
                }
            }
        }

        let mut parents: Graph<String> = Graph::new();
        for (name, schema) in &by_name {
            let mut known = Vec::with_capacity(schema.extends.len());
            for parent in &schema.extends {
                if by_name.contains_key(parent) {
                    known.push(parent.clone());
                } else if config.fail_on_unknown_parent {
                    return Err(SchemaError::UnknownParent {
                        schema: name.clone(),
                        parent: parent.clone(),
                    });
                } else {
                    warn!(schema = %name, %parent, "ignoring unknown parent schema");
                }
            }
            parents.insert(name.clone(), known);
        }

        let order = topological_order(&parents)?;
        let children = reverse_graph(&parents);
        info!(schemas = order.len(), "schema graph built");

        Ok(Self {
            schemas: by_name,
            order,
            children,
            config,
        })
    }

    /// Build from decoded definitions keyed by schema name.
    pub fn from_definitions<I, S>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, SchemaDefinition)>,
        S: Into<String>,
    {
        Self::from_definitions_with_config(definitions, GraphConfig::default())
    }

    /// Build from decoded definitions with explicit config.
    pub fn from_definitions_with_config<I, S>(definitions: I, config: GraphConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (S, SchemaDefinition)>,
        S: Into<String>,
    {
        Self::build_with_config(
            definitions
                .into_iter()
                .map(|(name, definition)| Schema::from_definition(name, definition)),
            config,
        )
    }

    /// Build from a single mapping of `schema name -> definition`.
    pub fn from_value(definitions: &Value) -> Result<Self> {
        Self::from_value_with_config(definitions, GraphConfig::default())
    }

    /// Build from a `schema name -> definition` mapping with explicit config.
    pub fn from_value_with_config(definitions: &Value, config: GraphConfig) -> Result<Self> {
        let map = definitions
            .as_object()
            .ok_or_else(|| SchemaError::NotASchemaSet(value_kind(definitions)))?;
        let schemas = map
            .iter()
            .map(|(name, definition)| Schema::from_value(name.as_str(), definition))
            .collect::<Result<Vec<_>>>()?;
        Self::build_with_config(schemas, config)
    }

    /// Build from embedded JSON definition strings.
    pub fn from_embedded(schemas: &[(&str, &str)]) -> Result<Self> {
        Self::from_embedded_with_config(schemas, GraphConfig::default())
    }

    /// Build from embedded JSON definition strings with explicit config.
    pub fn from_embedded_with_config(schemas: &[(&str, &str)], config: GraphConfig) -> Result<Self> {
        let schemas = schemas
            .iter()
            .map(|(name, json)| -> Result<Schema> {
                let definition: SchemaDefinition =
                    serde_json::from_str(json).map_err(|source| SchemaError::InvalidDefinition {
                        name: name.to_string(),
                        source,
                    })?;
                Ok(Schema::from_definition(*name, definition))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::build_with_config(schemas, config)
    }

    /// Validate a record against every schema in the graph.
    pub fn validate(&self, record: &Value) -> Result<ValidationReport> {
        validate(record, self)
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Schema names with every parent before its children.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Schemas in evaluation order.
    pub fn ordered(&self) -> impl Iterator<Item = &Schema> + '_ {
        self.order.iter().filter_map(|name| self.schemas.get(name))
    }

    /// Schemas that directly extend `name`.
    pub fn children(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every schema that directly or indirectly extends `name`.
    pub fn descendants(&self, name: &str) -> BTreeSet<String> {
        descendants(&name.to_string(), &self.children)
    }

    /// Schema names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
