//! @ai:module:intent Relational database definition from database.json
//! @ai:module:layer domain
//! @ai:module:public_api DatabaseDefinition, DatabaseMeta, TableSchema, Row
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A data row; key order follows the JSON source.
pub type Row = Map<String, Value>;

/// @ai:intent Contents of database.json: schema plus seed data
/// @ai:effects pure
///
/// `schema` and `data` keep their JSON key order, which is also the column
/// order used when creating tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseDefinition {
    pub meta: DatabaseMeta,
    #[serde(default)]
    pub schema: Map<String, Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseMeta {
    pub database_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// @ai:intent Table definition: ordered column name to SQL type declaration
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub columns: Map<String, Value>,
}

impl TableSchema {
    /// @ai:intent Column name and declared type pairs, in declaration order
    /// @ai:effects pure
    pub fn column_defs(&self) -> impl Iterator<Item = (&str, String)> {
        self.columns.iter().map(|(name, ty)| {
            let ty = match ty {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.as_str(), ty)
        })
    }
}

impl DatabaseDefinition {
    /// @ai:intent Names of tables declared in the schema, in JSON order
    /// @ai:effects pure
    pub fn schema_tables(&self) -> Vec<&str> {
        self.schema.keys().map(String::as_str).collect()
    }

    /// @ai:intent Typed schema for a table, None when absent or malformed
    /// @ai:effects pure
    pub fn table_schema(&self, table: &str) -> Option<TableSchema> {
        self.schema
            .get(table)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// @ai:intent Seed rows for a table; non-object entries are skipped
    /// @ai:effects pure
    pub fn rows(&self, table: &str) -> Vec<&Row> {
        self.data
            .get(table)
            .and_then(Value::as_array)
            .map(|rows| rows.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    pub fn has_data(&self, table: &str) -> bool {
        self.data.contains_key(table)
    }
}
