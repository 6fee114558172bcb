//! @ai:module:intent Build the SQLite CRM database from database.json
//! @ai:module:layer infrastructure
//! @ai:module:public_api DatabaseBuilder, DatabaseSummary, TableCount, build_database
//! @ai:module:depends_on dataset

pub mod statements;

use crate::dataset::DatabaseDefinition;
use crate::error::{Error, Result};
use regex::Regex;
use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use serde_json::Value;
use statements::{Statement, INDEXES, TABLE_ORDER, VIEWS};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const DEFAULT_DATABASE_NAME: &str = "database.db";

/// @ai:intent Rows inserted into one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: String,
    pub rows: usize,
}

/// @ai:intent Result of a complete database build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSummary {
    pub path: PathBuf,
    pub tables: Vec<TableCount>,
    pub indexes: usize,
    pub views: usize,
}

impl DatabaseSummary {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// @ai:intent Creates tables, loads seed rows, and adds indexes and views on one connection
pub struct DatabaseBuilder {
    conn: Connection,
}

impl DatabaseBuilder {
    /// @ai:intent Open (or create) a database file
    /// @ai:effects fs:write
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// @ai:intent Build into an in-memory database
    /// @ai:effects pure
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// @ai:intent CREATE TABLE for every schema table, known tables first
    /// @ai:effects db:write
    pub fn create_schema(&self, definition: &DatabaseDefinition) -> Result<Vec<String>> {
        let mut created = Vec::new();

        for table in ordered_tables(definition.schema_tables()) {
            let schema = definition
                .table_schema(table)
                .ok_or_else(|| Error::MissingTable {
                    table: table.to_string(),
                })?;
            ensure_identifier(table)?;

            let mut columns = Vec::new();
            for (name, ty) in schema.column_defs() {
                ensure_identifier(name)?;
                columns.push(format!("{} {}", name, ty));
            }

            let sql = format!(
                "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
                table,
                columns.join(",\n  ")
            );
            self.conn.execute_batch(&sql)?;
            created.push(table.to_string());
        }

        tracing::debug!("Created {} tables", created.len());
        Ok(created)
    }

    /// @ai:intent Insert all seed rows in one transaction
    /// @ai:pre create_schema ran for every table with data
    /// @ai:post returns row counts per non-empty table in insertion order
    /// @ai:effects db:write
    pub fn insert_data(&mut self, definition: &DatabaseDefinition) -> Result<Vec<TableCount>> {
        let tables: Vec<String> = ordered_tables(definition.data.keys().map(String::as_str))
            .into_iter()
            .filter(|table| !definition.rows(table).is_empty())
            .map(str::to_string)
            .collect();

        for table in &tables {
            if !self.table_exists(table)? {
                return Err(Error::MissingTable {
                    table: table.clone(),
                });
            }
        }

        let tx = self.conn.transaction()?;
        let mut counts = Vec::new();

        for table in &tables {
            let rows = definition.rows(table);
            let Some(first) = rows.first() else {
                continue;
            };

            ensure_identifier(table)?;
            let columns: Vec<&str> = first.keys().map(String::as_str).collect();
            for column in &columns {
                ensure_identifier(column)?;
            }

            let placeholders = vec!["?"; columns.len()].join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                columns.join(", "),
                placeholders
            );

            {
                let mut stmt = tx.prepare(&sql)?;
                for row in &rows {
                    let values = columns
                        .iter()
                        .map(|column| row.get(*column).map(json_to_sql).unwrap_or(SqlValue::Null));
                    stmt.execute(rusqlite::params_from_iter(values))?;
                }
            }

            tracing::info!("    {}: {} rows", table, rows.len());
            counts.push(TableCount {
                table: table.clone(),
                rows: rows.len(),
            });
        }

        tx.commit()?;
        Ok(counts)
    }

    /// @ai:intent Create the standard indexes whose tables exist
    /// @ai:effects db:write
    pub fn create_indexes(&self) -> Result<usize> {
        self.apply(&INDEXES)
    }

    /// @ai:intent Create the reporting views whose tables all exist
    /// @ai:effects db:write
    pub fn create_views(&self) -> Result<usize> {
        self.apply(&VIEWS)
    }

    /// @ai:intent Check COUNT(*) of each table against the inserted counts
    /// @ai:effects db:read
    pub fn verify(&self, expected: &[TableCount]) -> Result<()> {
        let mut mismatches = Vec::new();

        for count in expected {
            ensure_identifier(&count.table)?;
            let actual: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", count.table),
                [],
                |row| row.get(0),
            )?;
            if actual != count.rows as i64 {
                tracing::error!(
                    "{} has {} rows, expected {}",
                    count.table,
                    actual,
                    count.rows
                );
                mismatches.push(format!(
                    "{} has {} rows, expected {}",
                    count.table, actual, count.rows
                ));
            }
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(Error::Verification(mismatches.join("; ")))
        }
    }

    fn apply(&self, statements: &[Statement]) -> Result<usize> {
        let mut applied = 0;
        for statement in statements {
            let mut present = true;
            for table in statement.tables {
                present &= self.table_exists(table)?;
            }
            if !present {
                tracing::debug!("Skipping {}: missing tables", statement.name);
                continue;
            }
            self.conn.execute_batch(statement.sql)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            rusqlite::params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

/// @ai:intent Build a fresh database file in output_dir, replacing any existing one
/// @ai:effects fs:write, db:write
pub fn build_database(definition: &DatabaseDefinition, output_dir: &Path) -> Result<DatabaseSummary> {
    std::fs::create_dir_all(output_dir)?;

    let name = if definition.meta.database_name.is_empty() {
        DEFAULT_DATABASE_NAME
    } else {
        definition.meta.database_name.as_str()
    };
    let path = output_dir.join(name);

    if path.exists() {
        std::fs::remove_file(&path)?;
    }

    tracing::info!("Creating database: {}", path.display());
    let mut builder = DatabaseBuilder::open(&path)?;

    tracing::info!("  Creating schema...");
    builder.create_schema(definition)?;

    tracing::info!("  Inserting data...");
    let tables = builder.insert_data(definition)?;

    tracing::info!("  Creating indexes...");
    let indexes = builder.create_indexes()?;

    tracing::info!("  Creating views...");
    let views = builder.create_views()?;

    tracing::info!("  Verifying...");
    builder.verify(&tables)?;

    let summary = DatabaseSummary {
        path,
        tables,
        indexes,
        views,
    };
    tracing::info!(
        "Database created: {} tables, {} rows",
        summary.tables.len(),
        summary.total_rows()
    );
    Ok(summary)
}

/// @ai:intent Fixed parent-first order, then remaining tables in their given order
/// @ai:effects pure
pub fn ordered_tables<'a, I>(tables: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let tables: Vec<&str> = tables.into_iter().collect();

    let mut ordered: Vec<&str> = TABLE_ORDER
        .iter()
        .filter_map(|known| tables.iter().copied().find(|t| t == known))
        .collect();
    ordered.extend(tables.iter().copied().filter(|t| !TABLE_ORDER.contains(t)));
    ordered
}

/// @ai:intent Map a JSON value to an SQLite value; arrays and objects become JSON text
/// @ai:effects pure
fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

fn ensure_identifier(name: &str) -> Result<()> {
    if identifier_regex().is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(name.to_string()))
    }
}
