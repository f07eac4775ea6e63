//! Table mapping for the catalog schema
//!
//! [`TABLES`] is the in-code description of what the migrations create.
//! [`verify_schema`] compares it with what SQLite reports, so a database
//! left behind by an older build fails at startup instead of mid-request.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

/// Declared column of a mapped table
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Declared table with its columns and secondary indexes
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub indexes: &'static [&'static str],
}

const fn col(name: &'static str, sql_type: &'static str, not_null: bool) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        not_null,
        primary_key: false,
    }
}

const fn pk(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        sql_type: "INTEGER",
        not_null: false,
        primary_key: true,
    }
}

pub const USER_TABLE: TableDef = TableDef {
    name: "user",
    columns: &[
        pk("id"),
        col("username", "VARCHAR(32)", false),
        col("password_hash", "VARCHAR(128)", false),
    ],
    indexes: &["ix_user_username"],
};

pub const CATEGORY_TABLE: TableDef = TableDef {
    name: "category",
    columns: &[pk("id"), col("name", "VARCHAR(250)", true)],
    indexes: &[],
};

// category_id stays nullable at the storage level
pub const ITEMS_TABLE: TableDef = TableDef {
    name: "items",
    columns: &[
        pk("id"),
        col("name", "VARCHAR(250)", true),
        col("description", "VARCHAR(250)", true),
        col("category_id", "INTEGER", false),
    ],
    indexes: &[],
};

/// Every table the application maps
pub const TABLES: &[TableDef] = &[USER_TABLE, CATEGORY_TABLE, ITEMS_TABLE];

/// Schema drift detected at startup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("table `{0}` does not exist")]
    MissingTable(&'static str),

    #[error("table `{table}` is missing column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("column `{table}.{column}` is declared `{found}`, expected `{expected}`")]
    ColumnMismatch {
        table: &'static str,
        column: &'static str,
        expected: String,
        found: String,
    },

    #[error("table `{table}` is missing index `{index}`")]
    MissingIndex {
        table: &'static str,
        index: &'static str,
    },

    #[error("failed to inspect schema: {0}")]
    Inspect(String),
}

impl From<sqlx::Error> for SchemaError {
    fn from(err: sqlx::Error) -> Self {
        SchemaError::Inspect(err.to_string())
    }
}

/// Row of `PRAGMA table_info`
#[derive(Debug, sqlx::FromRow)]
struct TableInfoRow {
    name: String,
    #[sqlx(rename = "type")]
    sql_type: String,
    notnull: i64,
    pk: i64,
}

/// Row of `PRAGMA index_list`
#[derive(Debug, sqlx::FromRow)]
struct IndexListRow {
    name: String,
}

fn describe(not_null: bool, primary_key: bool, sql_type: &str) -> String {
    let mut out = sql_type.to_ascii_uppercase();
    if primary_key {
        out.push_str(" PRIMARY KEY");
    }
    if not_null {
        out.push_str(" NOT NULL");
    }
    out
}

/// Validate one mapped table against the live database
pub async fn verify_table(pool: &SqlitePool, table: &TableDef) -> Result<(), SchemaError> {
    let rows = sqlx::query_as::<_, TableInfoRow>(&format!(
        "PRAGMA table_info(\"{}\")",
        table.name
    ))
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Err(SchemaError::MissingTable(table.name));
    }

    for column in table.columns {
        let row = rows
            .iter()
            .find(|r| r.name == column.name)
            .ok_or(SchemaError::MissingColumn {
                table: table.name,
                column: column.name,
            })?;

        let expected = describe(column.not_null, column.primary_key, column.sql_type);
        let found = describe(row.notnull != 0, row.pk != 0, &row.sql_type);
        if expected != found {
            return Err(SchemaError::ColumnMismatch {
                table: table.name,
                column: column.name,
                expected,
                found,
            });
        }
    }

    if !table.indexes.is_empty() {
        let indexes = sqlx::query_as::<_, IndexListRow>(&format!(
            "PRAGMA index_list(\"{}\")",
            table.name
        ))
        .fetch_all(pool)
        .await?;

        for index in table.indexes {
            if !indexes.iter().any(|i| i.name == *index) {
                return Err(SchemaError::MissingIndex {
                    table: table.name,
                    index: *index,
                });
            }
        }
    }

    debug!(table = table.name, "Schema verified");
    Ok(())
}

/// Validate every mapped table
pub async fn verify_schema(pool: &SqlitePool) -> Result<(), SchemaError> {
    for table in TABLES {
        verify_table(pool, table).await?;
    }
    Ok(())
}
