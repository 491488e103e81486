//! Infrastructure adapter for reading typed rows from a Postgres source.

use crate::config::SourceConfig;
use crate::domain::entities::{CellValue, ResultSet};
use crate::domain::errors::{ExportError, Result};
use crate::ports::source_port::SourcePort;
use log::info;
use postgres::{Client, Config, NoTls, Row};

/// Concrete implementation of `SourcePort` over a single blocking Postgres
/// connection.
///
/// The connection lives for the whole run and is closed by drop. There is no
/// pooling: the run is strictly sequential and only ever needs one cursor at
/// a time.
pub struct PgSource {
    client: Client,
}

impl PgSource {
    /// Opens the connection described by `config`.
    pub fn connect(config: &SourceConfig) -> Result<Self> {
        let client = Config::new()
            .host(&config.host)
            .port(config.port)
            .dbname(&config.database)
            .user(&config.login)
            .password(&config.password)
            .connect(NoTls)?;

        info!(
            "Connected to {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self { client })
    }
}

impl SourcePort for PgSource {
    fn run_routine(&mut self, routine: &str) -> Result<()> {
        self.client.batch_execute(&call_statement(routine))?;
        Ok(())
    }

    fn fetch(&mut self, query: &str) -> Result<ResultSet> {
        // Preparing first keeps column metadata available even when the
        // result has no rows.
        let statement = self.client.prepare(query)?;
        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut rows = Vec::new();
        for row in self.client.query(&statement, &[])? {
            let mut cells = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                cells.push(read_cell(&row, idx)?);
            }
            rows.push(cells);
        }

        Ok(ResultSet { columns, rows })
    }
}

/// Builds the `CALL` statement for a preparation routine.
fn call_statement(routine: &str) -> String {
    format!("CALL {}()", routine)
}

/// Converts one column of a row into a typed [`CellValue`].
///
/// The match runs on the column's type name, the same way the wire types
/// occur in practice; anything else must have a plain text representation or
/// the export fails naming the column.
fn read_cell(row: &Row, idx: usize) -> Result<CellValue> {
    let column = &row.columns()[idx];

    let cell = match column.type_().name() {
        "bool" => row.try_get::<_, Option<bool>>(idx)?.map(CellValue::Bool),
        "int2" => row
            .try_get::<_, Option<i16>>(idx)?
            .map(|v| CellValue::Int(v.into())),
        "int4" => row
            .try_get::<_, Option<i32>>(idx)?
            .map(|v| CellValue::Int(v.into())),
        "int8" => row.try_get::<_, Option<i64>>(idx)?.map(CellValue::Int),
        "float4" => row
            .try_get::<_, Option<f32>>(idx)?
            .map(|v| CellValue::Float(v.into())),
        "float8" => row.try_get::<_, Option<f64>>(idx)?.map(CellValue::Float),
        "numeric" => row
            .try_get::<_, Option<rust_decimal::Decimal>>(idx)?
            .map(CellValue::Decimal),
        "date" => row
            .try_get::<_, Option<chrono::NaiveDate>>(idx)?
            .map(CellValue::Date),
        "timestamp" => row
            .try_get::<_, Option<chrono::NaiveDateTime>>(idx)?
            .map(CellValue::Timestamp),
        "timestamptz" => row
            .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)?
            .map(|v| CellValue::Timestamp(v.naive_utc())),
        "bytea" => row
            .try_get::<_, Option<Vec<u8>>>(idx)?
            .map(CellValue::Bytes),
        "uuid" => row
            .try_get::<_, Option<uuid::Uuid>>(idx)?
            .map(|v| CellValue::Text(v.to_string())),
        "json" | "jsonb" => row
            .try_get::<_, Option<serde_json::Value>>(idx)?
            .map(|v| CellValue::Text(v.to_string())),
        type_name => row
            .try_get::<_, Option<String>>(idx)
            .map_err(|_| ExportError::UnsupportedType {
                column: column.name().to_string(),
                type_name: type_name.to_string(),
            })?
            .map(CellValue::Text),
    };

    Ok(cell.unwrap_or(CellValue::Null))
}
