//! Record row type for database queries.

use chrono::{DateTime, Utc};

use crate::error::{LockboxError, Result};
use crate::store::types::{RecordId, RecordSummary};

/// Raw row data from the records table, before parsing into domain types.
#[derive(Debug)]
pub struct SummaryRow {
    pub id: String,
    pub kind: String,
    pub label: String,
    pub created_at: String,
    pub updated_at: String,
}

impl SummaryRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            kind: row.get(1)?,
            label: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| LockboxError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

impl TryFrom<SummaryRow> for RecordSummary {
    type Error = LockboxError;

    fn try_from(row: SummaryRow) -> Result<Self> {
        let id: RecordId = row
            .id
            .parse()
            .map_err(|_| LockboxError::Storage(format!("Invalid record UUID: {}", row.id)))?;
        let kind = row
            .kind
            .parse()
            .map_err(|_| LockboxError::Storage(format!("Invalid record kind: {}", row.kind)))?;

        Ok(RecordSummary {
            id,
            kind,
            label: row.label,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}
