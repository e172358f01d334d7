//! Table-level row parsing
//!
//! Converts raw tables into typed records. Header aliasing lives in
//! `shared::models::row`; this module only decides which rows survive.

use serde_json::Value;
use shared::models::{AccessEntry, RawPaymentEvent, Row, Team, TeamRegistry};

/// Turn a header row plus data rows into [`Row`]s
///
/// Short rows are padded with nulls, blank headers are skipped and
/// rows whose cells are all blank are dropped.
pub fn rows_from_matrix(matrix: &[Vec<Value>]) -> Vec<Row> {
    let Some((header, data)) = matrix.split_first() else {
        return Vec::new();
    };
    let headers: Vec<Option<String>> = header
        .iter()
        .map(|h| match h {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect();

    data.iter()
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .filter_map(|(i, h)| {
                    h.as_ref()
                        .map(|h| (h.clone(), cells.get(i).cloned().unwrap_or(Value::Null)))
                })
                .collect::<Row>()
        })
        .filter(|row| row.values().any(|v| shared::models::cell_text(v).is_some()))
        .collect()
}

/// Registry rows with a group and a team name, in sheet order
pub fn parse_teams(rows: &[Row]) -> TeamRegistry {
    let teams: Vec<Team> = rows.iter().filter_map(Team::from_row).collect();
    let skipped = rows.len() - teams.len();
    if skipped > 0 {
        tracing::debug!(skipped, "Skipped registry rows without group or team name");
    }
    TeamRegistry::new(teams)
}

/// Access rows with a non-blank email
pub fn parse_access(rows: &[Row]) -> Vec<AccessEntry> {
    rows.iter().filter_map(AccessEntry::from_row).collect()
}

/// Raw access rows to republish, same filter as [`parse_access`]
pub fn access_rows(rows: &[Row]) -> Vec<Row> {
    rows.iter()
        .filter(|row| AccessEntry::from_row(row).is_some())
        .cloned()
        .collect()
}

pub fn parse_payments(rows: &[Row]) -> Vec<RawPaymentEvent> {
    rows.iter().map(RawPaymentEvent::from_row).collect()
}
