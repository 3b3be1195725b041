// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::Value;

/// Server-assigned record identity. Kept out of the field map on purpose:
/// the identity is never a stageable or displayable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(i64);

impl RecordId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One row of a schema-less table: an identity plus whatever fields the row
/// happens to carry. Rows of the same table need not share field sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(id: RecordId, fields: BTreeMap<String, Value>) -> Self {
        Self { id, fields }
    }
}

/// The displayable schema of a table is not stored anywhere; it is the union
/// of field names across the rows currently loaded. The result replaces any
/// previously inferred schema, so a fetch with fewer varied rows shrinks it.
pub fn infer_schema(records: &[Record]) -> BTreeSet<String> {
    records
        .iter()
        .flat_map(|record| record.fields.keys().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordId, infer_schema};
    use crate::Value;
    use anyhow::Result;
    use std::collections::BTreeMap;

    fn record(id: i64, fields: &[(&str, Value)]) -> Record {
        Record::new(
            RecordId::new(id),
            fields
                .iter()
                .map(|(name, value)| ((*name).to_owned(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn schema_is_union_of_field_names_without_identity() {
        let records = vec![
            record(
                1,
                &[
                    ("nombre", Value::Text("Juan".to_owned())),
                    ("edad", Value::Int(25)),
                ],
            ),
            record(
                2,
                &[
                    ("nombre", Value::Text("María".to_owned())),
                    ("edad", Value::Int(30)),
                ],
            ),
            record(
                3,
                &[
                    ("nombre", Value::Text("Juan".to_owned())),
                    ("edad", Value::Int(35)),
                ],
            ),
        ];

        let schema = infer_schema(&records);
        let names: Vec<&str> = schema.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["edad", "nombre"]);
        assert!(!schema.contains("id"));
        assert!(!schema.contains("email"));
    }

    #[test]
    fn schema_includes_fields_present_on_any_row() {
        let records = vec![
            record(1, &[("nombre", Value::Text("Ana".to_owned()))]),
            record(
                2,
                &[("email", Value::Text("ana@email.com".to_owned()))],
            ),
        ];

        let schema = infer_schema(&records);
        assert!(schema.contains("nombre"));
        assert!(schema.contains("email"));
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn empty_record_list_yields_empty_schema() {
        assert!(infer_schema(&[]).is_empty());
    }

    #[test]
    fn record_round_trips_with_flattened_fields() -> Result<()> {
        let decoded: Record =
            serde_json::from_str(r#"{"id":7,"nombre":"Juan","edad":25}"#)?;
        assert_eq!(decoded.id, RecordId::new(7));
        assert_eq!(decoded.fields.get("edad"), Some(&Value::Int(25)));
        assert_eq!(
            decoded.fields.get("nombre"),
            Some(&Value::Text("Juan".to_owned()))
        );
        assert!(!decoded.fields.contains_key("id"));

        let encoded = serde_json::to_value(&decoded)?;
        assert_eq!(encoded["id"], 7);
        assert_eq!(encoded["edad"], 25);
        Ok(())
    }
}
