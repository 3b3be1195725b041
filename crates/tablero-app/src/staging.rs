// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeMap;

use crate::{Record, Value};

/// The in-progress record being composed or edited. Lives only in working
/// memory and has no identity of its own until committed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StagingBuffer {
    fields: BTreeMap<String, Value>,
}

impl StagingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a field, coercing the raw value and overwriting any prior
    /// value under the same name.
    pub fn stage_field(&mut self, name: &str, raw_value: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("field name required -- pick an existing field or type a new name");
        }
        self.fields.insert(name.to_owned(), Value::coerce(raw_value));
        Ok(())
    }

    /// Re-coerces an already-staged field's value from live input. Empty
    /// input becomes the empty string, not zero. Unknown names are ignored.
    pub fn overwrite_value(&mut self, name: &str, raw_value: &str) {
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = Value::coerce(raw_value);
        }
    }

    /// No error when the field was never staged.
    pub fn remove_field(&mut self, name: &str) {
        self.fields.remove(name);
    }

    /// Replaces the buffer with a copy of an existing record's fields. The
    /// identity is not part of the record's field map, so it cannot leak in.
    pub fn load_from_record(&mut self, record: &Record) {
        self.fields = record.fields.clone();
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// The field map sent to the store on commit.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::StagingBuffer;
    use crate::{Record, RecordId, Value};
    use anyhow::Result;

    #[test]
    fn staged_numeric_text_is_stored_as_number() -> Result<()> {
        let mut staging = StagingBuffer::new();
        staging.stage_field("nombre", "Ana")?;
        staging.stage_field("edad", "40")?;

        assert_eq!(staging.get("edad"), Some(&Value::Int(40)));
        assert_eq!(staging.get("nombre"), Some(&Value::Text("Ana".to_owned())));
        Ok(())
    }

    #[test]
    fn staging_overwrites_prior_value_for_same_name() -> Result<()> {
        let mut staging = StagingBuffer::new();
        staging.stage_field("edad", "25")?;
        staging.stage_field("edad", "26")?;

        assert_eq!(staging.len(), 1);
        assert_eq!(staging.get("edad"), Some(&Value::Int(26)));
        Ok(())
    }

    #[test]
    fn blank_field_name_is_rejected() {
        let mut staging = StagingBuffer::new();
        let error = staging
            .stage_field("   ", "40")
            .expect_err("blank name should fail");
        assert!(error.to_string().contains("field name required"));
        assert!(staging.is_empty());
    }

    #[test]
    fn overwrite_recoerces_and_preserves_empty_string() -> Result<()> {
        let mut staging = StagingBuffer::new();
        staging.stage_field("edad", "39")?;

        staging.overwrite_value("edad", "40");
        assert_eq!(staging.get("edad"), Some(&Value::Int(40)));

        staging.overwrite_value("edad", "");
        assert_eq!(staging.get("edad"), Some(&Value::Text(String::new())));
        Ok(())
    }

    #[test]
    fn overwrite_of_unstaged_field_is_a_no_op() {
        let mut staging = StagingBuffer::new();
        staging.overwrite_value("fantasma", "1");
        assert!(staging.is_empty());
    }

    #[test]
    fn remove_is_silent_for_missing_fields() -> Result<()> {
        let mut staging = StagingBuffer::new();
        staging.stage_field("nombre", "Juan")?;
        staging.remove_field("nombre");
        staging.remove_field("nombre");
        assert!(staging.is_empty());
        Ok(())
    }

    #[test]
    fn load_from_record_replaces_buffer_without_identity() -> Result<()> {
        let record: Record =
            serde_json::from_str(r#"{"id":7,"nombre":"Juan","edad":25}"#)?;

        let mut staging = StagingBuffer::new();
        staging.stage_field("sobra", "x")?;
        staging.load_from_record(&record);

        assert_eq!(staging.len(), 2);
        assert!(staging.get("sobra").is_none());
        assert!(staging.get("id").is_none());
        assert_eq!(staging.fields(), &record.fields);
        assert_eq!(record.id, RecordId::new(7));
        Ok(())
    }
}
