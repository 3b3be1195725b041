// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! In-memory stand-in for the remote tabular store. Backs the TUI tests and
//! the `--demo` mode of the CLI, mirroring the REST surface operation for
//! operation so runtimes can be swapped without touching the UI.

use anyhow::{Result, bail};
use std::collections::{BTreeMap, BTreeSet};
use tablero_app::{Record, RecordId, Value};

pub const SAMPLE_TABLE: &str = "usuarios";

#[derive(Debug, Clone, Default)]
struct TableData {
    next_id: i64,
    records: Vec<Record>,
    indexes: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    tables: BTreeMap<String, TableData>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_tables(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn create_table(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("table name required");
        }
        if self.tables.contains_key(name) {
            bail!("table '{name}' already exists");
        }
        self.tables.insert(
            name.to_owned(),
            TableData {
                next_id: 1,
                ..TableData::default()
            },
        );
        Ok(())
    }

    pub fn delete_table(&mut self, name: &str) -> Result<()> {
        if self.tables.remove(name).is_none() {
            bail!("table '{name}' does not exist");
        }
        Ok(())
    }

    pub fn create_index(&mut self, table: &str, field: &str) -> Result<()> {
        let data = self.table_mut(table)?;
        data.indexes.insert(field.to_owned());
        Ok(())
    }

    pub fn indexes(&self, table: &str) -> Result<Vec<String>> {
        let data = self.table(table)?;
        Ok(data.indexes.iter().cloned().collect())
    }

    pub fn list_records(&self, table: &str) -> Result<Vec<Record>> {
        Ok(self.table(table)?.records.clone())
    }

    pub fn create_record(
        &mut self,
        table: &str,
        fields: &BTreeMap<String, Value>,
    ) -> Result<RecordId> {
        let data = self.table_mut(table)?;
        let id = RecordId::new(data.next_id);
        data.next_id += 1;
        data.records.push(Record::new(id, fields.clone()));
        Ok(id)
    }

    /// Whole-map replacement, like the store's PUT: fields absent from the
    /// payload are gone afterwards.
    pub fn update_record(
        &mut self,
        table: &str,
        id: RecordId,
        fields: &BTreeMap<String, Value>,
    ) -> Result<()> {
        let data = self.table_mut(table)?;
        let Some(record) = data.records.iter_mut().find(|record| record.id == id) else {
            bail!("record {} not found in table '{table}'", id.get());
        };
        record.fields = fields.clone();
        Ok(())
    }

    pub fn delete_record(&mut self, table: &str, id: RecordId) -> Result<()> {
        let data = self.table_mut(table)?;
        let before = data.records.len();
        data.records.retain(|record| record.id != id);
        if data.records.len() == before {
            bail!("record {} not found in table '{table}'", id.get());
        }
        Ok(())
    }

    /// Seeds the `usuarios` sample: indexes on nombre and edad, three rows
    /// that all carry an email field.
    pub fn seed_sample_data(&mut self) -> Result<()> {
        if !self.tables.contains_key(SAMPLE_TABLE) {
            self.create_table(SAMPLE_TABLE)?;
        }
        self.create_index(SAMPLE_TABLE, "nombre")?;
        self.create_index(SAMPLE_TABLE, "edad")?;

        let rows: [(&str, i64, &str); 3] = [
            ("Juan", 25, "juan@email.com"),
            ("María", 30, "maria@email.com"),
            ("Juan", 35, "juan2@email.com"),
        ];
        for (nombre, edad, email) in rows {
            let mut fields = BTreeMap::new();
            fields.insert("nombre".to_owned(), Value::Text(nombre.to_owned()));
            fields.insert("edad".to_owned(), Value::Int(edad));
            fields.insert("email".to_owned(), Value::Text(email.to_owned()));
            self.create_record(SAMPLE_TABLE, &fields)?;
        }
        Ok(())
    }

    fn table(&self, name: &str) -> Result<&TableData> {
        match self.tables.get(name) {
            Some(data) => Ok(data),
            None => bail!("table '{name}' does not exist"),
        }
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut TableData> {
        match self.tables.get_mut(name) {
            Some(data) => Ok(data),
            None => bail!("table '{name}' does not exist"),
        }
    }
}
