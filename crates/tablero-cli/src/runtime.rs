// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::collections::BTreeMap;
use tablero_api::Client;
use tablero_app::{Record, RecordId, Value};
use tablero_testkit::MemoryBackend;
use tablero_tui::AppRuntime;

/// Runtime backed by the remote store over REST.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for ApiRuntime {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        self.client.list_tables()
    }

    fn create_table(&mut self, name: &str) -> Result<()> {
        self.client.create_table(name)
    }

    fn delete_table(&mut self, name: &str) -> Result<()> {
        self.client.delete_table(name)
    }

    fn create_index(&mut self, table: &str, field: &str) -> Result<()> {
        self.client.create_index(table, field)
    }

    fn list_records(&mut self, table: &str) -> Result<Vec<Record>> {
        self.client.list_records(table)
    }

    fn create_record(&mut self, table: &str, fields: &BTreeMap<String, Value>) -> Result<()> {
        self.client.create_record(table, fields)
    }

    fn update_record(
        &mut self,
        table: &str,
        id: RecordId,
        fields: &BTreeMap<String, Value>,
    ) -> Result<()> {
        self.client.update_record(table, id, fields)
    }

    fn delete_record(&mut self, table: &str, id: RecordId) -> Result<()> {
        self.client.delete_record(table, id)
    }
}

/// Runtime for `--demo`: everything stays in this process, no server needed.
pub struct MemoryRuntime {
    backend: MemoryBackend,
}

impl MemoryRuntime {
    pub fn seeded() -> Result<Self> {
        let mut backend = MemoryBackend::new();
        backend.seed_sample_data()?;
        Ok(Self { backend })
    }
}

impl AppRuntime for MemoryRuntime {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        Ok(self.backend.list_tables())
    }

    fn create_table(&mut self, name: &str) -> Result<()> {
        self.backend.create_table(name)
    }

    fn delete_table(&mut self, name: &str) -> Result<()> {
        self.backend.delete_table(name)
    }

    fn create_index(&mut self, table: &str, field: &str) -> Result<()> {
        self.backend.create_index(table, field)
    }

    fn list_records(&mut self, table: &str) -> Result<Vec<Record>> {
        self.backend.list_records(table)
    }

    fn create_record(&mut self, table: &str, fields: &BTreeMap<String, Value>) -> Result<()> {
        self.backend.create_record(table, fields).map(drop)
    }

    fn update_record(
        &mut self,
        table: &str,
        id: RecordId,
        fields: &BTreeMap<String, Value>,
    ) -> Result<()> {
        self.backend.update_record(table, id, fields)
    }

    fn delete_record(&mut self, table: &str, id: RecordId) -> Result<()> {
        self.backend.delete_record(table, id)
    }
}
