// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeMap;

use crate::{Record, RecordId, StagingBuffer, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Inserting,
    Editing(RecordId),
}

/// The workflow state threaded through the UI handlers: which table is
/// active, what is staged, and whether a commit creates or replaces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbenchState {
    pub active_table: Option<String>,
    pub mode: EditMode,
    pub staging: StagingBuffer,
    pub status_line: Option<String>,
}

impl Default for EditMode {
    fn default() -> Self {
        Self::Inserting
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkbenchCommand {
    SelectTable(String),
    DeselectTable,
    BeginEdit(Record),
    CancelEdit,
    FinishCommit,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkbenchEvent {
    TableChanged(Option<String>),
    ModeChanged(EditMode),
    StagingLoaded(usize),
    StagingCleared,
    StatusUpdated(String),
    StatusCleared,
}

/// What a commit will do, decided before any remote call is made.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitPlan {
    Create {
        table: String,
        payload: BTreeMap<String, Value>,
    },
    Replace {
        table: String,
        id: RecordId,
        payload: BTreeMap<String, Value>,
    },
}

impl WorkbenchState {
    pub fn dispatch(&mut self, command: WorkbenchCommand) -> Vec<WorkbenchEvent> {
        match command {
            WorkbenchCommand::SelectTable(name) => {
                self.active_table = Some(name);
                let mut events = vec![WorkbenchEvent::TableChanged(self.active_table.clone())];
                // Switching tables abandons an in-progress edit outright; no
                // replace call is ever issued for the old record.
                if self.mode != EditMode::Inserting {
                    self.mode = EditMode::Inserting;
                    events.push(WorkbenchEvent::ModeChanged(self.mode));
                }
                events
            }
            WorkbenchCommand::DeselectTable => {
                self.active_table = None;
                let mut events = vec![WorkbenchEvent::TableChanged(None)];
                if self.mode != EditMode::Inserting {
                    self.mode = EditMode::Inserting;
                    events.push(WorkbenchEvent::ModeChanged(self.mode));
                }
                events
            }
            WorkbenchCommand::BeginEdit(record) => {
                // Starting a new edit while already editing silently replaces
                // the previous context; the workflow is single-focus.
                self.mode = EditMode::Editing(record.id);
                self.staging.load_from_record(&record);
                vec![
                    WorkbenchEvent::ModeChanged(self.mode),
                    WorkbenchEvent::StagingLoaded(self.staging.len()),
                ]
            }
            WorkbenchCommand::CancelEdit => {
                self.mode = EditMode::Inserting;
                self.staging.clear();
                vec![
                    WorkbenchEvent::ModeChanged(self.mode),
                    WorkbenchEvent::StagingCleared,
                ]
            }
            WorkbenchCommand::FinishCommit => {
                self.mode = EditMode::Inserting;
                self.staging.clear();
                vec![
                    WorkbenchEvent::ModeChanged(self.mode),
                    WorkbenchEvent::StagingCleared,
                ]
            }
            WorkbenchCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![WorkbenchEvent::StatusUpdated(message)]
            }
            WorkbenchCommand::ClearStatus => {
                self.status_line = None;
                vec![WorkbenchEvent::StatusCleared]
            }
        }
    }

    /// Decides create-vs-replace for the staged data. Validation failures
    /// here never reach the network layer.
    pub fn plan_commit(&self) -> Result<CommitPlan> {
        let Some(table) = &self.active_table else {
            bail!("select a table first");
        };
        match self.mode {
            EditMode::Inserting => Ok(CommitPlan::Create {
                table: table.clone(),
                payload: self.staging.fields().clone(),
            }),
            EditMode::Editing(id) => {
                if self.staging.is_empty() {
                    bail!("nothing staged to save");
                }
                Ok(CommitPlan::Replace {
                    table: table.clone(),
                    id,
                    payload: self.staging.fields().clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommitPlan, EditMode, WorkbenchCommand, WorkbenchEvent, WorkbenchState};
    use crate::{Record, RecordId, Value};
    use anyhow::Result;

    fn record_with_fields(id: i64, fields: &[(&str, Value)]) -> Record {
        Record::new(
            RecordId::new(id),
            fields
                .iter()
                .map(|(name, value)| ((*name).to_owned(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn begin_edit_loads_staging_and_enters_editing() {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));

        let record = record_with_fields(
            7,
            &[
                ("nombre", Value::Text("X".to_owned())),
                ("edad", Value::Int(31)),
            ],
        );
        let events = state.dispatch(WorkbenchCommand::BeginEdit(record));

        assert_eq!(state.mode, EditMode::Editing(RecordId::new(7)));
        assert_eq!(
            events,
            vec![
                WorkbenchEvent::ModeChanged(EditMode::Editing(RecordId::new(7))),
                WorkbenchEvent::StagingLoaded(2),
            ],
        );
        assert_eq!(state.staging.get("edad"), Some(&Value::Int(31)));
    }

    #[test]
    fn second_edit_silently_replaces_the_first() {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));
        state.dispatch(WorkbenchCommand::BeginEdit(record_with_fields(
            1,
            &[("nombre", Value::Text("Juan".to_owned()))],
        )));
        state.dispatch(WorkbenchCommand::BeginEdit(record_with_fields(
            2,
            &[("nombre", Value::Text("María".to_owned()))],
        )));

        assert_eq!(state.mode, EditMode::Editing(RecordId::new(2)));
        assert_eq!(
            state.staging.get("nombre"),
            Some(&Value::Text("María".to_owned()))
        );
    }

    #[test]
    fn cancel_clears_staging_and_returns_to_inserting() {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));
        state.dispatch(WorkbenchCommand::BeginEdit(record_with_fields(
            3,
            &[("edad", Value::Int(30))],
        )));

        let events = state.dispatch(WorkbenchCommand::CancelEdit);
        assert_eq!(state.mode, EditMode::Inserting);
        assert!(state.staging.is_empty());
        assert_eq!(
            events,
            vec![
                WorkbenchEvent::ModeChanged(EditMode::Inserting),
                WorkbenchEvent::StagingCleared,
            ],
        );
    }

    #[test]
    fn switching_tables_abandons_the_edit_context() {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));
        state.dispatch(WorkbenchCommand::BeginEdit(record_with_fields(
            7,
            &[("nombre", Value::Text("X".to_owned()))],
        )));

        let events = state.dispatch(WorkbenchCommand::SelectTable("clientes".to_owned()));
        assert_eq!(state.mode, EditMode::Inserting);
        assert_eq!(state.active_table.as_deref(), Some("clientes"));
        assert!(events.contains(&WorkbenchEvent::ModeChanged(EditMode::Inserting)));
    }

    #[test]
    fn deselect_resets_table_and_mode() {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));
        state.dispatch(WorkbenchCommand::BeginEdit(record_with_fields(
            1,
            &[("edad", Value::Int(25))],
        )));

        state.dispatch(WorkbenchCommand::DeselectTable);
        assert_eq!(state.active_table, None);
        assert_eq!(state.mode, EditMode::Inserting);
    }

    #[test]
    fn plan_commit_requires_an_active_table() -> Result<()> {
        let mut state = WorkbenchState::default();
        state.staging.stage_field("nombre", "Ana")?;

        let error = state.plan_commit().expect_err("no table should fail");
        assert!(error.to_string().contains("select a table first"));
        // The failed plan must leave staged data untouched.
        assert_eq!(state.staging.len(), 1);
        Ok(())
    }

    #[test]
    fn plan_commit_creates_while_inserting() -> Result<()> {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));
        state.staging.stage_field("edad", "40")?;

        match state.plan_commit()? {
            CommitPlan::Create { table, payload } => {
                assert_eq!(table, "usuarios");
                assert_eq!(payload.get("edad"), Some(&Value::Int(40)));
            }
            CommitPlan::Replace { .. } => panic!("inserting must plan a create"),
        }
        Ok(())
    }

    #[test]
    fn plan_commit_replaces_by_identity_while_editing() -> Result<()> {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));
        let record = record_with_fields(
            9,
            &[
                ("nombre", Value::Text("Juan".to_owned())),
                ("edad", Value::Int(35)),
            ],
        );
        state.dispatch(WorkbenchCommand::BeginEdit(record.clone()));

        match state.plan_commit()? {
            CommitPlan::Replace { table, id, payload } => {
                assert_eq!(table, "usuarios");
                assert_eq!(id, RecordId::new(9));
                // Staging round-trip: the payload equals the record minus id.
                assert_eq!(payload, record.fields);
            }
            CommitPlan::Create { .. } => panic!("editing must plan a replace"),
        }
        Ok(())
    }

    #[test]
    fn plan_commit_rejects_empty_save() {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));
        state.dispatch(WorkbenchCommand::BeginEdit(record_with_fields(
            4,
            &[("nombre", Value::Text("Ana".to_owned()))],
        )));
        state.staging.remove_field("nombre");

        let error = state.plan_commit().expect_err("empty save should fail");
        assert!(error.to_string().contains("nothing staged to save"));
    }

    #[test]
    fn finish_commit_clears_staging_and_mode_unconditionally() -> Result<()> {
        let mut state = WorkbenchState::default();
        state.dispatch(WorkbenchCommand::SelectTable("usuarios".to_owned()));
        state.dispatch(WorkbenchCommand::BeginEdit(record_with_fields(
            5,
            &[("edad", Value::Int(30))],
        )));

        let events = state.dispatch(WorkbenchCommand::FinishCommit);
        assert_eq!(state.mode, EditMode::Inserting);
        assert!(state.staging.is_empty());
        assert!(events.contains(&WorkbenchEvent::StagingCleared));
        Ok(())
    }

    #[test]
    fn status_line_set_and_clear() {
        let mut state = WorkbenchState::default();
        let events = state.dispatch(WorkbenchCommand::SetStatus("saved".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("saved"));
        assert_eq!(
            events,
            vec![WorkbenchEvent::StatusUpdated("saved".to_owned())]
        );

        state.dispatch(WorkbenchCommand::ClearStatus);
        assert_eq!(state.status_line, None);
    }
}
