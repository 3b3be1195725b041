// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, Response};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tablero_app::{Record, RecordId, Value};
use url::Url;

/// Blocking client for the tabular store's REST surface. All paths are
/// relative to a configured API root (for example `http://localhost:3000/api`).
#[derive(Debug, Clone)]
pub struct Client {
    base: Url,
    http: HttpClient,
}

#[derive(Debug, Serialize)]
struct CreateTableBody<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateIndexBody<'a> {
    field: &'a str,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let base = Url::parse(trimmed)
            .with_context(|| format!("invalid api.base_url {base_url:?}"))?;
        if base.cannot_be_a_base() {
            bail!("api.base_url {base_url:?} cannot carry path segments");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Builds an endpoint URL; segments are percent-encoded, so table names
    /// with slashes or spaces cannot escape their path position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("api base url {} cannot carry path segments", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn list_tables(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["tables"])?;
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|error| connection_error(&self.base, error))?;
        let response = check_status(response)?;
        response.json().context("decode table list")
    }

    pub fn create_table(&self, name: &str) -> Result<()> {
        let url = self.endpoint(&["tables"])?;
        let response = self
            .http
            .post(url)
            .json(&CreateTableBody { name })
            .send()
            .map_err(|error| connection_error(&self.base, error))?;
        check_status(response).map(drop)
    }

    pub fn delete_table(&self, name: &str) -> Result<()> {
        let url = self.endpoint(&["tables", name])?;
        let response = self
            .http
            .delete(url)
            .send()
            .map_err(|error| connection_error(&self.base, error))?;
        check_status(response).map(drop)
    }

    pub fn create_index(&self, table: &str, field: &str) -> Result<()> {
        let url = self.endpoint(&["tables", table, "indexes"])?;
        let response = self
            .http
            .post(url)
            .json(&CreateIndexBody { field })
            .send()
            .map_err(|error| connection_error(&self.base, error))?;
        check_status(response).map(drop)
    }

    pub fn list_records(&self, table: &str) -> Result<Vec<Record>> {
        let url = self.endpoint(&["tables", table, "records"])?;
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|error| connection_error(&self.base, error))?;
        let response = check_status(response)?;
        response
            .json()
            .with_context(|| format!("decode records of table {table:?}"))
    }

    pub fn create_record(&self, table: &str, fields: &BTreeMap<String, Value>) -> Result<()> {
        let url = self.endpoint(&["tables", table, "records"])?;
        let response = self
            .http
            .post(url)
            .json(fields)
            .send()
            .map_err(|error| connection_error(&self.base, error))?;
        check_status(response).map(drop)
    }

    pub fn update_record(
        &self,
        table: &str,
        id: RecordId,
        fields: &BTreeMap<String, Value>,
    ) -> Result<()> {
        let url = self.endpoint(&["tables", table, "records", &id.get().to_string()])?;
        let response = self
            .http
            .put(url)
            .json(fields)
            .send()
            .map_err(|error| connection_error(&self.base, error))?;
        check_status(response).map(drop)
    }

    pub fn delete_record(&self, table: &str, id: RecordId) -> Result<()> {
        let url = self.endpoint(&["tables", table, "records", &id.get().to_string()])?;
        let response = self
            .http
            .delete(url)
            .send()
            .map_err(|error| connection_error(&self.base, error))?;
        check_status(response).map(drop)
    }
}

fn connection_error(base: &Url, error: reqwest::Error) -> anyhow::Error {
    anyhow!("cannot reach the table store at {base} -- is the server running? ({error})")
}

/// Every non-success outcome maps to one uniform error: the body text when
/// there is one, otherwise the status description. Individual status codes
/// are not interpreted.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(failure_response(status, &body))
}

fn failure_response(status: StatusCode, body: &str) -> anyhow::Error {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        anyhow!(
            "store returned {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown status")
        )
    } else {
        anyhow!("store error ({}): {}", status.as_u16(), trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use anyhow::Result;
    use reqwest::StatusCode;
    use std::time::Duration;

    #[test]
    fn empty_base_url_is_rejected() {
        let error =
            Client::new("", Duration::from_secs(1)).expect_err("empty base url should fail");
        assert!(error.to_string().contains("must not be empty"));
    }

    #[test]
    fn trailing_slashes_are_trimmed() -> Result<()> {
        let client = Client::new("http://localhost:3000/api///", Duration::from_secs(1))?;
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        Ok(())
    }

    #[test]
    fn endpoint_percent_encodes_table_names() -> Result<()> {
        let client = Client::new("http://localhost:3000/api", Duration::from_secs(1))?;
        let url = client.endpoint(&["tables", "mi tabla/rara", "records"])?;
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/tables/mi%20tabla%2Frara/records"
        );
        Ok(())
    }

    #[test]
    fn failure_with_body_carries_the_body_text() {
        let error = super::failure_response(StatusCode::BAD_REQUEST, "tabla no existe\n");
        assert_eq!(error.to_string(), "store error (400): tabla no existe");
    }

    #[test]
    fn failure_without_body_falls_back_to_status_description() {
        let error = super::failure_response(StatusCode::NOT_FOUND, "");
        assert_eq!(error.to_string(), "store returned 404 Not Found");
    }
}
