use anyhow::{bail, Context};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::database::{TodoItem, TodoList};

/// Thin HTTP client for the todo item routes
pub struct TodoClient {
    http: Client,
    base_url: String,
    principal: Option<(String, String)>,
}

impl TodoClient {
    /// `principal` is an (header name, principal name) pair sent on every request
    pub fn new(base_url: &str, principal: Option<(String, String)>) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(base_url).with_context(|| format!("invalid server URL: {}", base_url))?;
        Ok(Self {
            http: Client::new(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            principal,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_principal(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.principal {
            Some((header, user)) => request.header(header.as_str(), user.as_str()),
            None => request,
        }
    }

    pub async fn add(&self, name: &str, id: Option<String>) -> anyhow::Result<TodoItem> {
        let mut item = TodoItem::new(name);
        if let Some(id) = id {
            item.id = id;
        }

        let request = self.with_principal(self.http.post(self.url("/todoitem")).json(&item));
        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn list(&self) -> anyhow::Result<TodoList> {
        let request = self.with_principal(self.http.get(self.url("/todoitem")));
        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, id: &str) -> anyhow::Result<()> {
        let request = self.with_principal(self.http.delete(self.url(&format!("/todoitem/{}", id))));
        let response = check(request.send().await?).await?;
        if response.status() != StatusCode::NO_CONTENT {
            bail!("unexpected status {} deleting {}", response.status(), id);
        }
        Ok(())
    }
}

/// Turn non-2xx responses into errors carrying the server's message
async fn check(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);
    bail!("{}: {}", status, message)
}
