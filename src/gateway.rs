use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;

use anyhow::Context as _;
use eframe::egui;
use reqwest::blocking::{Client, Response};
use thiserror::Error;

use crate::config::GatewayConfig;
use crate::data::decode;
use crate::data::model::{DatasetSummary, PlotResult};
use crate::data::request::PlotRequest;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network-level failure: unreachable host, timeout, aborted connection.
    /// Retryable by the user.
    #[error("network error: {0}")]
    Transport(String),
    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {0}")]
    RequestFailed(u16),
    /// The response was not the structured data the contract promises.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A finished gateway call, posted back to the UI thread.
#[derive(Debug)]
pub enum GatewayEvent {
    Summary(Result<DatasetSummary, GatewayError>),
    Plot {
        seq: u64,
        outcome: Result<PlotResult, GatewayError>,
    },
    Upload(Result<String, GatewayError>),
}

// ---------------------------------------------------------------------------
// Gateway – the backend calls, off the UI thread
// ---------------------------------------------------------------------------

/// Performs the backend calls on background threads and posts each outcome
/// as a [`GatewayEvent`] over the channel, waking the UI with a repaint.
/// Stateless between calls: nothing here remembers a previous request, so
/// every call is safe to issue repeatedly. Ordering between overlapping plot
/// fetches is the caller's concern (see `PlotSlot`), which is why plot
/// events carry the caller's sequence tag through unchanged.
pub struct Gateway {
    client: Client,
    base_url: String,
    tx: Sender<GatewayEvent>,
    ctx: egui::Context,
}

impl Gateway {
    pub fn new(
        config: &GatewayConfig,
        tx: Sender<GatewayEvent>,
        ctx: egui::Context,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            tx,
            ctx,
        })
    }

    /// `GET /analytics/` → dataset summary.
    pub fn fetch_summary(&self) {
        let client = self.client.clone();
        let url = format!("{}/analytics/", self.base_url);
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();

        std::thread::spawn(move || {
            log::debug!("fetching summary from {url}");
            let outcome = get_json(&client, &url).and_then(|body| {
                decode::decode_summary(&body)
                    .map_err(|e| GatewayError::MalformedResponse(format!("{e:#}")))
            });
            let _ = tx.send(GatewayEvent::Summary(outcome));
            ctx.request_repaint();
        });
    }

    /// `POST /plot/` → plot result, tagged with the caller's sequence number.
    pub fn fetch_plot(&self, seq: u64, request: PlotRequest) {
        let client = self.client.clone();
        let url = format!("{}/plot/", self.base_url);
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();

        std::thread::spawn(move || {
            log::debug!(
                "fetching plot (seq {seq}): {:?} as {}",
                request.columns,
                request.chart_kind.as_str()
            );
            let outcome = post_json(&client, &url, &request).and_then(|body| {
                decode::decode_plot(&body)
                    .map_err(|e| GatewayError::MalformedResponse(format!("{e:#}")))
            });
            let _ = tx.send(GatewayEvent::Plot { seq, outcome });
            ctx.request_repaint();
        });
    }

    /// `POST /upload/` (multipart) → stored filename. The caller is expected
    /// to have validated the file already (see `data::upload`).
    pub fn upload(&self, path: PathBuf) {
        let client = self.client.clone();
        let url = format!("{}/upload/", self.base_url);
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();

        std::thread::spawn(move || {
            log::info!("uploading {} to {url}", path.display());
            let outcome = upload_file(&client, &url, &path).and_then(|body| {
                decode::decode_upload_ack(&body)
                    .map_err(|e| GatewayError::MalformedResponse(format!("{e:#}")))
            });
            let _ = tx.send(GatewayEvent::Upload(outcome));
            ctx.request_repaint();
        });
    }
}

// ---------------------------------------------------------------------------
// Blocking transport helpers
// ---------------------------------------------------------------------------

fn get_json(client: &Client, url: &str) -> Result<serde_json::Value, GatewayError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    read_json(response)
}

fn post_json(
    client: &Client,
    url: &str,
    body: &PlotRequest,
) -> Result<serde_json::Value, GatewayError> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    read_json(response)
}

fn upload_file(
    client: &Client,
    url: &str,
    path: &std::path::Path,
) -> Result<serde_json::Value, GatewayError> {
    let form = reqwest::blocking::multipart::Form::new()
        .file("file", path)
        .map_err(|e| GatewayError::Transport(format!("reading upload file: {e}")))?;
    let response = client
        .post(url)
        .multipart(form)
        .send()
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    read_json(response)
}

/// Turn a response into its JSON body. The content type is checked before
/// the status: a non-JSON body is a contract violation whatever the status
/// line says.
fn read_json(response: Response) -> Result<serde_json::Value, GatewayError> {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !is_json_content_type(&content_type) {
        return Err(GatewayError::MalformedResponse(format!(
            "expected a JSON content type, got '{content_type}'"
        )));
    }

    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::RequestFailed(status.as_u16()));
    }

    response
        .json()
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|mime| mime.eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("application/xml"));
        assert!(!is_json_content_type(""));
    }
}
