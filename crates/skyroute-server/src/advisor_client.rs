//! HTTP client for the external angle-prediction service.
//!
//! Calls are blocking and must run off the async executor
//! (see `tokio::task::spawn_blocking` in the optimize handler).

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use skyroute_core::{AdvisorError, AngleAdvisor, AnglePrediction, QuboMatrix};
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    qubo_matrix: &'a QuboMatrix,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    beta: Option<f64>,
    gamma: Option<f64>,
    error: Option<String>,
}

/// [`AngleAdvisor`] backed by an HTTP endpoint accepting `{"qubo_matrix": [[..]]}`.
pub struct HttpAngleAdvisor {
    url: String,
    timeout: Duration,
    client: OnceLock<Result<Client, String>>,
}

impl HttpAngleAdvisor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            client: OnceLock::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn client(&self) -> Result<&Client, AdvisorError> {
        // Built lazily so construction happens on a blocking thread.
        self.client
            .get_or_init(|| {
                Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(|err| err.to_string())
            })
            .as_ref()
            .map_err(|err| AdvisorError::Transport(err.clone()))
    }
}

impl std::fmt::Debug for HttpAngleAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAngleAdvisor")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AngleAdvisor for HttpAngleAdvisor {
    fn predict_angles(&self, matrix: &QuboMatrix) -> Result<AnglePrediction, AdvisorError> {
        let response = self
            .client()?
            .post(&self.url)
            .json(&PredictRequest { qubo_matrix: matrix })
            .send()
            .map_err(|err| AdvisorError::Transport(err.to_string()))?;

        let status = response.status();
        let body: Option<PredictResponse> = response.json().ok();

        if !status.is_success() {
            let detail = body
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(AdvisorError::Rejected(detail));
        }

        let body = body.ok_or_else(|| AdvisorError::Malformed("body is not JSON".to_string()))?;
        parse_prediction(body)
    }
}

fn parse_prediction(body: PredictResponse) -> Result<AnglePrediction, AdvisorError> {
    if let Some(error) = body.error {
        return Err(AdvisorError::Rejected(error));
    }
    match (body.beta, body.gamma) {
        (Some(beta), Some(gamma)) => Ok(AnglePrediction { beta, gamma }),
        _ => Err(AdvisorError::Malformed(
            "missing beta or gamma".to_string(),
        )),
    }
}
