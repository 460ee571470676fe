use reqwest::Client;
use thiserror::Error;

use crate::prompt::WEATHER_OPTIONS;
use crate::types::{GameState, HealthResponse, PredictResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Form state as the user edits it, before submission.
///
/// Slider fields always hold a value and are clamped to their range; typed
/// fields start empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayForm {
    pub down: i64,
    pub distance: Option<i64>,
    pub yard_line: i64,
    pub quarter: i64,
    pub time_minutes: Option<i64>,
    pub time_seconds: Option<i64>,
    pub our_score: Option<i64>,
    pub their_score: Option<i64>,
    pub weather: i64,
    pub additional_info: String,
    pub result: Option<String>,
}

impl Default for PlayForm {
    fn default() -> Self {
        Self {
            down: 1,
            distance: None,
            yard_line: 50,
            quarter: 1,
            time_minutes: None,
            time_seconds: None,
            our_score: None,
            their_score: None,
            weather: 0,
            additional_info: String::new(),
            result: None,
        }
    }
}

impl PlayForm {
    pub fn set_down(&mut self, v: i64) {
        self.down = v.clamp(1, 4);
    }

    pub fn set_yard_line(&mut self, v: i64) {
        self.yard_line = v.clamp(0, 100);
    }

    pub fn set_quarter(&mut self, v: i64) {
        self.quarter = v.clamp(1, 4);
    }

    pub fn set_weather(&mut self, v: i64) {
        self.weather = v.clamp(0, WEATHER_OPTIONS.len() as i64 - 1);
    }

    pub fn weather_label(&self) -> &'static str {
        crate::prompt::weather_label(Some(self.weather))
    }

    /// Back to the defaults, dropping any shown result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            down: Some(self.down),
            distance: self.distance,
            yard_line: Some(self.yard_line),
            quarter: Some(self.quarter),
            time_minutes: self.time_minutes,
            time_seconds: self.time_seconds,
            our_score: self.our_score,
            their_score: self.their_score,
            weather: Some(self.weather),
            additional_info: Some(self.additional_info.clone()),
        }
    }
}

pub struct PlaycallClient {
    http: Client,
    base_url: String,
}

impl PlaycallClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<bool, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json::<HealthResponse>().await?.ok)
    }

    pub async fn predict(&self, gs: &GameState) -> Result<String, ClientError> {
        let res = self
            .http
            .post(format!("{}/api/predict", self.base_url))
            .json(gs)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await?;

        match serde_json::from_str::<PredictResponse>(&text) {
            Ok(PredictResponse::Playcall { playcall }) if status.is_success() => Ok(playcall),
            Ok(PredictResponse::Error { error }) => Err(ClientError::Server {
                status: status.as_u16(),
                message: error,
            }),
            _ => Err(ClientError::Server {
                status: status.as_u16(),
                message: text,
            }),
        }
    }

    /// Submit the form and keep the answer on it for display.
    pub async fn submit(&self, form: &mut PlayForm) -> Result<(), ClientError> {
        let playcall = self.predict(&form.to_game_state()).await?;
        form.result = Some(playcall);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sliders_clamp() {
        let mut form = PlayForm::default();
        form.set_down(7);
        form.set_yard_line(-3);
        form.set_quarter(0);
        form.set_weather(9);
        assert_eq!((form.down, form.yard_line, form.quarter, form.weather), (4, 0, 1, 4));
        assert_eq!(form.weather_label(), "Heavy Snow");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = PlayForm::default();
        form.set_down(3);
        form.distance = Some(7);
        form.additional_info = "windy".into();
        form.result = Some("Shotgun".into());
        form.reset();
        assert_eq!(form, PlayForm::default());
    }

    #[test]
    fn empty_inputs_are_not_sent() {
        let value = serde_json::to_value(PlayForm::default().to_game_state()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "down": 1,
                "yardLine": 50,
                "quarter": 1,
                "weather": 0,
                "additionalInfo": "",
            })
        );
    }
}
