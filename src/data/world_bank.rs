//! World Bank API client.
//!
//! The v2 API answers `[page_meta, records]` on success and `[{"message": [...]}]`
//! when it rejects a query. `records` is `null` when nothing matched.

use super::{FetchError, IndicatorSource, Observation};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::ops::RangeInclusive;

/// Large enough that one page holds any realistic year window.
const PER_PAGE: u32 = 1000;

#[derive(Debug, Deserialize)]
struct Record {
    date: String,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Vec<ApiMessage>,
}

/// Blocking client for the World Bank indicators API.
pub struct WorldBankClient {
    base_url: String,
    client: Client,
}

impl WorldBankClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        // No timeout; a stalled query keeps the render pending.
        let client = Client::builder().timeout(None).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn indicator_url(&self, indicator: &str, country: &str) -> String {
        format!(
            "{}/country/{}/indicator/{}",
            self.base_url, country, indicator
        )
    }

    /// Decode a raw response body into observations.
    pub fn parse_response(body: &str) -> Result<Vec<Observation>, FetchError> {
        let json: Value =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let parts = json
            .as_array()
            .ok_or_else(|| FetchError::Malformed("expected a JSON array".to_string()))?;

        match parts.as_slice() {
            [meta] => {
                let envelope: ErrorEnvelope = serde_json::from_value(meta.clone())
                    .map_err(|_| FetchError::Malformed("single-element response".to_string()))?;
                let text = envelope
                    .message
                    .iter()
                    .filter_map(|m| m.value.clone().or_else(|| m.key.clone()))
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(FetchError::Api(text))
            }
            [_, Value::Null] => Ok(Vec::new()),
            [_, records, ..] => {
                let records: Vec<Record> = serde_json::from_value(records.clone())
                    .map_err(|e| FetchError::Malformed(e.to_string()))?;
                Ok(records
                    .into_iter()
                    .map(|r| Observation::new(r.date, r.value))
                    .collect())
            }
            [] => Err(FetchError::Malformed("empty response array".to_string())),
        }
    }
}

impl IndicatorSource for WorldBankClient {
    fn fetch(
        &self,
        indicator: &str,
        country: &str,
        years: RangeInclusive<i32>,
    ) -> Result<Vec<Observation>, FetchError> {
        let url = self.indicator_url(indicator, country);
        let date = format!("{}:{}", years.start(), years.end());
        tracing::info!(indicator, country, %date, "Querying indicator source");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("date", date),
                ("per_page", PER_PAGE.to_string()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let observations = Self::parse_response(&body)?;
        tracing::debug!(indicator, count = observations.len(), "Indicator query complete");
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let body = r#"[
            {"page":1,"pages":1,"per_page":1000,"total":2},
            [
                {"indicator":{"id":"FP.CPI.TOTL.ZG","value":"Inflation"},"date":"2023","value":5.65,"decimal":1},
                {"indicator":{"id":"FP.CPI.TOTL.ZG","value":"Inflation"},"date":"2022","value":null,"decimal":1}
            ]
        ]"#;

        let obs = WorldBankClient::parse_response(body).unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0], Observation::new("2023", Some(5.65)));
        assert_eq!(obs[1].value, None);
    }

    #[test]
    fn test_parse_null_records_is_empty() {
        let body = r#"[{"page":0,"pages":0,"per_page":1000,"total":0}, null]"#;
        assert!(WorldBankClient::parse_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_api_error_message() {
        let body = r#"[{"message":[{"id":"120","key":"Invalid value","value":"The provided parameter value is not valid"}]}]"#;
        match WorldBankClient::parse_response(body) {
            Err(FetchError::Api(text)) => assert!(text.contains("not valid")),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        assert!(matches!(
            WorldBankClient::parse_response("<html>oops</html>"),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            WorldBankClient::parse_response(r#"{"not":"an array"}"#),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_indicator_url() {
        let client = WorldBankClient::new("https://example.org/v2/").unwrap();
        assert_eq!(
            client.indicator_url("SL.UEM.TOTL.ZS", "IND"),
            "https://example.org/v2/country/IND/indicator/SL.UEM.TOTL.ZS"
        );
    }
}
