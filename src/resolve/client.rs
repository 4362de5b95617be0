use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const ABSTRACT_BY_DOI_BASE: &str = "https://api.elsevier.com/content/abstract/doi";
const SERIAL_TITLE_BASE: &str = "https://api.elsevier.com/content/serial/title";

/// First candidate entry from a serial-title lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialEntry {
    pub issn: String,
    pub cite_score: String,
}

/// The three named lookup operations the metric resolver needs. Every
/// operation is a soft lookup: `None` means "not available", never an error.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// ISSN of the journal that published the article with this DOI
    async fn issn_by_doi(&self, doi: &str) -> Option<String>;

    /// First serial entry matching an ISSN
    async fn serial_by_issn(&self, issn: &str) -> Option<SerialEntry>;

    /// First serial entry matching a journal title
    async fn serial_by_title(&self, title: &str) -> Option<SerialEntry>;
}

/// HTTP client for the Scopus article and serial-title endpoints
pub struct ScopusClient {
    client: Client,
    api_key: String,
    timeout: Duration,
}

impl ScopusClient {
    pub fn new(api_key: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key,
            timeout,
        })
    }

    /// Issue a GET and decode the JSON body. Non-success statuses, transport
    /// errors, and undecodable bodies all degrade to `None`.
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Option<Value> {
        let result = self
            .client
            .get(url)
            .query(query)
            .header("X-ELS-APIKey", &self.api_key)
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => match resp.json::<Value>().await {
                Ok(body) => Some(body),
                Err(e) => {
                    debug!("Undecodable response from {}: {}", url, e);
                    None
                }
            },
            Ok(resp) => {
                debug!("{} returned status {}", url, resp.status());
                None
            }
            Err(e) => {
                debug!("Request to {} failed: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl MetricSource for ScopusClient {
    async fn issn_by_doi(&self, doi: &str) -> Option<String> {
        let url = format!("{}/{}", ABSTRACT_BY_DOI_BASE, doi);
        let body = self.get_json(&url, &[]).await?;
        issn_from_abstract(&body)
    }

    async fn serial_by_issn(&self, issn: &str) -> Option<SerialEntry> {
        let body = self.get_json(SERIAL_TITLE_BASE, &[("issn", issn)]).await?;
        first_serial_entry(&body)
    }

    async fn serial_by_title(&self, title: &str) -> Option<SerialEntry> {
        let body = self.get_json(SERIAL_TITLE_BASE, &[("title", title)]).await?;
        first_serial_entry(&body)
    }
}

/// Navigate `abstracts-retrieval-response.coredata.prism:issn`. A missing key
/// anywhere along the path means the ISSN is simply not available.
fn issn_from_abstract(body: &Value) -> Option<String> {
    body.get("abstracts-retrieval-response")?
        .get("coredata")?
        .get("prism:issn")?
        .as_str()
        .map(|issn| issn.to_string())
}

/// Take the first entry of `serial-metadata-response.entry`. Entries missing
/// the ISSN or CiteScore leave the corresponding field empty.
fn first_serial_entry(body: &Value) -> Option<SerialEntry> {
    let entry = body
        .get("serial-metadata-response")?
        .get("entry")?
        .as_array()?
        .first()?;

    let issn = entry
        .get("prism:issn")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let cite_score = entry
        .get("citeScoreYearInfoList")
        .and_then(|info| info.get("citeScoreCurrentMetric"))
        .map(metric_text)
        .unwrap_or_default();

    Some(SerialEntry { issn, cite_score })
}

// The metric arrives as a string in some payloads and a number in others.
fn metric_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issn_from_abstract_full_path() {
        let body = json!({
            "abstracts-retrieval-response": {
                "coredata": { "prism:issn": "1234-5678" }
            }
        });
        assert_eq!(issn_from_abstract(&body), Some("1234-5678".to_string()));
    }

    #[test]
    fn test_issn_from_abstract_missing_nested_key() {
        let body = json!({ "abstracts-retrieval-response": {} });
        assert_eq!(issn_from_abstract(&body), None);

        let body = json!({ "service-error": { "status": "RESOURCE_NOT_FOUND" } });
        assert_eq!(issn_from_abstract(&body), None);
    }

    #[test]
    fn test_first_serial_entry_with_string_metric() {
        let body = json!({
            "serial-metadata-response": {
                "entry": [
                    {
                        "prism:issn": "1234-5678",
                        "citeScoreYearInfoList": { "citeScoreCurrentMetric": "3.2" }
                    },
                    { "prism:issn": "9999-9999" }
                ]
            }
        });
        let entry = first_serial_entry(&body).unwrap();
        assert_eq!(entry.issn, "1234-5678");
        assert_eq!(entry.cite_score, "3.2");
    }

    #[test]
    fn test_first_serial_entry_with_numeric_metric() {
        let body = json!({
            "serial-metadata-response": {
                "entry": [
                    {
                        "prism:issn": "1234-5678",
                        "citeScoreYearInfoList": { "citeScoreCurrentMetric": 3.2 }
                    }
                ]
            }
        });
        let entry = first_serial_entry(&body).unwrap();
        assert_eq!(entry.cite_score, "3.2");
    }

    #[test]
    fn test_first_serial_entry_empty_list() {
        let body = json!({ "serial-metadata-response": { "entry": [] } });
        assert_eq!(first_serial_entry(&body), None);
    }

    #[test]
    fn test_first_serial_entry_partial_fields() {
        let body = json!({
            "serial-metadata-response": {
                "entry": [ { "prism:issn": "1234-5678" } ]
            }
        });
        let entry = first_serial_entry(&body).unwrap();
        assert_eq!(entry.issn, "1234-5678");
        assert!(entry.cite_score.is_empty());
    }
}
