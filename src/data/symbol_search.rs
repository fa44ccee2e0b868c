#[cfg(debug_assertions)]
use crate::config::DF;
use {
    crate::config::MARKET_DATA,
    anyhow::{Context, Result},
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    std::time::Duration,
};

/// One autocomplete hit, as shown in the search dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
}

#[async_trait]
pub trait SymbolSearch: Send + Sync {
    /// Empty on a blank query or when the upstream refuses the request.
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>>;
}

#[derive(Debug, Default, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    symbols: Vec<AutocompleteEntry>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteEntry {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    symbol_info: String,
}

impl From<AutocompleteEntry> for SymbolMatch {
    fn from(entry: AutocompleteEntry) -> Self {
        Self {
            symbol: entry.symbol,
            name: entry.symbol_info,
        }
    }
}

pub struct NseSymbolSearch {
    client: reqwest::Client,
}

impl NseSymbolSearch {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(MARKET_DATA.client.timeout_ms))
            .user_agent(MARKET_DATA.client.user_agent)
            .build()
            .context("Failed to build HTTP client for symbol search")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SymbolSearch for NseSymbolSearch {
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(MARKET_DATA.search.autocomplete_url)
            .query(&[("q", query)])
            .header(reqwest::header::ACCEPT_LANGUAGE, MARKET_DATA.search.accept_language)
            .send()
            .await
            .with_context(|| format!("Symbol search for '{}' failed", query))?;

        if !response.status().is_success() {
            #[cfg(debug_assertions)]
            if DF.log_provider {
                log::info!("Symbol search '{}' refused with {}", query, response.status());
            }
            return Ok(Vec::new());
        }

        let body: AutocompleteResponse = response
            .json()
            .await
            .with_context(|| format!("Symbol search for '{}' returned invalid JSON", query))?;

        Ok(matches_from_response(body))
    }
}

fn matches_from_response(body: AutocompleteResponse) -> Vec<SymbolMatch> {
    body.symbols.into_iter().map(SymbolMatch::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_symbol_info_to_name() {
        let json = r#"{"symbols":[
            {"symbol":"TCS","symbol_info":"Tata Consultancy Services Limited","result_type":"symbol"},
            {"symbol":"TCSL"}
        ],"mfsymbols":[]}"#;
        let body: AutocompleteResponse = serde_json::from_str(json).unwrap();
        let matches = matches_from_response(body);

        assert_eq!(
            matches,
            vec![
                SymbolMatch {
                    symbol: "TCS".into(),
                    name: "Tata Consultancy Services Limited".into()
                },
                SymbolMatch {
                    symbol: "TCSL".into(),
                    name: String::new()
                },
            ]
        );
    }

    #[test]
    fn missing_symbols_key_is_empty() {
        let body: AutocompleteResponse = serde_json::from_str("{}").unwrap();
        assert!(matches_from_response(body).is_empty());
    }

    #[tokio::test]
    async fn blank_query_skips_the_network() {
        let search = NseSymbolSearch::new().unwrap();
        assert!(search.search("   ").await.unwrap().is_empty());
    }
}
