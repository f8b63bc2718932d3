//! Page lister for the "popular" catalog browse

use crate::api::ApiClient;
use crate::CatalogError;
use serde::Deserialize;
use serde_json::Value;

/// Minimal projection of one catalog listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Display name
    pub name: Option<String>,

    /// Stable identifier used to request details
    pub slug: Option<String>,
}

impl ListingEntry {
    /// Projects `name` and `slug` out of a raw listing entry
    ///
    /// Fields that are missing or not strings come out as `None`, and so does
    /// everything for an entry that is not an object.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            name: field("name"),
            slug: field("slug"),
        }
    }

    /// Returns the identifier, treating a blank slug as absent
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct QueryPluginsResponse {
    #[serde(default)]
    plugins: Vec<Value>,
}

/// Fetches one page of the popular catalog listing
///
/// # Arguments
///
/// * `client` - The API client (carries endpoint and page size)
/// * `page` - 1-based page number
///
/// # Returns
///
/// * `Ok(entries)` - Entries on this page; empty means the catalog is exhausted
/// * `Err(CatalogError)` - The request or decoding failed
pub async fn fetch_page(client: &ApiClient, page: u32) -> Result<Vec<ListingEntry>, CatalogError> {
    let params = vec![
        ("action".to_string(), "query_plugins".to_string()),
        ("request[page]".to_string(), page.to_string()),
        ("request[per_page]".to_string(), client.per_page().to_string()),
        ("request[browse]".to_string(), "popular".to_string()),
    ];

    let context = format!("listing page {}", page);
    let response: QueryPluginsResponse = client.get_json(&params, &context).await?;

    tracing::info!(
        "Fetched page {} with {} plugins",
        page,
        response.plugins.len()
    );

    Ok(response
        .plugins
        .iter()
        .map(ListingEntry::from_value)
        .collect())
}
