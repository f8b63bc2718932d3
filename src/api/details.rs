//! Detail fetcher for individual plugins

use crate::api::ApiClient;
use crate::CatalogError;
use serde_json::{Map, Value};

/// Opaque detail record, exactly as returned by the API
pub type DetailRecord = Map<String, Value>;

/// Field-selection flags sent with every detail request
///
/// Prose sections and reviews are excluded to keep payloads small.
pub const DETAIL_FIELDS: [(&str, bool); 8] = [
    ("sections", false),
    ("reviews", false),
    ("downloaded", true),
    ("active_installs", true),
    ("last_updated", true),
    ("rating", true),
    ("homepage", true),
    ("versions", true),
];

fn detail_params(slug: &str) -> Vec<(String, String)> {
    let mut params = vec![
        ("action".to_string(), "plugin_information".to_string()),
        ("request[slug]".to_string(), slug.to_string()),
    ];
    params.extend(DETAIL_FIELDS.iter().map(|(field, enabled)| {
        (
            format!("request[fields][{}]", field),
            if *enabled { "1" } else { "0" }.to_string(),
        )
    }));
    params
}

/// Fetches the detail record for one plugin
///
/// # Returns
///
/// * `Ok(DetailRecord)` - The decoded JSON object (possibly empty)
/// * `Err(CatalogError)` - The request failed, or the body was not a JSON object
pub async fn fetch_plugin_details(
    client: &ApiClient,
    slug: &str,
) -> Result<DetailRecord, CatalogError> {
    let context = format!("fetching details for plugin '{}'", slug);
    let value: Value = client.get_json(&detail_params(slug), &context).await?;

    match value {
        Value::Object(record) => {
            tracing::debug!("Fetched details for plugin '{}'", slug);
            Ok(record)
        }
        other => Err(CatalogError::Decode {
            context,
            message: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
