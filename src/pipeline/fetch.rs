// Acquisition of the raw JSON-stat2 datasets from the PX-Web API.
//
// One blocking POST per invocation, no retries: the pipeline is run by
// hand and a failed fetch simply aborts the run.

use log::{error, info};

use snafu::prelude::*;

use serde_json::Value as JSValue;
use std::fs;

use crate::pipeline::{FetchSnafu, HttpStatusSnafu, OpeningJsonSnafu, ParsingJsonSnafu, PxResult};

/// The KOS02121 parliamentary-results table of Hagstofa Íslands.
pub const DEFAULT_URL: &str =
    "https://px.hagstofa.is:443/pxis/api/v1/is/Ibuar/kosningar/althingi/althurslit/KOS02121.px";

/// PX-Web expects the bare query object; table exports sometimes wrap it
/// in a `queryObj` envelope.
pub fn query_body(query: JSValue) -> JSValue {
    match &query {
        JSValue::Object(m) if m.contains_key("queryObj") => m["queryObj"].clone(),
        _ => query,
    }
}

/// POSTs the stored query at `query_path` to `url` and returns the raw
/// response body, to be persisted verbatim.
pub fn fetch_raw(query_path: &str, url: &str) -> PxResult<String> {
    let contents = fs::read_to_string(query_path).context(OpeningJsonSnafu { path: query_path })?;
    let query: JSValue =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path: query_path })?;
    let body = query_body(query);

    info!("posting query {} to {}", query_path, url);
    let response = reqwest::blocking::Client::new()
        .post(url)
        .json(&body)
        .send()
        .context(FetchSnafu { url })?;
    let status = response.status();
    let text = response.text().context(FetchSnafu { url })?;

    if !status.is_success() {
        let snippet: String = text.chars().take(500).collect();
        error!("HTTP {} from {}: {}", status, url, snippet);
        return HttpStatusSnafu {
            status: status.as_u16(),
            url,
            snippet,
        }
        .fail();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_query_obj_envelope() {
        let wrapped = json!({"queryObj": {"query": [], "response": {"format": "json-stat2"}}});
        assert_eq!(
            query_body(wrapped),
            json!({"query": [], "response": {"format": "json-stat2"}})
        );
    }

    #[test]
    fn bare_query_passes_through() {
        let bare = json!({"query": [{"code": "Ár"}], "response": {"format": "json-stat2"}});
        assert_eq!(query_body(bare.clone()), bare);
    }
}
