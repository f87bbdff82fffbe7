//! Wire model for the article search response envelope.
//!
//! # Responsibility
//! - Mirror the `{ response: { docs: [...] } }` payload shape.
//! - Derive an absolute media image URL from relative asset paths.
//!
//! # Invariants
//! - Every remote field is optional; a document with no metadata still
//!   decodes.
//! - A body without the `response` envelope is a parse failure, not an
//!   empty result set.

use super::{FetchError, FetchResult};
use serde::Deserialize;

const MEDIA_BASE_URL: &str = "https://www.nytimes.com/";

#[derive(Debug, Clone, Deserialize)]
struct SearchResponse {
    response: Option<SearchBody>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<RemoteArticle>,
}

/// One article document as returned by the search API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteArticle {
    #[serde(default)]
    pub headline: Option<Headline>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub byline: Option<Byline>,
    #[serde(default)]
    pub multimedia: Vec<MediaAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Headline {
    #[serde(default)]
    pub main: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Byline {
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaAsset {
    #[serde(default)]
    pub url: Option<String>,
}

impl RemoteArticle {
    /// Returns an absolute URL for the first media asset, if any.
    ///
    /// The API reports asset paths relative to its site root; absolute
    /// URLs pass through untouched.
    pub fn media_image_url(&self) -> Option<String> {
        let url = self
            .multimedia
            .iter()
            .find_map(|asset| asset.url.as_deref())?;
        if url.starts_with("http://") || url.starts_with("https://") {
            Some(url.to_string())
        } else {
            Some(format!("{MEDIA_BASE_URL}{url}"))
        }
    }
}

/// Decodes a raw response body into the contained documents.
pub fn parse_search_response(body: &str) -> FetchResult<Vec<RemoteArticle>> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|err| FetchError::Parse(err.to_string()))?;
    match parsed.response {
        Some(body) => Ok(body.docs),
        None => Err(FetchError::Parse(
            "missing `response` envelope".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_search_response, RemoteArticle};
    use crate::fetch::FetchError;

    #[test]
    fn parses_full_document() {
        let body = r#"{
            "response": {
                "docs": [{
                    "headline": {"main": "Breaking"},
                    "abstract": "Something happened.",
                    "byline": {"original": "By A. Reporter"},
                    "multimedia": [{"url": "images/lead.jpg"}]
                }]
            }
        }"#;

        let docs = parse_search_response(body).unwrap();
        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.headline.as_ref().unwrap().main.as_deref(), Some("Breaking"));
        assert_eq!(doc.abstract_text.as_deref(), Some("Something happened."));
        assert_eq!(
            doc.byline.as_ref().unwrap().original.as_deref(),
            Some("By A. Reporter")
        );
        assert_eq!(
            doc.media_image_url().as_deref(),
            Some("https://www.nytimes.com/images/lead.jpg")
        );
    }

    #[test]
    fn tolerates_documents_with_no_metadata() {
        let body = r#"{"response": {"docs": [{}]}}"#;
        let docs = parse_search_response(body).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].headline.is_none());
        assert!(docs[0].abstract_text.is_none());
        assert!(docs[0].byline.is_none());
        assert!(docs[0].media_image_url().is_none());
    }

    #[test]
    fn empty_docs_is_a_valid_empty_result() {
        let docs = parse_search_response(r#"{"response": {"docs": []}}"#).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn missing_envelope_is_a_parse_failure() {
        let err = parse_search_response(r#"{"status": "OK"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_failure() {
        let err = parse_search_response("not json").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn absolute_media_urls_pass_through() {
        let doc: RemoteArticle = serde_json::from_str(
            r#"{"multimedia": [{"url": "https://cdn.example.com/a.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(
            doc.media_image_url().as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn media_url_skips_assets_without_url() {
        let doc: RemoteArticle = serde_json::from_str(
            r#"{"multimedia": [{}, {"url": "images/second.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(
            doc.media_image_url().as_deref(),
            Some("https://www.nytimes.com/images/second.jpg")
        );
    }
}
