//! Core data models for the relay wire formats

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::errors::{RelayError, Result};
use crate::core::language::to_lnx_language_code;

/// Source language value that asks the backend to auto-detect
pub const AUTO_DETECT: &str = "auto";

/// Google format language list
///
/// ```json
/// {"sl": {"auto": "Detect language", "af": "Afrikaans"}, "tl": {"af": "Afrikaans"}}
/// ```
///
/// Google also sends an `al` map; Lingvanex has no equivalent so it is left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleLanguageList {
    /// Source languages, code to display name
    pub sl: BTreeMap<String, String>,
    /// Target languages, code to display name
    pub tl: BTreeMap<String, String>,
}

/// One entry of a Lingvanex language list
///
/// `nativeName`, `rtl` and friends are dropped since Google has no use for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LnxLanguage {
    /// Language code
    pub code_alpha_1: String,
    /// English display name
    #[serde(rename = "codeName")]
    pub code_name: String,
}

/// Language pair carried in a Google format translate query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateParams {
    /// Source language, possibly `auto`
    pub sl: String,
    /// Target language
    pub tl: String,
}

impl TranslateParams {
    /// Parse `sl` and `tl` from a raw query string.
    ///
    /// Each must appear exactly once.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut sl = Vec::new();
        let mut tl = Vec::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "sl" => sl.push(value.into_owned()),
                "tl" => tl.push(value.into_owned()),
                _ => {}
            }
        }

        if sl.len() != 1 {
            return Err(RelayError::BadRequest {
                message: "invalid query parameter format: There should be one sl parameter"
                    .to_string(),
            });
        }
        if tl.len() != 1 {
            return Err(RelayError::BadRequest {
                message: "invalid query parameter format: There should be one tl parameter"
                    .to_string(),
            });
        }

        Ok(Self {
            sl: sl.remove(0),
            tl: tl.remove(0),
        })
    }

    /// Whether the source language is auto-detected
    pub fn is_auto(&self) -> bool {
        self.sl == AUTO_DETECT
    }
}

/// Lingvanex translate request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LnxTranslateRequest {
    /// Source language, omitted for auto-detect
    #[serde(rename = "source", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Target language
    #[serde(rename = "target")]
    pub to: String,
    /// Texts to translate
    #[serde(rename = "q")]
    pub data: Vec<String>,
    /// Always `html`, the widget sends markup
    #[serde(rename = "translateMode")]
    pub translate_mode: String,
}

impl LnxTranslateRequest {
    /// Build a Lingvanex request from a Google format query and its `q` values
    pub fn from_google(params: &TranslateParams, texts: Vec<String>) -> Result<Self> {
        let to = to_lnx_language_code(&params.tl)?;
        let from = if params.is_auto() {
            None
        } else {
            Some(to_lnx_language_code(&params.sl)?)
        };

        Ok(Self {
            from,
            to,
            data: texts,
            translate_mode: "html".to_string(),
        })
    }
}

/// Lingvanex translate response body
///
/// Only one translation per input is kept since Google can't express more.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LnxTranslateResponse {
    /// Echo of the input texts
    #[serde(rename = "sourceText", default)]
    pub source_text: Vec<String>,
    /// Translated texts, same order as the input
    #[serde(rename = "translatedText", default)]
    pub translated_text: Vec<String>,
}

/// Convert a Lingvanex translate response body to the Google format body,
/// a plain JSON array of translated strings.
pub fn to_google_response_body(body: &[u8]) -> Result<Vec<u8>> {
    let lnx: LnxTranslateResponse =
        serde_json::from_slice(body).map_err(|e| RelayError::InvalidResponseError {
            message: format!("Error converting to google response body: {}", e),
        })?;
    Ok(serde_json::to_vec(&lnx.translated_text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_params_from_query() {
        let query = "anno=3&client=te_lib&format=html&v=1.0&sl=auto&tl=en&sp=nmt&mode=1";
        let params = TranslateParams::from_query(query).unwrap();
        assert_eq!(params.sl, "auto");
        assert_eq!(params.tl, "en");
        assert!(params.is_auto());
    }

    #[test]
    fn test_params_require_exactly_one_of_each() {
        assert!(TranslateParams::from_query("tl=en").is_err());
        assert!(TranslateParams::from_query("sl=de").is_err());
        assert!(TranslateParams::from_query("sl=de&sl=fr&tl=en").is_err());
        assert!(TranslateParams::from_query("sl=de&tl=en&tl=es").is_err());
        assert!(TranslateParams::from_query("").is_err());
    }

    #[test]
    fn test_lnx_request_auto_omits_source() {
        let params = TranslateParams::from_query("sl=auto&tl=en").unwrap();
        let req = LnxTranslateRequest::from_google(
            &params,
            vec!["guten Abend".to_string(), "Hallo Welt".to_string()],
        )
        .unwrap();

        assert_json_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "target": "en",
                "q": ["guten Abend", "Hallo Welt"],
                "translateMode": "html"
            })
        );
    }

    #[test]
    fn test_lnx_request_known_source() {
        let params = TranslateParams::from_query("sl=de&tl=en").unwrap();
        let req = LnxTranslateRequest::from_google(&params, vec!["Hallo".to_string()]).unwrap();
        assert_eq!(req.from.as_deref(), Some("de"));
        assert_eq!(req.to, "en");
        assert_eq!(req.translate_mode, "html");
    }

    #[test]
    fn test_lnx_request_rejects_unknown_language() {
        let params = TranslateParams::from_query("sl=de&tl=klingon").unwrap();
        let err = LnxTranslateRequest::from_google(&params, vec![]).unwrap_err();
        assert!(matches!(err, RelayError::UnsupportedLanguage { .. }));

        let params = TranslateParams::from_query("sl=klingon&tl=en").unwrap();
        assert!(LnxTranslateRequest::from_google(&params, vec![]).is_err());
    }

    #[test]
    fn test_to_google_response_body() {
        let lnx = br#"{"sourceText":["Hallo","Welt"],"translatedText":["Hello","World"]}"#;
        let body = to_google_response_body(lnx).unwrap();
        assert_eq!(body, br#"["Hello","World"]"#.to_vec());
    }

    #[test]
    fn test_to_google_response_body_rejects_garbage() {
        let err = to_google_response_body(b"<html>").unwrap_err();
        assert!(matches!(err, RelayError::InvalidResponseError { .. }));
    }
}
