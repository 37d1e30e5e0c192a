//! Language list conversion and code mapping between Google and Lingvanex

use crate::core::errors::{RelayError, Result};
use crate::core::models::{GoogleLanguageList, LnxLanguage};

/// Codes the Lingvanex backends accept.
/// Chinese appears under both the Google and the script-tagged spelling.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "auto", "af", "am", "ar", "az", "be", "bg", "bn", "bs", "ca", "ceb", "co", "cs", "cy",
    "da", "de", "el", "en", "eo", "es", "et", "eu", "fa", "fi", "fr", "fy", "ga", "gd", "gl",
    "gu", "ha", "haw", "he", "hi", "hmn", "hr", "ht", "hu", "hy", "id", "ig", "is", "it", "ja",
    "jv", "ka", "kk", "km", "kn", "ko", "ku", "ky", "la", "lb", "lo", "lt", "lv", "mg", "mi",
    "mk", "ml", "mn", "mr", "ms", "mt", "my", "ne", "nl", "no", "ny", "or", "pa", "pl", "ps",
    "pt", "ro", "ru", "rw", "sd", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr-Cyrl", "st",
    "su", "sv", "sw", "ta", "te", "tg", "th", "tk", "tl", "tr", "tt", "ug", "uk", "ur", "uz",
    "vi", "xh", "yi", "yo", "zh-CN", "zh-Hans", "zh-Hant", "zh-TW", "zu",
];

/// Map a Lingvanex code to the code Google clients expect
fn to_google_code(lnx_code: &str) -> &str {
    match lnx_code {
        "zh-Hans" => "zh-CN",
        "zh-Hant" => "zh-TW",
        other => other,
    }
}

/// Parse a Lingvanex language list and convert it to Google's format.
///
/// Lingvanex lists are symmetric, so every entry becomes both a source and a
/// target language.
pub fn to_google_language_list(body: &[u8]) -> Result<GoogleLanguageList> {
    let languages: Vec<LnxLanguage> =
        serde_json::from_slice(body).map_err(|e| RelayError::InvalidResponseError {
            message: format!("error converting to google language list: {}", e),
        })?;

    let mut list = GoogleLanguageList::default();
    for lang in languages {
        let code = to_google_code(&lang.code_alpha_1).to_string();
        list.sl.insert(code.clone(), lang.code_name.clone());
        list.tl.insert(code, lang.code_name);
    }
    Ok(list)
}

/// Check a Google language code against the supported table
pub fn to_lnx_language_code(google_code: &str) -> Result<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|code| **code == google_code)
        .map(|code| code.to_string())
        .ok_or_else(|| RelayError::UnsupportedLanguage {
            code: google_code.to_string(),
        })
}
