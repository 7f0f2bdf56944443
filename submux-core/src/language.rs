//! Language code normalization.
//!
//! Container track reports and subtitle sidecar files both carry 3-letter
//! ISO 639 codes ("eng", "fra"); mkvmerge language directives want the
//! 2-letter form. The mapping itself lives in the `isolang` registry table;
//! this module only wraps the lookup with the fallback policy callers rely
//! on: an unrecognized code is non-fatal and degrades to the default.

use crate::error::{CoreError, CoreResult};

use isolang::Language;

/// Language code assumed when a track or sidecar does not state one,
/// or states one the table does not know.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Sentinel the inspection tool prints for tracks without a language.
pub const UNDETERMINED: &str = "und";

/// Maps a 3-letter ISO 639 code to its 2-letter equivalent.
///
/// Accepts 639-3 codes ("fra") and, as a courtesy, codes that are already
/// 2-letter 639-1 ("fr"). Returns `CoreError::UnknownLanguage` when the
/// table has no mapping; callers treat that as non-fatal and substitute
/// [`DEFAULT_LANGUAGE`].
pub fn normalize(raw_code: &str) -> CoreResult<String> {
    Language::from_639_3(raw_code)
        .or_else(|| Language::from_639_1(raw_code))
        .and_then(|lang| lang.to_639_1())
        .map(str::to_string)
        .ok_or_else(|| CoreError::UnknownLanguage(raw_code.to_string()))
}

/// Normalizes a track-report language token, applying the fallback policy:
/// the "und" sentinel and any unmappable code become [`DEFAULT_LANGUAGE`].
pub fn normalize_or_default(raw_code: &str) -> String {
    if raw_code == UNDETERMINED {
        return DEFAULT_LANGUAGE.to_string();
    }
    normalize(raw_code).unwrap_or_else(|_| {
        log::debug!("No 2-letter mapping for '{raw_code}', using default");
        DEFAULT_LANGUAGE.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_alpha3_codes() {
        assert_eq!(normalize("eng").unwrap(), "en");
        assert_eq!(normalize("fra").unwrap(), "fr");
        assert_eq!(normalize("deu").unwrap(), "de");
    }

    #[test]
    fn accepts_already_normalized_codes() {
        assert_eq!(normalize("fr").unwrap(), "fr");
    }

    #[test]
    fn rejects_unknown_codes() {
        match normalize("zzz") {
            Err(CoreError::UnknownLanguage(code)) => assert_eq!(code, "zzz"),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn undetermined_falls_back_to_default() {
        assert_eq!(normalize_or_default("und"), DEFAULT_LANGUAGE);
        assert_eq!(normalize_or_default("zzz"), DEFAULT_LANGUAGE);
        assert_eq!(normalize_or_default("fra"), "fr");
    }
}
