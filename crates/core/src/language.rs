use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Language used when no stream matches the preferred one
pub const BACKUP_LANGUAGE: &str = "en";

/// Preferred language when the configuration does not set one
pub const DEFAULT_PREFERRED_LANGUAGE: &str = "eng";

// Primary subtag followed by optional region/script/variant subtags
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{2,3})(?:[-_][A-Za-z0-9]{1,8})*$").expect("static language tag regex")
});

/// A normalized base language code (ISO 639-1 where one exists)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and normalize a raw language tag, `None` when it carries no usable language
    pub fn parse(tag: &str) -> Option<Self> {
        normalize_language(tag).map(LanguageCode)
    }

    /// The fixed backup language
    pub fn backup() -> Self {
        LanguageCode(BACKUP_LANGUAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LanguageCode::parse(&value).ok_or_else(|| format!("invalid language tag: {:?}", value))
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

/// Normalize a language tag to its base language
///
/// Accepts BCP-47 style tags (`en`, `eng`, `en-US`, `pt_BR`), drops everything
/// after the primary subtag and maps three-letter ISO 639-2 codes to their
/// two-letter ISO 639-1 form when one exists. Returns `None` for empty or
/// malformed tags and for codes that state no particular language.
pub fn normalize_language(tag: &str) -> Option<String> {
    let caps = TAG_PATTERN.captures(tag.trim())?;
    let base = caps[1].to_ascii_lowercase();

    if matches!(base.as_str(), "und" | "zxx" | "mul" | "mis") {
        return None;
    }

    match TWO_LETTER_FORMS.get(base.as_str()) {
        Some(short) => Some(short.to_string()),
        None => Some(base),
    }
}

/// ISO 639-1 code, ISO 639-2/T code, ISO 639-2/B code where it differs
pub const ISO_639: &[(&str, &str, Option<&str>)] = &[
    ("aa", "aar", None),
    ("ab", "abk", None),
    ("ae", "ave", None),
    ("af", "afr", None),
    ("ak", "aka", None),
    ("am", "amh", None),
    ("an", "arg", None),
    ("ar", "ara", None),
    ("as", "asm", None),
    ("av", "ava", None),
    ("ay", "aym", None),
    ("az", "aze", None),
    ("ba", "bak", None),
    ("be", "bel", None),
    ("bg", "bul", None),
    ("bh", "bih", None),
    ("bi", "bis", None),
    ("bm", "bam", None),
    ("bn", "ben", None),
    ("bo", "bod", Some("tib")),
    ("br", "bre", None),
    ("bs", "bos", None),
    ("ca", "cat", None),
    ("ce", "che", None),
    ("ch", "cha", None),
    ("co", "cos", None),
    ("cr", "cre", None),
    ("cs", "ces", Some("cze")),
    ("cu", "chu", None),
    ("cv", "chv", None),
    ("cy", "cym", Some("wel")),
    ("da", "dan", None),
    ("de", "deu", Some("ger")),
    ("dv", "div", None),
    ("dz", "dzo", None),
    ("ee", "ewe", None),
    ("el", "ell", Some("gre")),
    ("en", "eng", None),
    ("eo", "epo", None),
    ("es", "spa", None),
    ("et", "est", None),
    ("eu", "eus", Some("baq")),
    ("fa", "fas", Some("per")),
    ("ff", "ful", None),
    ("fi", "fin", None),
    ("fj", "fij", None),
    ("fo", "fao", None),
    ("fr", "fra", Some("fre")),
    ("fy", "fry", None),
    ("ga", "gle", None),
    ("gd", "gla", None),
    ("gl", "glg", None),
    ("gn", "grn", None),
    ("gu", "guj", None),
    ("gv", "glv", None),
    ("ha", "hau", None),
    ("he", "heb", None),
    ("hi", "hin", None),
    ("ho", "hmo", None),
    ("hr", "hrv", None),
    ("ht", "hat", None),
    ("hu", "hun", None),
    ("hy", "hye", Some("arm")),
    ("hz", "her", None),
    ("ia", "ina", None),
    ("id", "ind", None),
    ("ie", "ile", None),
    ("ig", "ibo", None),
    ("ii", "iii", None),
    ("ik", "ipk", None),
    ("io", "ido", None),
    ("is", "isl", Some("ice")),
    ("it", "ita", None),
    ("iu", "iku", None),
    ("ja", "jpn", None),
    ("jv", "jav", None),
    ("ka", "kat", Some("geo")),
    ("kg", "kon", None),
    ("ki", "kik", None),
    ("kj", "kua", None),
    ("kk", "kaz", None),
    ("kl", "kal", None),
    ("km", "khm", None),
    ("kn", "kan", None),
    ("ko", "kor", None),
    ("kr", "kau", None),
    ("ks", "kas", None),
    ("ku", "kur", None),
    ("kv", "kom", None),
    ("kw", "cor", None),
    ("ky", "kir", None),
    ("la", "lat", None),
    ("lb", "ltz", None),
    ("lg", "lug", None),
    ("li", "lim", None),
    ("ln", "lin", None),
    ("lo", "lao", None),
    ("lt", "lit", None),
    ("lu", "lub", None),
    ("lv", "lav", None),
    ("mg", "mlg", None),
    ("mh", "mah", None),
    ("mi", "mri", Some("mao")),
    ("mk", "mkd", Some("mac")),
    ("ml", "mal", None),
    ("mn", "mon", None),
    ("mr", "mar", None),
    ("ms", "msa", Some("may")),
    ("mt", "mlt", None),
    ("my", "mya", Some("bur")),
    ("na", "nau", None),
    ("nb", "nob", None),
    ("nd", "nde", None),
    ("ne", "nep", None),
    ("ng", "ndo", None),
    ("nl", "nld", Some("dut")),
    ("nn", "nno", None),
    ("no", "nor", None),
    ("nr", "nbl", None),
    ("nv", "nav", None),
    ("ny", "nya", None),
    ("oc", "oci", None),
    ("oj", "oji", None),
    ("om", "orm", None),
    ("or", "ori", None),
    ("os", "oss", None),
    ("pa", "pan", None),
    ("pi", "pli", None),
    ("pl", "pol", None),
    ("ps", "pus", None),
    ("pt", "por", None),
    ("qu", "que", None),
    ("rm", "roh", None),
    ("rn", "run", None),
    ("ro", "ron", Some("rum")),
    ("ru", "rus", None),
    ("rw", "kin", None),
    ("sa", "san", None),
    ("sc", "srd", None),
    ("sd", "snd", None),
    ("se", "sme", None),
    ("sg", "sag", None),
    ("si", "sin", None),
    ("sk", "slk", Some("slo")),
    ("sl", "slv", None),
    ("sm", "smo", None),
    ("sn", "sna", None),
    ("so", "som", None),
    ("sq", "sqi", Some("alb")),
    ("sr", "srp", None),
    ("ss", "ssw", None),
    ("st", "sot", None),
    ("su", "sun", None),
    ("sv", "swe", None),
    ("sw", "swa", None),
    ("ta", "tam", None),
    ("te", "tel", None),
    ("tg", "tgk", None),
    ("th", "tha", None),
    ("ti", "tir", None),
    ("tk", "tuk", None),
    ("tl", "tgl", None),
    ("tn", "tsn", None),
    ("to", "ton", None),
    ("tr", "tur", None),
    ("ts", "tso", None),
    ("tt", "tat", None),
    ("tw", "twi", None),
    ("ty", "tah", None),
    ("ug", "uig", None),
    ("uk", "ukr", None),
    ("ur", "urd", None),
    ("uz", "uzb", None),
    ("ve", "ven", None),
    ("vi", "vie", None),
    ("vo", "vol", None),
    ("wa", "wln", None),
    ("wo", "wol", None),
    ("xh", "xho", None),
    ("yi", "yid", None),
    ("yo", "yor", None),
    ("za", "zha", None),
    ("zh", "zho", Some("chi")),
    ("zu", "zul", None),
];

// Withdrawn ISO 639-1 codes still found in older files
const WITHDRAWN_TWO_LETTER: &[(&str, &str)] =
    &[("iw", "he"), ("in", "id"), ("ji", "yi"), ("jw", "jv")];

// Three-letter forms and withdrawn codes, keyed to the current two-letter code
static TWO_LETTER_FORMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut forms = HashMap::new();
    for &(short, terminology, bibliographic) in ISO_639 {
        forms.insert(terminology, short);
        if let Some(bibliographic) = bibliographic {
            forms.insert(bibliographic, short);
        }
    }
    for &(old, short) in WITHDRAWN_TWO_LETTER {
        forms.insert(old, short);
    }
    forms
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_letter_codes_map_to_two_letter() {
        assert_eq!(normalize_language("eng").as_deref(), Some("en"));
        assert_eq!(normalize_language("fre").as_deref(), Some("fr"));
        assert_eq!(normalize_language("fra").as_deref(), Some("fr"));
        assert_eq!(normalize_language("ger").as_deref(), Some("de"));
    }

    #[test]
    fn test_subtags_and_case_are_dropped() {
        assert_eq!(normalize_language("en-US").as_deref(), Some("en"));
        assert_eq!(normalize_language("pt_BR").as_deref(), Some("pt"));
        assert_eq!(normalize_language(" ENG ").as_deref(), Some("en"));
    }

    #[test]
    fn test_every_registry_form_normalizes_to_two_letter_code() {
        for &(short, terminology, bibliographic) in ISO_639 {
            assert_eq!(normalize_language(short).as_deref(), Some(short), "{}", short);
            assert_eq!(normalize_language(terminology).as_deref(), Some(short), "{}", terminology);
            if let Some(bibliographic) = bibliographic {
                assert_eq!(
                    normalize_language(bibliographic).as_deref(),
                    Some(short),
                    "{}",
                    bibliographic
                );
            }
        }
    }

    #[test]
    fn test_less_common_languages_match_across_forms() {
        let pairs = [
            ("bn", "ben"),
            ("af", "afr"),
            ("sw", "swa"),
            ("tl", "tgl"),
            ("mr", "mar"),
            ("pa", "pan"),
            ("la", "lat"),
            ("bs", "bos"),
            ("kk", "kaz"),
            ("am", "amh"),
            ("bo", "tib"),
            ("ne", "nep"),
        ];
        for (short, long) in pairs {
            assert_eq!(LanguageCode::parse(short), LanguageCode::parse(long), "{} vs {}", short, long);
        }
    }

    #[test]
    fn test_withdrawn_codes_map_to_current() {
        assert_eq!(normalize_language("iw").as_deref(), Some("he"));
        assert_eq!(normalize_language("in-ID").as_deref(), Some("id"));
    }

    #[test]
    fn test_unknown_valid_code_passes_through() {
        assert_eq!(normalize_language("tlh").as_deref(), Some("tlh"));
    }

    #[test]
    fn test_missing_or_malformed_tags() {
        assert_eq!(normalize_language(""), None);
        assert_eq!(normalize_language("e"), None);
        assert_eq!(normalize_language("english"), None);
        assert_eq!(normalize_language("12"), None);
        assert_eq!(normalize_language("und"), None);
    }

    #[test]
    fn test_language_code_deserialize_rejects_garbage() {
        let ok: LanguageCode = serde_json::from_str("\"eng\"").unwrap();
        assert_eq!(ok.as_str(), "en");
        assert!(serde_json::from_str::<LanguageCode>("\"???\"").is_err());
    }
}
