use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIGITS_REGEX: Regex = Regex::new(r"\d+").unwrap();
    static ref STREET_TYPE_REGEX: Regex = Regex::new(
        r"\b(?:STREET|ST|AVENUE|AVE|ROAD|RD|BOULEVARD|BLVD|LANE|LN|DRIVE|DR|COURT|CT|PLACE|PL|TERRACE|TER|WAY|CIRCLE|CIR|ALLEY|ALY|PARKWAY|PKWY)\b\.?"
    )
    .unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Spelling quirks of the meter data, replaced before anything else is stripped.
const SUBSTITUTIONS: [(&str, &str); 4] = [("9TH", "NINTH"), ("- GB", ""), ("MS1", ""), (" GB", "")];

/// Reduce a street name to a key under which meter sub-areas and OSM way names of the same
/// street compare equal, e.g. "Main Street", "MAIN ST" and "main st." all become "MAIN".
///
/// The key is upper case, without digits, without street type words and with single spaces.
pub fn normalize_street_name(name: &str) -> String {
    let mut normalized = normalize_once(&name.to_uppercase());
    // Removing text can expose new matches, e.g. "1 GB" becomes " GB".
    loop {
        let next = normalize_once(&normalized);
        if next == normalized {
            return normalized;
        }
        normalized = next;
    }
}

fn normalize_once(name: &str) -> String {
    let mut result = name.to_string();
    for (pattern, replacement) in SUBSTITUTIONS {
        result = result.replace(pattern, replacement);
    }
    let result = DIGITS_REGEX.replace_all(&result, "");
    let result = STREET_TYPE_REGEX.replace_all(&result, "");
    let result = WHITESPACE_REGEX.replace_all(&result, " ");
    result.trim().to_string()
}
