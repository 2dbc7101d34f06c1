use crate::pypi_api::MetadataRecord;

/// Sentinel used by PyPI metadata (and by this tool) for an unresolved
/// license.
pub const UNKNOWN_STR: &str = "UNKNOWN";

/// Find the first classifier row describing a license.
pub fn find_classifier<'a>(classifiers: &[&'a str]) -> Option<&'a str> {
    classifiers.iter().find(|row| row.starts_with("License")).copied()
}

/// Best-effort license string for a metadata record.
///
/// Precedence: the raw `license` field, then the classifiers, then the
/// UNKNOWN sentinel. The `license` field is trimmed first; a value that is
/// missing, null, blank after trimming, or equal to the sentinel falls
/// through to the classifier scan. One rule, applied everywhere.
pub fn extract_license(record: &MetadataRecord) -> String {
    // 1st try: raw `license` field.
    if let Some(license) = record.get("license").and_then(|v| v.as_str()) {
        let license = license.trim();
        if !license.is_empty() && license != UNKNOWN_STR {
            return license.to_string();
        }
    }

    // 2nd try: parsing classifiers.
    let classifiers: Vec<&str> = record
        .get("classifiers")
        .and_then(|v| v.as_array())
        .map(|rows| rows.iter().filter_map(|row| row.as_str()).collect())
        .unwrap_or_default();

    if let Some(matched) = find_classifier(&classifiers) {
        // "License :: OSI Approved :: BSD License" -> "BSD License"
        let last = matched.rsplit("::").next().unwrap_or(matched);
        return last.trim().to_string();
    }

    UNKNOWN_STR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> MetadataRecord {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test record must be a JSON object"),
        }
    }

    #[test]
    fn license_field_wins() {
        let info = record(json!({"license": "FOOBAR"}));
        assert_eq!(extract_license(&info), "FOOBAR");
    }

    #[test]
    fn license_field_is_trimmed() {
        let info = record(json!({"license": " GPL 2  "}));
        assert_eq!(extract_license(&info), "GPL 2");
    }

    #[test]
    fn empty_record_is_unknown() {
        assert_eq!(extract_license(&MetadataRecord::new()), "UNKNOWN");
    }

    #[test]
    fn null_license_is_unknown() {
        let info = record(json!({"license": null}));
        assert_eq!(extract_license(&info), "UNKNOWN");
    }

    #[test]
    fn unrelated_fields_are_ignored() {
        let info = record(json!({"platform": "linux"}));
        assert_eq!(extract_license(&info), "UNKNOWN");
    }

    #[test]
    fn sentinel_license_falls_through_to_classifiers() {
        let info = record(
            json!({
                "license": "UNKNOWN",
                "classifiers": ["License :: OSI Approved :: MIT License"],
            })
        );
        assert_eq!(extract_license(&info), "MIT License");
    }

    #[test]
    fn blank_license_falls_through_to_classifiers() {
        let info = record(
            json!({
                "license": "   ",
                "classifiers": ["License :: OSI Approved :: MIT License"],
            })
        );
        assert_eq!(extract_license(&info), "MIT License");
    }

    #[test]
    fn classifier_scan_takes_last_segment() {
        let info = record(
            json!({
                "classifiers": [
                    "Topic :: Utilities",
                    "License :: OSI Approved :: BSD License",
                    "Programming Language :: Python",
                ],
            })
        );
        assert_eq!(extract_license(&info), "BSD License");
    }

    #[test]
    fn find_classifier_empty() {
        assert_eq!(find_classifier(&[]), None);
    }

    #[test]
    fn find_classifier_returns_whole_row() {
        assert_eq!(find_classifier(&["License :: Ham"]), Some("License :: Ham"));
    }
}
