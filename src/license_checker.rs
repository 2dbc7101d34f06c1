use once_cell::sync::Lazy;
use std::collections::HashSet;

// Licenses considered acceptable. Exact names only, no wildcards and no
// case folding.
static GOOD_LICENSES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "Apache Software License",
        "Apache",
        "BSD License",
        "BSD",
        "MIT License",
        "MIT",
    ])
});

/// Check a license string against the allow-list.
pub fn is_accepted(license: &str) -> bool {
    GOOD_LICENSES.contains(license)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_allow_list_entry() {
        for license in GOOD_LICENSES.iter() {
            assert!(is_accepted(license), "{} should be accepted", license);
        }
    }

    #[test]
    fn rejects_licenses_outside_the_list() {
        assert!(!is_accepted("GPL"));
        assert!(!is_accepted("GPL 2"));
        assert!(!is_accepted("UNKNOWN"));
    }

    #[test]
    fn no_normalization_is_applied() {
        assert!(is_accepted("MIT"));
        assert!(!is_accepted("mit"));
        assert!(!is_accepted(" MIT"));
        assert!(!is_accepted("MIT "));
    }
}
