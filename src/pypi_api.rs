use reqwest::blocking::Client;
use std::error::Error;
use std::time::Duration;

/// Loosely-typed release metadata as returned by the registry. No key is
/// guaranteed to be present and the record may be empty.
pub type MetadataRecord = serde_json::Map<String, serde_json::Value>;

/// Opaque remote metadata source. Injected into the driver so tests can
/// substitute a canned implementation.
pub trait Registry {
    /// Metadata for one exact (name, version) release. An empty record means
    /// the release is unknown; transport failures are errors.
    fn release_data(&self, name: &str, version: &str) -> Result<MetadataRecord, Box<dyn Error>>;

    /// All known versions of a package, newest first. Empty when the package
    /// is unknown.
    fn package_releases(&self, name: &str) -> Result<Vec<String>, Box<dyn Error>>;
}

/// Fetch release metadata with the version fallback chain.
pub fn fetch_package_info(
    registry: &dyn Registry,
    name: &str,
    version: &str
) -> Result<MetadataRecord, Box<dyn Error>> {
    // 1st try: given name, version pair.
    let info = registry.release_data(name, version)?;
    if !info.is_empty() {
        return Ok(info);
    }

    // 2nd try: newest version.
    let versions = registry.package_releases(name)?;
    if let Some(newest) = versions.first() {
        return registry.release_data(name, newest);
    }

    // Simulate unknown package.
    Ok(MetadataRecord::new())
}

/// PyPI JSON API client over a blocking HTTP client.
pub struct PyPiClient {
    client: Client,
    base_url: String,
}

impl PyPiClient {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::with_base_url("https://pypi.org")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10)) // Add timeout to avoid long waits
            .build()?;

        Ok(PyPiClient {
            client,
            base_url: base_url.into(),
        })
    }

    // GET a PyPI JSON document. A non-success status means the package or
    // release is unknown, which is not an error here.
    fn get_json(&self, url: &str) -> Result<Option<serde_json::Value>, Box<dyn Error>> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Ok(None);
        }

        Ok(Some(response.json()?))
    }
}

impl Registry for PyPiClient {
    fn release_data(&self, name: &str, version: &str) -> Result<MetadataRecord, Box<dyn Error>> {
        let url = format!(
            "{}/pypi/{}/{}/json",
            self.base_url,
            urlencoding::encode(name),
            urlencoding::encode(version)
        );

        let data = match self.get_json(&url)? {
            Some(data) => data,
            None => {
                return Ok(MetadataRecord::new());
            }
        };

        // The interesting fields (license, classifiers, ...) live under the
        // top-level "info" object.
        match data.get("info").and_then(|info| info.as_object()) {
            Some(info) => Ok(info.clone()),
            None => Ok(MetadataRecord::new()),
        }
    }

    fn package_releases(&self, name: &str) -> Result<Vec<String>, Box<dyn Error>> {
        let url = format!("{}/pypi/{}/json", self.base_url, urlencoding::encode(name));

        let data = match self.get_json(&url)? {
            Some(data) => data,
            None => {
                return Ok(Vec::new());
            }
        };

        // The JSON API reports the newest version under info.version; the
        // full set of releases is keyed under "releases". Put the newest
        // first so callers can take the head of the list.
        let mut versions = Vec::new();

        let newest = data
            .get("info")
            .and_then(|info| info.get("version"))
            .and_then(|v| v.as_str());

        if let Some(newest) = newest {
            versions.push(newest.to_string());
        }

        if let Some(releases) = data.get("releases").and_then(|r| r.as_object()) {
            for version in releases.keys() {
                if Some(version.as_str()) != newest {
                    versions.push(version.clone());
                }
            }
        }

        Ok(versions)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeRegistry;
    use super::*;
    use serde_json::json;

    #[test]
    fn exact_version_hit_returns_directly() {
        let registry = FakeRegistry::new().with_record("foo", "1.0", json!({"license": "MIT"}));

        let info = fetch_package_info(&registry, "foo", "1.0").unwrap();
        assert_eq!(info.get("license").and_then(|v| v.as_str()), Some("MIT"));
        assert_eq!(*registry.release_data_calls.borrow(), 1);
    }

    #[test]
    fn falls_back_to_newest_known_version() {
        let registry = FakeRegistry::new()
            .with_record("foo", "2.0", json!({"license": "BSD"}))
            .with_releases("foo", &["2.0", "1.0"]);

        let info = fetch_package_info(&registry, "foo", "9.9").unwrap();
        assert_eq!(info.get("license").and_then(|v| v.as_str()), Some("BSD"));
        // One miss on the exact version, one hit on the newest.
        assert_eq!(*registry.release_data_calls.borrow(), 2);
    }

    #[test]
    fn unknown_package_yields_empty_record() {
        let registry = FakeRegistry::new();

        let info = fetch_package_info(&registry, "nope", "1.0").unwrap();
        assert!(info.is_empty());
    }
}
