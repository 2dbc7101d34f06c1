use std::error::Error;

/// Identity of one installed package: name plus version.
///
/// The pair is the cache key. It round-trips through `encode_key` /
/// `decode_key` losslessly, including names or versions that contain
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    pub name: String,
    pub version: String,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        PackageRef {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Encode the two-part key into a single storage key.
    ///
    /// Each part is percent-encoded before joining on a space, so the
    /// separator can never appear inside a part and the split on read is
    /// unambiguous.
    pub fn encode_key(&self) -> String {
        format!(
            "{} {}",
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.version)
        )
    }

    /// Decode a storage key back into the (name, version) pair.
    ///
    /// A key that does not split into exactly two parts is a decode error,
    /// not a silently skipped entry.
    pub fn decode_key(key: &str) -> Result<Self, Box<dyn Error>> {
        let mut parts = key.split(' ');
        let (name, version) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(version), None) => (name, version),
            _ => {
                return Err(format!("malformed cache key: {:?}", key).into());
            }
        };

        Ok(PackageRef {
            name: urlencoding::decode(name)?.into_owned(),
            version: urlencoding::decode(version)?.into_owned(),
        })
    }
}
