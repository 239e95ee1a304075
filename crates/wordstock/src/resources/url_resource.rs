//! # Remote Resource Tools

/// A resource with a constant URL list and optional hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstUrlResource {
    /// The URLs associated with this resource; the first is primary, the rest are mirrors.
    pub urls: &'static [&'static str],

    /// The sha256 hex digest of this resource, if known.
    pub hash: Option<&'static str>,
}

/// A resource with a list of URLs and optional hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlResource {
    /// The URLs associated with this resource.
    pub urls: Vec<String>,

    /// The sha256 hex digest of this resource, if known.
    pub hash: Option<String>,
}

impl UrlResource {
    /// A single-URL resource.
    pub fn from_url<S: Into<String>>(
        url: S,
        hash: Option<String>,
    ) -> Self {
        Self {
            urls: vec![url.into()],
            hash,
        }
    }
}

impl From<ConstUrlResource> for UrlResource {
    fn from(resource: ConstUrlResource) -> Self {
        UrlResource {
            urls: resource.urls.iter().map(|s| s.to_string()).collect(),
            hash: resource.hash.map(|s| s.to_string()),
        }
    }
}

/// A keyed resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyedResource {
    /// Cache sub-directories for this resource.
    ///
    /// Empty places the file directly in the cache root.
    pub key: Vec<String>,

    /// The resource associated with this key.
    pub resource: UrlResource,
}

impl KeyedResource {
    /// Create a keyed resource.
    pub fn new<R: Into<UrlResource>>(
        key: &[&str],
        resource: R,
    ) -> Self {
        Self {
            key: key.iter().map(|s| s.to_string()).collect(),
            resource: resource.into(),
        }
    }

    /// Drop the checksum, so the resource is loaded without validation.
    pub fn without_hash(self) -> Self {
        Self {
            resource: UrlResource {
                hash: None,
                ..self.resource
            },
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_resource() {
        let cres = ConstUrlResource {
            urls: &["https://example.com/a.zip", "https://mirror.example.com/a.zip"],
            hash: Some("abc123"),
        };

        let res = KeyedResource::new(&["glove"], cres);
        assert_eq!(res.key, vec!["glove".to_string()]);
        assert_eq!(res.resource.urls.len(), 2);
        assert_eq!(res.resource.hash.as_deref(), Some("abc123"));

        let res = res.without_hash();
        assert_eq!(res.resource.hash, None);
        assert_eq!(res.resource.urls[0], "https://example.com/a.zip");

        let single = UrlResource::from_url("https://example.com/b.vec", None);
        assert_eq!(single.urls, vec!["https://example.com/b.vec".to_string()]);
    }
}
