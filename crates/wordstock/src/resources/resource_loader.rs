//! # Resource Loader

use std::path::{Path, PathBuf};

use crate::{errors::WSResult, resources::KeyedResource};
#[cfg(feature = "download")]
use crate::{
    disk_cache::{ChecksumMismatch, WordstockDiskCache},
    errors::WordstockError,
    resources::UrlResource,
};

/// A trait for loading resources.
pub trait ResourceLoader {
    /// Resolve a resource to a local path, fetching it if needed.
    fn load_resource_path(
        &mut self,
        resource: &KeyedResource,
    ) -> WSResult<PathBuf>;
}

#[cfg(feature = "download")]
fn cache_error(err: anyhow::Error) -> WordstockError {
    match err.downcast::<ChecksumMismatch>() {
        Ok(ChecksumMismatch {
            path,
            expected,
            found,
        }) => WordstockError::ChecksumMismatch {
            path,
            expected,
            found,
        },
        Err(err) => WordstockError::Download(format!("{err:#}")),
    }
}

#[cfg(feature = "download")]
impl ResourceLoader for WordstockDiskCache {
    fn load_resource_path(
        &mut self,
        resource: &KeyedResource,
    ) -> WSResult<PathBuf> {
        let path = self
            .load_cached_path(
                &resource.key,
                &resource.resource.urls,
                true,
                resource.resource.hash.as_deref(),
            )
            .map_err(cache_error)?;
        log::debug!("resolved {:?} to {}", resource.key, path.display());
        Ok(path)
    }
}

/// Resolve a resource inside `root`, downloading it if it is missing.
///
/// ## Arguments
/// * `root` - the directory the resource lives in.
/// * `resource` - the resource; its key is ignored.
#[cfg(feature = "download")]
pub fn load_resource_in_root(
    root: &Path,
    resource: &KeyedResource,
) -> WSResult<PathBuf> {
    let mut cache = WordstockDiskCache::with_root(root).map_err(cache_error)?;
    let rooted = KeyedResource {
        key: Vec::new(),
        resource: resource.resource.clone(),
    };
    cache.load_resource_path(&rooted)
}

/// Download `url` into `root`, unless `root/<file name>` already exists.
///
/// ## Arguments
/// * `url` - the source URL; its final path segment names the file.
/// * `root` - the target directory.
/// * `hash` - an optional sha256 hex digest to check the file against.
///
/// ## Errors
/// * `Download` if the URL has no file name, or the download fails.
/// * `ChecksumMismatch` if the file does not match `hash`.
#[cfg(feature = "download")]
pub fn download_from_url<P: AsRef<Path>>(
    url: &str,
    root: P,
    hash: Option<&str>,
) -> WSResult<PathBuf> {
    let resource = KeyedResource::new(&[], UrlResource::from_url(url, hash.map(str::to_string)));
    load_resource_in_root(root.as_ref(), &resource)
}

/// Resolve a resource inside `root` without network access.
///
/// ## Errors
/// `ResourceNotFound` if the file is not already present.
#[cfg(not(feature = "download"))]
pub fn load_resource_in_root(
    root: &Path,
    resource: &KeyedResource,
) -> WSResult<PathBuf> {
    use crate::errors::WordstockError;

    let name = resource
        .resource
        .urls
        .first()
        .and_then(|url| url.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| WordstockError::ResourceNotFound(format!("{:?}", resource.key)))?;
    let path = root.join(name);
    if !path.exists() {
        return Err(WordstockError::ResourceNotFound(format!(
            "{} (downloads are disabled)",
            path.display()
        )));
    }
    Ok(path)
}
