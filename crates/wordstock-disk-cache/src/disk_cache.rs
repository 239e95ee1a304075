//! # Wordstock Disk Cache

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use downloader::{Download, Downloader};

use crate::{WORDSTOCK_CACHE_CONFIG, checksum, path_utils};

/// Options for [`WordstockDiskCache`].
#[derive(Clone, Default, Debug)]
pub struct WordstockDiskCacheOptions {
    /// Optional path to the cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Optional path to the data directory.
    pub data_dir: Option<PathBuf>,

    /// Optional [`Downloader`] builder.
    pub downloader: Option<fn() -> anyhow::Result<Downloader>>,
}

impl WordstockDiskCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(
        mut self,
        data_dir: Option<P>,
    ) -> Self {
        self.data_dir = data_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the downloader builder.
    pub fn with_downloader(
        mut self,
        downloader: Option<fn() -> anyhow::Result<Downloader>>,
    ) -> Self {
        self.downloader = downloader;
        self
    }
}

/// Disk cache for downloaded files.
///
/// Leverages [`Downloader`] for downloading files,
/// and [`PathResolver`](`crate::path_resolver::PathResolver`) for resolving cache and data paths
/// appropriate for a user/system combo, and any environment overrides.
///
/// The [`Downloader`] is only constructed when a file is actually missing.
pub struct WordstockDiskCache {
    cache_dir: PathBuf,
    data_dir: PathBuf,
    downloader_builder: Option<fn() -> anyhow::Result<Downloader>>,
    downloader: Option<Downloader>,
}

impl WordstockDiskCache {
    /// Construct a new [`WordstockDiskCache`].
    pub fn new(options: WordstockDiskCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = WORDSTOCK_CACHE_CONFIG
            .resolve_cache_dir(options.cache_dir)
            .context("failed to resolve cache directory")?;

        let data_dir = WORDSTOCK_CACHE_CONFIG
            .resolve_data_dir(options.data_dir)
            .context("failed to resolve data directory")?;

        Ok(Self {
            cache_dir,
            data_dir,
            downloader_builder: options.downloader,
            downloader: None,
        })
    }

    /// Construct a cache rooted at `root`; used for both cache and data.
    pub fn with_root<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref();
        Self::new(
            WordstockDiskCacheOptions::default()
                .with_cache_dir(Some(root))
                .with_data_dir(Some(root)),
        )
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn downloader(&mut self) -> anyhow::Result<&mut Downloader> {
        if self.downloader.is_none() {
            let downloader = match self.downloader_builder {
                Some(builder) => builder()?,
                None => Downloader::builder().build()?,
            };
            self.downloader = Some(downloader);
        }
        self.downloader
            .as_mut()
            .context("downloader was not initialized")
    }

    /// Get the cache path for the given key.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    ///
    /// # Arguments
    /// * `context` - prefix dirs, inserted between `self.cache_dir` and `file`.
    /// * `file` - the final file name.
    pub fn cache_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        path_utils::extend_path(&self.cache_dir, context, file)
    }

    /// Loads a cached file, downloading it if it does not exist.
    ///
    /// The file name is taken from the first URL; the remaining URLs are
    /// treated as mirrors.
    ///
    /// # Arguments
    /// * `context` - prefix dirs between the cache dir and the file.
    /// * `urls` - the mirror list for the file.
    /// * `download` - whether a missing file may be downloaded.
    /// * `hash` - optional sha256 hex digest; checked on every load.
    ///
    /// # Errors
    /// * The cached file does not exist and `download` is `false`.
    /// * The download fails.
    /// * The file does not match `hash`.
    pub fn load_cached_path<C, S>(
        &mut self,
        context: &[C],
        urls: &[S],
        download: bool,
        hash: Option<&str>,
    ) -> anyhow::Result<PathBuf>
    where
        C: AsRef<Path>,
        S: AsRef<str>,
    {
        let urls: Vec<&str> = urls.iter().map(|s| s.as_ref()).collect();
        let first = urls.first().context("no urls provided")?;
        let file_name = path_utils::url_file_name(first)
            .with_context(|| format!("url has no file name: {first}"))?;
        let path = self.cache_path(context, file_name);

        if !path.exists() {
            if !download {
                anyhow::bail!("cached file not found: {}", path.display());
            }

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            log::info!("downloading {first} to {}", path.display());
            let mut dl = Download::new_mirrored(&urls);
            dl.file_name = path.clone();

            let results = self.downloader()?.download(&[dl])?;
            for result in results {
                result.map_err(|e| anyhow::anyhow!("download of {first} failed: {e}"))?;
            }
        } else {
            log::debug!("using cached file {}", path.display());
        }

        if let Some(hash) = hash {
            checksum::verify_sha256(&path, hash)?;
        }

        Ok(path)
    }
}
