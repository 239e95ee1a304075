use wordstock::disk_cache::{WordstockDiskCache, WordstockDiskCacheOptions};

/// Disk cache argument group.
#[derive(clap::Args, Debug)]
pub struct DiskCacheArgs {
    /// Cache directory; overrides `WORDSTOCK_CACHE_DIR`.
    #[arg(long, default_value = None)]
    cache_dir: Option<String>,
}

impl DiskCacheArgs {
    /// Initialize the disk cache.
    pub fn init_disk_cache(&self) -> Result<WordstockDiskCache, Box<dyn std::error::Error>> {
        let options = WordstockDiskCacheOptions::default().with_cache_dir(self.cache_dir.as_ref());
        Ok(WordstockDiskCache::new(options)?)
    }
}
