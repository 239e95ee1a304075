use wordstock::vectors::{GloVeOptions, pretrained::DEFAULT_ROOT};

use crate::{
    commands::lookup::LookupArgs,
    logging::{FETCH_LOG_LEVEL, LogArgs},
};

/// Args for the glove command.
#[derive(clap::Args, Debug)]
pub struct GloVeArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Dataset name: 42B, 840B, twitter.27B or 6B.
    #[arg(long, default_value = "840B")]
    name: String,

    /// Vector dimension.
    #[arg(long, default_value = "300")]
    dim: usize,

    /// Directory holding (or receiving) the archive.
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: String,

    /// Expected sha256 of the archive.
    #[arg(long)]
    hash: Option<String>,

    /// Skip checksum validation.
    #[arg(long)]
    no_validate: bool,

    #[command(flatten)]
    lookup: LookupArgs,
}

impl GloVeArgs {
    /// Run the glove command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(FETCH_LOG_LEVEL)?;

        let vectors = GloVeOptions::default()
            .with_name(&self.name)
            .with_dim(self.dim)
            .with_root(Some(&self.root))
            .with_hash(self.hash.as_ref())
            .with_validate_file(!self.no_validate)
            .load()?;

        self.lookup.print(&vectors)
    }
}
