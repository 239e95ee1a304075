use wordstock::vectors::{FastTextOptions, pretrained::DEFAULT_ROOT};

use crate::{
    commands::lookup::LookupArgs,
    logging::{FETCH_LOG_LEVEL, LogArgs},
};

/// Args for the fasttext command.
#[derive(clap::Args, Debug)]
pub struct FastTextArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Wiki language code.
    #[arg(long, default_value = "en")]
    language: String,

    /// Directory holding (or receiving) the `.vec` file.
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: String,

    /// Expected sha256 of the `.vec` file.
    #[arg(long)]
    hash: Option<String>,

    /// Skip checksum validation.
    #[arg(long)]
    no_validate: bool,

    #[command(flatten)]
    lookup: LookupArgs,
}

impl FastTextArgs {
    /// Run the fasttext command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(FETCH_LOG_LEVEL)?;

        let vectors = FastTextOptions::default()
            .with_language(&self.language)
            .with_root(Some(&self.root))
            .with_hash(self.hash.as_ref())
            .with_validate_file(!self.no_validate)
            .load()?;

        self.lookup.print(&vectors)
    }
}
