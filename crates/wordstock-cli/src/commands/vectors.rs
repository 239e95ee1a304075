use wordstock::{
    concurrency::est_max_parallelism,
    vectors::{VectorsLoadOptions, load_vectors_from_file_path},
};

use crate::{
    commands::lookup::LookupArgs,
    logging::{LOCAL_LOG_LEVEL, LogArgs},
};

/// Args for the vectors command.
#[derive(clap::Args, Debug)]
pub struct VectorsArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Input table: `token<d>v1<d>v2...` per line.
    #[arg(long)]
    file: String,

    /// Field delimiter.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Number of chunks to parse in parallel.
    #[arg(long, default_value_t = est_max_parallelism())]
    num_cpus: usize,

    #[command(flatten)]
    lookup: LookupArgs,
}

impl VectorsArgs {
    /// Run the vectors command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(LOCAL_LOG_LEVEL)?;

        let report = load_vectors_from_file_path(
            &self.file,
            VectorsLoadOptions::default()
                .with_delimiter(self.delimiter)
                .with_num_cpus(self.num_cpus),
        )?;
        if !report.duplicate_tokens.is_empty() {
            log::warn!(
                "{} duplicate tokens kept their first vector: {:?}",
                report.duplicate_tokens.len(),
                report.duplicate_tokens
            );
        }
        if report.skipped_lines > 0 {
            log::warn!("{} malformed lines skipped", report.skipped_lines);
        }

        self.lookup.print(&report.vectors)
    }
}
