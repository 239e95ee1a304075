use std::io::Write;

use wordstock::{
    concurrency::est_max_parallelism,
    transforms::basic_english_normalize,
    vocab::{VocabOptions, build_vocab_from_text_file, load_vocab_from_file},
};

use crate::{
    input_output::OutputArgs,
    logging::{LOCAL_LOG_LEVEL, LogArgs},
};

/// Args for the vocab command.
#[derive(clap::Args, Debug)]
pub struct VocabArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Input file.
    #[arg(long)]
    file: String,

    /// Treat the file as raw text, tokenized with `basic_english_normalize`,
    /// instead of one token per line.
    #[arg(long)]
    raw: bool,

    /// Minimum token frequency.
    #[arg(long, default_value = "1")]
    min_freq: usize,

    /// Number of chunks to count in parallel.
    #[arg(long, default_value_t = est_max_parallelism())]
    num_cpus: usize,

    /// Special tokens to add.
    #[arg(long, num_args = 1..)]
    specials: Vec<String>,

    /// Place specials after the counted tokens.
    #[arg(long)]
    specials_last: bool,

    /// Token whose index is returned for unknown tokens.
    #[arg(long)]
    default_token: Option<String>,

    /// Print the indices of these tokens instead of the vocab.
    #[arg(long, num_args = 1..)]
    lookup: Vec<String>,

    #[command(flatten)]
    output: OutputArgs,
}

impl VocabArgs {
    /// Run the vocab command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(LOCAL_LOG_LEVEL)?;

        let options = VocabOptions::default()
            .with_min_freq(self.min_freq)
            .with_num_cpus(self.num_cpus)
            .with_specials(self.specials.iter().cloned())
            .with_special_first(!self.specials_last)
            .with_default_token(self.default_token.as_ref());

        let vocab = if self.raw {
            build_vocab_from_text_file(&self.file, &basic_english_normalize(), options)?
        } else {
            load_vocab_from_file(&self.file, options)?
        };
        log::info!("{}: {} tokens", self.file, vocab.len());

        let mut writer = self.output.open_writer()?;
        if self.lookup.is_empty() {
            for (idx, token) in vocab.get_itos().iter().enumerate() {
                writeln!(writer, "{idx}\t{token}")?;
            }
        } else {
            let indices = vocab.lookup_indices(&self.lookup)?;
            let line: Vec<String> = indices.iter().map(usize::to_string).collect();
            writeln!(writer, "{}", line.join(" "))?;
        }
        writer.flush()?;
        Ok(())
    }
}
