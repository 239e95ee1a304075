use std::io::{BufRead, Write};

use wordstock::sentencepiece::{
    SentencePieceModel,
    load_pretrained_sp_model,
};

use crate::{
    disk_cache::DiskCacheArgs,
    input_output::{InputArgs, OutputArgs},
    logging::{LOCAL_LOG_LEVEL, LogArgs},
};

/// Model source arg group.
#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ModelSourceArgs {
    /// Path to a `.model` file.
    #[arg(long)]
    model: Option<String>,

    /// Name of a pretrained model; see `list-models`.
    #[arg(long)]
    pretrained: Option<String>,
}

/// Args for the spm command.
#[derive(clap::Args, Debug)]
pub struct SpmArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    source: ModelSourceArgs,

    /// Print piece ids instead of pieces.
    #[arg(long)]
    ids: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,
}

impl SpmArgs {
    /// Run the spm command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(LOCAL_LOG_LEVEL)?;

        let model = match (&self.source.model, &self.source.pretrained) {
            (Some(path), _) => SentencePieceModel::from_file(path)?,
            (None, Some(name)) => {
                let mut disk_cache = self.disk_cache.init_disk_cache()?;
                SentencePieceModel::from_file(load_pretrained_sp_model(name, &mut disk_cache)?)?
            }
            (None, None) => return Err("one of --model or --pretrained is required".into()),
        };
        log::info!(
            "{:?} model with {} pieces",
            model.model_type(),
            model.vocab_size()
        );

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;
        run_spm(&mut reader, &mut writer, &model, self.ids)
    }
}

fn run_spm(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    model: &SentencePieceModel,
    ids: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in reader.lines() {
        let line = line?;
        let encoded: Vec<String> = if ids {
            model
                .encode_as_ids(&line)
                .iter()
                .map(u32::to_string)
                .collect()
        } else {
            model.encode_as_pieces(&line)
        };
        writeln!(writer, "{}", encoded.join(" "))?;
        writer.flush()?;
    }
    Ok(())
}
