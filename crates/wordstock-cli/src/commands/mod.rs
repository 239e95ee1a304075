use crate::commands::{
    fasttext::FastTextArgs,
    glove::GloVeArgs,
    list_models::ListModelsArgs,
    spm::SpmArgs,
    vectors::VectorsArgs,
    vocab::VocabArgs,
};

pub mod fasttext;
pub mod glove;
pub mod list_models;
pub mod lookup;
pub mod spm;
pub mod vectors;
pub mod vocab;

/// Subcommands for wstock.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build or load a vocab; print it, or look tokens up.
    Vocab(VocabArgs),

    /// Load a delimited vector table and look tokens up.
    Vectors(VectorsArgs),

    /// Fetch GloVe vectors and look tokens up.
    Glove(GloVeArgs),

    /// Fetch FastText wiki vectors and look tokens up.
    Fasttext(FastTextArgs),

    /// Act as a streaming sentencepiece tokenizer.
    Spm(SpmArgs),

    /// List pretrained models and vector files.
    ListModels(ListModelsArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Vocab(cmd) => cmd.run(),
            Commands::Vectors(cmd) => cmd.run(),
            Commands::Glove(cmd) => cmd.run(),
            Commands::Fasttext(cmd) => cmd.run(),
            Commands::Spm(cmd) => cmd.run(),
            Commands::ListModels(cmd) => cmd.run(),
        }
    }
}
