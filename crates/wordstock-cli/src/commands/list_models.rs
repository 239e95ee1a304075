use wordstock::{
    sentencepiece::PRETRAINED_SP_MODEL,
    vectors::pretrained::{FASTTEXT_URL_PATTERN, GLOVE_FILES, GLOVE_URLS},
};

/// Args for the model listing command.
#[derive(clap::Args, Debug)]
pub struct ListModelsArgs {}

impl ListModelsArgs {
    /// Run the model listing command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("\"sentencepiece\" - pretrained sentencepiece models");
        for (name, model) in PRETRAINED_SP_MODEL {
            println!("  * \"{name}\"");
            for url in model.urls {
                println!("    {url}");
            }
        }

        println!("\"glove\" - GloVe vector archives");
        for (name, archive) in GLOVE_URLS {
            println!("  * \"{name}\"");
            for url in archive.urls {
                println!("    {url}");
            }
            let prefix = format!("glove.{name}.");
            for file in GLOVE_FILES.iter().filter(|f| f.starts_with(&prefix)) {
                println!("    - {file}");
            }
        }

        println!("\"fasttext\" - FastText wiki vectors");
        println!("    {FASTTEXT_URL_PATTERN}");

        Ok(())
    }
}
