use std::io::Write;

use wordstock::Vectors;

use crate::input_output::{OutputArgs, write_prefix};

/// Vector lookup argument group.
#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    /// Tokens to look up.
    #[arg(long, num_args = 1.., required = true)]
    lookup: Vec<String>,

    /// Number of leading values to print per vector.
    #[arg(long, default_value = "5")]
    prefix: usize,

    #[command(flatten)]
    output: OutputArgs,
}

impl LookupArgs {
    /// Print `token v0 v1 ...` for each looked-up token.
    pub fn print(
        &self,
        vectors: &Vectors,
    ) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("{} tokens, dim {}", vectors.len(), vectors.dim());

        let mut writer = self.output.open_writer()?;
        for token in &self.lookup {
            if !vectors.contains(token) {
                log::warn!("{token:?} is not in the table; using the unk vector");
            }
            write_prefix(&mut writer, token, vectors.get(token), self.prefix)?;
        }
        writer.flush()?;
        Ok(())
    }
}
