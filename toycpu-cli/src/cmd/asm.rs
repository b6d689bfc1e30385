use anyhow::Context;
use std::{fs, path::PathBuf};

/// Assemble source into a bit-string memory image
#[derive(clap::Args)]
pub struct Args {
    /// Assembly source file
    source: PathBuf,

    /// Output image file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Address of the first word
    #[arg(long, default_value_t = 0)]
    base: u32,
}

impl Args {
    pub fn exec(self) -> anyhow::Result<()> {
        let source = fs::read_to_string(&self.source)
            .with_context(|| format!("reading {}", self.source.display()))?;
        let assembly = toycpu_assembler::assemble_at(&source, self.base)
            .with_context(|| format!("assembling {}", self.source.display()))?;
        tracing::debug!(words = assembly.words.len(), labels = assembly.labels.len(), "assembled");

        let image = assembly.to_image_text();
        match self.output {
            Some(path) => fs::write(&path, image)
                .with_context(|| format!("writing {}", path.display()))?,
            None => print!("{}", image),
        }
        Ok(())
    }
}
