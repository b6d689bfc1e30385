use anyhow::Context;
use std::path::PathBuf;

/// Print an address-annotated listing of a memory image
#[derive(clap::Args)]
pub struct Args {
    /// Memory image file
    image: PathBuf,

    /// Address of the first word
    #[arg(long, default_value_t = 0)]
    base: u32,
}

impl Args {
    pub fn exec(self) -> anyhow::Result<()> {
        let words = toycpu_runtime::load_file(&self.image)
            .with_context(|| format!("loading {}", self.image.display()))?;
        print!("{}", toycpu_disassembler::disassemble(&words, self.base));
        Ok(())
    }
}
