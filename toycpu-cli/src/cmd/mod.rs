use clap::Parser;

mod asm;
mod disasm;
mod run;

#[derive(Parser)]
#[command(name = "toycpu", version, about = "Toy CPU toolchain")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log state transitions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

impl Cli {
    pub fn exec(self) -> anyhow::Result<()> {
        self.cmd.exec()
    }
}

#[derive(clap::Subcommand)]
pub enum Cmd {
    /// Assemble source into a memory image
    Asm(asm::Args),
    /// Disassemble a memory image
    Disasm(disasm::Args),
    /// Execute a memory image
    Run(run::Args),
}

impl Cmd {
    pub fn exec(self) -> anyhow::Result<()> {
        match self {
            Cmd::Asm(args) => args.exec(),
            Cmd::Disasm(args) => args.exec(),
            Cmd::Run(args) => args.exec(),
        }
    }
}
