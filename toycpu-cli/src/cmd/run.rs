use anyhow::{bail, Context};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};
use toycpu_runtime::{Machine, RunOutcome, RuntimeError, StepOutcome};
use toycpu_spec::{MachineConfig, Register, RegisterWord};

/// Execute a memory image
#[derive(clap::Args)]
pub struct Args {
    /// Memory image file
    image: PathBuf,

    /// Load address; execution starts here
    #[arg(long, default_value_t = 0)]
    base: u32,

    /// Execute one instruction at a time, printing state after each
    #[arg(long)]
    step: bool,

    /// Write a bincode snapshot of the final machine state
    #[arg(long)]
    dump: Option<PathBuf>,

    #[arg(long, default_value_t = MachineConfig::DEFAULT.memory_size)]
    memory_size: u32,

    #[arg(long, default_value_t = MachineConfig::DEFAULT.stack_size)]
    stack_size: u32,

    /// Step guard for each run
    #[arg(long, default_value_t = MachineConfig::DEFAULT.max_steps)]
    max_steps: u64,

    /// Log every executed instruction at debug level
    #[arg(long)]
    trace: bool,
}

impl Args {
    pub fn exec(self) -> anyhow::Result<()> {
        let config = MachineConfig::new(self.memory_size, self.stack_size)
            .context("invalid machine configuration")?
            .with_max_steps(self.max_steps)
            .with_trace(self.trace);

        let words = toycpu_runtime::load_file(&self.image)
            .with_context(|| format!("loading {}", self.image.display()))?;
        let mut machine = Machine::new(config)?;
        machine.load_image(self.base, &words)?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let result = if self.step {
            step_all(&mut machine, &mut input)
        } else {
            run_all(&mut machine, &mut input)
        };

        if let Err(err) = &result {
            if let Some(runtime) = err.downcast_ref::<RuntimeError>() {
                eprintln!("error [{:?}]: {}", runtime.kind(), runtime);
            }
        }

        println!("{}", machine.snapshot());
        if let Some(path) = &self.dump {
            let bytes = machine.snapshot().to_bytes()?;
            fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        }
        result
    }
}

fn run_all(machine: &mut Machine, input: &mut impl BufRead) -> anyhow::Result<()> {
    let mut printed = 0;
    let mut outcome = machine.run_to_halt_or_input();
    loop {
        for value in &machine.outputs()[printed..] {
            println!("OUT: {}", value);
        }
        printed = machine.outputs().len();

        match outcome? {
            RunOutcome::AwaitingInput(register) => {
                let value = prompt(register, input)?;
                outcome = match machine.provide_input(register.index(), value) {
                    Ok(Some(next)) => Ok(next),
                    Ok(None) => machine.run_to_halt_or_input(),
                    Err(err) => Err(err),
                };
            }
            other => {
                println!("stopped: {}", other);
                return Ok(());
            }
        }
    }
}

fn step_all(machine: &mut Machine, input: &mut impl BufRead) -> anyhow::Result<()> {
    let max_steps = machine.config().max_steps;
    for _ in 0..max_steps {
        let cp = machine.get_cp();
        let word = machine.read_memory(cp)?;
        if word == 0 {
            println!("stopped: {}", RunOutcome::Sentinel(cp));
            return Ok(());
        }

        let text = toycpu_disassembler::decode(word)
            .map(|inst| toycpu_disassembler::format(&inst))
            .unwrap_or_else(|_| format!("0x{:08X}", word));

        match machine.step()? {
            StepOutcome::Halted => {
                println!("{:5}: {}", cp, text);
                println!("stopped: {}", RunOutcome::Halted);
                return Ok(());
            }
            StepOutcome::AwaitingInput(register) => {
                let value = prompt(register, input)?;
                machine.provide_input(register.index(), value)?;
                println!("{:5}: {}", cp, text);
            }
            StepOutcome::Output(value) => {
                println!("{:5}: {}", cp, text);
                println!("OUT: {}", value);
            }
            StepOutcome::Literal(value) => println!("{:5}: {}  ; literal {}", cp, text, value),
            StepOutcome::Executed => println!("{:5}: {}", cp, text),
        }
        print_registers(machine)?;
    }
    println!("stopped: {}", RunOutcome::StepLimit(max_steps));
    Ok(())
}

fn print_registers(machine: &Machine) -> anyhow::Result<()> {
    let mut line = String::from("       ");
    for reg in Register::ALL {
        line.push_str(&format!("{}={} ", reg, machine.read_register(reg.index())?));
    }
    line.push_str(&format!("flags={}", machine.state().bank.flag_string()));
    println!("{}", line);
    Ok(())
}

fn prompt(register: Register, input: &mut impl BufRead) -> anyhow::Result<RegisterWord> {
    loop {
        print!("IN {}> ", register);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("end of input while waiting for a value for {}", register);
        }
        match line.trim().parse::<RegisterWord>() {
            Ok(value) => return Ok(value),
            Err(_) => eprintln!("expected a number in -32768..=32767"),
        }
    }
}
