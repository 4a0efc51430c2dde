use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use intcode::robot::{self, Color};
use intcode::{Machine, program, scaffold};

/// Intcode virtual machine driving the hull painting robot or the scaffold
/// vacuum robot.
#[derive(FromArgs)]
struct Arguments {
    /// program listing to run, defaults to `input.txt`
    #[argh(option, short = 'i', default = "PathBuf::from(\"input.txt\")")]
    input: PathBuf,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Paint(PaintArgs),
    Scaffold(ScaffoldArgs),
}

/// Paint the hull: `1` counts painted panels, `2` draws the registration.
#[derive(FromArgs)]
#[argh(subcommand, name = "paint")]
struct PaintArgs {
    /// puzzle part, `1` or `2`
    #[argh(positional)]
    part: Part,
}

/// Survey the scaffold: `1` sums alignment parameters, `2` collects dust.
#[derive(FromArgs)]
#[argh(subcommand, name = "scaffold")]
struct ScaffoldArgs {
    /// puzzle part, `1` or `2`
    #[argh(positional)]
    part: Part,

    /// accept the continuous video feed in part 2
    #[argh(switch)]
    video: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    One,
    Two,
}

impl FromStr for Part {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Part::One),
            "2" => Ok(Part::Two),
            other => Err(format!("invalid part `{other}`, expected 1 or 2")),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args: Arguments = argh::from_env();

    let machine = Machine::new(program::load(&args.input)?);

    match args.command {
        Command::Paint(PaintArgs { part: Part::One }) => {
            let robot = robot::paint(machine, Color::Black)?;
            println!("{}", robot.painted());
        }
        Command::Paint(PaintArgs { part: Part::Two }) => {
            let robot = robot::paint(machine, Color::White)?;
            print!("{}", robot.render());
        }
        Command::Scaffold(ScaffoldArgs { part: Part::One, .. }) => {
            println!("{}", scaffold::alignment(machine)?);
        }
        Command::Scaffold(ScaffoldArgs { part: Part::Two, video }) => {
            let rescue = scaffold::rescue(machine, video)?;
            for line in rescue.routines.lines() {
                tracing::info!(%line, "routine");
            }
            println!("{}", rescue.dust);
        }
    }

    Ok(())
}
