use cuetime::{micros_to_timecode, Parser};

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;

fn main() {
    pretty_env_logger::init();
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Print the event timeline of an SRT subtitle file")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the subtitles will be read from standard input.",
        default_value = "-"
    )]
    input: String,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let data = if cli.input == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    let parser = Parser::new();
    let subtitle = parser
        .parse(&data)
        .context(format!("Failed to parse SRT file: '{}'", cli.input))?;

    for index in 0..subtitle.event_time_count() {
        let time = subtitle.event_time(index);
        let cues = subtitle.cues_at(time);
        println!("{}  ({} active)", micros_to_timecode(time), cues.len());
        for cue in cues {
            for line in cue.text.lines() {
                println!("    {}", line);
            }
        }
    }

    Ok(())
}
