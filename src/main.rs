use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use digit_expansion::NumberSource;
use irrational_music::{
    compose_number, list_output_ports, logger, play, MidiPortSink, PerformanceConfig, PortSelector,
    RecordingSink, SmfSink,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "irrational-music")]
#[command(about = "Play the digits of irrational numbers as chords and melodies", long_about = None)]
struct Args {
    /// Key to play in, e.g. C, D#, Bb or F#4 (default: from config, C)
    #[arg(short, long)]
    key: Option<String>,

    /// Number to listen to: pi, e, phi, ln(x), sqrt(x) or a decimal literal
    #[arg(short, long)]
    number: Option<String>,

    /// How many digits after the radix point to play
    #[arg(short, long)]
    digits: Option<usize>,

    /// Base to expand the number in (2-36)
    #[arg(short, long)]
    base: Option<u32>,

    /// Beat length in milliseconds
    #[arg(long)]
    beat_ms: Option<u64>,

    /// Melody notes per digit
    #[arg(long)]
    melody_steps: Option<usize>,

    /// JSON file with playback settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a Standard MIDI File instead of playing live
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// MIDI output port, by index or part of its name (default: first port)
    #[arg(short, long)]
    port: Option<PortSelector>,

    /// List MIDI output ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Print the composed steps instead of playing them
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Run through the performance without any MIDI output
    #[arg(long)]
    dry_run: bool,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,

    /// Show how each chord was chosen
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    if args.list_ports {
        for (idx, name) in list_output_ports()?.iter().enumerate() {
            println!("{}: {}", idx, name);
        }
        return Ok(());
    }

    let config = build_config(&args)?;

    let number = match &args.number {
        Some(number) => number.clone(),
        None => prompt("What number should we listen to? ")?,
    };
    let source: NumberSource = number
        .parse()
        .with_context(|| format!("Cannot listen to '{}'", number))?;

    let count = match args.digits {
        Some(count) => count,
        None => {
            let answer = prompt("And for how many digits? ")?;
            answer
                .parse()
                .with_context(|| format!("'{}' is not a digit count", answer))?
        }
    };

    let performance = compose_number(&source, count, &config)?;

    match args.format {
        Some(Format::Text) => {
            print!("{}", performance);
            return Ok(());
        }
        Some(Format::Json) => {
            let json = serde_json::to_string_pretty(&performance)
                .context("Failed to serialize performance")?;
            println!("{}", json);
            return Ok(());
        }
        None => {}
    }

    if let Some(path) = &args.output {
        let mut sink = SmfSink::new(&config);
        play(&performance, &mut sink, &config)?;
        sink.write(path)?;
        info!("Output saved to {}", path.display());
    } else if args.dry_run {
        let mut sink = RecordingSink::new();
        play(&performance, &mut sink, &config)?;
        info!(
            "Dry run: {} events over {:?}",
            sink.events().len(),
            sink.elapsed()
        );
    } else {
        let mut sink = MidiPortSink::connect(args.port.as_ref(), config.channel)?;
        play(&performance, &mut sink, &config)?;
        sink.close()?;
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn build_config(args: &Args) -> Result<PerformanceConfig> {
    let mut config = match &args.config {
        Some(path) => PerformanceConfig::load(path)?,
        None => PerformanceConfig::default(),
    };

    if let Some(key) = &args.key {
        config.key = key.clone();
    }
    if let Some(base) = args.base {
        config.base = base;
    }
    if let Some(beat_ms) = args.beat_ms {
        config.beat_ms = beat_ms;
    }
    if let Some(steps) = args.melody_steps {
        config.melody_steps = steps;
    }

    config.validate()?;
    Ok(config)
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("No answer given to: {}", question.trim());
    }
    Ok(line.trim().to_string())
}
