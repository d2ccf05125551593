use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eyre::WrapErr;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ticklobe::{
    book::{BookView, OrderBook},
    common::Side,
    feed,
    render::Ladder,
    tick,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Top-of-book ladder after every message
    Text,
    /// One JSON tick per line
    Json,
}

/// Maintains an L2 order book from line-delimited depth messages and prints
/// top-of-book after every message
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Symbol to track; messages for other symbols are skipped
    #[arg(short, long, default_value = "BTCUSDT")]
    symbol: String,

    /// File of depth messages, one JSON object per line [default: stdin]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Price levels per side in the ladder
    #[arg(short, long, default_value_t = 10)]
    levels: usize,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .wrap_err_with(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut book = OrderBook::new(args.symbol.clone());
    info!(symbol = %args.symbol, "order book started");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (line_no, line) in input.lines().enumerate() {
        let line = line.wrap_err("reading feed input")?;
        if line.trim().is_empty() {
            continue;
        }

        let batch = match feed::decode(&line) {
            Ok(Some(batch)) => batch,
            Ok(None) => continue,
            Err(error) => {
                warn!(line = line_no + 1, %error, "skipping message");
                continue;
            }
        };

        if let Some(symbol) = batch.symbol.as_deref() {
            if !symbol.eq_ignore_ascii_case(book.symbol()) {
                debug!(%symbol, "skipping message for other symbol");
                continue;
            }
        }

        for rejection in &batch.rejected {
            warn!(line = line_no + 1, %rejection, "dropped level");
        }

        book.apply_update(&batch.bids, &batch.asks);

        let tick = tick::derive(&book)
            .map(|tick| match batch.event_time {
                Some(time) => tick.with_event_time(time),
                None => tick,
            });

        match args.format {
            Format::Text => {
                write!(
                    out,
                    "{}",
                    Ladder::new(&book, tick.as_ref().map_err(|e| *e), args.levels)
                )?;
                writeln!(out)?;
            }
            Format::Json => match &tick {
                Ok(tick) => writeln!(out, "{}", serde_json::to_string(tick)?)?,
                Err(error) => debug!(%error, "no tick"),
            },
        }
    }

    info!(
        bids = book.levels(Side::Bid),
        asks = book.levels(Side::Ask),
        "feed exhausted"
    );

    Ok(())
}
