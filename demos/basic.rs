use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use ticklobe::{book::OrderBook, feed, render::Ladder, shared::SharedBook};

fn main() -> eyre::Result<()> {
    let stdin = io::stdin();

    let mut book = SharedBook::new(OrderBook::new("BTCUSDT"));
    let reader = book.reader();
    let (updated, frames) = mpsc::channel::<()>();

    // renderer only ever holds the read-only handle
    let renderer = thread::spawn(move || {
        for () in frames {
            let frame = reader.view(|view| {
                let tick = ticklobe::tick::derive(view);
                Ladder::new(view, tick.as_ref().map_err(|e| *e), 5).to_string()
            });
            println!("{frame}");
        }
    });

    while let Some(Ok(line)) = stdin.lock().lines().next() {
        if line.trim() == "exit" {
            break;
        }

        match feed::decode(&line) {
            Ok(Some(batch)) => {
                let report = book.apply_update(&batch.bids, &batch.asks);
                for rejection in batch.rejected.iter().chain(&report.rejected) {
                    println!("Rejected {rejection}");
                }
                if report.top_changed {
                    updated.send(())?;
                }
            }
            Ok(None) => {}
            Err(e) => println!("Malformed depth JSON: {e:?}"),
        }
    }

    drop(updated);
    renderer
        .join()
        .map_err(|_| eyre::eyre!("renderer thread panicked"))?;

    Ok(())
}
