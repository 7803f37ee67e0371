// DigestiGo terminal driver
// Reads one note per line from stdin and prints DigestiBot's reply and log card.

use anyhow::Context;
use digestigo_core::brain::{DigestiBot, ResponseResult};
use digestigo_core::config::{AppConfig, LogFormat};
use digestigo_core::journal::Journal;
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn print_response(out: &mut impl Write, response: &ResponseResult, json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(response)?)?;
        return Ok(());
    }

    writeln!(out, "🤖 {}", response.text)?;
    if let Some(card) = &response.card {
        writeln!(out, "   ┌ {} (Logged)", card.title)?;
        for (label, value) in card.data.iter() {
            writeln!(out, "   │ {:<14} {}", label, value)?;
        }
        writeln!(out, "   └")?;
    }
    Ok(())
}

fn print_history(out: &mut impl Write, journal: &Journal) -> anyhow::Result<()> {
    if journal.is_empty() {
        writeln!(out, "No log entries yet. Start chatting to log data!")?;
        return Ok(());
    }
    for entry in journal.entries() {
        writeln!(
            out,
            "{}  [{}] {}  {}",
            entry.time_label(),
            entry.card.card_type,
            entry.card.title,
            entry.details()
        )?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to read configuration")?;
    init_tracing(config.log_format);

    let bot = DigestiBot::from_config(&config).context("Failed to build DigestiBot")?;
    info!(
        vocabulary = ?config.vocabulary_path,
        seeded = config.rng_seed.is_some(),
        "DigestiBot ready"
    );

    let mut journal = Journal::new();
    let mut json = false;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    print_response(&mut out, &bot.generate_response("hello"), json)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let text = line.trim();

        match text {
            "" => continue,
            ":quit" | ":q" => break,
            ":history" => print_history(&mut out, &journal)?,
            ":json" => {
                json = !json;
                writeln!(out, "JSON output {}", if json { "on" } else { "off" })?;
            }
            _ => {
                let response = bot.generate_response(text);
                journal.record(text, &response);
                print_response(&mut out, &response, json)?;
            }
        }
        out.flush()?;
    }

    info!(entries = journal.len(), "Session ended");
    Ok(())
}
