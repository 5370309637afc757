use anyhow::{Context, Result};
use nowplaying_media_session::{query_system, NowPlaying, QueryOptions};
use std::io::{self, BufWriter, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging on stderr; stdout only ever carries the JSON document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Rust strings are UTF-8, so stdout needs no re-encoding; take the handle
    // up front and write to it exactly once
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let options = QueryOptions::default();
    tracing::debug!("Querying media session (timeout {:?})", options.timeout);

    let now_playing = query_system(&options)
        .await
        .context("failed to query the current media session")?;

    write_document(&mut out, &now_playing)?;

    Ok(())
}

/// Write `now_playing` as a single JSON line
fn write_document<W: Write>(out: &mut W, now_playing: &NowPlaying) -> Result<()> {
    let json = now_playing
        .to_json()
        .context("failed to encode now playing document")?;
    tracing::debug!("Now playing: {}", json);

    writeln!(out, "{}", json).context("failed to write to stdout")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}
