//! Binary entrypoint for the album selector.
//!
//! Roots given on the command line stand in for the folder chooser; an empty
//! selection is treated like a cancelled dialog and does nothing.

use std::io::{self, Write};
use std::path::PathBuf;

use album_selector::album::album_images;
use album_selector::config::Configuration;
use album_selector::events::{SelectorCommand, SelectorEvent};
use album_selector::fs::LocalFs;
use album_selector::index::{AlbumFilter, SortOrder};
use album_selector::tasks;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "album-selector", version, about = "Discover and page through photo albums")]
struct Cli {
    /// Root folders to scan for albums
    #[arg(value_name = "ROOT")]
    roots: Vec<PathBuf>,

    /// Path to YAML config file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sort order, e.g. name-asc or size-desc
    #[arg(long, value_name = "KEY")]
    sort: Option<String>,

    /// Only keep albums whose name contains this text
    #[arg(long, value_name = "TEXT")]
    filter: Option<String>,

    /// Page to show after scanning
    #[arg(long, value_name = "N", default_value_t = 0)]
    page: usize,

    /// Print notifications as JSON lines
    #[arg(long)]
    json: bool,

    /// List the images of one album in slideshow order and exit
    #[arg(long, value_name = "FOLDER", conflicts_with = "roots")]
    open: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("album_selector={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = Configuration::load(cli.config.as_deref())?;

    if let Some(folder) = &cli.open {
        let images = album_images(&LocalFs, folder, &cfg.image_extensions)
            .with_context(|| format!("failed to open album {}", folder.display()))?;
        let mut out = io::stdout().lock();
        for image in images {
            writeln!(out, "{}", image.display())?;
        }
        return Ok(());
    }

    if cli.roots.is_empty() {
        info!("no root folders selected; nothing to do");
        return Ok(());
    }

    let (cmd_tx, cmd_rx) = mpsc::channel::<SelectorCommand>(16);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<SelectorEvent>();
    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let selector = tokio::spawn(tasks::selector::run(cfg, cmd_rx, event_tx, cancel.clone()));

    let json = cli.json;
    let printer = tokio::spawn(async move {
        let mut out = io::stdout();
        while let Some(event) = event_rx.recv().await {
            print_event(&mut out, &event, json)?;
        }
        anyhow::Ok(())
    });

    let mut commands = vec![SelectorCommand::Scan(cli.roots)];
    if let Some(text) = cli.filter {
        commands.push(SelectorCommand::Filter(AlbumFilter::name(text)));
    }
    if let Some(key) = cli.sort.as_deref() {
        commands.push(SelectorCommand::Sort(SortOrder::from_key(key)));
    }
    if cli.page > 0 {
        commands.push(SelectorCommand::LoadPage(cli.page));
    }
    let (reply_tx, reply_rx) = oneshot::channel();
    commands.push(SelectorCommand::PageInfo(reply_tx));

    for cmd in commands {
        if cmd_tx.send(cmd).await.is_err() {
            break;
        }
    }
    drop(cmd_tx);

    if let Ok(info) = reply_rx.await {
        info!(pages = info.count, page = cli.page, "done");
    }
    selector.await.context("selector task panicked")??;
    printer.await.context("printer task panicked")??;
    Ok(())
}

fn print_event(out: &mut impl Write, event: &SelectorEvent, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, event)?;
        writeln!(out)?;
        return Ok(());
    }
    match event {
        SelectorEvent::Album(album) => writeln!(
            out,
            "{:<32} {:>5} images  {}  cover: {}",
            album.name,
            album.count,
            album.folder.display(),
            album.cover.display()
        )?,
        SelectorEvent::PageInfo(info) => writeln!(out, "-- {} page(s)", info.count)?,
        SelectorEvent::Loaded(summary) => writeln!(
            out,
            "-- scanned {} folder(s): {} album(s), {} skipped",
            summary.folders_visited, summary.albums, summary.skipped
        )?,
        SelectorEvent::ScanFailed { message } => writeln!(out, "-- scan failed: {message}")?,
    }
    Ok(())
}
