//! Tokio task that serializes engine commands and forwards notifications.

use anyhow::Result;
use tokio::sync::mpsc::{Receiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::album::Album;
use crate::config::Configuration;
use crate::error::Error;
use crate::events::{SelectorCommand, SelectorEvent};
use crate::selector::{AlbumListener, AlbumSelectionEngine, PageInfo};

/// Forwards engine notifications onto an event channel.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: UnboundedSender<SelectorEvent>,
}

impl ChannelListener {
    pub fn new(tx: UnboundedSender<SelectorEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: SelectorEvent) {
        if self.tx.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }
}

impl AlbumListener for ChannelListener {
    fn on_album(&mut self, album: &Album) {
        self.send(SelectorEvent::Album(album.clone()));
    }

    fn on_page_info(&mut self, info: PageInfo) {
        self.send(SelectorEvent::PageInfo(info));
    }
}

/// Owns one engine and applies commands strictly in arrival order.
///
/// A command only starts after the previous one has finished, so a second
/// scan never mixes its albums into the first one's notifications.
#[instrument(skip_all, fields(page_size = cfg.page_size.get()))]
pub async fn run(
    cfg: Configuration,
    mut commands: Receiver<SelectorCommand>,
    events: UnboundedSender<SelectorEvent>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut engine = AlbumSelectionEngine::from_config(&cfg, ChannelListener::new(events));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("cancel received; exiting selector task");
                break;
            }

            maybe_cmd = commands.recv() => match maybe_cmd {
                Some(cmd) => handle(&mut engine, cmd),
                None => {
                    debug!("command channel closed; exiting selector task");
                    break;
                }
            }
        }
    }
    Ok(())
}

fn handle(engine: &mut AlbumSelectionEngine<ChannelListener>, cmd: SelectorCommand) {
    debug!(?cmd, "command");
    match cmd {
        SelectorCommand::Scan(roots) => match engine.scan(&roots) {
            Ok(summary) => engine.listener().send(SelectorEvent::Loaded(summary)),
            Err(Error::NothingToLoad) => {}
            Err(err) => {
                error!(error = %err, "scan failed");
                engine.listener().send(SelectorEvent::ScanFailed {
                    message: err.to_string(),
                });
            }
        },
        SelectorCommand::Filter(filter) => engine.filter(&filter),
        SelectorCommand::Sort(order) => engine.sort(order),
        SelectorCommand::LoadPage(page) => engine.load_page(page),
        SelectorCommand::PageInfo(reply) => {
            let _ = reply.send(engine.page_info());
        }
    }
}
