use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::fpl_fetch::DataProvider;
use crate::state::{Delta, ProviderCommand};

/// Runs `provider` on a background thread: one snapshot load up front, then
/// one response per command until the command channel closes.
pub fn spawn_provider(
    provider: Box<dyn DataProvider + Send>,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        if send_snapshot(provider.as_ref(), &tx).is_err() {
            return;
        }
        while let Ok(cmd) = cmd_rx.recv() {
            debug!(?cmd, "provider command");
            let sent = match cmd {
                ProviderCommand::Reload => send_snapshot(provider.as_ref(), &tx),
                ProviderCommand::LoadManager(manager_id) => {
                    let _ = tx.send(Delta::Log(format!(
                        "[INFO] Fetching team for manager {manager_id}"
                    )));
                    let picks = provider.fetch_manager_picks(manager_id);
                    tx.send(Delta::SetManagerPicks { manager_id, picks })
                }
            };
            if sent.is_err() {
                break;
            }
        }
        info!("provider thread stopped");
    })
}

fn send_snapshot(
    provider: &(dyn DataProvider + Send),
    tx: &Sender<Delta>,
) -> Result<(), std::sync::mpsc::SendError<Delta>> {
    let _ = tx.send(Delta::Log("[INFO] Fetching FPL data".to_string()));
    tx.send(Delta::SetSnapshot(provider.fetch_snapshot()))
}
