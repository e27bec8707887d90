//! Surface attachment handshake between the host and an editing session.

use std::time::Duration;

use log::debug;
use tokio::sync::watch;

use crate::error::EditorError;

/// Host-side half of the readiness handshake.
///
/// The host calls [`ReadySignal::attach`] once its drawing surface is mounted.
/// Dropping the signal without attaching makes every pending and future load
/// fail with [`EditorError::NotReady`].
#[derive(Debug)]
pub struct ReadySignal {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    pub fn attach(self) {
        // No receiver means the session is gone; nothing left to wake.
        let _ = self.tx.send(true);
        debug!("Editing surface attached");
    }
}

/// Session-side half: resolves once the host has attached.
#[derive(Debug)]
pub(crate) struct Readiness {
    rx: watch::Receiver<bool>,
}

impl Readiness {
    pub(crate) fn pending() -> (Readiness, ReadySignal) {
        let (tx, rx) = watch::channel(false);
        (Readiness { rx }, ReadySignal { tx })
    }

    pub(crate) fn ready() -> Readiness {
        let (tx, rx) = watch::channel(true);
        drop(tx);
        Readiness { rx }
    }

    /// Waits up to `timeout` for the host to attach.
    pub(crate) async fn wait(&mut self, timeout: Duration) -> Result<(), EditorError> {
        if *self.rx.borrow() {
            return Ok(());
        }
        match tokio::time::timeout(timeout, self.rx.wait_for(|attached| *attached)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(_)) => Err(EditorError::NotReady(
                "host dropped the surface signal before attaching".to_string(),
            )),
            Err(_) => Err(EditorError::NotReady(format!(
                "surface not attached within {} ms",
                timeout.as_millis()
            ))),
        }
    }
}
