//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    QueueFull,
    Disconnected,
}

impl DispatchError {
    pub fn user_message(self) -> &'static str {
        match self {
            Self::QueueFull => "UI command queue is full; please retry",
            Self::Disconnected => {
                "Backend worker disconnected (possible startup/runtime failure); restart the app"
            }
        }
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), DispatchError> {
    let cmd_name = cmd.name();
    let seq = cmd.tag().seq;

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, seq, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, seq, "ui->backend command queue full");
            Err(DispatchError::QueueFull)
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, seq, "backend command processor disconnected");
            Err(DispatchError::Disconnected)
        }
    }
}
