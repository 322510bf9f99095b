//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::StudyBackend;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Each command runs as its own task so a
/// slow upload never holds up a prompt or quiz request.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    backend: Arc<dyn StudyBackend>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::worker_startup(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ))));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!("backend worker ready");
            let mut tasks = tokio::task::JoinSet::new();
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), seq = cmd.tag().seq, "backend command received");
                // Reap finished tasks so the set tracks in-flight requests.
                while tasks.try_join_next().is_some() {}
                tasks.spawn(run_command(Arc::clone(&backend), ui_tx.clone(), cmd));
            }
            tracing::info!("ui command queue closed; draining in-flight requests");
            while tasks.join_next().await.is_some() {}
        });
    })
}

async fn run_command(backend: Arc<dyn StudyBackend>, ui_tx: Sender<UiEvent>, cmd: BackendCommand) {
    let event = match cmd {
        BackendCommand::UploadDocument { tag, path } => UiEvent::UploadFinished {
            tag,
            result: backend
                .upload_document(&path)
                .await
                .map_err(|err| UiError::from_client_error(UiErrorContext::Upload, &err)),
        },
        BackendCommand::Ask { tag, prompt } => UiEvent::QueryFinished {
            tag,
            result: backend
                .ask(&prompt)
                .await
                .map_err(|err| UiError::from_client_error(UiErrorContext::Query, &err)),
        },
        BackendCommand::GenerateQuiz { tag } => UiEvent::QuizFinished {
            tag,
            result: backend
                .generate_quiz()
                .await
                .map_err(|err| UiError::from_client_error(UiErrorContext::Quiz, &err)),
        },
    };

    deliver(ui_tx, event).await;
}

/// Completions release the loading gate, so they wait for queue space
/// instead of being dropped. The wait runs on the blocking pool so a stalled
/// UI never parks a runtime worker.
async fn deliver(ui_tx: Sender<UiEvent>, event: UiEvent) {
    let sent = match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Disconnected(_)) => false,
        Err(TrySendError::Full(event)) => {
            tracing::debug!("ui event queue full; waiting for the ui to drain");
            tokio::task::spawn_blocking(move || ui_tx.send(event).is_ok())
                .await
                .unwrap_or(false)
        }
    };
    if !sent {
        tracing::debug!("ui event queue closed; dropping backend result");
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, time::Duration};

    use async_trait::async_trait;
    use client_core::{ClientError, ClientResult, Endpoint};
    use crossbeam_channel::bounded;
    use shared::{domain::QuizQuestion, protocol::UploadSummary};

    use super::*;
    use crate::controller::events::UiErrorCategory;
    use crate::controller::reducer::{Operation, RequestTag};

    struct FakeBackend;

    #[async_trait]
    impl StudyBackend for FakeBackend {
        async fn upload_document(&self, path: &Path) -> ClientResult<UploadSummary> {
            Ok(UploadSummary {
                file_name: path.display().to_string(),
                message: "File processed successfully".to_string(),
                splits: 2,
            })
        }

        async fn ask(&self, prompt: &str) -> ClientResult<String> {
            Ok(format!("echo: {prompt}"))
        }

        async fn generate_quiz(&self) -> ClientResult<Vec<QuizQuestion>> {
            Err(ClientError::Status {
                endpoint: Endpoint::Quiz,
                status: 500,
                message: "Server error".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn delivery_waits_for_space_in_a_full_event_queue() {
        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .try_send(UiEvent::Error(UiError::worker_startup("filler")))
            .expect("fill queue");

        let pending = tokio::spawn(deliver(
            ui_tx,
            UiEvent::QueryFinished {
                tag: tag(Operation::Query, 7),
                result: Ok("late".to_string()),
            },
        ));

        assert!(matches!(ui_rx.recv_timeout(Duration::from_secs(5)), Ok(UiEvent::Error(_))));
        pending.await.expect("delivery task");
        match ui_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(UiEvent::QueryFinished { tag, .. }) => assert_eq!(tag.seq, 7),
            _ => panic!("completion was not delivered"),
        }
    }

    fn tag(operation: Operation, seq: u64) -> RequestTag {
        RequestTag { operation, seq }
    }

    #[test]
    fn worker_answers_each_command_with_tagged_event() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let worker = launch(cmd_rx, ui_tx, Arc::new(FakeBackend));

        cmd_tx
            .send(BackendCommand::Ask {
                tag: tag(Operation::Query, 1),
                prompt: "hi".to_string(),
            })
            .expect("queue ask");
        cmd_tx
            .send(BackendCommand::GenerateQuiz {
                tag: tag(Operation::Quiz, 2),
            })
            .expect("queue quiz");
        cmd_tx
            .send(BackendCommand::UploadDocument {
                tag: tag(Operation::Upload, 3),
                path: "notes.pdf".into(),
            })
            .expect("queue upload");

        let mut seen = Vec::new();
        for _ in 0..3 {
            match ui_rx.recv_timeout(Duration::from_secs(5)).expect("event") {
                UiEvent::QueryFinished { tag, result } => {
                    assert_eq!(tag.seq, 1);
                    assert_eq!(result.expect("answer"), "echo: hi");
                    seen.push(Operation::Query);
                }
                UiEvent::QuizFinished { tag, result } => {
                    assert_eq!(tag.seq, 2);
                    let err = result.expect_err("quiz fails");
                    assert_eq!(err.category(), UiErrorCategory::Backend);
                    assert_eq!(err.context(), UiErrorContext::Quiz);
                    assert_eq!(err.message(), "Server error");
                    seen.push(Operation::Quiz);
                }
                UiEvent::UploadFinished { tag, result } => {
                    assert_eq!(tag.seq, 3);
                    assert_eq!(result.expect("upload").splits, 2);
                    seen.push(Operation::Upload);
                }
                _ => panic!("unexpected event"),
            }
        }
        seen.sort();
        assert_eq!(seen, vec![Operation::Upload, Operation::Query, Operation::Quiz]);

        drop(cmd_tx);
        worker.join().expect("worker exits once the command queue closes");
    }
}
