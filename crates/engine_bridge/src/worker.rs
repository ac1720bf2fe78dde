//! Background task that owns an [`EngineBridge`] and serves move requests
//! identified by ticket.

use std::collections::VecDeque;

use chess_core::{Move, Position};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::bridge::EngineBridge;
use crate::error::EngineError;
use crate::strength::Strength;

/// Identifies one move request. Issued by the caller, echoed in the reply.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub ticket: Ticket,
    pub result: Result<Move, EngineError>,
}

enum Command {
    Request {
        ticket: Ticket,
        position: Position,
        strength: Strength,
    },
    Cancel(Ticket),
    NewGame,
    Shutdown,
}

pub struct BridgeHandle {
    commands: UnboundedSender<Command>,
    replies: UnboundedSender<Reply>,
    worker: JoinHandle<()>,
}

impl BridgeHandle {
    /// Move `bridge` onto a tokio task. Replies arrive on the returned
    /// receiver in completion order. Must be called inside a runtime.
    pub fn spawn(bridge: EngineBridge) -> (BridgeHandle, UnboundedReceiver<Reply>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(bridge, cmd_rx, reply_tx.clone()));
        let handle = BridgeHandle {
            commands: cmd_tx,
            replies: reply_tx,
            worker,
        };
        (handle, reply_rx)
    }

    /// Ask for a move. Never blocks; the answer comes back as a [`Reply`].
    pub fn request(&self, ticket: Ticket, position: Position, strength: Strength) {
        let cmd = Command::Request {
            ticket,
            position,
            strength,
        };
        if self.commands.send(cmd).is_err() {
            let _ = self.replies.send(Reply {
                ticket,
                result: Err(EngineError::Unavailable("engine worker has stopped".into())),
            });
        }
    }

    /// Abandon the request with this ticket. A reply that was already on its
    /// way may still arrive.
    pub fn cancel(&self, ticket: Ticket) {
        let _ = self.commands.send(Command::Cancel(ticket));
    }

    pub fn new_game(&self) {
        let _ = self.commands.send(Command::NewGame);
    }

    /// Stop the worker and the engine behind it.
    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Err(err) = self.worker.await {
            warn!(%err, "engine worker panicked");
        }
    }
}

async fn run(
    mut bridge: EngineBridge,
    mut commands: UnboundedReceiver<Command>,
    replies: UnboundedSender<Reply>,
) {
    let mut backlog: VecDeque<Command> = VecDeque::new();
    loop {
        let cmd = match backlog.pop_front() {
            Some(cmd) => cmd,
            None => match commands.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        match cmd {
            Command::Request {
                ticket,
                position,
                strength,
            } => {
                let mut shutting_down = false;
                let finished = {
                    let search = bridge.request_move(&position, strength);
                    tokio::pin!(search);
                    loop {
                        tokio::select! {
                            result = &mut search => break Some(result),
                            next = commands.recv() => match next {
                                Some(Command::Cancel(t)) if t == ticket => break None,
                                Some(Command::Cancel(t)) => drop_queued(&mut backlog, t),
                                Some(Command::Shutdown) | None => {
                                    shutting_down = true;
                                    break None;
                                }
                                Some(other) => backlog.push_back(other),
                            },
                        }
                    }
                };

                match finished {
                    Some(result) => {
                        debug!(ticket, ok = result.is_ok(), "move request finished");
                        if replies.send(Reply { ticket, result }).is_err() {
                            break;
                        }
                    }
                    None => {
                        debug!(ticket, "move request cancelled");
                        bridge.stop().await;
                    }
                }
                if shutting_down {
                    break;
                }
            }
            Command::Cancel(ticket) => drop_queued(&mut backlog, ticket),
            Command::NewGame => {
                if let Err(err) = bridge.new_game().await {
                    warn!(%err, "engine failed to start a new game");
                }
            }
            Command::Shutdown => break,
        }
    }
    bridge.shutdown().await;
}

fn drop_queued(backlog: &mut VecDeque<Command>, ticket: Ticket) {
    backlog.retain(|c| !matches!(c, Command::Request { ticket: t, .. } if *t == ticket));
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
