//! External engine process spoken to over UCI.
//!
//! The process is started lazily on the first request and restarted on the
//! next request after any I/O failure or timeout.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use chess_core::Position;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::{timeout, Instant};
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::protocol::{GoLimit, UciCommand, UciOutputKind};
use crate::source::MoveSource;
use crate::strength::StrengthProfile;

pub struct UciEngine {
    config: EngineConfig,
    name: String,
    process: Option<EngineProcess>,
}

struct EngineProcess {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
    /// Profile whose options were last sent with `setoption`.
    applied: Option<StrengthProfile>,
    /// A `go` was sent and its `bestmove` not yet read.
    searching: bool,
}

impl UciEngine {
    pub fn new(config: EngineConfig) -> Self {
        let name = config
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.path.display().to_string());
        UciEngine {
            config,
            name,
            process: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.process.is_some()
    }

    /// Spawn the engine and complete the handshake if not already done.
    pub async fn start(&mut self) -> Result<(), EngineError> {
        self.ensure_started().await.map(|_| ())
    }

    async fn ensure_started(&mut self) -> Result<&mut EngineProcess, EngineError> {
        let proc = match self.process.take() {
            Some(proc) => proc,
            None => {
                let (proc, id_name) = EngineProcess::spawn(&self.config).await?;
                if let Some(id_name) = id_name {
                    self.name = id_name;
                }
                info!(engine = %self.name, "engine ready");
                proc
            }
        };
        Ok(self.process.insert(proc))
    }

    async fn search(
        &mut self,
        position: &Position,
        profile: &StrengthProfile,
    ) -> Result<String, EngineError> {
        let handshake = self.config.handshake_timeout();
        let limit = GoLimit::from_profile(profile);
        let move_timeout = self.config.move_timeout(limit);
        let proc = self.ensure_started().await?;

        if proc.applied.as_ref() != Some(profile) {
            for (name, value) in &profile.options {
                proc.send(&UciCommand::SetOption {
                    name: name.clone(),
                    value: value.clone(),
                })
                .await?;
            }
            proc.sync(handshake).await?;
            proc.applied = Some(profile.clone());
        }

        proc.send(&UciCommand::Position {
            fen: position.to_fen(),
            moves: Vec::new(),
        })
        .await?;
        // Set before sending: once `go` is written a `bestmove` is owed even
        // if this future is dropped mid-flush.
        proc.searching = true;
        proc.send(&UciCommand::Go(limit)).await?;

        let text = proc.read_best_move(move_timeout).await?;
        proc.searching = false;
        Ok(text)
    }

    async fn discard_process(&mut self) {
        if let Some(mut proc) = self.process.take() {
            let _ = proc.child.start_kill();
            let _ = proc.child.wait().await;
        }
    }
}

#[async_trait]
impl MoveSource for UciEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn best_move(
        &mut self,
        position: &Position,
        profile: &StrengthProfile,
    ) -> Result<String, EngineError> {
        let result = self.search(position, profile).await;
        if let Err(EngineError::Unavailable(reason)) = &result {
            warn!(engine = %self.name, %reason, "dropping engine process");
            self.discard_process().await;
        }
        result
    }

    async fn stop(&mut self) {
        let handshake = self.config.handshake_timeout();
        let Some(proc) = self.process.as_mut() else {
            return;
        };
        if !proc.searching {
            return;
        }
        let stopped = async {
            proc.send(&UciCommand::Stop).await?;
            // The answer to the abandoned search is discarded.
            proc.read_best_move(handshake).await?;
            proc.searching = false;
            Ok::<_, EngineError>(())
        }
        .await;
        if let Err(err) = stopped {
            warn!(engine = %self.name, %err, "engine did not stop cleanly");
            self.discard_process().await;
        }
    }

    async fn new_game(&mut self) -> Result<(), EngineError> {
        let handshake = self.config.handshake_timeout();
        let Some(proc) = self.process.as_mut() else {
            // A fresh process starts with `ucinewgame` anyway.
            return Ok(());
        };
        let result = async {
            proc.send(&UciCommand::UciNewGame).await?;
            proc.sync(handshake).await
        }
        .await;
        if result.is_err() {
            self.discard_process().await;
        }
        result
    }

    async fn shutdown(&mut self) {
        let Some(mut proc) = self.process.take() else {
            return;
        };
        if proc.searching {
            let _ = proc.send(&UciCommand::Stop).await;
        }
        let _ = proc.send(&UciCommand::Quit).await;
        match timeout(Duration::from_secs(1), proc.child.wait()).await {
            Ok(_) => debug!(engine = %self.name, "engine exited"),
            Err(_) => {
                warn!(engine = %self.name, "engine ignored quit, killing it");
                let _ = proc.child.start_kill();
                let _ = proc.child.wait().await;
            }
        }
    }
}

impl EngineProcess {
    /// Start the executable and run `uci` / `isready` / `ucinewgame`.
    /// Returns the engine's `id name`, if it sent one.
    async fn spawn(config: &EngineConfig) -> Result<(EngineProcess, Option<String>), EngineError> {
        debug!(path = %config.path.display(), args = ?config.args, "spawning engine");
        let mut child = Command::new(&config.path)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                EngineError::io(&format!("failed to start {}", config.path.display()), e)
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::Unavailable("engine stdin not captured".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Unavailable("engine stdout not captured".into()))?;

        let mut proc = EngineProcess {
            child,
            stdin,
            lines: BufReader::new(stdout).lines(),
            applied: None,
            searching: false,
        };

        let handshake = config.handshake_timeout();
        proc.send(&UciCommand::Uci).await?;
        let mut id_name = None;
        proc.read_until(handshake, |kind| match kind {
            UciOutputKind::Id(rest) => {
                if let Some(name) = rest.strip_prefix("name ") {
                    id_name = Some(name.trim().to_string());
                }
                None
            }
            UciOutputKind::UciOk => Some(()),
            _ => None,
        })
        .await?;
        proc.send(&UciCommand::UciNewGame).await?;
        proc.sync(handshake).await?;

        Ok((proc, id_name))
    }

    async fn send(&mut self, cmd: &UciCommand) -> Result<(), EngineError> {
        let line = cmd.to_uci_string();
        trace!(target: "uci", "> {line}");
        self.stdin
            .write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(|e| EngineError::io("write to engine", e))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| EngineError::io("flush engine stdin", e))
    }

    /// `isready` followed by waiting for `readyok`.
    async fn sync(&mut self, limit: Duration) -> Result<(), EngineError> {
        self.send(&UciCommand::IsReady).await?;
        self.read_until(limit, |kind| (kind == UciOutputKind::ReadyOk).then_some(()))
            .await
    }

    async fn read_best_move(&mut self, limit: Duration) -> Result<String, EngineError> {
        self.read_until(limit, |kind| match kind {
            UciOutputKind::BestMove(mv) => Some(mv),
            _ => None,
        })
        .await
    }

    /// Read lines until `pick` accepts one, or fail once `limit` has elapsed.
    async fn read_until<T>(
        &mut self,
        limit: Duration,
        mut pick: impl FnMut(UciOutputKind) -> Option<T>,
    ) -> Result<T, EngineError> {
        let deadline = Instant::now() + limit;
        loop {
            let next = tokio::time::timeout_at(deadline, self.lines.next_line())
                .await
                .map_err(|_| EngineError::Unavailable(format!("no answer within {limit:?}")))?;
            let line = match next {
                Ok(Some(line)) => line,
                Ok(None) => return Err(EngineError::Unavailable("engine closed its output".into())),
                Err(e) => return Err(EngineError::io("read from engine", e)),
            };
            trace!(target: "uci", "< {line}");
            if let Some(found) = pick(UciOutputKind::parse(&line)) {
                return Ok(found);
            }
        }
    }
}
