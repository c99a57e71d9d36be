//! Platform screen-wake resource
//!
//! On systemd hosts the lock is a `systemd-inhibit` process holding an
//! idle/sleep inhibitor for as long as it lives.

use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::error::WakeLockError;

const INHIBIT_TOOL: &str = "systemd-inhibit";

/// A resource that keeps the screen awake while held
pub trait WakeLock: Send {
    /// Take the resource; a no-op when already held
    fn acquire(&mut self) -> Result<(), WakeLockError>;

    /// Give the resource back; a no-op when not held
    fn release(&mut self) -> Result<(), WakeLockError>;

    /// Whether the resource is still held. Turns false if the platform took
    /// it away behind our back.
    fn is_held(&mut self) -> bool;
}

/// Wake lock backed by a child `systemd-inhibit` process
#[derive(Debug)]
pub struct InhibitorLock {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl InhibitorLock {
    /// Inhibit idle and sleep while a run is in progress
    pub fn new() -> Self {
        Self::with_command(
            INHIBIT_TOOL,
            [
                "--what=idle:sleep",
                "--who=interval-timer",
                "--why=Interval timer running",
                "--mode=block",
                "sleep",
                "infinity",
            ],
        )
    }

    /// Hold the lock by running an arbitrary long-lived command
    pub fn with_command<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            child: None,
        }
    }
}

impl Default for InhibitorLock {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeLock for InhibitorLock {
    fn acquire(&mut self) -> Result<(), WakeLockError> {
        if self.is_held() {
            return Ok(());
        }

        debug!("Spawning {} {:?}", self.program, self.args);
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| WakeLockError::Spawn {
                tool: INHIBIT_TOOL,
                source,
            })?;

        self.child = Some(child);
        info!("Wake lock acquired");
        Ok(())
    }

    fn release(&mut self) -> Result<(), WakeLockError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        // Already gone, nothing to kill
        if let Ok(Some(_)) = child.try_wait() {
            return Ok(());
        }

        child.start_kill().map_err(WakeLockError::Release)?;
        info!("Wake lock released");
        Ok(())
    }

    fn is_held(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

/// Wake lock for hosts without an inhibitor, or when the operator opts out
#[derive(Debug, Default)]
pub struct DisabledWakeLock {
    held: bool,
}

impl WakeLock for DisabledWakeLock {
    fn acquire(&mut self) -> Result<(), WakeLockError> {
        self.held = true;
        Ok(())
    }

    fn release(&mut self) -> Result<(), WakeLockError> {
        self.held = false;
        Ok(())
    }

    fn is_held(&mut self) -> bool {
        self.held
    }
}

/// Check if `systemd-inhibit` is available on the system
pub async fn check_inhibitor_available() -> Result<(), WakeLockError> {
    Command::new(INHIBIT_TOOL)
        .arg("--version")
        .output()
        .await
        .map_err(|source| WakeLockError::Spawn {
            tool: INHIBIT_TOOL,
            source,
        })?;

    info!("{} is available", INHIBIT_TOOL);
    Ok(())
}
