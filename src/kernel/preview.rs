//! Debounced, generation-tagged preview build pipeline.
//!
//! File changes arm a deadline (`schedule`); every new change pushes it back.
//! When `poll` sees the deadline pass, a new generation starts and the caller
//! runs the compiler. A result is applied only while the pipeline is still
//! `Building` that same generation, so a slow superseded build can never
//! overwrite a newer one.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::services::ports::{CompileResult, PreviewArtifact, PreviewError, Severity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BuildState {
    Idle,
    Building {
        generation: u64,
    },
    Success {
        artifact: PreviewArtifact,
        generation: u64,
    },
    Failed {
        errors: Vec<PreviewError>,
        generation: u64,
    },
}

impl BuildState {
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Building { generation }
            | Self::Success { generation, .. }
            | Self::Failed { generation, .. } => Some(*generation),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Building { .. } => "building",
            Self::Success { .. } => "success",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug)]
pub struct BuildPipeline {
    state: BuildState,
    debounce: Duration,
    deadline: Option<Instant>,
    generation: u64,
    last_good: Option<(PreviewArtifact, u64)>,
    device: DeviceType,
}

impl BuildPipeline {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: BuildState::Idle,
            debounce,
            deadline: None,
            generation: 0,
            last_good: None,
            device: DeviceType::default(),
        }
    }

    pub fn state(&self) -> &BuildState {
        &self.state
    }

    /// Highest generation started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn device(&self) -> DeviceType {
        self.device
    }

    pub fn set_device(&mut self, device: DeviceType) -> bool {
        if self.device == device {
            return false;
        }
        self.device = device;
        true
    }

    /// Arms (or re-arms) the debounce timer.
    pub fn schedule(&mut self, now: Instant) -> bool {
        let deadline = now + self.debounce;
        if self.deadline.is_some() {
            tracing::debug!(target = "preview.pipeline", "debounce reset");
        }
        let changed = self.deadline != Some(deadline);
        self.deadline = Some(deadline);
        changed
    }

    /// Starts a build when the debounce deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 5 {
            tracing::debug!(
                target = "preview.pipeline",
                overshoot_ms = overshoot.as_millis() as u64,
                "build debounce overshoot"
            );
        }
        Some(self.start())
    }

    /// Starts a new generation immediately, dropping any armed deadline.
    pub fn start(&mut self) -> u64 {
        self.deadline = None;
        self.generation += 1;
        self.state = BuildState::Building {
            generation: self.generation,
        };
        tracing::info!(target = "preview.pipeline", generation = self.generation, "build started");
        self.generation
    }

    pub fn finish(&mut self, generation: u64, result: CompileResult) -> bool {
        if self.state != (BuildState::Building { generation }) {
            tracing::debug!(
                target = "preview.pipeline",
                generation,
                current = self.generation,
                "discarding superseded build result"
            );
            return false;
        }

        self.state = match result {
            Ok(artifact) => {
                tracing::info!(target = "preview.pipeline", generation, "build succeeded");
                self.last_good = Some((artifact.clone(), generation));
                BuildState::Success {
                    artifact,
                    generation,
                }
            }
            Err(errors) => {
                tracing::info!(
                    target = "preview.pipeline",
                    generation,
                    errors = errors.len(),
                    "build failed"
                );
                BuildState::Failed { errors, generation }
            }
        };
        true
    }

    /// Artifact to display: the current success, or the last good one.
    pub fn artifact(&self) -> Option<&PreviewArtifact> {
        match &self.state {
            BuildState::Success { artifact, .. } => Some(artifact),
            _ => self.last_good.as_ref().map(|(artifact, _)| artifact),
        }
    }

    /// Generation that produced [`BuildPipeline::artifact`].
    pub fn artifact_generation(&self) -> Option<u64> {
        self.last_good.as_ref().map(|(_, generation)| *generation)
    }

    /// A previous artifact kept on display after a failed build.
    pub fn artifact_is_stale(&self) -> bool {
        matches!(self.state, BuildState::Failed { .. }) && self.last_good.is_some()
    }

    pub fn errors(&self) -> &[PreviewError] {
        match &self.state {
            BuildState::Failed { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.errors()
            .iter()
            .filter(|error| error.severity == severity)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/preview.rs"]
mod tests;
