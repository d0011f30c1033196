use serde::Serialize;

/// Ordered, append-only record of the steps one request went through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PipelineLog(Vec<String>);

impl PipelineLog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, step: impl Into<String>) {
        self.0.push(step.into());
    }

    pub fn steps(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_steps(self) -> Vec<String> {
        self.0
    }
}
