//! Scenario context: the captures one test case threads through its steps.

use std::sync::Arc;

use probe_domain::Spec;
use serde_json::Value;

use crate::error::StepResult;
use crate::harness::{Harness, SpecOutcome};
use crate::ports::HttpClient;
use crate::variables::Captures;

/// State of one running scenario.
///
/// Each scenario gets a fresh context, so values captured here are never
/// visible to another scenario.
pub struct ScenarioContext<C: HttpClient> {
    harness: Arc<Harness<C>>,
    captures: Captures,
}

impl<C: HttpClient> ScenarioContext<C> {
    /// Creates an empty context over a shared harness.
    pub fn new(harness: Arc<Harness<C>>) -> Self {
        Self {
            harness,
            captures: Captures::new(),
        }
    }

    /// Executes a spec after resolving its `{{name}}` placeholders.
    ///
    /// # Errors
    ///
    /// Returns `StepError::MissingInput` for an unknown placeholder (nothing
    /// is sent), or any error from [`Harness::execute`].
    pub async fn run(&self, spec: &Spec) -> StepResult<SpecOutcome> {
        let resolved = self.captures.resolve_spec(spec)?;
        self.harness.execute(&resolved).await
    }

    /// Executes a spec and stores its `returns` value under `name`.
    ///
    /// # Errors
    ///
    /// Returns `StepError::Extraction` if the spec has no `returns` path or it
    /// does not resolve, or any error from [`run`](Self::run).
    pub async fn capture(&mut self, name: &str, spec: &Spec) -> StepResult<Value> {
        let value = self.run(spec).await?.into_returned()?;
        self.captures.insert(name, value.clone());
        Ok(value)
    }

    /// Stores a value directly.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.captures.insert(name, value);
    }

    /// Returns a captured value, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.captures.get(name)
    }

    /// Returns a captured value.
    ///
    /// # Errors
    ///
    /// Returns `StepError::MissingInput` if nothing was captured under `name`.
    pub fn require(&self, name: &str) -> StepResult<&Value> {
        self.captures.require(name)
    }
}
