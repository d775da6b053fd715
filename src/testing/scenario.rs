use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Value;

use crate::context::{ContextKey, TestContext};
use crate::http::{ApiRequest, ApiResponse};

use super::assertion::Assertion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Normal,
    Minor,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "critical",
            Severity::Normal => "normal",
            Severity::Minor => "minor",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Api,
    Regression,
    Smoke,
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tag::Api => "api",
            Tag::Regression => "regression",
            Tag::Smoke => "smoke",
        };
        write!(f, "{label}")
    }
}

/// Copies a response value into the test context once every assertion of
/// the scenario has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub key: ContextKey,
    pub pointer: String,
}

impl Capture {
    pub fn apply(&self, response: &ApiResponse, ctx: &mut TestContext) -> Result<(), String> {
        match response.field(&self.pointer) {
            None | Some(Value::Null) => Err(format!(
                "cannot capture `{}`: \"{}\" is missing from the response",
                self.key, self.pointer
            )),
            Some(value) => {
                ctx.set(self.key, value.clone());
                Ok(())
            }
        }
    }
}

/// One check: a request, what the response must look like, and which
/// values later checks need from it.
///
/// `feature`, `story`, `severity` and `description` are report labels. They
/// are copied onto every outcome and shown by `list`.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub feature: String,
    pub story: String,
    pub severity: Severity,
    pub description: String,
    pub tags: Vec<Tag>,
    pub request: ApiRequest,
    pub assertions: Vec<Assertion>,
    pub captures: Vec<Capture>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, request: ApiRequest) -> Self {
        Self {
            name: name.into(),
            feature: String::new(),
            story: String::new(),
            severity: Severity::Normal,
            description: String::new(),
            tags: vec![Tag::Api, Tag::Regression],
            request,
            assertions: Vec::new(),
            captures: Vec::new(),
        }
    }

    pub fn feature(mut self, feature: impl Into<String>, story: impl Into<String>) -> Self {
        self.feature = feature.into();
        self.story = story.into();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn smoke(mut self) -> Self {
        if !self.tags.contains(&Tag::Smoke) {
            self.tags.push(Tag::Smoke);
        }
        self
    }

    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn capture(mut self, key: ContextKey, pointer: &str) -> Self {
        self.captures.push(Capture {
            key,
            pointer: pointer.to_string(),
        });
        self
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Prefix of every failure message this scenario reports.
    pub fn failure_prefix(&self) -> String {
        format!("There is an \"{}\" {} ERROR: ", self.name, self.request.method)
    }
}
