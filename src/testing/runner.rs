use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::context::TestContext;
use crate::environment;
use crate::http::{ApiClient, HttpMethod};

use super::assertion::AssertionResult;
use super::scenario::{Scenario, Severity, Tag};

/// Result of running one [`Scenario`].
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub feature: String,
    pub story: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub method: HttpMethod,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub passed: bool,
    pub duration_ms: u128,
    pub checks: Vec<AssertionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl ScenarioOutcome {
    fn new(scenario: &Scenario) -> Self {
        Self {
            name: scenario.name.clone(),
            feature: scenario.feature.clone(),
            story: scenario.story.clone(),
            severity: scenario.severity,
            description: scenario.description.clone(),
            method: scenario.request.method,
            target: scenario.request.display_target(),
            status: None,
            passed: false,
            duration_ms: 0,
            checks: Vec::new(),
            failure: None,
        }
    }

    fn fail(mut self, scenario: &Scenario, detail: impl AsRef<str>) -> Self {
        self.passed = false;
        self.failure = Some(format!("{}{}", scenario.failure_prefix(), detail.as_ref()));
        self
    }
}

/// Sends the scenario's request and checks the response.
///
/// Assertions run in order and the first failing one ends the scenario.
/// Captures are written to `ctx` only when every assertion passed.
pub async fn run_scenario(client: &ApiClient, ctx: &mut TestContext, scenario: &Scenario) -> ScenarioOutcome {
    let mut outcome = ScenarioOutcome::new(scenario);

    let mut request = scenario.request.clone();
    request.path = match environment::resolve(&request.path, &ctx.variables()) {
        Ok(path) => path,
        Err(err) => return report(outcome.fail(scenario, err.to_string())),
    };
    outcome.target = request.display_target();

    let response = match client.send(&request).await {
        Ok(response) => response,
        Err(err) => return report(outcome.fail(scenario, err.to_string())),
    };
    outcome.status = Some(response.status);
    outcome.duration_ms = response.elapsed.as_millis();

    for assertion in &scenario.assertions {
        let result = assertion.evaluate(&response, ctx);
        let failure = result.message.clone();
        outcome.checks.push(result);
        if let Some(detail) = failure {
            return report(outcome.fail(scenario, detail));
        }
    }

    for capture in &scenario.captures {
        if let Err(detail) = capture.apply(&response, ctx) {
            return report(outcome.fail(scenario, detail));
        }
    }

    outcome.passed = true;
    report(outcome)
}

fn report(outcome: ScenarioOutcome) -> ScenarioOutcome {
    if outcome.passed {
        info!(
            scenario = %outcome.name,
            feature = %outcome.feature,
            method = %outcome.method,
            target = %outcome.target,
            duration_ms = outcome.duration_ms as u64,
            "passed"
        );
    } else {
        warn!(
            scenario = %outcome.name,
            feature = %outcome.feature,
            severity = %outcome.severity,
            method = %outcome.method,
            target = %outcome.target,
            failure = outcome.failure.as_deref().unwrap_or_default(),
            "failed"
        );
    }
    outcome
}

/// Selects scenarios by tag and by case-insensitive name substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub tag: Option<Tag>,
    pub name: Option<String>,
}

impl Filter {
    pub fn matches(&self, scenario: &Scenario) -> bool {
        let tag_ok = self.tag.is_none_or(|tag| scenario.has_tag(tag));
        let name_ok = self
            .name
            .as_ref()
            .is_none_or(|name| scenario.name.to_lowercase().contains(&name.to_lowercase()));
        tag_ok && name_ok
    }
}

/// Summary report for a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u128,
    pub results: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.results.iter().filter(|outcome| !outcome.passed)
    }
}

/// An ordered list of scenarios. Order is significant: a scenario that
/// captures a value must come before the scenarios that read it.
#[derive(Debug, Clone, Default)]
pub struct Suite {
    scenarios: Vec<Scenario>,
}

impl Suite {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn select<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Scenario> {
        self.scenarios.iter().filter(move |scenario| filter.matches(scenario))
    }

    /// Runs the selected scenarios one after another with a fresh context.
    pub async fn run(&self, client: &ApiClient, filter: &Filter) -> RunReport {
        let mut ctx = TestContext::new();
        self.run_with_context(client, &mut ctx, filter).await
    }

    pub async fn run_with_context(&self, client: &ApiClient, ctx: &mut TestContext, filter: &Filter) -> RunReport {
        let started = Instant::now();
        let mut report = RunReport::default();

        for scenario in self.select(filter) {
            let outcome = run_scenario(client, ctx, scenario).await;
            report.total += 1;
            if outcome.passed {
                report.passed += 1;
            } else {
                report.failed += 1;
            }
            report.results.push(outcome);
        }

        report.duration_ms = started.elapsed().as_millis();
        info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            "suite finished"
        );
        report
    }
}
