//! Shared fixtures for the merge behaviour scenarios.

use std::collections::BTreeMap;

use fieldmerge::{Merge, MergeError, Record};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Environment-derived values.
#[derive(Debug, Default, Record)]
pub struct EnvLayer {
    #[fieldmerge(rename = "URL")]
    pub url: String,
    #[fieldmerge(rename = "Count")]
    pub count: i64,
    #[fieldmerge(rename = "Data")]
    pub data: BTreeMap<String, String>,
}

/// File-derived values.
#[derive(Debug, Default, Record)]
pub struct FileLayer {
    #[fieldmerge(rename = "Service")]
    pub service: ServiceSection,
    #[fieldmerge(rename = "Count")]
    pub count: i64,
}

/// The `[service]` section of a configuration file.
#[derive(Debug, Default, Record)]
pub struct ServiceSection {
    #[fieldmerge(rename = "URL")]
    pub url: Option<String>,
}

/// The merge source: optional environment and file branches.
#[derive(Debug, Default, Record)]
pub struct Layers {
    #[fieldmerge(rename = "EV")]
    pub env: Option<EnvLayer>,
    #[fieldmerge(rename = "FV")]
    pub file: Option<FileLayer>,
}

/// The destination populated by each scenario.
#[derive(Debug, Clone, PartialEq, Eq, Merge)]
pub struct Settings {
    #[fieldmerge(from = "EV.URL|FV.Service.URL")]
    pub url: String,
    #[fieldmerge(from = "EV.Count|FV.Count,skipzero")]
    pub count: i64,
    #[fieldmerge(from = "EV.Data.key")]
    pub data_value: String,
}

impl Settings {
    /// Settings as they stand before a merge.
    pub fn preset() -> Self {
        Self {
            url: String::from("preset-url"),
            count: 0,
            data_value: String::from("preset"),
        }
    }
}

/// Scenario state shared between steps.
#[derive(Debug, Default, ScenarioState)]
pub struct MergeScenario {
    pub env: Slot<EnvLayer>,
    pub file: Slot<FileLayer>,
    pub absent: Slot<bool>,
    pub settings: Slot<Settings>,
    pub outcome: Slot<Result<(), MergeError>>,
}

/// Creates a clean scenario state.
#[fixture]
pub fn merge_scenario() -> MergeScenario {
    MergeScenario::default()
}
