//! Step definitions for the merge behaviour scenarios.

use anyhow::{Result, anyhow, ensure};
use fieldmerge::{ErrorKind, merge};
use rstest_bdd_macros::{given, then, when};

use crate::fixtures::{EnvLayer, FileLayer, Layers, MergeScenario, Settings};

fn update_env(state: &MergeScenario, apply: impl FnOnce(&mut EnvLayer)) {
    let mut env = state.env.take().unwrap_or_default();
    apply(&mut env);
    state.env.set(env);
}

fn update_file(state: &MergeScenario, apply: impl FnOnce(&mut FileLayer)) {
    let mut file = state.file.take().unwrap_or_default();
    apply(&mut file);
    state.file.set(file);
}

#[given("an environment URL of \"{url}\"")]
fn env_url(merge_scenario: &MergeScenario, url: String) {
    update_env(merge_scenario, |env| env.url = url);
}

#[given("a file service URL of \"{url}\"")]
fn file_url(merge_scenario: &MergeScenario, url: String) {
    update_file(merge_scenario, |file| file.service.url = Some(url));
}

#[given("an environment count of {count:i64}")]
fn env_count(merge_scenario: &MergeScenario, count: i64) {
    update_env(merge_scenario, |env| env.count = count);
}

#[given("a file count of {count:i64}")]
fn file_count(merge_scenario: &MergeScenario, count: i64) {
    update_file(merge_scenario, |file| file.count = count);
}

#[given("an environment data entry \"{key}\" set to \"{value}\"")]
fn env_data(merge_scenario: &MergeScenario, key: String, value: String) {
    update_env(merge_scenario, |env| {
        env.data.insert(key, value);
    });
}

#[given("no sources at all")]
fn no_sources(merge_scenario: &MergeScenario) {
    merge_scenario.absent.set(true);
}

#[when("the sources are merged into the settings")]
fn merge_sources(merge_scenario: &MergeScenario) {
    let mut settings = Settings::preset();
    let outcome = if merge_scenario.absent.take().unwrap_or(false) {
        merge(&mut settings, &None::<Layers>)
    } else {
        let layers = Layers {
            env: merge_scenario.env.take(),
            file: merge_scenario.file.take(),
        };
        merge(&mut settings, &layers)
    };
    merge_scenario.settings.set(settings);
    merge_scenario.outcome.set(outcome);
}

fn settings(merge_scenario: &MergeScenario) -> Result<Settings> {
    merge_scenario
        .settings
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("settings were not merged"))
}

#[then("the merge succeeds")]
fn merge_succeeds(merge_scenario: &MergeScenario) -> Result<()> {
    let outcome = merge_scenario
        .outcome
        .take()
        .ok_or_else(|| anyhow!("merge outcome missing"))?;
    outcome.map_err(|err| anyhow!("merge failed: {err}"))
}

#[then("the merge fails with a validation error")]
fn merge_fails(merge_scenario: &MergeScenario) -> Result<()> {
    let outcome = merge_scenario
        .outcome
        .take()
        .ok_or_else(|| anyhow!("merge outcome missing"))?;
    let Err(err) = outcome else {
        return Err(anyhow!("expected the merge to fail"));
    };
    ensure!(err.kind() == ErrorKind::Validation, "unexpected error: {err}");
    Ok(())
}

#[then("the settings URL is \"{expected}\"")]
fn settings_url(merge_scenario: &MergeScenario, expected: String) -> Result<()> {
    let actual = settings(merge_scenario)?.url;
    ensure!(actual == expected, "expected URL {expected}, got {actual}");
    Ok(())
}

#[then("the settings count is {expected:i64}")]
fn settings_count(merge_scenario: &MergeScenario, expected: i64) -> Result<()> {
    let actual = settings(merge_scenario)?.count;
    ensure!(actual == expected, "expected count {expected}, got {actual}");
    Ok(())
}

#[then("the settings data value is \"{expected}\"")]
fn settings_data(merge_scenario: &MergeScenario, expected: String) -> Result<()> {
    let actual = settings(merge_scenario)?.data_value;
    ensure!(actual == expected, "expected data value {expected}, got {actual}");
    Ok(())
}

#[then("the settings are unchanged")]
fn settings_unchanged(merge_scenario: &MergeScenario) -> Result<()> {
    let actual = settings(merge_scenario)?;
    ensure!(actual == Settings::preset(), "settings changed: {actual:?}");
    Ok(())
}
