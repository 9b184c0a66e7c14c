//! Binds the merge feature file to the step registry.

use crate::fixtures::{MergeScenario, merge_scenario};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/merge.feature",
    fixtures = [merge_scenario: MergeScenario]
);
