mod common;

use std::path::PathBuf;

use rebase_imports::log::enable_tracing_by_env;
use testing_macros::fixture;

use crate::common::test_fixture;

#[fixture("tests/fixtures/*/tsconfig.json")]
fn rebase(tsconfig: PathBuf) {
    enable_tracing_by_env();
    test_fixture(&tsconfig);
}
