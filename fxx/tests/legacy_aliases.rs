//! Deprecated names keep behaving like their replacements.
#![expect(deprecated, reason = "exercises the deprecated aliases on purpose")]

use std::sync::Arc;

use anyhow::{Result, ensure};
use fxx::{App, provide_config_file, with_config_field};
use fxx_test_helpers::config::json;
use rstest::rstest;

#[rstest]
fn legacy_names_register_and_extract() -> Result<()> {
    let app = App::new([
        provide_config_file("legacy", json("legacy.json", r#"{"greeting": "hi"}"#)),
        with_config_field::<String>(r#"json:"greeting""#)
            .from_source("legacy")
            .into(),
    ])?;
    let greeting: Arc<String> = app.resolve()?;
    ensure!(greeting.as_str() == "hi");
    Ok(())
}
