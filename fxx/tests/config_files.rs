//! Eager config file registration in every supported format.

use std::sync::Arc;

use anyhow::{Result, bail, ensure};
use fxx::{
    App, ConfigFile, FxxError, Json, ResultIntoFigment, Toml, Yaml, Wiring, extract_config_field,
    provide_json_config_file, provide_toml_config_file, provide_yaml_config_file,
};
use fxx_test_helpers::figment::with_jail;
use rstest::rstest;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
struct Database {
    host: String,
    port: u16,
}

const JSON: &str = r#"{"database": {"host": "db.local", "port": 5432}}"#;
const YAML: &str = "database:\n  host: db.local\n  port: 5432\n";
const TOML: &str = "[database]\nhost = \"db.local\"\nport = 5432\n";

fn expected() -> Database {
    Database {
        host: "db.local".into(),
        port: 5432,
    }
}

fn provide_file(format: &str, path: &str) -> Wiring {
    match format {
        "yaml" => provide_yaml_config_file(path),
        "toml" => provide_toml_config_file(path),
        _ => provide_json_config_file(path),
    }
}

#[rstest]
#[case::json("json", JSON)]
#[case::yaml("yaml", YAML)]
#[case::toml("toml", TOML)]
fn reads_files_registered_under_their_path(
    #[case] format: &str,
    #[case] contents: &str,
) -> Result<()> {
    let file = format!("app.{format}");
    let database = with_jail(|jail| {
        jail.create_file(&file, contents)?;
        let app = App::new([
            provide_file(format, &file),
            extract_config_field::<Database>("database")
                .from_source(&file)
                .into(),
        ])
        .to_figment()?;
        app.resolve::<Arc<Database>>().to_figment()
    })?;
    ensure!(*database == expected(), "got {database:?}");
    Ok(())
}

#[rstest]
fn name_overrides_the_path_identifier() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.yaml");
    std::fs::write(&path, YAML)?;
    let app = App::new([
        ConfigFile::new(&path, Yaml).name("settings").into(),
        extract_config_field::<Database>(r#"yaml:"database""#)
            .from_source("settings")
            .into(),
    ])?;
    let database: Arc<Database> = app.resolve()?;
    ensure!(*database == expected());
    Ok(())
}

#[rstest]
fn format_specific_keys_follow_the_file_format() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "[primary]\nhost = \"a\"\nport = 1\n\n[replica]\nhost = \"b\"\nport = 2\n",
    )?;
    let app = App::new([
        ConfigFile::new(&path, Toml).name("db").into(),
        extract_config_field::<Database>(r#"json:"primary" toml:"replica""#).into(),
    ])?;
    let database: Arc<Database> = app.resolve()?;
    ensure!(database.host == "b", "got {database:?}");
    Ok(())
}

#[rstest]
fn unreadable_files_abort_composition() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.json");
    let result = App::new([ConfigFile::new(&missing, Json).into()]);
    let Err(err) = result else {
        bail!("missing file must fail composition");
    };
    ensure!(matches!(err.as_ref(), FxxError::ReadConfigFile { .. }), "got {err}");
    ensure!(err.is_composition());
    ensure!(
        err.to_string().contains("missing.json"),
        "message should name the file: {err}"
    );
    Ok(())
}

#[rstest]
fn the_same_file_cannot_be_registered_twice() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("app.json");
    std::fs::write(&path, JSON)?;
    let result = App::new([
        ConfigFile::new(&path, Json).into(),
        ConfigFile::new(&path, Json).into(),
    ]);
    let Err(err) = result else {
        bail!("duplicate identifiers must fail composition");
    };
    ensure!(matches!(err.as_ref(), FxxError::DuplicateProvider { .. }), "got {err}");
    Ok(())
}
