//! Unit tests for formats, capabilities and registry wiring.

use anyhow::{Result, anyhow, bail, ensure};
use figment::Figment;
use rstest::rstest;
use serde::Deserialize;

use super::*;
use crate::{BoxError, ErrorKind, FxxError, Wiring};

#[derive(Debug, Deserialize, PartialEq, Eq)]
struct Server {
    host: String,
    port: u16,
}

fn server() -> Server {
    Server {
        host: "localhost".into(),
        port: 8080,
    }
}

fn field(tag: &str) -> Result<FieldSelector> {
    Ok(FieldSelector::parse(tag)?)
}

#[rstest]
#[case::json(Unmarshal::from_bytes(
    "inline.json",
    br#"{"server": {"host": "localhost", "port": 8080}}"#.as_slice(),
    Json
))]
#[case::yaml(Unmarshal::from_bytes(
    "inline.yaml",
    b"server:\n  host: localhost\n  port: 8080\n".as_slice(),
    Yaml
))]
#[case::toml(Unmarshal::from_bytes(
    "inline.toml",
    b"[server]\nhost = \"localhost\"\nport = 8080\n".as_slice(),
    Toml
))]
fn decodes_each_format(#[case] unmarshal: Unmarshal) -> Result<()> {
    let decoded: Server = unmarshal.unmarshal(&field("server")?)?;
    ensure!(decoded == server(), "got {decoded:?}");
    Ok(())
}

#[rstest]
#[case::syntax(b"{".as_slice())]
#[case::utf8(b"\xff".as_slice())]
fn invalid_json_is_an_unmarshal_error(#[case] bytes: &[u8]) -> Result<()> {
    let unmarshal = Unmarshal::from_bytes("broken.json", bytes, Json);
    let Err(err) = unmarshal.document() else {
        bail!("document must fail to decode");
    };
    ensure!(err.kind() == ErrorKind::Unmarshal);
    ensure!(err.to_string().contains("broken.json"), "got {err}");
    Ok(())
}

#[test]
fn yaml_must_be_a_mapping() -> Result<()> {
    let Err(err) = SaphyrYaml::parse("- one\n- two\n") else {
        bail!("sequence documents are rejected");
    };
    ensure!(err.to_string().contains("map"), "got {err}");
    Ok(())
}

#[test]
fn yaml_booleans_are_strict() -> Result<()> {
    let provider = SaphyrYaml::parse("flag: yes\n").map_err(|err| anyhow!(err))?;
    let value: String = Figment::from(provider).extract_inner("flag")?;
    ensure!(value == "yes");
    Ok(())
}

#[test]
fn selector_picks_the_key_for_the_capability_format() -> Result<()> {
    let unmarshal = Unmarshal::from_bytes(
        "inline.yaml",
        b"primary: 1\nsecondary: 2\n".as_slice(),
        Yaml,
    );
    let value: u8 = unmarshal.unmarshal(&field(r#"json:"primary" yaml:"secondary""#)?)?;
    ensure!(value == 2);
    Ok(())
}

#[test]
fn empty_path_selects_the_whole_document() -> Result<()> {
    let unmarshal = Unmarshal::from_bytes(
        "inline.json",
        br#"{"host": "localhost", "port": 8080}"#.as_slice(),
        Json,
    );
    let decoded: Server = unmarshal.unmarshal(&field("")?)?;
    ensure!(decoded == server());
    Ok(())
}

#[test]
fn missing_fields_name_the_origin() -> Result<()> {
    let unmarshal = Unmarshal::from_bytes("app.json", br#"{}"#.as_slice(), Json);
    let Err(err) = unmarshal.unmarshal::<u16>(&field(r#"json:"port""#)?) else {
        bail!("absent field must fail");
    };
    ensure!(matches!(err.as_ref(), FxxError::Unmarshal { origin, .. } if origin == "app.json"));
    ensure!(err.to_string().contains("port"), "got {err}");
    Ok(())
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
struct Limits {
    burst: u32,
}

#[rstest]
#[case::tag(r#"json:"maybe""#)]
#[case::bare_path("nested.maybe")]
fn absent_optional_fields_are_none(#[case] tag: &str) -> Result<()> {
    let unmarshal = Unmarshal::from_bytes("app.json", br#"{"other": 1}"#.as_slice(), Json);
    let value: Option<String> = unmarshal.unmarshal(&field(tag)?)?;
    ensure!(value.is_none(), "got {value:?}");
    Ok(())
}

#[test]
fn absent_defaulted_structs_take_their_defaults() -> Result<()> {
    let unmarshal = Unmarshal::from_bytes("app.json", br#"{"other": 1}"#.as_slice(), Json);
    let limits: Limits = unmarshal.unmarshal(&field(r#"json:"limits""#)?)?;
    ensure!(limits == Limits::default());
    let names: Vec<String> = unmarshal.unmarshal(&field(r#"json:"names""#)?)?;
    ensure!(names.is_empty());
    Ok(())
}

#[rstest]
#[case::tag_is_literal(r#"json:"a.b""#, "literal")]
#[case::bare_path_nests("a.b", "nested")]
fn dotted_tags_name_one_key(#[case] tag: &str, #[case] expected: &str) -> Result<()> {
    let unmarshal = Unmarshal::from_bytes(
        "app.json",
        br#"{"a.b": "literal", "a": {"b": "nested"}}"#.as_slice(),
        Json,
    );
    let value: String = unmarshal.unmarshal(&field(tag)?)?;
    ensure!(value == expected, "got {value}");
    Ok(())
}

#[rstest]
#[case::omitempty(r#"json:",omitempty""#)]
#[case::empty(r#"json:"""#)]
fn unnamed_tags_select_the_config_key(#[case] tag: &str) -> Result<()> {
    let unmarshal = Unmarshal::from_bytes(
        "app.json",
        br#"{"config": "cfg", "x": 1}"#.as_slice(),
        Json,
    );
    let value: String = unmarshal.unmarshal(&field(tag)?)?;
    ensure!(value == "cfg", "got {value}");
    Ok(())
}

#[test]
fn json_keys_fall_back_to_case_insensitive_matches() -> Result<()> {
    let unmarshal = Unmarshal::from_bytes(
        "app.json",
        br#"{"S": "upper", "t": "exact", "T": "other"}"#.as_slice(),
        Json,
    );
    let folded: String = unmarshal.unmarshal(&field(r#"json:"s""#)?)?;
    ensure!(folded == "upper", "got {folded}");
    let exact: String = unmarshal.unmarshal(&field(r#"json:"t""#)?)?;
    ensure!(exact == "exact", "got {exact}");
    Ok(())
}

#[test]
fn yaml_keys_match_case_sensitively() -> Result<()> {
    let unmarshal = Unmarshal::from_bytes("app.yaml", b"S: upper\n".as_slice(), Yaml);
    let value: Option<String> = unmarshal.unmarshal(&field(r#"yaml:"s""#)?)?;
    ensure!(value.is_none(), "got {value:?}");
    Ok(())
}

#[test]
fn closures_act_as_custom_formats() -> Result<()> {
    let upper = |bytes: &[u8]| -> Result<Figment, BoxError> {
        let text = std::str::from_utf8(bytes)?.to_uppercase();
        Ok(Figment::from(figment::providers::Serialized::default("value", text)))
    };
    let unmarshal = Unmarshal::from_bytes("custom", b"hello".as_slice(), upper);
    ensure!(unmarshal.format() == Some("custom"));
    let value: String = unmarshal.unmarshal(&field("value")?)?;
    ensure!(value == "HELLO");
    Ok(())
}

#[test]
fn prepared_documents_are_served_as_is() -> Result<()> {
    let figment = Figment::from(figment::providers::Serialized::default("port", 9000));
    let unmarshal = Unmarshal::from_figment("prepared", figment);
    ensure!(unmarshal.format().is_none());
    let port: u16 = unmarshal.unmarshal(&field("port")?)?;
    ensure!(port == 9000);
    Ok(())
}

#[test]
fn provide_config_registers_by_name_and_group() -> Result<()> {
    let wiring = provide_config("app", Unmarshal::from_figment("app", Figment::new()));
    let Wiring::Many(parts) = wiring else {
        bail!("expected two registrations");
    };
    let keys: Vec<String> = parts
        .iter()
        .filter_map(|part| match part {
            Wiring::Provide(provide) => Some(provide.key().to_string()),
            _ => None,
        })
        .collect();
    ensure!(keys.len() == 2, "got {keys:?}");
    ensure!(keys.iter().any(|key| key.contains(r#"name = "fxx::config/app""#)));
    ensure!(keys.iter().any(|key| key.contains(r#"group = "fxx::config""#)));
    Ok(())
}

#[test]
fn unreadable_files_become_composition_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let wiring = ConfigFile::new(dir.path().join("absent.json"), Json).into_wiring();
    let Wiring::Error(err) = wiring else {
        bail!("reading an absent file must fail eagerly");
    };
    ensure!(matches!(err.as_ref(), FxxError::ReadConfigFile { .. }));
    ensure!(err.is_composition());
    Ok(())
}

#[test]
fn invalid_extraction_tags_fail_composition() -> Result<()> {
    let wiring: Wiring = extract_config_field::<String>(r#"json:"unterminated"#).into();
    let Wiring::Error(err) = wiring else {
        bail!("invalid tags must be rejected");
    };
    ensure!(matches!(err.as_ref(), FxxError::InvalidTag { .. }), "got {err}");
    Ok(())
}

#[test]
fn config_names_use_the_shared_prefix() {
    assert_eq!(config_name("db"), format!("{CONFIG_NAME_PREFIX}db"));
    assert_eq!(CONFIG_GROUP, "fxx::config");
}
