//! Integration tests for the PathwayConverter API
//!
//! These tests drive file conversion over the shared fixtures and load the
//! configuration the way the CLI does.

use std::fs;

use tempfile::tempdir;

use gpml::{
    ConverterError, GpmlError, GpmlVersion, PathwayConverter, Warning, config::ConverterConfig,
    identifier::ElementId,
};

const LEGACY: &str = "../../fixtures/legacy/insulin_signaling.gpml";
const CURRENT: &str = "../../fixtures/current/insulin_signaling.gpml";

#[test]
fn test_config_from_toml() {
    let config: ConverterConfig = toml::from_str(
        r#"
        output_version = "legacy"
        validate = true
        strict_warnings = true

        [data_source_aliases]
        "NCBI Gene" = "Entrez Gene"
        "#,
    )
    .expect("config should parse");

    assert_eq!(config.output_version(), GpmlVersion::Legacy);
    assert!(config.validate());
    assert!(config.strict_warnings());
    assert_eq!(config.indent(), 2, "missing fields keep their default");
    assert_eq!(
        config.data_source_aliases().get("NCBI Gene").map(String::as_str),
        Some("Entrez Gene")
    );
}

#[test]
fn test_empty_toml_is_the_default_config() {
    let config: ConverterConfig = toml::from_str("").unwrap();
    assert_eq!(config, ConverterConfig::default());
}

#[test]
fn test_convert_legacy_file_to_current() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("converted.gpml");

    let converter = PathwayConverter::new(ConverterConfig::default().with_validate(true));
    let converted = converter.convert_file(LEGACY, &output).expect("conversion succeeds");

    assert_eq!(converted.version, GpmlVersion::Current);
    assert_eq!(
        converted.warnings,
        vec![Warning::UnsupportedFeature {
            element_id: None,
            feature: "InfoBox position".to_string(),
        }]
    );
    assert!(
        converted
            .notes
            .iter()
            .any(|note| note.element_id() == Some(ElementId::new("st2"))),
        "reader notes are passed on"
    );

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, converted.text);
    assert!(written.contains(r#"xmlns="http://pathvisio.org/GPML/2021""#));

    let reread = converter.read_file(&output).unwrap().model;
    assert_eq!(reread.pathway().title(), "Insulin signaling");
    assert!(reread.group(ElementId::new("grp1")).is_some());
}

#[test]
fn test_convert_current_file_to_legacy() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("legacy.gpml");

    let config = ConverterConfig::default()
        .with_output_version(GpmlVersion::Legacy)
        .with_validate(true);
    let converted = PathwayConverter::new(config)
        .convert_file(CURRENT, &output)
        .expect("lossy conversion still succeeds");

    let reserved = converted
        .warnings
        .iter()
        .filter(|warning| matches!(warning, Warning::ReservedProperty { .. }))
        .count();
    assert_eq!(reserved, 2);
    assert!(output.exists());
}

#[test]
fn test_strict_conversion_leaves_no_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("strict.gpml");

    let config = ConverterConfig::default()
        .with_output_version(GpmlVersion::Legacy)
        .with_strict_warnings(true);
    let err = PathwayConverter::new(config)
        .convert_file(CURRENT, &output)
        .unwrap_err();

    assert!(matches!(err, GpmlError::Lossy(_)));
    assert!(!output.exists());
}

#[test]
fn test_write_file_round_trip() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("same.gpml");

    let converter = PathwayConverter::default();
    let mut model = converter.read_file(CURRENT).unwrap().model;
    let warnings = converter
        .write_file(&mut model, GpmlVersion::Current, &output)
        .unwrap();
    assert!(warnings.is_empty());

    let reread = converter.read_file(&output).unwrap().model;
    assert_eq!(reread.len(), model.len());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let err = PathwayConverter::default()
        .read_file(temp_dir.path().join("absent.gpml"))
        .unwrap_err();
    assert!(matches!(err, GpmlError::Io(_)));
}

#[test]
fn test_error_fixtures_fail() {
    let converter = PathwayConverter::default();
    for entry in fs::read_dir("../../fixtures/errors").expect("error fixtures exist") {
        let path = entry.unwrap().path();
        let text = fs::read_to_string(&path).unwrap();
        let result = converter.convert(&text);
        assert!(
            matches!(result, Err(GpmlError::Converter(_))),
            "{} should fail, got {:?}",
            path.display(),
            result.map(|converted| converted.warnings)
        );
    }
}

#[test]
fn test_malformed_xml() {
    let err = PathwayConverter::default().convert("<Pathway").unwrap_err();
    assert!(matches!(err, GpmlError::Converter(ConverterError::Xml(_))));
}
