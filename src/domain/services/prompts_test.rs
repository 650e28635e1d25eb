use std::path::Path;

use anyhow::Result;

use super::PromptPresets;

fn fixture() -> &'static str {
    return r#"{
        "zh": [
            {"name": "翻译", "context": "你是一名翻译"},
            {"name": "coder", "context": "You write Rust"}
        ],
        "en": [
            {"name": "editor", "context": "You proofread text"}
        ]
    }"#;
}

#[test]
fn it_lists_names_in_file_order() -> Result<()> {
    let presets = PromptPresets::from_json(fixture())?;

    assert_eq!(presets.names("zh"), vec!["翻译", "coder"]);
    assert_eq!(presets.names("en"), vec!["editor"]);
    assert!(presets.names("fr").is_empty());

    return Ok(());
}

#[test]
fn it_finds_presets_by_language() -> Result<()> {
    let presets = PromptPresets::from_json(fixture())?;

    assert_eq!(presets.get("zh", "coder")?.context, "You write Rust");
    assert!(presets.find("en", "coder").is_none());

    return Ok(());
}

#[test]
fn it_names_alternatives_for_missing_presets() -> Result<()> {
    let presets = PromptPresets::from_json(fixture())?;

    let err = presets.get("zh", "poet").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"No prompt named poet for language zh. Possible values are: 翻译, coder");

    let err = presets.get("fr", "poet").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"No prompts are configured for language fr");

    return Ok(());
}

#[test]
fn it_rejects_malformed_files() {
    assert!(PromptPresets::from_json(r#"{"zh": [{"name": "x"}]}"#).is_err());
}

#[tokio::test]
async fn it_reports_unreadable_files() {
    let err = PromptPresets::load(Path::new("./does-not-exist/prompts.json"))
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .starts_with("Failed to read prompts file ./does-not-exist/prompts.json"));
}
