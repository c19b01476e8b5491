use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["ignores", "manifests", "configs", "templates", "sources"] {
        assert!(
            parsed.get(field).is_some_and(Value::is_array),
            "Config should have '{field}' array"
        );
    }
    assert_eq!(parsed["baseCategory"], "base");

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Created .clibscanrc.json"));
    assert!(test.root().join(".clibscanrc.json").exists());

    let content = test.read_file(".clibscanrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".clibscanrc.json", "{}")?;

    let out = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: .clibscanrc.json already exists"));
    assert_eq!(test.read_file(".clibscanrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_manifest("apps/acme/clientlibs/clientlib-base", r#"categories="[acme.base]""#)?;
    test.write_file(
        "apps/acme/components/page/customheaderlibs.html",
        r#"<sly data-sly-call="${clientlib.css @ categories='acme.base'}"/>"#,
    )?;

    let out = run(test.analyze_command())?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("no issues found"));

    Ok(())
}
