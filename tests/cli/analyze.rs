use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

const BASE: &str = "apps/acme/clientlibs/clientlib-base";
const PAGE_HEAD: &str = "apps/acme/components/page/customheaderlibs.html";

fn clean_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_manifest(
        BASE,
        r#"categories="[acme.base]"
    embed="[acme.grid]""#,
    )?;
    test.write_manifest("apps/acme/clientlibs/clientlib-grid", r#"categories="[acme.grid]""#)?;
    test.write_file(
        PAGE_HEAD,
        r#"<sly data-sly-use.clientlib="/libs/granite/sightly/templates/clientlib.html"/>
<sly data-sly-call="${clientlib.css @ categories='acme.base'}"/>"#,
    )?;
    Ok(test)
}

#[test]
fn test_analyze_clean_project() -> Result<()> {
    let test = clean_project()?;

    let out = run(test.analyze_command())?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(
        out.stdout
            .contains("Checked 3 files (2 declarations, 1 reference) - no issues found"),
        "stdout: {}",
        out.stdout
    );

    Ok(())
}

#[test]
fn test_analyze_reports_graph_issues() -> Result<()> {
    let test = CliTest::new()?;
    test.write_manifest(
        BASE,
        r#"categories="[acme.base]"
    embed="[acme.a]""#,
    )?;
    test.write_manifest(
        "apps/acme/clientlibs/clientlib-a",
        r#"categories="[acme.a]"
    dependencies="[acme.base]""#,
    )?;
    test.write_manifest("apps/acme/clientlibs/dup-one", r#"categories="[acme.dup]""#)?;
    test.write_manifest("apps/acme/clientlibs/dup-two", r#"categories="[acme.dup]""#)?;
    test.write_manifest("apps/acme/clientlibs/legacy", r#"categories="[acme.legacy]""#)?;
    test.write_file(
        PAGE_HEAD,
        r#"<sly data-sly-call="${clientlib.all @ categories='acme.base,acme.dup'}"/>"#,
    )?;

    let out = run(test.analyze_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains(r#"error: "acme.a → acme.base → acme.a"  circular-dependency"#));
    assert!(out.stdout.contains("= note: acme.a and acme.base require each other"));
    assert!(out.stdout.contains(r#"error: "acme.dup"  duplicate-category"#));
    assert!(out.stdout.contains("--> apps/acme/clientlibs/dup-one"));
    assert!(out.stdout.contains("= note: also declared in: apps/acme/clientlibs/dup-two"));
    assert!(out.stdout.contains(r#"warning: "acme.legacy"  unused-category"#));
    assert!(out.stdout.contains("--> apps/acme/clientlibs/legacy"));
    assert!(out.stdout.contains("✘ 3 problems (2 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_analyze_unused_only_exits_zero() -> Result<()> {
    let test = clean_project()?;
    test.write_manifest("apps/acme/clientlibs/legacy", r#"categories="[acme.legacy]""#)?;

    let out = run(test.analyze_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains(r#"warning: "acme.legacy"  unused-category"#));
    assert!(out.stdout.contains("✘ 1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_analyze_selected_checks_only() -> Result<()> {
    let test = clean_project()?;
    test.write_manifest("apps/acme/clientlibs/legacy", r#"categories="[acme.legacy]""#)?;

    let out = run({
        let mut cmd = test.analyze_command();
        cmd.args(["duplicate", "circular"]);
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    assert!(!out.stdout.contains("unused-category"));
    assert!(out.stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_analyze_policy_and_script_references_count_as_usage() -> Result<()> {
    let test = CliTest::new()?;
    test.write_manifest("apps/acme/clientlibs/policy", r#"categories="[acme.policy]""#)?;
    test.write_manifest("apps/acme/clientlibs/script", r#"categories="[acme.script]""#)?;
    test.write_file(
        "conf/acme/settings/wcm/policies/.content.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<jcr:root xmlns:jcr="http://www.jcp.org/jcr/1.0" jcr:primaryType="nt:unstructured">
    <page jcr:primaryType="nt:unstructured" clientlibs="[acme.policy]"/>
</jcr:root>"#,
    )?;
    test.write_file(
        "ui.frontend/src/main.js",
        r#"loadClientlibs("acme.script");"#,
    )?;

    let out = run(test.analyze_command())?;

    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);
    assert!(!out.stdout.contains("unused-category"));

    Ok(())
}

#[test]
fn test_analyze_malformed_manifest_warns_and_continues() -> Result<()> {
    let test = clean_project()?;
    test.write_file("apps/acme/clientlibs/broken/.content.xml", "<jcr:root")?;

    let out = run(test.analyze_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("parse-error"));
    assert!(out.stdout.contains("--> apps/acme/clientlibs/broken/.content.xml"));
    assert!(
        out.stderr
            .contains("warning: 1 file(s) could not be parsed (use -v for details)")
    );

    Ok(())
}

#[test]
fn test_analyze_json_output() -> Result<()> {
    let test = clean_project()?;

    let out = run({
        let mut cmd = test.analyze_command();
        cmd.args(["--format", "json"]);
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    let json: Value = serde_json::from_str(&out.stdout)?;
    assert_eq!(json["filesScanned"], 3);
    assert_eq!(json["declarations"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["declarations"][0]["category"], "acme.base");
    assert_eq!(json["declarations"][0]["sourcePath"], BASE);
    assert_eq!(json["references"][0]["category"], "acme.base");
    assert_eq!(json["references"][0]["file"], PAGE_HEAD);
    assert_eq!(json["references"][0]["line"], 2);
    assert_eq!(json["graph"]["edges"][0]["from"], "acme.base");
    assert_eq!(json["graph"]["edges"][0]["to"], "acme.grid");
    assert_eq!(json["issues"], Value::Array(Vec::new()));
    assert!(json.get("correlation").is_none());

    Ok(())
}

#[test]
fn test_analyze_with_pages_reports_missing_categories() -> Result<()> {
    let test = clean_project()?;
    test.write_file(
        "page.snapshot",
        r#"{
  "path": "/content/acme/us/en",
  "components": ["acme/components/grid", "acme/components/carousel"]
}"#,
    )?;

    let out = run({
        let mut cmd = test.analyze_command();
        cmd.args(["--pages", "page.snapshot"]);
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains(r#"warning: "acme/components/carousel"  missing-category"#));
    assert!(out.stdout.contains("--> page /content/acme/us/en"));
    assert!(!out.stdout.contains("acme/components/grid\""));

    Ok(())
}

#[test]
fn test_analyze_missing_root_fails() -> Result<()> {
    let test = CliTest::new()?;

    let out = run({
        let mut cmd = test.analyze_command();
        cmd.args(["--root", "does-not-exist"]);
        cmd
    })?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Root directory does not exist"));

    Ok(())
}

#[test]
fn test_analyze_invalid_config_fails() -> Result<()> {
    let test = clean_project()?;
    test.write_file(".clibscanrc.json", r#"{ "templates": ["[invalid"] }"#)?;

    let out = run(test.analyze_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Invalid glob pattern in 'templates'"));

    Ok(())
}
