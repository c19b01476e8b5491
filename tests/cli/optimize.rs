use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_manifest(
        "apps/acme/clientlibs/clientlib-base",
        r#"categories="[acme.base]"
    dependencies="[acme.dependencies]"
    embed="[core.wcm.components.carousel.v1,core.wcm.components.image.v3]""#,
    )?;
    test.write_manifest(
        "apps/core/wcm/components/carousel/v1/clientlibs/site",
        r#"categories="[core.wcm.components.carousel.v1]""#,
    )?;
    test.write_manifest(
        "apps/core/wcm/components/image/v3/clientlibs/site",
        r#"categories="[core.wcm.components.image.v3]""#,
    )?;
    test.write_manifest("apps/legacy/clientlibs/old", r#"categories="[acme.legacy]""#)?;
    test.write_file(
        "apps/acme/components/page/customheaderlibs.html",
        r#"<sly data-sly-call="${clientlib.all @ categories='acme.base'}"/>"#,
    )?;
    test.write_file(
        "page.snapshot",
        r#"{"path": "/content/acme/en", "components": ["core/wcm/components/image/v3/image"]}"#,
    )?;
    Ok(test)
}

#[test]
fn test_optimize_dry_run() -> Result<()> {
    let test = project()?;

    let out = run({
        let mut cmd = test.optimize_command();
        cmd.args(["--pages", "page.snapshot", "--project", "acme"]);
        cmd
    })?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(
        out.stdout
            .contains("Base library: acme.base (apps/acme/clientlibs/clientlib-base)")
    );
    assert!(out.stdout.contains("  core.wcm.components.carousel.v1  remove"));
    assert!(out.stdout.contains("  core.wcm.components.image.v3     keep"));
    assert!(out.stdout.contains("Proposed: 1 of 2 embed(s) (50% reduction)"));
    assert!(out.stdout.contains("Unused categories: acme.legacy"));
    assert!(out.stdout.contains(r#"categories="[acme-new.base]""#));
    assert!(out.stdout.contains(r#"embed="[core.wcm.components.image.v3]""#));
    assert!(
        out.stdout
            .contains("Site library: acme-home.site (depends on acme-new.base, 0 embed(s))")
    );
    assert!(out.stdout.contains(r#"categories="[acme-home.site]""#));
    assert!(out.stdout.contains("Run with --apply to write acme-new.base and acme-home.site"));
    assert!(!test.root().join("report").exists());

    Ok(())
}

#[test]
fn test_optimize_without_pages_keeps_every_embed() -> Result<()> {
    let test = project()?;

    let out = run(test.optimize_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Proposed: 2 of 2 embed(s) (0% reduction)"));
    assert!(out.stdout.contains(r#"categories="[site-new.base]""#));

    Ok(())
}

#[test]
fn test_optimize_apply_writes_library() -> Result<()> {
    let test = project()?;

    let out = run({
        let mut cmd = test.optimize_command();
        cmd.args(["--pages", "page.snapshot", "--project", "acme", "--out", "out", "--apply"]);
        cmd
    })?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Wrote out/clientlib-new-base/.content.xml"));

    let manifest = test.read_file("out/clientlib-new-base/.content.xml")?;
    assert!(manifest.contains(r#"jcr:primaryType="cq:ClientLibraryFolder""#));
    assert!(manifest.contains(r#"categories="[acme-new.base]""#));
    assert!(manifest.contains(r#"dependencies="[acme.dependencies]""#));
    assert!(manifest.contains(r#"embed="[core.wcm.components.image.v3]""#));
    assert_eq!(
        test.read_file("out/clientlib-new-base/js.txt")?,
        "# JS loading order for acme-new.base\n"
    );

    let site = test.read_file("out/clientlib-home-site/.content.xml")?;
    assert!(site.contains(r#"categories="[acme-home.site]""#));
    assert!(site.contains(r#"dependencies="[acme-new.base]""#));
    assert!(out.stdout.contains("Wrote out/clientlib-home-site/js.txt"));

    Ok(())
}

#[test]
fn test_optimize_unknown_base_fails() -> Result<()> {
    let test = project()?;

    let out = run({
        let mut cmd = test.optimize_command();
        cmd.args(["--base", "nonexistent"]);
        cmd
    })?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Base client library not found"));

    Ok(())
}
