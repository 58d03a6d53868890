use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const TIN: &str = r#"<?xml version="1.0"?>
<LandXML xmlns="http://www.landxml.org/schema/LandXML-1.2">
  <Surfaces><Surface name="EG"><Definition surfType="TIN">
    <Pnts>
      <P id="1">0 0 10</P>
      <P id="2">10 0 12</P>
      <P id="3">10 10 14</P>
      <P id="4">0 10 10</P>
    </Pnts>
    <Faces>
      <F n="0 2 0">1 2 3</F>
      <F n="1 0 0">1 3 4</F>
      <F i="1">4 3 2</F>
      <F>1 2 99</F>
    </Faces>
  </Definition></Surface></Surfaces>
</LandXML>
"#;

fn cli() -> Command {
    Command::cargo_bin("survey_mesh_cli").unwrap()
}

#[test]
fn inspect_command() {
    let file = assert_fs::NamedTempFile::new("EG.xml").unwrap();
    file.write_str(TIN).unwrap();

    cli()
        .args(["inspect", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Points: 4"))
        .stdout(predicate::str::contains("Triangles: 2"))
        .stdout(predicate::str::contains("1 invisible"))
        .stdout(predicate::str::contains("Missing point 99 in face 3"))
        .stdout(predicate::str::contains("Offset: 5.000,12.000,-5.000"));
}

#[test]
fn inspect_policy_flags() {
    let file = assert_fs::NamedTempFile::new("EG.xml").unwrap();
    file.write_str(TIN).unwrap();

    cli()
        .args([
            "inspect",
            file.path().to_str().unwrap(),
            "--keep-invisible",
            "--exclude-boundary",
            "--no-center",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Triangles: 1"))
        .stdout(predicate::str::contains("2 boundary"))
        .stdout(predicate::str::contains("Offset: 0.000,0.000,0.000"));
}

#[test]
fn inspect_corrupt_file_fails() {
    let file = assert_fs::NamedTempFile::new("corrupt.xml").unwrap();
    file.write_str("<LandXML><Pnts>").unwrap();

    cli()
        .args(["inspect", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed document"));
}

#[test]
fn load_skips_corrupt_sources() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("valid.xml").write_str(TIN).unwrap();
    dir.child("corrupt.xml").write_str("<LandXML><P id=").unwrap();

    cli()
        .args([
            "load",
            "--root",
            dir.path().to_str().unwrap(),
            "valid.xml",
            "corrupt.xml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid: 2 triangles, 4 points"))
        .stdout(predicate::str::contains("Skipped corrupt.xml"))
        .stdout(predicate::str::contains("Offset: 5.000,12.000,-5.000"));
    dir.close().unwrap();
}

#[test]
fn load_without_sources_fails() {
    cli()
        .arg("load")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no sources given"));
}

#[test]
fn load_from_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("geometry").create_dir_all().unwrap();
    dir.child("geometry/EG.xml").write_str(TIN).unwrap();
    let cfg = dir.child("batch.json");
    cfg.write_str(r#"{"root": "geometry", "sources": ["EG.xml"], "policy": {"faces": {"exclude_invisible": false}}}"#)
        .unwrap();

    cli()
        .args(["load", "--config", cfg.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("EG: 3 triangles"));
    dir.close().unwrap();
}

#[test]
fn export_json_command() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("EG.xml").write_str(TIN).unwrap();
    let output = dir.child("surfaces.json");

    cli()
        .args([
            "export-json",
            output.path().to_str().unwrap(),
            "--root",
            dir.path().to_str().unwrap(),
            "EG.xml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 surfaces"));

    output.assert(predicate::str::contains("\"nickname\": \"EG\""));
    dir.close().unwrap();
}

#[test]
fn export_obj_command() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = dir.child("EG.xml");
    input.write_str(TIN).unwrap();
    let output = dir.child("EG.obj");

    cli()
        .args([
            "export-obj",
            input.path().to_str().unwrap(),
            output.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 triangles"));

    output.assert(predicate::str::contains("f 4/4 5/5 6/6"));
    dir.close().unwrap();
}

#[test]
fn log_file_records_batch_and_export() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("valid.xml").write_str(TIN).unwrap();
    dir.child("corrupt.xml").write_str("<LandXML><P id=").unwrap();
    let output = dir.child("surfaces.json");
    let log = dir.child("run.log");

    cli()
        .env("SURVEY_MESH_LOG", log.path())
        .env("RUST_LOG", "info")
        .args([
            "export-json",
            output.path().to_str().unwrap(),
            "--root",
            dir.path().to_str().unwrap(),
            "valid.xml",
            "corrupt.xml",
        ])
        .assert()
        .success();

    log.assert(predicate::str::contains("loading 2 sources"));
    log.assert(predicate::str::contains("failed to load corrupt.xml"));
    log.assert(predicate::str::contains("wrote json export"));
    dir.close().unwrap();
}
