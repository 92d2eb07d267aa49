//! Whole-pipeline tests: input file on disk → output file on disk

use edge_babel::formats::{DnatFormat, FirewallFormat, SnatFormat};
use edge_babel::{publish_from_path, PublishArtifact, RuleError, RuleFormat};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn dnat_row_renders_expected_attributes() {
    let dir = tempdir().unwrap();
    let input = write(
        dir.path(),
        "datadnat.csv",
        "edge,exip,port,intip,tport\nEdgeA,10.0.0.1,8080,192.168.1.10,80\n",
    );

    publish_from_path(&DnatFormat, &input, dir.path(), false).unwrap();

    let out = fs::read_to_string(dir.path().join("dnat.tf")).unwrap();
    assert!(out.contains("edge_gateway = \"EdgeA\""));
    assert!(out.contains("external_ip = \"10.0.0.1\""));
    assert!(out.contains("port = 8080\n"));
    assert!(out.contains("internal_ip = \"192.168.1.10\""));
    assert!(out.contains("translated_port = 80\n"));
}

#[test]
fn firewall_output_starts_with_gateway_and_default_action() {
    let dir = tempdir().unwrap();
    let input = write(
        dir.path(),
        "datafw.csv",
        "edge,descr,policy,protocol,dport,dip,sport,sip\n\
         EdgeB,allow-ssh,allow,tcp,22,10.0.0.5,any,0.0.0.0/0\n",
    );

    publish_from_path(&FirewallFormat, &input, dir.path(), false).unwrap();

    let out = fs::read_to_string(dir.path().join("firewall.tf")).unwrap();
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("resource \"vcd_firewall_rules\" \"fw\" {")
    );
    assert_eq!(lines.next(), Some("  edge_gateway = \"EdgeB\""));
    assert_eq!(lines.next(), Some("  default_action = \"drop\""));
    assert_eq!(out.matches("  rule {").count(), 1);
    for field in [
        "description = \"allow-ssh\"",
        "policy = \"allow\"",
        "protocol = \"tcp\"",
        "destination_port = \"22\"",
        "destination_ip = \"10.0.0.5\"",
        "source_port = \"any\"",
        "source_ip = \"0.0.0.0/0\"",
    ] {
        assert!(out.contains(field), "missing {}", field);
    }
}

#[test]
fn rerun_replaces_previous_output() {
    let dir = tempdir().unwrap();
    let input = write(
        dir.path(),
        "datadnat.csv",
        "h\nEdgeA,10.0.0.1,8080,192.168.1.10,80\nEdgeA,10.0.0.1,8443,192.168.1.10,443\n",
    );
    publish_from_path(&DnatFormat, &input, dir.path(), false).unwrap();
    let first = fs::read_to_string(dir.path().join("dnat.tf")).unwrap();
    assert_eq!(first.matches("resource ").count(), 2);

    write(
        dir.path(),
        "datadnat.csv",
        "h\nEdgeA,10.0.0.9,9090,192.168.1.99,90\n",
    );
    publish_from_path(&DnatFormat, &input, dir.path(), false).unwrap();
    let second = fs::read_to_string(dir.path().join("dnat.tf")).unwrap();
    assert_eq!(second.matches("resource ").count(), 1);
    assert!(!second.contains("8443"));
    assert!(second.contains("port = 9090"));
}

#[rstest]
#[case::dnat(&DnatFormat, "datadnat.csv")]
#[case::snat(&SnatFormat, "datasnat.csv")]
#[case::firewall(&FirewallFormat, "datafw.csv")]
fn absent_input_writes_nothing(#[case] format: &dyn RuleFormat, #[case] input: &str) {
    let dir = tempdir().unwrap();
    let result = publish_from_path(format, dir.path().join(input), dir.path(), false).unwrap();
    assert!(result.is_none());
    assert!(!dir.path().join(format.output_file()).exists());
}

#[rstest]
#[case::dnat(&DnatFormat, "datadnat.csv")]
#[case::snat(&SnatFormat, "datasnat.csv")]
#[case::firewall(&FirewallFormat, "datafw.csv")]
fn zero_byte_input_writes_nothing(#[case] format: &dyn RuleFormat, #[case] input: &str) {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), input, "");
    let result = publish_from_path(format, &input, dir.path(), false).unwrap();
    assert!(result.is_none());
    assert!(!dir.path().join(format.output_file()).exists());
}

#[rstest]
#[case::dnat(&DnatFormat, "h\nEdgeA,10.0.0.1,8080,192.168.1.10\n")]
#[case::snat(&SnatFormat, "h\nEdgeA,10.0.0.1\n")]
#[case::firewall(&FirewallFormat, "h\nEdgeB,allow-ssh,allow,tcp,22,10.0.0.5,any\n")]
fn short_row_aborts_and_leaves_previous_output(
    #[case] format: &dyn RuleFormat,
    #[case] source: &str,
) {
    let dir = tempdir().unwrap();
    let output = write(dir.path(), format.output_file(), "# previous run\n");
    let input = write(dir.path(), "input.csv", source);

    let err = publish_from_path(format, &input, dir.path(), false).unwrap_err();

    assert!(matches!(err, RuleError::MalformedRow { row: 1, .. }));
    assert_eq!(fs::read_to_string(output).unwrap(), "# previous run\n");
}

#[test]
fn dry_run_returns_text_only() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "datasnat.csv", "h\nEdgeA,1.1.1.1,10.0.0.1\n");

    let result = publish_from_path(&SnatFormat, &input, dir.path(), true)
        .unwrap()
        .unwrap();

    assert!(matches!(result.artifact, PublishArtifact::InMemory(ref text) if text.contains("vcd_snat")));
    assert!(!dir.path().join("snat.tf").exists());
}

#[test]
fn blank_data_line_aborts_with_its_file_row() {
    let dir = tempdir().unwrap();
    let input = write(
        dir.path(),
        "datadnat.csv",
        "h\nEdgeA,10.0.0.1,8080,192.168.1.10,80\n\nEdgeA,10.0.0.2,8081,192.168.1.11,81\n",
    );

    let err = publish_from_path(&DnatFormat, &input, dir.path(), false).unwrap_err();

    assert!(matches!(
        err,
        RuleError::MalformedRow {
            row: 2,
            expected: 5,
            found: 0
        }
    ));
    assert!(!dir.path().join("dnat.tf").exists());
}
