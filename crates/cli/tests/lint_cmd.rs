//! CLI regression tests for the lint command: exit codes, aliases, stdin
//! input, JSON output contract, and gzip handling.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::cargo;

const CLEAN_VCF: &str = "##fileformat=VCFv4.1\n\
                         ##reference=file:///ref.fa\n\
                         ##contig=<ID=1>\n\
                         #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                         1\t100\t.\tA\tG\t.\t.\t.\n";

const WARNING_VCF: &str = "##fileformat=VCFv4.1\n\
                           #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

const ERROR_VCF: &str = "##fileformat=VCFv4.1\n\
                         ##reference=file:///ref.fa\n\
                         ##contig=<ID=1>\n\
                         #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                         1\tbad\t.\tA\tG\t.\t.\t.\n";

fn vcf_lint() -> Command {
    Command::new(cargo::cargo_bin!("vcf-lint"))
}

fn write_temp(content: &[u8]) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.vcf");
    fs::write(&path, content).expect("write temp vcf");
    (dir, path.to_string_lossy().to_string())
}

fn run_with_stdin(args: &[&str], stdin_body: &str) -> std::process::Output {
    let mut child = vcf_lint()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn vcf-lint");
    {
        let stdin = child.stdin.as_mut().expect("stdin handle");
        stdin
            .write_all(stdin_body.as_bytes())
            .expect("write stdin body");
    }
    child.wait_with_output().expect("wait for output")
}

// ─── Exit codes ─────────────────────────────────────────────────────────

#[test]
fn clean_file_exits_zero() {
    let (_dir, path) = write_temp(CLEAN_VCF.as_bytes());
    let output = vcf_lint()
        .args(["lint", &path, "--output", "json"])
        .output()
        .expect("run lint");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn warnings_alone_exit_zero() {
    let (_dir, path) = write_temp(WARNING_VCF.as_bytes());
    let output = vcf_lint()
        .args(["lint", &path, "--output", "json"])
        .output()
        .expect("run lint");
    assert!(output.status.success(), "warnings must not fail the exit");
}

#[test]
fn strict_promotes_warnings_to_failure() {
    let (_dir, path) = write_temp(WARNING_VCF.as_bytes());
    let output = vcf_lint()
        .args(["lint", &path, "--strict", "--output", "json"])
        .output()
        .expect("run lint");
    assert!(!output.status.success());
}

#[test]
fn errors_exit_nonzero() {
    let (_dir, path) = write_temp(ERROR_VCF.as_bytes());
    let output = vcf_lint()
        .args(["lint", &path, "--output", "json"])
        .output()
        .expect("run lint");
    assert!(!output.status.success());
}

// ─── JSON contract ──────────────────────────────────────────────────────

#[test]
fn json_output_carries_position_section_and_severity() {
    let (_dir, path) = write_temp(ERROR_VCF.as_bytes());
    let output = vcf_lint()
        .args(["lint", &path, "--output", "json"])
        .output()
        .expect("run lint");
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a single JSON object");
    assert_eq!(json["ok"], serde_json::json!(false));
    let diag = &json["diagnostics"][0];
    assert_eq!(diag["severity"], serde_json::json!("error"));
    assert_eq!(diag["section"], serde_json::json!("body"));
    assert_eq!(diag["line"], serde_json::json!(5));
    assert_eq!(
        diag["message"],
        serde_json::json!("Position must be a positive number")
    );
}

#[test]
fn json_reports_record_count() {
    let (_dir, path) = write_temp(CLEAN_VCF.as_bytes());
    let output = vcf_lint()
        .args(["lint", &path, "--output", "json"])
        .output()
        .expect("run lint");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["record_count"], serde_json::json!(1));
}

// ─── Aliases and stdin ──────────────────────────────────────────────────

#[test]
fn validate_and_check_aliases_work() {
    for alias in ["validate", "check"] {
        let (_dir, path) = write_temp(CLEAN_VCF.as_bytes());
        let output = vcf_lint()
            .args([alias, &path, "--output", "json"])
            .output()
            .expect("run alias");
        assert!(
            output.status.success(),
            "alias {alias} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn stdin_input_via_dash() {
    let output = run_with_stdin(&["lint", "-", "--output", "json"], CLEAN_VCF);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["file"], serde_json::json!("<stdin>"));
}

// ─── Gzip input ─────────────────────────────────────────────────────────

#[test]
fn gzip_input_is_transparent() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(CLEAN_VCF.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let (_dir, path) = write_temp(&compressed);
    let output = vcf_lint()
        .args(["lint", &path, "--output", "json"])
        .output()
        .expect("run lint on gzip");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["record_count"], serde_json::json!(1));
}

// ─── Header dump ────────────────────────────────────────────────────────

#[test]
fn header_dump_summarizes_the_source() {
    let input = "##fileformat=VCFv4.2\n\
                 ##reference=file:///ref.fa\n\
                 ##contig=<ID=1>\n\
                 ##contig=<ID=2>\n\
                 #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA001\n";
    let (_dir, path) = write_temp(input.as_bytes());
    let output = vcf_lint()
        .args(["header", &path])
        .output()
        .expect("run header");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["version"], serde_json::json!("VCFv4.2"));
    assert_eq!(json["meta_entries"]["contig"], serde_json::json!(2));
    assert_eq!(json["sample_names"], serde_json::json!(["NA001"]));
    assert_eq!(json["header_seen"], serde_json::json!(true));
}
