//! Whole-file fixtures: the VCF 4.1 specification example end to end, the
//! record consumer callback, and the partial-line semantics switch.

mod common;

use common::errors_of;
use std::cell::RefCell;
use std::rc::Rc;
use vcf_lint_core::{codes, validate_str, Validator};

/// The canonical example file from the VCF 4.1 specification, with every
/// referenced contig, FILTER, INFO, and FORMAT entry declared.
const SPEC_EXAMPLE: &str = "\
##fileformat=VCFv4.1
##fileDate=20090805
##source=myImputationProgramV3.1
##reference=file:///seq/references/1000GenomesPilot-NCBI36.fasta
##contig=<ID=20,length=62435964,assembly=B36,md5=f126cdf8a6e0c7f379d618ff66beb2da,species=\"Homo sapiens\",taxonomy=x>
##phasing=partial
##INFO=<ID=NS,Number=1,Type=Integer,Description=\"Number of Samples With Data\">
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">
##INFO=<ID=AF,Number=.,Type=Float,Description=\"Allele Frequency\">
##INFO=<ID=AA,Number=1,Type=String,Description=\"Ancestral Allele\">
##INFO=<ID=DB,Number=0,Type=Flag,Description=\"dbSNP membership, build 129\">
##INFO=<ID=H2,Number=0,Type=Flag,Description=\"HapMap2 membership\">
##FILTER=<ID=q10,Description=\"Quality below 10\">
##FILTER=<ID=s50,Description=\"Less than 50% of samples have data\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=GQ,Number=1,Type=Integer,Description=\"Genotype Quality\">
##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read Depth\">
##FORMAT=<ID=HQ,Number=2,Type=Integer,Description=\"Haplotype Quality\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA00001\tNA00002\tNA00003
20\t14370\trs6054257\tG\tA\t29\tPASS\tNS=3;DP=14;AF=0.5;DB;H2\tGT:GQ:DP:HQ\t0|0:48:1:51,51\t1|0:48:8:51,51\t0/1:43:5:.,.
20\t17330\t.\tT\tA\t3\tq10\tNS=3;DP=11;AF=0.017\tGT:GQ:DP:HQ\t0|0:49:3:58,50\t0|1:3:5:65,3\t0/0:41:3
20\t1110696\trs6040355\tA\tG,T\t67\tPASS\tNS=2;DP=10;AF=0.333,0.667;AA=T;DB\tGT:GQ:DP:HQ\t1|2:21:6:23,27\t2|1:2:0:18,2\t2/2:35:4
20\t1230237\t.\tT\t.\t47\tPASS\tNS=3;DP=13;AA=T\tGT:GQ:DP:HQ\t0|0:54:7:56,60\t0|0:48:4:51,51\t0/0:61:2
20\t1234567\tmicrosat1\tGTC\tG,GTCT\t50\tPASS\tNS=3;DP=9;AA=G\tGT:GQ:DP\t0/1:35:4\t0/2:17:2\t1/1:40:3
";

#[test]
fn spec_example_is_clean() {
    let report = validate_str(SPEC_EXAMPLE);
    assert!(report.ok, "{:?}", report.diagnostics);
    assert!(
        report.diagnostics.is_empty(),
        "expected a fully clean report: {:?}",
        report.diagnostics
    );
    assert_eq!(report.record_count, 5);
    assert_eq!(
        report.source.sample_names,
        vec!["NA00001", "NA00002", "NA00003"]
    );
    assert_eq!(report.source.version.unwrap().as_str(), "VCFv4.1");
    assert_eq!(report.source.category_counts().get("INFO"), Some(&6));
}

#[test]
fn spec_example_source_lookups() {
    let report = validate_str(SPEC_EXAMPLE);
    assert!(report.source.contig_declared("20"));
    assert!(report.source.filter_declared("q10"));
    assert!(report.source.has_id("FORMAT", "HQ"));
    assert!(report.source.info_typed("NS").is_some());
    assert_eq!(report.source.expected_columns(), 12);
}

#[test]
fn record_consumer_sees_every_accepted_record() {
    let seen: Rc<RefCell<Vec<(String, u64)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut validator = Validator::builder()
        .filename("example.vcf")
        .on_record(Box::new(move |record: &vcf_lint_core::Record| {
            sink.borrow_mut()
                .push((record.chromosome.clone(), record.position));
        }))
        .build();
    validator.feed(SPEC_EXAMPLE.as_bytes());
    let report = validator.finish();
    assert!(report.ok);
    assert_eq!(report.source.filename, "example.vcf");
    let seen = seen.borrow();
    assert_eq!(seen.len(), 5);
    assert_eq!(seen[0], ("20".to_string(), 14370));
    assert_eq!(seen[4], ("20".to_string(), 1234567));
}

#[test]
fn partial_line_semantics_are_off_by_default() {
    // A line with a grammar error reports only the grammar error; the
    // fields that did parse are not semantically checked.
    let input = "##fileformat=VCFv4.1\n\
                 ##reference=file:///ref.fa\n\
                 #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                 chrX\t100\t.\tA\tG\t.\t.\tDP=bad\n";
    let report = validate_str(input);
    assert_eq!(errors_of(&report).len(), 1);
    assert!(
        !report
            .diagnostics
            .iter()
            .any(|d| d.id == codes::UNDECLARED_CONTIG),
        "semantic checks must not run on the failed line: {:?}",
        report.diagnostics
    );
    assert_eq!(report.record_count, 0, "the failed record is not accepted");
}

#[test]
fn partial_line_semantics_can_be_enabled() {
    let input = "##fileformat=VCFv4.1\n\
                 ##reference=file:///ref.fa\n\
                 #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                 chrX\t100\t.\tA\tG\t.\t.\tDP=bad\n";
    let mut validator = Validator::builder()
        .semantics_after_syntax_error(true)
        .build();
    validator.feed(input.as_bytes());
    let report = validator.finish();
    assert_eq!(errors_of(&report).len(), 1);
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.id == codes::UNDECLARED_CONTIG),
        "{:?}",
        report.diagnostics
    );
    assert_eq!(report.record_count, 0, "the record is still not accepted");
}

#[test]
fn reader_path_matches_in_memory_path() {
    let reader = std::io::Cursor::new(SPEC_EXAMPLE.as_bytes());
    let from_reader =
        vcf_lint_core::validate_reader(reader, "example.vcf").expect("reader path succeeds");
    let in_memory = validate_str(SPEC_EXAMPLE);
    assert_eq!(from_reader.diagnostics, in_memory.diagnostics);
    assert_eq!(from_reader.record_count, in_memory.record_count);
    assert_eq!(from_reader.source.filename, "example.vcf");
}

#[test]
fn report_serializes_to_json() {
    let report = validate_str(SPEC_EXAMPLE);
    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["ok"], serde_json::json!(true));
    assert_eq!(json["record_count"], serde_json::json!(5));
    assert_eq!(json["source"]["version"], serde_json::json!("VCFv4.1"));
    assert_eq!(
        json["source"]["sample_names"][0],
        serde_json::json!("NA00001")
    );
}

#[test]
fn messy_file_reports_everything_in_source_order() {
    let input = "##fileformat=VCFv4.1\n\
                 ##INFO=<ID=DP,Number=1,Type=Integer,Description=\"depth\">\n\
                 ##INFO=<ID=DP,Number=1,Type=Integer,Description=\"dup\">\n\
                 #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                 1\t100\t.\tA\tG\t.\t.\t.\n\
                 1\t90\t.\tA\tG\t.\t.\t.\n\
                 1\tbad\t.\tA\tG\t.\t.\t.\n";
    let report = validate_str(input);
    let codes_seen: Vec<&str> = report.diagnostics.iter().map(|d| d.id.as_ref()).collect();
    assert_eq!(
        codes_seen,
        vec![
            codes::META_DUPLICATE_ID,     // line 3
            codes::REFERENCE_RECOMMENDED, // line 4
            codes::UNDECLARED_CONTIG,     // line 5
            codes::POSITION_ORDER,        // line 6
            codes::BODY_POSITION,         // line 7
        ],
        "{:?}",
        report.diagnostics
    );
    assert!(!report.ok);
    assert_eq!(report.record_count, 2);
}
