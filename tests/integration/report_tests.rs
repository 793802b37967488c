use clap::Parser;
use linedupe::cli::Cli;
use linedupe::run_app;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run_with_format(root: &Path, content: &str, format: &str) -> String {
    let input_dir = root.join("input");
    let output_dir = root.join("output");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("chat.txt"), content).unwrap();

    let cli = Cli::parse_from([
        "linedupe".to_string(),
        "chat.txt".to_string(),
        "-q".to_string(),
        "-k".to_string(),
        "1".to_string(),
        "--report-format".to_string(),
        format.to_string(),
        "--input-dir".to_string(),
        input_dir.to_string_lossy().to_string(),
        "--output-dir".to_string(),
        output_dir.to_string_lossy().to_string(),
    ]);
    run_app(cli).unwrap();

    let extension = match format {
        "json" => "json",
        "csv" => "csv",
        _ => "txt",
    };
    fs::read_to_string(output_dir.join(format!("chat_duplicates_report.{extension}"))).unwrap()
}

const INPUT: &str = "x\ny\nx\ny\ny\nz\n";

#[test]
fn test_text_report_ranks_by_occurrences() {
    let dir = tempdir().unwrap();
    let report = run_with_format(dir.path(), INPUT, "text");

    assert!(report.starts_with("=== DUPLICATE 1-LINE GROUPS REPORT ==="));
    assert!(report.contains("Total unique groups that had duplicates: 2"));
    assert!(report.contains("Total duplicate groups removed: 3"));

    let first = report.find("--- DUPLICATE GROUP #1 (appeared 3 times) ---").unwrap();
    let second = report.find("--- DUPLICATE GROUP #2 (appeared 2 times) ---").unwrap();
    assert!(first < second);
    assert!(report.contains("DUPLICATES (removed 2 copies):"));
}

#[test]
fn test_json_report_structure() {
    let dir = tempdir().unwrap();
    let report = run_with_format(dir.path(), INPUT, "json");
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(value["summary"]["group_size"], 1);
    assert_eq!(value["summary"]["hash_algorithm"], "sha256");
    assert_eq!(value["summary"]["total_lines"], 6);
    assert_eq!(value["summary"]["kept_lines"], 3);
    assert_eq!(value["summary"]["duplicate_groups_removed"], 3);

    let groups = value["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["occurrences"], 3);
    assert_eq!(groups[0]["original"]["lines"][0], "y");
    assert_eq!(groups[0]["original"]["first_line"], 2);
    assert_eq!(groups[0]["duplicates"][0]["first_line"], 4);
    assert_eq!(groups[1]["original"]["lines"][0], "x");
    assert_eq!(groups[0]["fingerprint"].as_str().unwrap().len(), 64);
}

#[test]
fn test_csv_report_rows() {
    let dir = tempdir().unwrap();
    let report = run_with_format(dir.path(), INPUT, "csv");

    let mut reader = csv::Reader::from_reader(report.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["group_id", "fingerprint", "role", "occurrence", "first_line", "content"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    // 3 rows for "y", 2 rows for "x"
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][2], "original");
    assert_eq!(&rows[0][5], "y");
    assert_eq!(&rows[3][0], "2");
    assert_eq!(&rows[3][5], "x");
}
