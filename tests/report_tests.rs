use io_insights::loader::{JobInfo, TraceSummary};
use io_insights::report::html::generate_html;
use io_insights::report::render::finding_lines;
use io_insights::report::svg::generate_svg;
use io_insights::report::{csv, html, svg, Report, ReportOptions};
use io_insights::rules::{Category, Finding, Recommendation, Severity, Target};

fn sample_report() -> Report {
    let summary = TraceSummary {
        job: JobInfo {
            job_id: Some(4887),
            nprocs: Some(64),
            start_time: Some(1700000000),
            end_time: Some(1700000600),
            executable: Some("/home/user/bin/simulation".to_string()),
            hints: vec!["cb_nodes=4".to_string()],
        },
        compute_nodes: Some(8),
        ..Default::default()
    };

    let findings = vec![
        Finding::new(
            "P06",
            Target::Developer,
            Severity::High,
            Category::Operation,
            "Application issues a high number (15000) of small write requests",
        )
        .with_details(vec![
            "15000 (75.00%) small write requests are to \"output.dat\"".to_string(),
        ])
        .with_recommendations(vec![Recommendation::with_snippet(
            "Consider using collective I/O calls",
            "MPI_File_write_all(fh, buf, count, type, &status);",
        )]),
        Finding::new(
            "P17",
            Target::Developer,
            Severity::High,
            Category::Metadata,
            "There are 3 ranks where metadata operations take over 30 seconds",
        ),
        Finding::new(
            "M05",
            Target::Developer,
            Severity::Ok,
            Category::Operation,
            "Application uses MPI-IO and write data using 900 (90.00%) collective operations",
        ),
    ];

    Report::new("/data/run-42.darshan.json", &summary, findings)
}

#[test]
fn test_report_totals() {
    let report = sample_report();

    assert_eq!(report.critical_count(), 2);
    assert_eq!(report.warning_count(), 0);
    assert_eq!(report.recommendation_count(), 1);
    assert_eq!(report.codes(), vec!["P06", "P17", "M05"]);
}

#[test]
fn test_issues_only_preserves_fired_codes() {
    let report = sample_report();
    let codes_before = report.codes();

    // issues_only changes rendering, never the findings themselves
    let options = ReportOptions {
        issues_only: true,
        ..Default::default()
    };
    let lines = finding_lines(&report.findings[0], &options);
    assert!(lines.iter().all(|line| !line.contains("collective I/O")));

    assert_eq!(report.codes(), codes_before);
}

#[test]
fn test_html_page_contains_all_panels() {
    let report = sample_report();
    let page = generate_html(&report, &ReportOptions::default());

    assert!(page.contains("<h2>METADATA</h2>"));
    assert!(page.contains("<h2>OPERATIONS</h2>"));
    assert!(page.contains("small write requests"));
    assert!(page.contains("metadata operations"));
    assert!(page.contains("4887"));
}

#[test]
fn test_svg_panel_contains_findings() {
    let report = sample_report();
    let svg_content = generate_svg(&report, &ReportOptions::default());

    assert!(svg_content.starts_with("<svg"));
    assert!(svg_content.contains("METADATA"));
    assert!(svg_content.contains("OPERATIONS"));
    assert!(svg_content.contains("small write requests"));
}

#[test]
fn test_verbose_html_embeds_snippet() {
    let report = sample_report();

    let plain = generate_html(&report, &ReportOptions::default());
    assert!(!plain.contains("MPI_File_write_all"));

    let verbose = generate_html(
        &report,
        &ReportOptions {
            verbose: true,
            ..Default::default()
        },
    );
    assert!(verbose.contains("MPI_File_write_all"));
}

#[test]
fn test_exporters_write_files() {
    let report = sample_report();
    let options = ReportOptions::default();
    let temp_dir = tempfile::tempdir().unwrap();

    let html_path = temp_dir.path().join("report.html");
    html::write_html(&report, &options, &html_path).unwrap();
    assert!(html_path.exists());

    let svg_path = temp_dir.path().join("report.svg");
    svg::write_svg(&report, &options, &svg_path).unwrap();
    assert!(svg_path.exists());

    let csv_path = temp_dir.path().join("report.csv");
    csv::write_csv(&report, &csv_path).unwrap();
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content, "code\nP06\nP17\nM05\n");
}

#[test]
fn test_exporters_reject_directory_paths() {
    let report = sample_report();
    let options = ReportOptions::default();
    let temp_dir = tempfile::tempdir().unwrap();

    assert!(html::write_html(&report, &options, temp_dir.path()).is_err());
    assert!(svg::write_svg(&report, &options, temp_dir.path()).is_err());
    assert!(csv::write_csv(&report, temp_dir.path()).is_err());
}
