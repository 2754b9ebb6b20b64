//! Property-based tests for the intake → report → export pipeline

use gedreport_core::intake::MAX_FILE_SIZE;
use gedreport_core::normalize::{POSSIBLE_LABEL, PROBABLE_LABEL};
use gedreport_core::report::{UNKNOWN_DATE, UNKNOWN_FIRST_NAME, UNKNOWN_LAST_NAME};
use gedreport_core::{
    export, export_pdf, format_report, validate, AnalysisResult, CandidateDuplicate, FileHandle,
    FileSource, IntakeLimits, PageGeometry, RejectReason, ReportDocument, ValidationOutcome,
    REPORT_TITLE,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ============================================================
// Strategies
// ============================================================

fn name() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Z][a-z]{0,12}")
}

fn date() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[1-9] (JAN|FEB|MAR|APR) 1[6-9][0-9]{2}")
}

fn record() -> impl Strategy<Value = CandidateDuplicate> {
    (name(), name(), date(), any::<bool>(), "I[0-9]{1,5}", "I[0-9]{1,5}").prop_map(
        |(first_name, last_name, birth_date, same_parents, a_id, b_id)| CandidateDuplicate {
            first_name,
            last_name,
            birth_date,
            same_parents,
            a_id,
            b_id,
        },
    )
}

fn non_gedcom_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,12}\\.(txt|pdf|zip|gedx|ge|gedcom|jpg)"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ============================================================
    // Intake
    // ============================================================

    #[test]
    fn oversized_files_rejected_with_rounded_size(extra in 1u64..=4 * MAX_FILE_SIZE) {
        let size = MAX_FILE_SIZE + extra;
        let outcome = validate(
            &FileHandle::new("tree.ged", size),
            FileSource::Picker,
            &IntakeLimits::default(),
        );
        match outcome {
            ValidationOutcome::Rejected { reason, display_size_mb, .. } => {
                prop_assert_eq!(reason, RejectReason::TooLarge);
                let expected = (size as f64 / 1_048_576.0 * 10.0).round() / 10.0;
                prop_assert_eq!(display_size_mb, Some(expected));
            }
            ValidationOutcome::Accepted => prop_assert!(false, "accepted {} bytes", size),
        }
    }

    #[test]
    fn dropped_non_gedcom_files_rejected_at_any_size(
        name in non_gedcom_name(),
        size in 0u64..=2 * MAX_FILE_SIZE,
    ) {
        let outcome = validate(
            &FileHandle::new(name, size),
            FileSource::Drop,
            &IntakeLimits::default(),
        );
        prop_assert_eq!(outcome.reason(), Some(RejectReason::UnsupportedExtension));
    }

    // ============================================================
    // Formatter
    // ============================================================

    #[test]
    fn formatter_preserves_order_and_placeholders(
        records in proptest::collection::vec(record(), 1..20),
    ) {
        let report = format_report(&AnalysisResult::Found(records.clone()));
        prop_assert_eq!(report.len(), 2 + records.len() * 4);

        for (i, record) in records.iter().enumerate() {
            let base = 2 + i * 4;
            let identity = &report.lines()[base];
            let expected = format!(
                "- {} {}, born {}",
                record.first_name.as_deref().unwrap_or(UNKNOWN_FIRST_NAME),
                record.last_name.as_deref().unwrap_or(UNKNOWN_LAST_NAME),
                record.birth_date.as_deref().unwrap_or(UNKNOWN_DATE),
            );
            prop_assert_eq!(identity, &expected);
            prop_assert_eq!(
                &report.lines()[base + 2],
                &format!("  (records {} and {})", record.a_id, record.b_id)
            );
            prop_assert!(report.lines()[base + 3].is_empty());
        }
    }

    // ============================================================
    // Export
    // ============================================================

    #[test]
    fn export_carries_each_marker_once_per_record(
        records in proptest::collection::vec(record(), 1..80),
    ) {
        let report = format_report(&AnalysisResult::Found(records.clone()));
        let doc = export(&report, &PageGeometry::a4()).unwrap();
        let text: String = doc.content_lines().collect::<Vec<_>>().join("\n");

        let probable = records.iter().filter(|r| r.same_parents).count();
        let possible = records.len() - probable;
        prop_assert_eq!(text.matches(PROBABLE_LABEL).count(), probable);
        prop_assert_eq!(text.matches(POSSIBLE_LABEL).count(), possible);
        prop_assert!(!text.contains('🔸') && !text.contains('🔹'));
    }

    #[test]
    fn overflowing_documents_span_pages_with_one_header_each(
        lines in 1usize..200,
        line_height in 5u32..30,
        usable in 50u32..400,
    ) {
        let geometry = PageGeometry {
            margin_top: 40.0,
            margin_bottom: 40.0,
            page_height: 80.0 + usable as f64,
            line_height: line_height as f64,
            ..PageGeometry::a4()
        };
        let report = ReportDocument::new(vec!["entry".to_string(); lines]);
        let doc = export(&report, &geometry).unwrap();

        if (lines as u32) * line_height > usable {
            prop_assert!(doc.page_count() > 1);
        }
        prop_assert_eq!(doc.content_lines().count(), lines);

        for page in doc.pages() {
            prop_assert_eq!(page.header.text.as_str(), REPORT_TITLE);
            prop_assert!(page.lines.iter().all(|l| l.text != REPORT_TITLE));
            let used = page.lines.len() as f64 * geometry.line_height;
            prop_assert!(used <= geometry.usable_height());
        }
    }
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn zero_records_export_to_single_page() {
    let report = format_report(&AnalysisResult::from_records(vec![]));
    assert_eq!(report.len(), 1);

    let doc = export(&report, &PageGeometry::a4()).unwrap();
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.pages()[0].header.text, REPORT_TITLE);
    assert_eq!(doc.pages()[0].lines.len(), 1);
}

#[test]
fn three_records_two_probable() {
    let make = |first: &str, same_parents: bool, a: &str, b: &str| CandidateDuplicate {
        first_name: Some(first.into()),
        last_name: Some("Durand".into()),
        birth_date: Some("12 MAR 1850".into()),
        same_parents,
        a_id: a.into(),
        b_id: b.into(),
    };
    let records = vec![
        make("Louis", true, "I1", "I2"),
        make("Marie", false, "I3", "I4"),
        make("Paul", true, "I5", "I6"),
    ];
    let report = format_report(&AnalysisResult::Found(records));

    let classes: Vec<&str> = report
        .lines()
        .iter()
        .map(|l| l.trim_start())
        .filter(|l| l.starts_with('🔸') || l.starts_with('🔹'))
        .collect();
    assert_eq!(
        classes,
        vec![
            "🔸 Probable duplicate (same parents)",
            "🔹 Possible duplicate (different or unknown parents)",
            "🔸 Probable duplicate (same parents)",
        ]
    );
}

#[test]
fn single_overwide_word_is_kept_whole_across_lines() {
    let word = "W".repeat(200);
    let report = ReportDocument::message(word.clone());
    let geometry = PageGeometry::a4();

    let doc = export(&report, &geometry).unwrap();
    let lines: Vec<&str> = doc.content_lines().collect();
    assert!(lines.len() > 1);
    assert_eq!(lines.concat(), word);
    assert!(lines.iter().all(|l| !l.contains(' ')));

    let pdf = export_pdf(&report, &geometry).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}
