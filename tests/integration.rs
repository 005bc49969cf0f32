//! Integration tests for the full export pipeline with real files.

use std::fs;
use std::path::{Path, PathBuf};

use chatshelf::prelude::*;
use tempfile::{TempDir, tempdir};

const FAMILY_CHAT: &str = "\
02/01/23, 08:55 - Messages and calls are end-to-end encrypted.
02/01/23, 09:00 - Mum: Happy new year everyone!
02/01/23, 09:02 - Dad: Same to you
and a second line
03/01/23, 19:45 - Alice: <Media omitted>
04/01/23, 18:30 - Bob: Dinner: Friday at 19:00?
09/01/23, 07:10 - Mum: Safe travels
31/01/23, 23:59 - Alice: End of month
01/02/23, 00:00 - Bob: Start of month";

fn write_export(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn daily_export(days: u64) -> String {
    let first = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..days)
        .map(|i| {
            let day = first + chrono::Days::new(i);
            format!("{}, 12:00 - Alice: day {}", day.format("%d/%m/%Y"), i)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn test_family_chat_records() {
    let messages = WhatsAppParser::new().parse_str(FAMILY_CHAT).unwrap();

    assert_eq!(messages.len(), 7);
    assert_eq!(messages[0].sender, "Mum");
    assert_eq!(messages[1].content, "Same to you\nand a second line");
    assert!(messages[2].is_media);
    assert_eq!(messages[3].sender, "Bob");
    assert_eq!(messages[3].content, "Dinner: Friday at 19:00?");
}

#[test]
fn test_n_headers_give_n_records_in_order() {
    let export = daily_export(250);
    let messages = WhatsAppParser::new().parse_str(&export).unwrap();
    assert_eq!(messages.len(), 250);
    for (i, msg) in messages.iter().enumerate() {
        assert_eq!(msg.content, format!("day {i}"));
    }
}

#[test]
fn test_month_first_export() {
    let export = "\
01/02/23, 10:00 - Alice: ambiguous
01/31/23, 10:00 - Bob: only month-first";
    let parsed = WhatsAppParser::new().parse_export(export).unwrap();
    assert_eq!(parsed.detection.layout, DateLayout::MonthFirstShortYear);
    assert_eq!(parsed.messages[0].date().to_string(), "2023-01-02");
}

#[test]
fn test_long_year_export() {
    let parsed = WhatsAppParser::new()
        .parse_export("25/12/2023, 14:30 - Alice: Merry Christmas")
        .unwrap();
    assert_eq!(parsed.detection.layout, DateLayout::DayFirstLongYear);
}

// =========================================================================
// Full pipeline
// =========================================================================

#[test]
fn test_week_export_file_names() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "family.txt", FAMILY_CHAT);
    let out = dir.path().join("out");

    let summary = process_export(&input, "Family", &out, Granularity::Week, &ShelfConfig::default()).unwrap();

    assert_eq!(summary.period, Period::Week);
    assert_eq!(summary.message_count, 7);
    assert!(summary.is_complete());
    assert_eq!(
        file_names(&out),
        [
            "2023-01-02_to_2023-01-04.md",
            "2023-01-09_to_2023-01-09.md",
            "2023-01-30_to_2023-02-01.md",
        ]
    );
}

#[test]
fn test_month_export_file_names() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "family.txt", FAMILY_CHAT);
    let out = dir.path().join("out");

    process_export(&input, "Family", &out, Granularity::Month, &ShelfConfig::default()).unwrap();

    assert_eq!(
        file_names(&out),
        ["2023-01-01_to_2023-01-31.md", "2023-02-01_to_2023-02-01.md"]
    );
}

#[test]
fn test_day_export_file_names() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "family.txt", FAMILY_CHAT);
    let out = dir.path().join("out");

    process_export(&input, "Family", &out, Granularity::Day, &ShelfConfig::default()).unwrap();

    assert_eq!(
        file_names(&out),
        [
            "2023-01-02.md",
            "2023-01-03.md",
            "2023-01-04.md",
            "2023-01-09.md",
            "2023-01-31.md",
            "2023-02-01.md",
        ]
    );
}

#[test]
fn test_document_content() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "family.txt", FAMILY_CHAT);
    let out = dir.path().join("out");

    process_export(&input, "Family", &out, Granularity::Week, &ShelfConfig::default()).unwrap();

    let body = fs::read_to_string(out.join("2023-01-02_to_2023-01-04.md")).unwrap();
    assert!(body.starts_with(
        "# Conversation: Family\n## Period: 2023-01-02 09:00 to 2023-01-04 18:30\n\n---\n\n"
    ));
    assert!(body.contains("**[2023-01-02 09:02] Dad:**\n```\nSame to you\n  and a second line\n```\n\n"));
    assert!(body.contains("**[2023-01-03 19:45] Alice:**\n```\n[[MEDIA FILE]]\n```"));
    assert!(!body.contains("<Media omitted>"));
    assert!(!body.contains("end-to-end encrypted"));
}

#[test]
fn test_auto_picks_week_for_long_history() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "long.txt", &daily_export(600));
    let out = dir.path().join("out");

    let summary = process_export(&input, "Long", &out, Granularity::Auto, &ShelfConfig::default()).unwrap();

    assert_eq!(summary.message_count, 600);
    assert_eq!(summary.period, Period::Week);
    assert!(summary.written.len() <= 400);
    assert_eq!(file_names(&out).len(), summary.written.len());
}

#[test]
fn test_auto_picks_day_for_short_history() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "short.txt", &daily_export(30));
    let out = dir.path().join("out");

    let summary = process_export(&input, "Short", &out, Granularity::Auto, &ShelfConfig::default()).unwrap();
    assert_eq!(summary.period, Period::Day);
    assert_eq!(summary.written.len(), 30);
}

#[test]
fn test_auto_respects_custom_limit() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "short.txt", &daily_export(100));
    let out = dir.path().join("out");
    let config = ShelfConfig::new().with_max_files(5);

    let summary = process_export(&input, "Short", &out, Granularity::Auto, &config).unwrap();
    assert_eq!(summary.period, Period::Month);
    assert_eq!(summary.written.len(), 4);
}

#[test]
fn test_explicit_day_over_limit_still_written() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "short.txt", &daily_export(12));
    let out = dir.path().join("out");
    let config = ShelfConfig::new().with_max_files(3);

    let summary = process_export(&input, "Short", &out, Granularity::Day, &config).unwrap();
    assert_eq!(summary.period, Period::Day);
    assert_eq!(summary.written.len(), 12);
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "family.txt", FAMILY_CHAT);
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    process_export(&input, "Family", &first, Granularity::Auto, &ShelfConfig::default()).unwrap();
    process_export(&input, "Family", &second, Granularity::Auto, &ShelfConfig::default()).unwrap();

    let names = file_names(&first);
    assert_eq!(names, file_names(&second));
    for name in names {
        let a = fs::read(first.join(&name)).unwrap();
        let b = fs::read(second.join(&name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn test_custom_media_placeholder() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "family.txt", FAMILY_CHAT);
    let out = dir.path().join("out");
    let config = ShelfConfig::new().with_media_placeholder("(attachment)");

    let summary = process_export(&input, "Family", &out, Granularity::Day, &config).unwrap();
    assert_eq!(summary.media_count, 1);

    let body = fs::read_to_string(out.join("2023-01-03.md")).unwrap();
    assert!(body.contains("```\n(attachment)\n```"));
}

#[test]
fn test_existing_output_folder_is_reused() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "family.txt", FAMILY_CHAT);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("notes.txt"), "keep me").unwrap();

    process_export(&input, "Family", &out, Granularity::Month, &ShelfConfig::default()).unwrap();

    assert_eq!(fs::read_to_string(out.join("notes.txt")).unwrap(), "keep me");
    assert_eq!(file_names(&out).len(), 3);
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn test_undetected_format_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = write_export(&dir, "notes.txt", "just some notes\nnothing chat-like");
    let out = dir.path().join("out");

    let err = process_export(&input, "Notes", &out, Granularity::Auto, &ShelfConfig::default()).unwrap_err();
    assert!(err.is_format_undetected());
    assert!(!out.exists());
}

#[test]
fn test_bad_date_after_detection_aborts() {
    let dir = tempdir().unwrap();
    let export = "25/12/23, 10:00 - Alice: fine\n12/25/23, 10:00 - Bob: wrong order";
    let input = write_export(&dir, "mixed.txt", export);
    let out = dir.path().join("out");

    let err = process_export(&input, "Mixed", &out, Granularity::Day, &ShelfConfig::default()).unwrap_err();
    match err {
        ShelfError::DateParse { line_number, .. } => assert_eq!(line_number, 2),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!out.exists());
}
