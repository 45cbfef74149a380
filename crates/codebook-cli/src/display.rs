//! Card display for classification results.
//!
//! One section per category group, each category followed by its evidence
//! (or the "no relevant content" default). A degraded result prints the
//! failure instead of the sections.

use codebook_core::evidence::NO_CONTENT;
use codebook_core::{ArchiveEntry, ClassificationResult, Evidence, GroupKind};

const NAME_WIDTH: usize = 38;

/// Render a result as a vertical card.
pub fn render_card(title: &str, result: &ClassificationResult) -> String {
    let mut out = format!("=== {title} ===\n\n");

    if let Some(message) = result.error_message() {
        out.push_str(&format!("ERROR\n  {message}\n"));
        return out;
    }

    for kind in GroupKind::ALL {
        let group = result.group(kind);
        if group.is_empty() {
            continue;
        }
        out.push_str(kind.title());
        out.push('\n');
        for (name, evidence) in group.iter() {
            for (i, line) in evidence_lines(evidence).into_iter().enumerate() {
                let label = if i == 0 { name } else { "" };
                out.push_str(&format!("  {label:<width$} {line}\n", width = NAME_WIDTH));
            }
        }
        out.push('\n');
    }

    out
}

fn evidence_lines(evidence: &Evidence) -> Vec<&str> {
    if evidence.is_empty() {
        vec![NO_CONTENT]
    } else {
        evidence.items().iter().map(String::as_str).collect()
    }
}

/// One line per archive entry: index, timestamp, subject, status.
pub fn render_history(entries: &[ArchiveEntry]) -> String {
    if entries.is_empty() {
        return "No archived results.\n".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let status = if e.result.is_error() { "error" } else { "ok" };
            format!(
                "{i:>4}  {}  {:<24} {status}\n",
                e.archived_at.format("%Y-%m-%d %H:%M:%S"),
                e.subject
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use codebook_core::CodeMap;

    fn sample() -> ClassificationResult {
        let mut predetermined = CodeMap::new();
        predetermined.insert(
            "Grammar Support",
            Evidence::from_items(["verb tenses", "plurals"]),
        );
        predetermined.insert("Student Engagement", Evidence::none());
        predetermined.insert(
            "Teacher Experience",
            Evidence::from_items(["No evidence found."]),
        );
        ClassificationResult {
            predetermined,
            ..Default::default()
        }
    }

    #[test]
    fn card_lists_evidence_under_group_heading() {
        let card = render_card("Maria", &sample());
        assert!(card.starts_with("=== Maria ===\n"));
        assert!(card.contains("Predetermined Codes\n"));
        assert!(card.contains("verb tenses\n"));
        assert!(card.contains("plurals\n"));
        assert!(card.contains(&format!(
            "  {:<width$} {NO_CONTENT}",
            "Student Engagement",
            width = NAME_WIDTH
        )));
        assert!(card.contains(&format!(
            "  {:<width$} {NO_CONTENT}",
            "Teacher Experience",
            width = NAME_WIDTH
        )));
        assert!(!card.contains("no evidence found"));
        assert!(card.contains(&format!("  {:<width$} plurals\n", "", width = NAME_WIDTH)));
        // Empty groups are skipped.
        assert!(!card.contains("Emergent Codes"));
        assert!(!card.contains("Custom Codes"));
    }

    #[test]
    fn card_shows_failure_prominently() {
        let card = render_card("Maria", &ClassificationResult::failure("timeout"));
        assert!(card.contains("ERROR\n  Analysis failed: timeout"));
        assert!(!card.contains("Predetermined Codes"));
    }

    #[test]
    fn history_lines() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        let entries = vec![
            ArchiveEntry {
                subject: "Maria".into(),
                archived_at: at,
                result: sample(),
            },
            ArchiveEntry {
                subject: "Leo".into(),
                archived_at: at,
                result: ClassificationResult::failure("x"),
            },
        ];
        let text = render_history(&entries);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("   0  2026-10-16 09:30:00  Maria"));
        assert!(lines[0].ends_with("ok"));
        assert!(lines[1].ends_with("error"));
        assert_eq!(render_history(&[]), "No archived results.\n");
    }
}
