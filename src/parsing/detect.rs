//! Date layout auto-detection.
//!
//! The detector keeps a shrinking set of candidate [`DateLayout`]s. Every
//! header line inside the scan budget is re-parsed against the candidates
//! that are still alive:
//!
//! - one survivor: that layout wins immediately;
//! - no survivor: the line carries no usable evidence and is ignored;
//! - several survivors: they become the new candidate set.
//!
//! If the budget runs out while the set is still ambiguous, the first
//! candidate in priority order is used and a warning is logged.

use tracing::{debug, info, warn};

use super::whatsapp::{DateLayout, HeaderLine, strip_bom};
use crate::error::{Result, ShelfError};

/// How a layout was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Exactly one layout fit the evidence.
    Unambiguous,
    /// Several layouts still fit when the scan budget ran out; the
    /// highest-priority one was taken.
    Fallback,
    /// The layout was configured, no detection ran.
    Explicit,
}

/// Outcome of layout detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// The chosen layout
    pub layout: DateLayout,
    /// Whether the choice was forced by the evidence
    pub confidence: Confidence,
    /// Lines examined before deciding
    pub lines_scanned: usize,
}

impl Detection {
    /// Returns `true` if the layout was picked by the priority fallback.
    pub fn is_fallback(&self) -> bool {
        self.confidence == Confidence::Fallback
    }
}

/// Incremental layout detector.
///
/// Feed lines with [`observe`](Self::observe) until it returns a layout or
/// the budget is spent, then call [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct LayoutDetector {
    candidates: Vec<DateLayout>,
    budget: usize,
    scanned: usize,
    header_lines: usize,
    evidence_lines: usize,
}

impl LayoutDetector {
    /// Creates a detector that examines at most `budget` lines.
    pub fn new(budget: usize) -> Self {
        Self {
            candidates: DateLayout::all().to_vec(),
            budget,
            scanned: 0,
            header_lines: 0,
            evidence_lines: 0,
        }
    }

    /// Returns `true` once the scan budget is used up.
    pub fn is_exhausted(&self) -> bool {
        self.scanned >= self.budget
    }

    /// Layouts still consistent with every informative line seen so far.
    pub fn candidates(&self) -> &[DateLayout] {
        &self.candidates
    }

    /// Examines one line. Returns the layout as soon as it is unambiguous.
    pub fn observe(&mut self, line: &str) -> Option<DateLayout> {
        if self.is_exhausted() {
            return None;
        }
        self.scanned += 1;

        if line.trim().is_empty() {
            return None;
        }
        let header = HeaderLine::parse(line)?;
        self.header_lines += 1;

        let survivors: Vec<DateLayout> = self
            .candidates
            .iter()
            .copied()
            .filter(|layout| header.timestamp(*layout).is_some())
            .collect();

        match survivors.as_slice() {
            [] => {
                debug!(
                    line = self.scanned,
                    date = header.date,
                    "header date fits no remaining layout, ignored"
                );
                None
            }
            [layout] => Some(*layout),
            _ => {
                debug!(
                    line = self.scanned,
                    date = header.date,
                    remaining = survivors.len(),
                    "header date is ambiguous"
                );
                self.evidence_lines += 1;
                self.candidates = survivors;
                None
            }
        }
    }

    /// Settles on the highest-priority surviving layout.
    ///
    /// Fails with [`ShelfError::FormatUndetected`] if no header line gave any
    /// evidence at all.
    pub fn finish(self) -> Result<Detection> {
        let undetected = ShelfError::FormatUndetected {
            scanned_lines: self.scanned,
            header_lines: self.header_lines,
        };
        if self.evidence_lines == 0 {
            return Err(undetected);
        }
        let layout = self.candidates.first().copied().ok_or(undetected)?;

        warn!(
            %layout,
            candidates = self.candidates.len(),
            lines_scanned = self.scanned,
            "date layout still ambiguous after scan budget, using highest-priority candidate"
        );
        Ok(Detection {
            layout,
            confidence: Confidence::Fallback,
            lines_scanned: self.scanned,
        })
    }
}

/// Detects the date layout used by an export.
///
/// # Example
///
/// ```rust
/// use chatshelf::parsing::{DateLayout, detect_layout};
///
/// let export = "03/04/23, 10:00 - Alice: ambiguous\n25/12/23, 11:00 - Bob: resolves it";
/// let detection = detect_layout(export, 50)?;
/// assert_eq!(detection.layout, DateLayout::DayFirstShortYear);
/// # Ok::<(), chatshelf::ShelfError>(())
/// ```
pub fn detect_layout(content: &str, scan_budget: usize) -> Result<Detection> {
    let mut detector = LayoutDetector::new(scan_budget);

    for line in strip_bom(content).lines() {
        if detector.is_exhausted() {
            break;
        }
        if let Some(layout) = detector.observe(line) {
            info!(%layout, lines_scanned = detector.scanned, "detected date layout");
            return Ok(Detection {
                layout,
                confidence: Confidence::Unambiguous,
                lines_scanned: detector.scanned,
            });
        }
    }

    detector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unambiguous_day_first() {
        let detection = detect_layout("25/12/23, 14:30 - Alice: Hi", 50).unwrap();
        assert_eq!(detection.layout, DateLayout::DayFirstShortYear);
        assert_eq!(detection.confidence, Confidence::Unambiguous);
        assert_eq!(detection.lines_scanned, 1);
    }

    #[test]
    fn test_unambiguous_month_first_long_year() {
        let detection = detect_layout("12/25/2023, 14:30 - Alice: Hi", 50).unwrap();
        assert_eq!(detection.layout, DateLayout::MonthFirstLongYear);
    }

    #[test]
    fn test_ambiguous_then_resolved() {
        let export = "\
03/04/23, 10:00 - Alice: one
04/05/23, 10:00 - Bob: two
25/12/23, 10:00 - Alice: three";
        let detection = detect_layout(export, 50).unwrap();
        assert_eq!(detection.layout, DateLayout::DayFirstShortYear);
        assert_eq!(detection.confidence, Confidence::Unambiguous);
        assert_eq!(detection.lines_scanned, 3);
    }

    #[test]
    fn test_ambiguous_resolved_month_first() {
        let export = "03/04/23, 10:00 - Alice: one\n12/13/23, 10:00 - Bob: two";
        let detection = detect_layout(export, 50).unwrap();
        assert_eq!(detection.layout, DateLayout::MonthFirstShortYear);
    }

    #[test]
    fn test_ambiguous_falls_back_to_day_first() {
        let export = "03/04/23, 10:00 - Alice: one\n05/06/23, 10:00 - Bob: two";
        let detection = detect_layout(export, 50).unwrap();
        assert_eq!(detection.layout, DateLayout::DayFirstShortYear);
        assert!(detection.is_fallback());
    }

    #[test]
    fn test_budget_stops_before_resolving_line() {
        let mut export = String::new();
        for _ in 0..5 {
            export.push_str("03/04/23, 10:00 - Alice: ambiguous\n");
        }
        export.push_str("12/13/23, 10:00 - Bob: month-first evidence\n");

        let within = detect_layout(&export, 6).unwrap();
        assert_eq!(within.layout, DateLayout::MonthFirstShortYear);
        assert!(!within.is_fallback());

        let beyond = detect_layout(&export, 5).unwrap();
        assert_eq!(beyond.layout, DateLayout::DayFirstShortYear);
        assert!(beyond.is_fallback());
        assert_eq!(beyond.lines_scanned, 5);
    }

    #[test]
    fn test_blank_and_continuation_lines_are_skipped() {
        let export = "\nsome preamble\n\n03/04/23, 10:00 - Alice: one\n  continued\n31/01/23, 10:00 - Bob: two";
        let detection = detect_layout(export, 50).unwrap();
        assert_eq!(detection.layout, DateLayout::DayFirstShortYear);
    }

    #[test]
    fn test_unparseable_header_is_ignored() {
        let export = "99/99/23, 10:00 - Alice: nonsense\n13/01/23, 10:00 - Bob: fine";
        let detection = detect_layout(export, 50).unwrap();
        assert_eq!(detection.layout, DateLayout::DayFirstShortYear);
    }

    #[test]
    fn test_no_headers_is_undetected() {
        let err = detect_layout("hello\nworld\n", 50).unwrap_err();
        assert!(err.is_format_undetected());
        match err {
            ShelfError::FormatUndetected {
                scanned_lines,
                header_lines,
            } => {
                assert_eq!(scanned_lines, 2);
                assert_eq!(header_lines, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_only_unparseable_headers_is_undetected() {
        let err = detect_layout("99/99/23, 10:00 - Alice: nonsense", 50).unwrap_err();
        assert!(err.is_format_undetected());
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let detection = detect_layout("\u{feff}25/12/23, 14:30 - Alice: Hi", 50).unwrap();
        assert_eq!(detection.layout, DateLayout::DayFirstShortYear);
        assert_eq!(detection.lines_scanned, 1);
    }

    #[test]
    fn test_empty_input_is_undetected() {
        assert!(detect_layout("", 50).unwrap_err().is_format_undetected());
    }

    #[test]
    fn test_detector_candidates_shrink() {
        let mut detector = LayoutDetector::new(10);
        assert_eq!(detector.candidates().len(), 4);
        assert_eq!(detector.observe("03/04/23, 10:00 - A: x"), None);
        assert_eq!(
            detector.candidates(),
            &[DateLayout::DayFirstShortYear, DateLayout::MonthFirstShortYear]
        );
        assert_eq!(
            detector.observe("03/14/23, 10:00 - A: x"),
            Some(DateLayout::MonthFirstShortYear)
        );
    }
}
