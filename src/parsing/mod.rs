//! Header grammar and date layout detection.
//!
//! These pieces are shared by the parser and the format detector:
//! - [`whatsapp`] - header-line pattern and [`DateLayout`] readings
//! - [`detect`] - shrinking-candidate-set layout detection

pub mod detect;
pub mod whatsapp;

pub use detect::{Confidence, Detection, LayoutDetector, detect_layout};
pub use whatsapp::{DateLayout, HEADER_PATTERN, HeaderLine, is_header_line};
