//! Page margins and multi-line text wrapping.
//!
//! Wrapping is independent of any particular font: callers pass a closure that
//! measures a string, and get back the lines that fit.
//!
//! ```
//! use avery_labels::layout::{wrap_lines, Align, align_offset};
//! use avery_labels::Pt;
//!
//! let lines = wrap_lines("Jane Doe\n123 Main Street", Pt(60.0), |s| Pt(s.len() as f32 * 6.0));
//! assert_eq!(lines, vec!["Jane Doe", "123 Main", "Street"]);
//!
//! let x = align_offset(Align::Center, Pt(48.0), Pt(60.0), Pt(2.0));
//! assert_eq!(x, Pt(6.0));
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
