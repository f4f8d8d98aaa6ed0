//! Lay out address labels on Avery 5160 sheets and render them to PDF.
//!
//! Labels are queued on a [`LabelSheet`], then drawn in one go into a
//! [`Canvas`]. [`PdfCanvas`] is the canvas that produces a PDF document.
//!
//! ```no_run
//! use avery_labels::{Font, LabelSheet, PdfCanvas, Pt};
//!
//! let font = Font::load(std::fs::read("DejaVuSans.ttf")?)?;
//! let mut canvas = PdfCanvas::new(font, Pt(10.0));
//!
//! let mut sheet = LabelSheet::new();
//! sheet.push("Jane Doe\n123 Main St\nSpringfield")?;
//! sheet.build(&mut canvas)?;
//!
//! canvas.write(std::fs::File::create("labels.pdf")?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Page margins and text wrapping
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod sheet;
pub use sheet::*;

mod template;
pub use template::*;

mod units;
pub use units::*;
