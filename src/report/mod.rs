//! Turning the model's free-text reply into displayable report sections.

pub mod header;
pub mod render;
pub mod sections;

pub use header::{clean_header, strip_decoration, strip_ordinal_prefix};
pub use render::{render_markdown, render_sections};
pub use sections::{sectionize, ReportSection};
