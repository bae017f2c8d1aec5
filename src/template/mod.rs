//! Declarative contract templates.
//!
//! A template is a JSON document describing page settings, named styles and
//! an ordered list of paragraph and table blocks. It is parsed once,
//! validated, and then shared read-only between export requests.

mod geometry;
mod model;
mod style;

pub use geometry::{line_spacing_units, page_size_inches, PageLayout, DEFAULT_LINE_SPACING};
pub use model::{MarginSettings, PageSettings, StyleSpec, Template, TemplateBlock};
pub use style::{ResolvedStyle, NORMAL_STYLE};
