//! quizkit-report: renders score reports for the results view.

pub mod html;
pub mod text;

pub use html::{generate_html, write_html_report};
pub use text::render_text;
