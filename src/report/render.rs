//! HTML rendering of report sections as collapsible panels.

use pulldown_cmark::{html, Event, Options, Parser};

use super::sections::ReportSection;

/// Render a section body written in lightweight markup to HTML.
///
/// Raw HTML embedded by the model is escaped and shown as text.
pub fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(body, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Render one `<details>` panel per section, in order.
pub fn render_sections(sections: &[ReportSection]) -> String {
    let mut out = String::new();
    for section in sections {
        out.push_str("<details class=\"report-section\">\n<summary>\u{1F4C4} ");
        out.push_str(&html_escape::encode_text(&section.header));
        out.push_str("</summary>\n<div class=\"section-body\">\n");
        out.push_str(&render_markdown(&section.body));
        out.push_str("</div>\n</details>\n");
    }
    out
}
