//! Entry projections
//!
//! HTML output matches the site's terminal markup; plain output is for
//! hosts that draw text only.

use crate::entry::TranscriptEntry;
use crate::markup;
use crate::surface::ScrollSurface;
use crate::Transcript;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Prompt drawn before echoed commands and the input line
pub const PROMPT: &str = "$";

const BUTTON_ICON: &str = concat!(
    r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">"#,
    r#"<line x1="5" y1="12" x2="19" y2="12"></line>"#,
    r#"<polyline points="12 5 19 12 12 19"></polyline>"#,
    "</svg>",
);

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text with markup stripped
    #[default]
    Plain,
    /// Site markup
    Html,
}

/// Renders one entry
pub fn render_entry(entry: &TranscriptEntry, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => render_entry_plain(entry),
        OutputFormat::Html => render_entry_html(entry),
    }
}

/// Renders one entry as a `terminal-line` div
pub fn render_entry_html(entry: &TranscriptEntry) -> String {
    match entry {
        TranscriptEntry::EchoedCommand { text } => format!(
            r#"<div class="terminal-line"><span class="terminal-prompt">{}</span> <span class="terminal-command">{}</span></div>"#,
            PROMPT,
            markup::escape(text)
        ),
        TranscriptEntry::OutputLine { markup } => format!(
            r#"<div class="terminal-line"><span class="terminal-output">{}</span></div>"#,
            markup
        ),
        TranscriptEntry::ActionButton { label, target_link } => format!(
            r#"<div class="terminal-line"><a href="{}" class="terminal-button">{} {}</a></div>"#,
            markup::escape(target_link),
            label,
            BUTTON_ICON
        ),
        TranscriptEntry::Spacer => {
            r#"<div class="terminal-line"><span class="terminal-output"> </span></div>"#.to_string()
        }
    }
}

/// Renders one entry as plain text
pub fn render_entry_plain(entry: &TranscriptEntry) -> String {
    match entry {
        TranscriptEntry::EchoedCommand { text } => format!("{} {}", PROMPT, text),
        TranscriptEntry::OutputLine { markup } => markup::strip(markup).trim_end().to_string(),
        TranscriptEntry::ActionButton { label, target_link } => {
            format!("[{}] -> {}", markup::strip(label), target_link)
        }
        TranscriptEntry::Spacer => String::new(),
    }
}

/// Renders the input line anchor with the current buffer
pub fn render_input_line(buffer: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => format!("{} {}", PROMPT, buffer),
        OutputFormat::Html => format!(
            r#"<div class="terminal-input-line"><span class="terminal-prompt">{}</span> <input type="text" class="terminal-input" value="{}"></div>"#,
            PROMPT,
            markup::escape(buffer)
        ),
    }
}

/// Renders every entry followed by the input line
pub fn render_frame(transcript: &Transcript, buffer: &str, format: OutputFormat) -> Vec<String> {
    let mut lines: Vec<String> = transcript
        .entries()
        .iter()
        .map(|entry| render_entry(entry, format))
        .collect();
    lines.push(render_input_line(buffer, format));
    lines
}

/// Renders only the rows inside the surface's viewport
pub fn render_visible(
    transcript: &Transcript,
    surface: &ScrollSurface,
    buffer: &str,
    format: OutputFormat,
) -> Vec<String> {
    surface
        .visible_range()
        .map(|row| match transcript.entries().get(row) {
            Some(entry) => render_entry(entry, format),
            None => render_input_line(buffer, format),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_html_escapes_user_text() {
        let html = render_entry_html(&TranscriptEntry::echo("<b>hi</b>"));
        assert!(html.contains(r#"<span class="terminal-prompt">$</span>"#));
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    }

    #[test]
    fn test_output_html_keeps_markup_verbatim() {
        let line = r#"<span class="terminal-info">Email:</span> a@b.c"#;
        let html = render_entry_html(&TranscriptEntry::output(line));
        assert_eq!(
            html,
            format!(
                r#"<div class="terminal-line"><span class="terminal-output">{}</span></div>"#,
                line
            )
        );
    }

    #[test]
    fn test_button_html() {
        let html = render_entry_html(&TranscriptEntry::button("View Portfolio →", "/portfolio"));
        assert!(html.contains(r#"href="/portfolio""#));
        assert!(html.contains(r#"class="terminal-button""#));
        assert!(html.contains("View Portfolio →"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn test_plain_projection() {
        assert_eq!(render_entry_plain(&TranscriptEntry::echo("  help ")), "$   help ");
        assert_eq!(
            render_entry_plain(&TranscriptEntry::output(
                r#"<span class="terminal-success">About Me:</span>"#
            )),
            "About Me:"
        );
        assert_eq!(
            render_entry_plain(&TranscriptEntry::button("All Skills →", "/about#skills")),
            "[All Skills →] -> /about#skills"
        );
        assert_eq!(render_entry_plain(&TranscriptEntry::Spacer), "");
        assert_eq!(render_entry_plain(&TranscriptEntry::output(" ")), "");
    }

    #[test]
    fn test_frame_ends_with_input_line() {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::output("one"));
        let frame = render_frame(&transcript, "he", OutputFormat::Plain);
        assert_eq!(frame, vec!["one".to_string(), "$ he".to_string()]);
    }

    #[test]
    fn test_visible_rows_follow_surface() {
        let mut transcript = Transcript::new();
        for i in 0..5 {
            transcript.push(TranscriptEntry::output(format!("line {}", i)));
        }
        let mut surface = ScrollSurface::new(2);
        surface.sync(&transcript);

        let top = render_visible(&transcript, &surface, "", OutputFormat::Plain);
        assert_eq!(top, vec!["line 0".to_string(), "line 1".to_string()]);

        surface.scroll_to_bottom();
        let bottom = render_visible(&transcript, &surface, "ls", OutputFormat::Plain);
        assert_eq!(bottom, vec!["line 4".to_string(), "$ ls".to_string()]);
    }

    #[test]
    fn test_output_format_serialization() {
        assert_eq!(serde_json::to_string(&OutputFormat::Html).unwrap(), "\"html\"");
        let back: OutputFormat = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(back, OutputFormat::Plain);
    }
}
