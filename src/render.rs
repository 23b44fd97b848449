use regex::Regex;
use std::sync::OnceLock;

/// Turns assistant markdown into something a view can display. Pure: the
/// source is never executed or interpreted beyond formatting.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// Shows the markdown source as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer;

impl MarkdownRenderer for PlainRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}

/// Light terminal formatting: headings become underlined titles, emphasis
/// markers and inline code ticks are dropped. Code blocks and tables pass
/// through verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer;

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("valid heading regex"))
}

fn emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*\*(.+?)\*\*|__(.+?)__|\*([^*\s][^*]*?)\*|`([^`]+)`")
            .expect("valid emphasis regex")
    })
}

impl TerminalRenderer {
    fn render_inline(line: &str) -> String {
        emphasis_re()
            .replace_all(line, |caps: &regex::Captures| {
                (1..=4)
                    .find_map(|i| caps.get(i))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

impl MarkdownRenderer for TerminalRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut out = Vec::new();
        let mut in_code = false;

        for line in markdown.lines() {
            if line.trim_start().starts_with("```") {
                in_code = !in_code;
                continue;
            }
            if in_code || line.trim_start().starts_with('|') {
                out.push(line.to_string());
                continue;
            }

            match heading_re().captures(line) {
                Some(caps) => {
                    let level = caps[1].len();
                    let title = Self::render_inline(&caps[2]);
                    let underline = if level == 1 { '=' } else { '-' };
                    // Terminal columns: full-width characters take two.
                    let width = console::measure_text_width(&title).max(3);
                    out.push(title);
                    if level <= 2 {
                        out.push(underline.to_string().repeat(width));
                    }
                }
                None => out.push(Self::render_inline(line)),
            }
        }

        out.join("\n")
    }
}
