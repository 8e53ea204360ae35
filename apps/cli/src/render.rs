//! Markdown to terminal text.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Width the item content is wrapped to.
pub const DEFAULT_WIDTH: usize = 100;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const ITALIC: &'static str = "\x1b[3m";
    pub const UNDERLINE: &'static str = "\x1b[4m";
    pub const STRIKETHROUGH: &'static str = "\x1b[9m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Render markdown for display in a terminal, wrapped to `width` columns.
pub fn render_markdown(text: &str, width: usize, use_color: bool) -> String {
    let mut renderer = Renderer::new(width, use_color);
    for event in Parser::new(text) {
        renderer.event(event);
    }
    renderer.finish()
}

struct Renderer {
    width: usize,
    use_color: bool,
    lines: Vec<String>,
    buf: String,
    styles: Vec<&'static str>,
    lists: Vec<Option<u64>>,
    marker: Option<String>,
    quote_depth: usize,
    in_code_block: bool,
    links: Vec<String>,
}

impl Renderer {
    fn new(width: usize, use_color: bool) -> Self {
        Self {
            width,
            use_color,
            lines: Vec::new(),
            buf: String::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            marker: None,
            quote_depth: 0,
            in_code_block: false,
            links: Vec::new(),
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                let prefix = self.continuation_prefix();
                for line in text.lines() {
                    let code = self.paint(Color::CYAN, line);
                    self.lines.push(format!("{prefix}    {code}"));
                }
            }
            Event::Text(text) => self.buf.push_str(&text),
            Event::Code(code) => {
                if self.use_color {
                    let painted = self.paint(Color::CYAN, &code);
                    self.buf.push_str(&painted);
                    self.reapply_styles();
                } else {
                    self.buf.push('`');
                    self.buf.push_str(&code);
                    self.buf.push('`');
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => self.buf.push_str(&html),
            Event::SoftBreak => self.buf.push(' '),
            Event::HardBreak => self.buf.push('\n'),
            Event::Rule => {
                self.flush();
                let rule = self.paint(Color::DIM, &"\u{2500}".repeat(self.width.min(40)));
                let line = format!("{}{rule}", self.quote_prefix());
                self.lines.push(line);
                self.blank();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.flush(),
            Tag::Heading { level, .. } => {
                self.flush();
                if self.use_color {
                    self.push_style(Color::BOLD);
                    if level == pulldown_cmark::HeadingLevel::H1 {
                        self.push_style(Color::UNDERLINE);
                    }
                } else {
                    self.buf.push_str(&"#".repeat(level as usize));
                    self.buf.push(' ');
                }
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.in_code_block = true;
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                self.marker = Some(match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}.");
                        *n += 1;
                        marker
                    }
                    _ => "\u{2022}".to_string(),
                });
            }
            Tag::Emphasis => self.push_style(Color::ITALIC),
            Tag::Strong => self.push_style(Color::BOLD),
            Tag::Strikethrough => self.push_style(Color::STRIKETHROUGH),
            Tag::Link { dest_url, .. } => self.links.push(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                self.blank();
            }
            TagEnd::Heading(_) => {
                while !self.styles.is_empty() {
                    self.pop_style();
                }
                self.flush();
                self.blank();
            }
            TagEnd::BlockQuote => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                if let Some(dest) = self.links.pop().filter(|d| !d.is_empty()) {
                    let painted = self.paint(Color::DIM, &format!("({dest})"));
                    self.buf.push(' ');
                    self.buf.push_str(&painted);
                    self.reapply_styles();
                }
            }
            _ => {}
        }
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.use_color {
            format!("{style}{text}{}", Color::RESET)
        } else {
            text.to_string()
        }
    }

    fn push_style(&mut self, style: &'static str) {
        self.styles.push(style);
        if self.use_color {
            self.buf.push_str(style);
        }
    }

    fn pop_style(&mut self) {
        self.styles.pop();
        if self.use_color {
            self.buf.push_str(Color::RESET);
            self.reapply_styles();
        }
    }

    fn reapply_styles(&mut self) {
        if self.use_color {
            for style in &self.styles {
                self.buf.push_str(style);
            }
        }
    }

    fn quote_prefix(&self) -> String {
        let bar = self.paint(Color::DIM, "\u{2502}");
        format!("{bar} ").repeat(self.quote_depth)
    }

    fn list_indent(&self) -> String {
        " ".repeat(4 * self.lists.len().saturating_sub(1))
    }

    fn continuation_prefix(&self) -> String {
        let marker_space = if self.lists.is_empty() { "" } else { "    " };
        format!("{}{}{marker_space}", self.quote_prefix(), self.list_indent())
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.buf);
        if visible_len(text.trim()) == 0 {
            return;
        }

        let rest = self.continuation_prefix();
        let first = match self.marker.take() {
            Some(marker) => format!("{}{}{marker:<3} ", self.quote_prefix(), self.list_indent()),
            None => rest.clone(),
        };
        let width = self.width.saturating_sub(visible_len(&rest)).max(20);

        for (i, line) in wrap(text.trim(), width).into_iter().enumerate() {
            let prefix = if i == 0 { &first } else { &rest };
            self.lines.push(format!("{prefix}{line}"));
        }
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}

/// Character count ignoring ANSI escape sequences.
fn visible_len(text: &str) -> usize {
    let mut len = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            len += 1;
        }
    }
    len
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let mut current = String::new();
        for word in segment.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if visible_len(&current) + 1 + visible_len(word) <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}
