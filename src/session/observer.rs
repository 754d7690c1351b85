//! Presentation hooks for stored thoughts.
//!
//! The session calls a [`ThoughtObserver`] after every stored record. The
//! server installs [`BoxRenderer`] (stderr) unless thought logging is disabled,
//! in which case it installs [`SilentObserver`]. Observers never touch state.

use unicode_width::UnicodeWidthStr;

use super::types::{ThoughtRecord, MAIN_TRACK};

/// Receives each record after it has been stored.
pub trait ThoughtObserver: Send + Sync {
    fn on_thought(&self, record: &ThoughtRecord);
}

/// Discards everything. Used in tests and when thought logging is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl ThoughtObserver for SilentObserver {
    fn on_thought(&self, _record: &ThoughtRecord) {}
}

/// Draws each record as a bordered box on stderr.
#[derive(Debug, Clone, Copy)]
pub struct BoxRenderer {
    /// Column at which thought content is word-wrapped.
    pub wrap_width: usize,
}

impl Default for BoxRenderer {
    fn default() -> Self {
        Self { wrap_width: 80 }
    }
}

impl ThoughtObserver for BoxRenderer {
    fn on_thought(&self, record: &ThoughtRecord) {
        eprintln!("{}", render_box(record, self.wrap_width));
    }
}

/// Header line: step counters plus revision or track context.
pub fn header(record: &ThoughtRecord) -> String {
    let counters = format!("{}/{}", record.thought_number, record.total_thoughts);
    if record.is_revision() {
        let revises = record
            .revises_thought
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        format!("🔄 Revision {counters} (revising thought {revises})")
    } else if record.track != MAIN_TRACK {
        format!("🌿 Branch {counters} [{}]", record.track)
    } else {
        format!("💭 Thought {counters} [{MAIN_TRACK}]")
    }
}

/// Render a record as a box, wrapping content at `wrap_width` columns.
pub fn render_box(record: &ThoughtRecord, wrap_width: usize) -> String {
    let header = header(record);
    let body: Vec<String> = record
        .thought
        .lines()
        .flat_map(|line| wrap_line(line, wrap_width))
        .collect();

    let width = body
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(header.width()))
        .max()
        .unwrap_or(0);
    let border = "─".repeat(width + 2);

    let mut out = Vec::with_capacity(body.len() + 4);
    out.push(format!("┌{border}┐"));
    out.push(format!("│ {} │", pad(&header, width)));
    out.push(format!("├{border}┤"));
    for line in &body {
        out.push(format!("│ {} │", pad(line, width)));
    }
    out.push(format!("└{border}┘"));
    out.join("\n")
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Greedy word wrap. A single word wider than `width` gets a line to itself.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_variants() {
        let main = ThoughtRecord::plain("x", 2, 5, true, MAIN_TRACK);
        assert_eq!(header(&main), "💭 Thought 2/5 [main]");

        let branch = ThoughtRecord::plain("x", 1, 1, false, "probe");
        assert_eq!(header(&branch), "🌿 Branch 1/1 [probe]");

        let mut revision = ThoughtRecord::plain("x", 4, 5, true, "probe");
        revision.is_revision = Some(true);
        revision.revises_thought = Some(2);
        assert_eq!(header(&revision), "🔄 Revision 4/5 (revising thought 2)");
    }

    #[test]
    fn box_lines_share_a_width() {
        let record = ThoughtRecord::plain("short\na somewhat longer line", 1, 1, false, MAIN_TRACK);
        let rendered = render_box(&record, 80);
        let widths: Vec<usize> = rendered.lines().map(UnicodeWidthStr::width).collect();
        assert_eq!(rendered.lines().count(), 6);
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "ragged box: {widths:?}");
    }

    #[test]
    fn long_lines_are_wrapped() {
        let wrapped = wrap_line("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "gamma delta"]);

        let oversized = wrap_line("supercalifragilistic ok", 5);
        assert_eq!(oversized, vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn blank_lines_survive() {
        assert_eq!(wrap_line("", 10), vec![String::new()]);
    }
}
