//! Line-ending and boundary repair for PEM text
//!
//! Keys pasted through web forms, environment variables and JSON blobs come
//! back with literal `\n` escapes, CRLF endings, markers glued to the body or
//! stray blank lines. [`normalize`] undoes all of that in a fixed order.
//! Applying it twice gives the same result as applying it once.

use once_cell::sync::Lazy;
use regex::Regex;

static BEGIN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-----BEGIN [A-Z ]+-----").unwrap());

static END_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-----END [A-Z ]+-----").unwrap());

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Repair `input` into multi-line PEM text.
///
/// 1. literal `\n` escapes become real line breaks
/// 2. carriage returns are deleted
/// 3. `BEGIN` markers get a line break on each side
/// 4. same for `END` markers
/// 5. runs of three or more line breaks collapse to two
/// 6. surrounding whitespace is trimmed
pub fn normalize(input: &str) -> String {
    let text = unescape_and_strip_cr(input);
    let text = isolate_markers(&text, &BEGIN_MARKER);
    let text = isolate_markers(&text, &END_MARKER);
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Steps 1 and 2, repeated until stable.
///
/// Removing a CR from `\` CR `n` exposes a fresh escape, so a single pass is
/// not enough to reach a fixed point.
fn unescape_and_strip_cr(input: &str) -> String {
    let mut text = input.to_string();
    loop {
        let next = text.replace("\\n", "\n").replace('\r', "");
        if next == text {
            return text;
        }
        text = next;
    }
}

/// Put every match of `marker` on its own line.
///
/// The start and end of the text count as line boundaries. Two markers that
/// share one run of dashes (`-----END A-----BEGIN B-----`) can't both keep
/// it: BEGIN is isolated first and takes the dashes, leaving `-----END A`
/// on the line above.
fn isolate_markers(text: &str, marker: &Regex) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;

    for m in marker.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(m.as_str());
        if m.end() < text.len() && !text[m.end()..].starts_with('\n') {
            out.push('\n');
        }
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}

/// True when every `BEGIN`/`END` marker in `text` sits alone on its line.
pub fn markers_isolated(text: &str) -> bool {
    [&*BEGIN_MARKER, &*END_MARKER].iter().all(|marker| {
        marker.find_iter(text).all(|m| {
            let before_ok = m.start() == 0 || text[..m.start()].ends_with('\n');
            let after_ok = m.end() == text.len() || text[m.end()..].starts_with('\n');
            before_ok && after_ok
        })
    })
}
