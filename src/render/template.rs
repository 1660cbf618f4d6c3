use crate::error::{TickerError, TickerResult};

/// First-run placeholder for the inline data line.
pub const INLINE_DATA_MARKER: &str = "// __TICKER_DATA__";
pub const INLINE_DATA_PREFIX: &str = "window.TICKER_DATA = ";

/// The ticker page with its named slots.
///
/// A marker region starts right after `<!-- NAME -->` and runs up to the next
/// comment opener, which is normally the closing sentinel. Every slot must
/// appear exactly once.
#[derive(Debug, Clone)]
pub struct Page {
    html: String,
}

impl Page {
    pub fn new(html: String) -> Self {
        Self { html }
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn fill_region(&mut self, name: &str, content: &str) -> TickerResult<()> {
        let opener = format!("<!-- {name} -->");
        let start = unique_match(&self.html, &opener, name)? + opener.len();
        let len = self.html[start..].find("<!--").ok_or_else(|| {
            TickerError::Template(format!("slot {name} is not terminated by a closing comment"))
        })?;
        self.html.replace_range(start..start + len, content);
        Ok(())
    }

    /// Puts `assignment` on the inline data line. The first run replaces the
    /// `// __TICKER_DATA__` marker; later runs replace the line written by the
    /// previous run.
    pub fn fill_inline_data(&mut self, assignment: &str) -> TickerResult<()> {
        let markers: Vec<usize> = self
            .html
            .match_indices(INLINE_DATA_MARKER)
            .map(|(idx, _)| idx)
            .filter(|idx| marker_stands_alone(&self.html, *idx))
            .collect();
        match markers.as_slice() {
            [idx] => {
                let idx = *idx;
                self.html
                    .replace_range(idx..idx + INLINE_DATA_MARKER.len(), assignment);
                return Ok(());
            }
            [] => {}
            many => {
                return Err(TickerError::Template(format!(
                    "inline data marker appears {} times",
                    many.len()
                )))
            }
        }

        let lines: Vec<usize> = self
            .html
            .match_indices(INLINE_DATA_PREFIX)
            .map(|(idx, _)| idx)
            .filter(|idx| {
                starts_statement(&self.html, *idx)
                    && self.html[*idx..statement_end(&self.html, *idx)]
                        .trim_end()
                        .ends_with(';')
            })
            .collect();
        match lines.as_slice() {
            [idx] => {
                let idx = *idx;
                let end = statement_end(&self.html, idx);
                self.html.replace_range(idx..end, assignment);
                Ok(())
            }
            [] => Err(TickerError::Template(format!(
                "inline data slot not found (expected `{INLINE_DATA_MARKER}` or a `{INLINE_DATA_PREFIX}...;` line)"
            ))),
            many => Err(TickerError::Template(format!(
                "inline data line appears {} times",
                many.len()
            ))),
        }
    }
}

fn unique_match(html: &str, needle: &str, name: &str) -> TickerResult<usize> {
    let mut hits = html.match_indices(needle).map(|(idx, _)| idx);
    let first = hits
        .next()
        .ok_or_else(|| TickerError::Template(format!("slot {name} not found")))?;
    let extra = hits.count();
    if extra > 0 {
        return Err(TickerError::Template(format!(
            "slot {name} appears {} times",
            extra + 1
        )));
    }
    Ok(first)
}

/// The marker only counts when nothing but a closing script tag follows it on
/// its line, so text that merely quotes it is left alone.
fn marker_stands_alone(html: &str, idx: usize) -> bool {
    let rest = &html[idx + INLINE_DATA_MARKER.len()..];
    let line = rest.split('\n').next().unwrap_or_default().trim();
    line.is_empty() || line.starts_with("</script")
}

fn starts_statement(html: &str, idx: usize) -> bool {
    html[..idx]
        .chars()
        .next_back()
        .map_or(true, |c| !(c.is_alphanumeric() || matches!(c, '_' | '$' | '.')))
}

/// The assignment ends at the end of its line, or at a closing script tag on
/// the same line. The inline JSON never contains a literal `</`.
fn statement_end(html: &str, idx: usize) -> usize {
    let mut end = html[idx..].find('\n').map_or(html.len(), |off| idx + off);
    if html[..end].ends_with('\r') {
        end -= 1;
    }
    match html[idx..end].find("</script") {
        Some(off) => idx + off,
        None => end,
    }
}
