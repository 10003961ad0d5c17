use std::io::{self, Write};

use jobcrawl_core::MenuViewModel;

/// Writes `view` as a plain text menu. A pending prompt is printed last,
/// without a trailing newline.
pub fn render<W: Write>(view: &MenuViewModel, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== {} =====", view.title)?;
    for line in &view.body {
        writeln!(out, "{line}")?;
    }
    if !view.options.is_empty() {
        writeln!(out)?;
    }
    for (key, label) in &view.options {
        writeln!(out, "{key} - {label}")?;
    }
    if let Some(status) = &view.status {
        writeln!(out, "> {status}")?;
    }
    match &view.prompt {
        Some(prompt) => write!(out, "{prompt}")?,
        None => write!(out, "Choice: ")?,
    }
    out.flush()
}
