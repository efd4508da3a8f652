//! Closing summary line.

use std::path::Path;

use dotpty_core::KindCounter;

/// `Rendered 2 TaskGraphs, 1 CommandGraphs to <dir>`, or `Rendered nothing`.
///
/// Kinds are listed in the order they first appeared.
pub fn summary(counts: &KindCounter, out_dir: &Path) -> String {
    if counts.is_empty() {
        return "Rendered nothing".to_string();
    }

    let parts: Vec<String> = counts
        .iter()
        .map(|(kind, count)| format!("{count} {kind}s"))
        .collect();

    format!("Rendered {} to {}", parts.join(", "), out_dir.display())
}
