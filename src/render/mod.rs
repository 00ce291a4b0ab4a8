pub mod cross;
pub mod heatmap;

pub use cross::{indicator_point, render_cross};
pub use heatmap::{month_labels, render_heatmap};

use crate::error::Result;
use std::fs;
use std::path::Path;

pub const MAP_FILENAME: &str = "contributions.svg";
pub const CROSS_FILENAME: &str = "contributions_cross.svg";

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Writes `svg` next to `path` first and renames it into place, so an
/// existing file is only replaced by complete output.
pub fn write_svg(path: &Path, svg: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, svg)?;
    if let Err(err) = fs::rename(tmp, path) {
        let _ = fs::remove_file(tmp);
        return Err(err.into());
    }
    Ok(())
}
