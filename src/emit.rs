use std::path::Path;

use tracing::debug;

use crate::error::EmitError;
use crate::parser::sections::Section;

/// One compact JSON object per section, newline-separated, no trailing newline.
pub fn to_jsonl(sections: &[Section]) -> Result<String, EmitError> {
    let lines = sections
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

/// Replace `path` with the JSON Lines rendering of `sections`.
pub fn write_jsonl(path: &Path, sections: &[Section]) -> Result<(), EmitError> {
    let body = to_jsonl(sections)?;
    std::fs::write(path, &body).map_err(|source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = ?path, bytes = body.len(), "Wrote sections");
    Ok(())
}
