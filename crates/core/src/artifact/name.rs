/// Path the artifact directory is served under.
pub const DOWNLOADS_PATH: &str = "/downloads";

const FILE_PREFIX: &str = "export_registro_";
const FILE_EXTENSION: &str = "xlsx";

/// Replace every character outside `[A-Za-z0-9_-]` with `-`, one for one.
///
/// Distinct identifiers can map to the same name (`"a b"` and `"a/b"`);
/// the later export overwrites the earlier one.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// `export_registro_<sanitized campaign id>.xlsx`
pub fn artifact_file_name(campana_id: &str) -> String {
    format!(
        "{FILE_PREFIX}{}.{FILE_EXTENSION}",
        sanitize_filename(campana_id)
    )
}

/// Absolute URL of a stored artifact under `base_url`.
pub fn download_url(base_url: &str, file_name: &str) -> String {
    format!(
        "{}{DOWNLOADS_PATH}/{file_name}",
        base_url.trim_end_matches('/')
    )
}
