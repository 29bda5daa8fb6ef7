use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;

use tempfile::NamedTempFile;
use tracing::debug;

/// Stage script content to a private, owner-executable temporary file.
///
/// The returned handle owns the artifact: dropping it removes the file, so
/// the start path holds it for exactly as long as the launch needs it and
/// removal happens on every exit path.
pub fn stage(content: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().prefix("rex").tempfile()?;
    file.write_all(content)?;
    file.flush()?;
    fs::set_permissions(file.path(), fs::Permissions::from_mode(0o700))?;
    debug!(bytes = content.len(), path = %file.path().display(), "staged script");
    Ok(file)
}
