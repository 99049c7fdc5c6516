//! File transfer between host and container (`<engine> cp`).
//!
//! The string helpers stage data in host temp files; those are removed on
//! every exit path and removal failures are only logged.

use super::ContainerHandle;
use crate::command::CommandLine;
use crate::errors::{DockhandError, DockhandResult};
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = "dockhand-";

/// Split a container path into its parent directory and file name.
fn split_container_path(filename: &str) -> DockhandResult<(String, String)> {
    let path = Path::new(filename);
    let basename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            DockhandError::InvalidArgument(format!("`{}` does not name a file", filename))
        })?;
    let dirname = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    };
    Ok((dirname, basename))
}

impl ContainerHandle {
    async fn copy(&self, command: CommandLine) -> DockhandResult<()> {
        let output = self.spec.executor().run(&command).await?;
        if !output.success() {
            return Err(DockhandError::CopyFailed {
                command: command.to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }
        Ok(())
    }

    /// Copy a host file or directory into the container.
    pub async fn add_files(
        &self,
        host_path: impl AsRef<Path>,
        container_path: &str,
    ) -> DockhandResult<()> {
        let source = host_path.as_ref().to_string_lossy();
        let destination = format!("{}:{}", self.short_identifier(), container_path);
        self.copy(self.spec.render_copy_command(&source, &destination))
            .await
    }

    /// Copy a file or directory out of the container onto the host.
    pub async fn get_files(
        &self,
        container_path: &str,
        host_path: impl AsRef<Path>,
    ) -> DockhandResult<()> {
        let source = format!("{}:{}", self.short_identifier(), container_path);
        let destination = host_path.as_ref().to_string_lossy();
        self.copy(self.spec.render_copy_command(&source, &destination))
            .await
    }

    /// Write `contents` to `filename` inside the container.
    ///
    /// The data is staged in a uniquely named host temp directory under the
    /// same base name, then copied into the parent directory of `filename`.
    pub async fn add_file_from_string(
        &self,
        filename: &str,
        contents: impl AsRef<[u8]>,
    ) -> DockhandResult<()> {
        let (container_dir, basename) = split_container_path(filename)?;

        let temp_dir = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
        let temp_file: PathBuf = temp_dir.path().join(&basename);
        tokio::fs::write(&temp_file, contents.as_ref()).await?;

        let result = self.add_files(&temp_file, &container_dir).await;

        if let Err(e) = tokio::fs::remove_file(&temp_file).await {
            tracing::warn!(path = %temp_file.display(), error = %e, "Failed to remove temp file");
        }
        let dir_path = temp_dir.path().to_path_buf();
        if let Err(e) = temp_dir.close() {
            tracing::warn!(path = %dir_path.display(), error = %e, "Failed to remove temp directory");
        }

        result
    }

    /// Read a file from the container as UTF-8 text.
    pub async fn get_file_as_string(&self, path: &str) -> DockhandResult<String> {
        let temp_file = tempfile::Builder::new().prefix(TEMP_PREFIX).tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let result = match self.get_files(path, &temp_path).await {
            Ok(()) => tokio::fs::read_to_string(&temp_path)
                .await
                .map_err(DockhandError::from),
            Err(e) => Err(e),
        };

        if let Err(e) = temp_file.close() {
            tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_container_path() {
        assert_eq!(
            split_container_path("/etc/nginx/nginx.conf").unwrap(),
            ("/etc/nginx".to_string(), "nginx.conf".to_string())
        );
        assert_eq!(
            split_container_path("notes.txt").unwrap(),
            (".".to_string(), "notes.txt".to_string())
        );
        assert_eq!(
            split_container_path("/motd").unwrap(),
            ("/".to_string(), "motd".to_string())
        );
    }

    #[test]
    fn test_split_container_path_rejects_directories() {
        assert!(matches!(
            split_container_path("/"),
            Err(DockhandError::InvalidArgument(_))
        ));
        assert!(split_container_path("..").is_err());
    }
}
