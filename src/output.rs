//! Output naming and persistence.

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Extension given to every saved video.
pub const VIDEO_EXTENSION: &str = "mp4";

/// UTC timestamp in ISO-8601 form with `:` replaced by `-`, truncated to seconds.
pub fn timestamp_slug(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// `grok-<timestamp>-<index>.<ext>`, with a 1-based index.
pub fn image_filename(timestamp: &str, index: usize, extension: &str) -> String {
    format!("grok-{timestamp}-{index}.{extension}")
}

/// Source image stem with the video extension (`/tmp/cat.jpg` becomes `cat.mp4`).
pub fn video_filename(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "video".to_string());
    format!("{stem}.{VIDEO_EXTENSION}")
}

/// Creates the output directory and any missing parents.
pub async fn ensure_output_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}

/// Writes `data` to `dir/name`, replacing any existing file.
pub async fn write_output(dir: &Path, name: &str, data: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    tokio::fs::write(&path, data).await?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "wrote output file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_slug() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(timestamp_slug(ts), "2024-03-09T07-05-01");
    }

    #[test]
    fn test_image_filenames() {
        let ts = "2024-03-09T07-05-01";
        assert_eq!(image_filename(ts, 1, "png"), "grok-2024-03-09T07-05-01-1.png");
        assert_eq!(image_filename(ts, 2, "jpeg"), "grok-2024-03-09T07-05-01-2.jpeg");
    }

    #[test]
    fn test_video_filename_uses_source_stem() {
        assert_eq!(video_filename(Path::new("/tmp/cat.jpg")), "cat.mp4");
        assert_eq!(video_filename(Path::new("dog.png")), "dog.mp4");
        assert_eq!(video_filename(Path::new("archive.tar.gz")), "archive.tar.mp4");
        assert_eq!(video_filename(Path::new("noext")), "noext.mp4");
    }

    #[tokio::test]
    async fn test_write_output_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("out");

        ensure_output_dir(&dir).await.unwrap();
        ensure_output_dir(&dir).await.unwrap();

        let path = write_output(&dir, "a.bin", b"abc").await.unwrap();
        assert_eq!(path, dir.join("a.bin"));
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
    }
}
