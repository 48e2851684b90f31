//! Link file persistence
//!
//! The link file is the hand-off point between the channel listing step and
//! the transcript fetching step: one watch URL per line, in listing order.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use super::models::{AppResult, VideoRef};

/// Overwrite `path` with one URL per line, newline-terminated, in input
/// order. No dedup, no backup of prior contents.
pub fn write_links(videos: &[VideoRef], path: &Path) -> AppResult<()> {
    let mut file = fs::File::create(path)?;

    for video in videos {
        writeln!(file, "{}", video.url)?;
    }

    info!("Wrote {} video links to {:?}", videos.len(), path);
    Ok(())
}

/// Read the link file back as raw lines, skipping blank ones.
pub fn read_links(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)?;

    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Extract the video id from a link-file line.
///
/// Takes the substring after the last `=`, which handles both a full watch
/// URL and a bare id (no `=` present means the whole line is the id).
pub fn extract_video_id(line: &str) -> &str {
    line.trim().rsplit('=').next().unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extract_video_id_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123"),
            "abc123"
        );
    }

    #[test]
    fn test_extract_video_id_from_bare_id() {
        assert_eq!(extract_video_id("abc123"), "abc123");
    }

    #[test]
    fn test_extract_video_id_trims_whitespace() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123\n"),
            "abc123"
        );
    }

    #[test]
    fn test_write_and_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.txt");

        let videos = vec![VideoRef::from_id("aaa"), VideoRef::from_id("bbb")];
        write_links(&videos, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "https://www.youtube.com/watch?v=aaa\nhttps://www.youtube.com/watch?v=bbb\n"
        );

        let lines = read_links(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(extract_video_id(&lines[1]), "bbb");
    }

    #[test]
    fn test_write_links_overwrites_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.txt");

        write_links(&[VideoRef::from_id("old")], &path).unwrap();
        write_links(&[VideoRef::from_id("new")], &path).unwrap();

        let lines = read_links(&path).unwrap();
        assert_eq!(lines, vec!["https://www.youtube.com/watch?v=new"]);
    }

    #[test]
    fn test_read_links_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.txt");
        std::fs::write(&path, "https://www.youtube.com/watch?v=aaa\n\n\n").unwrap();

        let lines = read_links(&path).unwrap();
        assert_eq!(lines.len(), 1);
    }
}
