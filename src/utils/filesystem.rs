use crate::media::MediumKind;
use crate::utils::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const VIDEO_EXTENSIONS: &[&str] = &[
    ".mkv", ".mp4", ".mov", ".m4v", ".avi", ".webm", ".ts", ".m2ts", ".wmv", ".flv", ".mpg",
    ".mpeg",
];

const AUDIO_EXTENSIONS: &[&str] = &[
    ".mp3", ".flac", ".aac", ".m4a", ".ogg", ".opus", ".wav", ".wma", ".ac3", ".dts",
];

/// Collects every file under `path` whose extension marks it as audio or video.
pub fn find_media_files<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::validation(format!(
            "Path does not exist: {}",
            path.display()
        )));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut media_files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| medium_kind_for_path(entry.path()) != MediumKind::Other)
        .map(|entry| entry.into_path())
        .collect();

    if media_files.is_empty() {
        return Err(Error::validation(format!(
            "No media files found in directory: {}",
            path.display()
        )));
    }

    media_files.sort();
    Ok(media_files)
}

/// Classifies a file by extension the way the host does before probing.
pub fn medium_kind_for_path<P: AsRef<Path>>(path: P) -> MediumKind {
    let Some(ext_str) = path.as_ref().extension().and_then(|e| e.to_str()) else {
        return MediumKind::Other;
    };
    let ext_lower = format!(".{}", ext_str.to_lowercase());

    if VIDEO_EXTENSIONS.contains(&ext_lower.as_str()) {
        MediumKind::Video
    } else if AUDIO_EXTENSIONS.contains(&ext_lower.as_str()) {
        MediumKind::Audio
    } else {
        MediumKind::Other
    }
}

/// Like [`medium_kind_for_path`], for a file the user named directly: an
/// extension outside the lists is still a container worth probing as video.
pub fn medium_kind_for_named_file<P: AsRef<Path>>(path: P) -> MediumKind {
    match medium_kind_for_path(path) {
        MediumKind::Other => MediumKind::Video,
        kind => kind,
    }
}

/// `<dir>/<stem>-av1<extension>` next to the input.
pub fn default_output_path<P: AsRef<Path>>(input_path: P, extension: &str) -> PathBuf {
    let input_path = input_path.as_ref();

    let file_stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let filename = format!("{}-av1{}", file_stem, extension);
    input_path.parent().unwrap_or(Path::new(".")).join(filename)
}
