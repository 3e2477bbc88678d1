//! Title to path resolution.
//!
//! Pure string/path functions; nothing here touches the filesystem.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Extension tag identifying the stroke file format.
pub const NOTE_FILE_EXTENSION: &str = "drawing";

/// Filesystem-facing form of a note title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Absolute location of one note file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotePath(PathBuf);

impl NotePath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for NotePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for NotePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Replaces every space with a hyphen.
///
/// Case, punctuation and diacritics pass through untouched, and an empty
/// title yields an empty slug.
pub fn slug(title: &str) -> Slug {
    Slug(title.replace(' ', "-"))
}

/// Resolves `<notes_dir>/<slug(title)>.drawing`.
pub fn note_path(notes_dir: &Path, title: &str) -> NotePath {
    let file_name = format!("{}.{NOTE_FILE_EXTENSION}", slug(title));
    NotePath(notes_dir.join(file_name))
}

/// Maps a note file back to its listed title (base name without extension).
///
/// Returns `None` for paths that do not carry the note extension.
/// The bare `.drawing` file of an empty title maps to `Some("")`.
pub fn title_from_file_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    file_name
        .strip_suffix(NOTE_FILE_EXTENSION)?
        .strip_suffix('.')
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{note_path, slug, title_from_file_name};
    use std::path::Path;

    #[test]
    fn slug_replaces_every_space_only() {
        assert_eq!(slug("Trip Plan  2").as_str(), "Trip-Plan--2");
        assert_eq!(slug("Café, Ünïcode!").as_str(), "Café,-Ünïcode!");
        assert_eq!(slug("MiXeD Case").as_str(), "MiXeD-Case");
    }

    #[test]
    fn empty_title_yields_empty_slug() {
        assert!(slug("").is_empty());
    }

    #[test]
    fn note_path_appends_extension_inside_notes_dir() {
        let path = note_path(Path::new("/data/notes"), "Trip Plan");
        assert_eq!(path.as_path(), Path::new("/data/notes/Trip-Plan.drawing"));
    }

    #[test]
    fn distinct_titles_with_same_slug_collide() {
        let dir = Path::new("/data/notes");
        assert_eq!(note_path(dir, "a b"), note_path(dir, "a-b"));
    }

    #[test]
    fn title_from_file_name_strips_note_extension() {
        assert_eq!(
            title_from_file_name(Path::new("/x/Trip-Plan.drawing")).as_deref(),
            Some("Trip-Plan")
        );
        assert_eq!(title_from_file_name(Path::new("/x/readme.txt")), None);
        assert_eq!(title_from_file_name(Path::new("/x/no_extension")), None);
        assert_eq!(title_from_file_name(Path::new("/x/olddrawing")), None);
    }

    #[test]
    fn bare_extension_file_maps_to_empty_title() {
        let path = note_path(Path::new("/n"), "");
        assert_eq!(title_from_file_name(path.as_path()).as_deref(), Some(""));
    }

    #[test]
    fn slugged_titles_without_hyphens_round_trip_through_file_names() {
        let title = "weekly review notes";
        let path = note_path(Path::new("/n"), title);
        let listed = title_from_file_name(path.as_path()).expect("note file name");
        assert_eq!(listed.replace('-', " "), title);
    }
}
