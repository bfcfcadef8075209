use std::path::{Path, PathBuf};

use super::formats::is_supported_input;

/// One queued source image plus the metadata the list UI shows for it.
#[derive(Debug, Clone)]
pub struct PendingFile {
    path: PathBuf,
    format: Option<String>,
    size_kb: Option<u64>,
}

impl PendingFile {
    fn new(path: PathBuf) -> Self {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_uppercase());

        let size_kb = std::fs::metadata(&path).ok().map(|m| m.len() / 1024);

        Self {
            path,
            format,
            size_kb,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
            .to_string()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn size_kb(&self) -> Option<u64> {
        self.size_kb
    }
}

/// Ordered set of files pending conversion. No two entries share a base name
/// (the file name without its extension, so `a.jpg` blocks `a.png`; both
/// would target the same destination file), and every entry existed on disk
/// when it was added.
#[derive(Debug, Default)]
pub struct FileSet {
    entries: Vec<PendingFile>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the accepted candidates in input order and returns how many
    /// were taken. Non-files, unsupported extensions and basename collisions
    /// are silently rejected.
    pub fn add<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = 0;
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            if !is_supported_input(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
            else {
                continue;
            };
            if self.contains_stem(&stem) {
                continue;
            }
            self.entries.push(PendingFile::new(path));
            added += 1;
        }
        added
    }

    /// Removes the entries at `indices`, resolved against the ordering before
    /// any removal. Out-of-range and duplicate indices are ignored.
    pub fn remove(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for idx in sorted.into_iter().rev() {
            if idx < self.entries.len() {
                self.entries.remove(idx);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PendingFile> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingFile> {
        self.entries.iter()
    }

    /// Immutable copy of the queued paths, taken at run start.
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    fn contains_stem(&self, stem: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.path.file_stem().and_then(|s| s.to_str()) == Some(stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn accepts_supported_files_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.jpg");
        let b = touch(dir.path(), "b.HEIC");
        let c = touch(dir.path(), "c.gif");

        let mut set = FileSet::new();
        assert_eq!(set.add([b.clone(), a.clone()]), 2);
        assert_eq!(set.add([c.clone()]), 1);

        let order: Vec<String> = set.iter().map(|e| e.file_name()).collect();
        assert_eq!(order, ["b.HEIC", "a.jpg", "c.gif"]);
    }

    #[test]
    fn rejects_missing_files_and_unsupported_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let doc = touch(dir.path(), "notes.txt");
        let clip = touch(dir.path(), "clip.mp4");
        let ghost = dir.path().join("ghost.png");

        let mut set = FileSet::new();
        assert_eq!(set.add([doc, clip, ghost]), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("album.png");
        std::fs::create_dir(&sub).unwrap();

        let mut set = FileSet::new();
        assert_eq!(set.add([sub]), 0);
    }

    #[test]
    fn duplicate_basename_is_rejected_across_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("other");
        std::fs::create_dir(&sub).unwrap();
        let first = touch(dir.path(), "a.jpg");
        let twin = touch(&sub, "a.jpg");

        let mut set = FileSet::new();
        assert_eq!(set.add([first.clone()]), 1);
        assert_eq!(set.add([twin]), 0);
        assert_eq!(set.add([first]), 0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn same_stem_different_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let jpg = touch(dir.path(), "a.jpg");
        let png = touch(dir.path(), "a.png");

        let mut set = FileSet::new();
        assert_eq!(set.add([jpg, png]), 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().file_name(), "a.jpg");
    }

    #[test]
    fn remove_resolves_indices_against_pre_removal_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..5)
            .map(|i| touch(dir.path(), &format!("img{i}.png")))
            .collect();

        let mut set = FileSet::new();
        set.add(paths);
        // Ascending input must not shift later indices mid-removal.
        set.remove(&[0, 2, 4]);

        let left: Vec<String> = set.iter().map(|e| e.file_name()).collect();
        assert_eq!(left, ["img1.png", "img3.png"]);
    }

    #[test]
    fn remove_ignores_out_of_range_and_duplicate_indices() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.png");
        let b = touch(dir.path(), "b.png");

        let mut set = FileSet::new();
        set.add([a, b]);
        set.remove(&[1, 1, 99]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().file_name(), "a.png");
    }

    #[test]
    fn snapshot_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.png");
        let b = touch(dir.path(), "b.png");

        let mut set = FileSet::new();
        set.add([a.clone(), b.clone()]);
        assert_eq!(set.snapshot(), vec![a, b]);
    }
}
