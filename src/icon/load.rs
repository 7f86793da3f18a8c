//! Concurrent icon loading.
//!
//! Every eligible file is read in its own task. Tasks are joined in listing
//! order so the returned records keep that order whatever the completion
//! order was. A failing task only loses its own icon.

use super::{ICON_EXTENSION, IconError, IconFile, IconRecord};
use crate::{
    debug, log,
    logger::{ProgressLine, report},
};
use std::{ffi::OsStr, path::Path, sync::Arc};
use tokio::fs;

/// Scan the icon directory and load every `.svg` file in it.
///
/// A directory that cannot be listed is logged and yields no records.
pub async fn load(dir: &Path, quiet: bool) -> Vec<IconRecord> {
    let files = match scan_icon_dir(dir).await {
        Ok(files) => files,
        Err(err) => {
            log!("error"; "{}", report(&err));
            return Vec::new();
        }
    };
    debug!("icons"; "found {} in {}", crate::utils::plural_count(files.len(), "svg file"), dir.display());
    load_icons(files, quiet).await
}

/// List `dir` and keep the entries with an `svg` extension (case-sensitive).
///
/// Entries are returned in directory-listing order. Only the extension is
/// checked: a directory named `x.svg` is kept and fails later on read.
pub async fn scan_icon_dir(dir: &Path) -> Result<Vec<IconFile>, IconError> {
    let dir_error = |source| IconError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(dir_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(dir_error)? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let Some(extension) = Path::new(&name).extension().and_then(OsStr::to_str) else {
            continue;
        };
        if extension != ICON_EXTENSION {
            continue;
        }
        files.push(IconFile {
            path: dir.join(&name),
            extension: extension.to_string(),
            name,
        });
    }

    Ok(files)
}

/// Read and transform `files` concurrently.
///
/// Failures are logged and skipped; the result holds the successful records
/// in input order.
pub async fn load_icons(files: Vec<IconFile>, quiet: bool) -> Vec<IconRecord> {
    let progress = Arc::new(ProgressLine::new("icons", files.len(), quiet));

    let handles: Vec<_> = files
        .into_iter()
        .map(|file| {
            let path = file.path.clone();
            let progress = Arc::clone(&progress);
            let handle = tokio::spawn(async move {
                let result = read_icon(file).await;
                progress.inc();
                result
            });
            (path, handle)
        })
        .collect();

    let mut records = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let result = handle.await.unwrap_or_else(|err| {
            Err(IconError::Task {
                path,
                message: err.to_string(),
            })
        });
        match result {
            Ok(record) => records.push(record),
            Err(err) => log!("error"; "{}", report(&err)),
        }
    }

    progress.finish();
    records
}

async fn read_icon(file: IconFile) -> Result<IconRecord, IconError> {
    let raw = fs::read_to_string(&file.path)
        .await
        .map_err(|source| IconError::FileRead {
            path: file.path.clone(),
            source,
        })?;
    debug!("icons"; "read {}", file.name);
    Ok(IconRecord::new(file, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn icon_dir(files: &[(&str, &[u8])]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std_fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn sorted_names(records: &[IconRecord]) -> Vec<&str> {
        let mut names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[tokio::test]
    async fn test_scan_filters_by_extension() {
        let dir = icon_dir(&[
            ("home.svg", b"<svg/>"),
            ("star.svg", b"<svg/>"),
            ("notes.txt", b"hello"),
            ("upper.SVG", b"<svg/>"),
            ("noext", b""),
        ]);

        let mut files = scan_icon_dir(dir.path()).await.unwrap();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["home.svg", "star.svg"]);
        assert_eq!(files[0].path, dir.path().join("home.svg"));
        assert_eq!(files[0].extension, "svg");
    }

    #[tokio::test]
    async fn test_scan_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = scan_icon_dir(&missing).await.unwrap_err();
        assert!(matches!(err, IconError::DirectoryRead { ref path, .. } if *path == missing));
    }

    #[tokio::test]
    async fn test_scan_file_instead_of_directory() {
        let dir = icon_dir(&[("file.svg", b"<svg/>")]);
        let err = scan_icon_dir(&dir.path().join("file.svg")).await.unwrap_err();
        assert!(matches!(err, IconError::DirectoryRead { .. }));
    }

    #[tokio::test]
    async fn test_load_counts_svg_minus_failures() {
        let dir = icon_dir(&[
            ("a.svg", b"<svg><rect/><path/></svg>"),
            ("b.svg", b"<svg><rect/><circle/></svg>"),
            ("broken.svg", &[0xff, 0xfe, 0x00]),
            ("readme.md", b"# icons"),
            ("logo.png", &[0x89, 0x50]),
        ]);
        std_fs::create_dir(dir.path().join("folder.svg")).unwrap();

        let records = load(dir.path(), true).await;
        assert_eq!(sorted_names(&records), ["a.svg", "b.svg"]);
        assert!(records.iter().all(|r| !r.content.contains("<rect")));
    }

    #[tokio::test]
    async fn test_load_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let records = load(&dir.path().join("missing"), true).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_load_icons_keeps_input_order() {
        let dir = icon_dir(&[
            ("c.svg", b"<svg><rect/>c</svg>"),
            ("a.svg", b"<svg><rect/>a</svg>"),
            ("b.svg", b"<svg><rect/>b</svg>"),
        ]);
        let files: Vec<_> = ["c.svg", "a.svg", "b.svg"]
            .iter()
            .map(|name| IconFile {
                name: name.to_string(),
                path: dir.path().join(name),
                extension: "svg".to_string(),
            })
            .collect();

        let records = load_icons(files, true).await;
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
        assert_eq!(records[0].content, "<svg>c</svg>");
    }
}
