use std::fs;
use std::path::Path;

use rust_slideshow::error::Error;
use rust_slideshow::media::MediaKind;
use rust_slideshow::scan::scan_directory;
use tempfile::tempdir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"x").unwrap();
}

#[test]
fn lists_supported_files_sorted_and_case_insensitive() {
    let dir = tempdir().unwrap();
    for name in ["b.PNG", "a.jpg", "clip.MP4", "notes.txt", "c.JpEg", "noext"] {
        touch(dir.path(), name);
    }

    let items = scan_directory(dir.path()).unwrap();
    let names: Vec<_> = items
        .iter()
        .map(|i| i.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.jpg", "b.PNG", "c.JpEg", "clip.MP4"]);
    assert_eq!(items[3].kind, MediaKind::Video);
    assert!(items[..3].iter().all(|i| i.kind == MediaKind::Image));
}

#[test]
fn subdirectories_are_not_descended() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "top.gif");
    let nested = dir.path().join("nested.jpg");
    fs::create_dir(&nested).unwrap();
    touch(&nested, "deep.jpg");

    let items = scan_directory(dir.path()).unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].path.ends_with("top.gif"));
}

#[test]
fn folder_without_media_is_empty_not_an_error() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "readme.md");
    assert!(scan_directory(dir.path()).unwrap().is_empty());
}

#[test]
fn missing_folder_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone");
    match scan_directory(&missing) {
        Err(Error::ScanFailed { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected ScanFailed, got {other:?}"),
    }
}

#[test]
fn file_instead_of_folder_fails() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.jpg");
    let err = scan_directory(&dir.path().join("a.jpg")).unwrap_err();
    assert!(matches!(err, Error::ScanFailed { .. }));
    assert!(err.to_string().contains("not a directory"));
}

#[cfg(unix)]
#[test]
fn broken_links_do_not_fail_the_scan() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    touch(dir.path(), "a.jpg");
    // Editor lock file: a dangling link with an unsupported name.
    symlink("user@host.1234:1700000000", dir.path().join(".#notes.txt")).unwrap();
    // Dangling link with a supported name.
    symlink(dir.path().join("gone.png"), dir.path().join("b.png")).unwrap();
    // Link to a real file still counts.
    symlink(dir.path().join("a.jpg"), dir.path().join("c.jpg")).unwrap();

    let items = scan_directory(dir.path()).unwrap();
    let names: Vec<_> = items
        .iter()
        .map(|i| i.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.jpg", "c.jpg"]);
}
