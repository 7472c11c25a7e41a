//! Scans of real temporary folder trees through the local disk collaborators.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use album_selector::album::album_images;
use album_selector::config::Configuration;
use album_selector::fs::LocalFs;
use album_selector::index::{AlbumFilter, SortOrder};
use album_selector::selector::{AlbumSelectionEngine, PageInfo};
use album_selector::Error;
use common::Recorder;
use tempfile::tempdir;

fn make_album(parent: &Path, name: &str, images: &[&str]) -> PathBuf {
    let dir = parent.join(name);
    fs::create_dir_all(&dir).unwrap();
    for image in images {
        fs::write(dir.join(image), b"x").unwrap();
    }
    dir
}

fn engine() -> AlbumSelectionEngine<Recorder> {
    AlbumSelectionEngine::from_config(&Configuration::default(), Recorder::default())
}

#[test]
fn two_roots_with_twenty_five_albums() {
    let tmp = tempdir().unwrap();
    let root1 = tmp.path().join("root1");
    let root2 = tmp.path().join("root2");
    fs::create_dir_all(&root2).unwrap();
    fs::write(root2.join("notes.txt"), b"x").unwrap();
    for i in 0..22 {
        make_album(&root1, &format!("album {i:02}"), &["a.jpg"]);
    }
    for name in ["vacation alps", "summer vacation", "vacation 2020"] {
        make_album(&root1, name, &["a.jpg", "b.png"]);
    }

    let mut engine = engine();
    let summary = engine.scan(&[root1, root2]).unwrap();

    assert_eq!(summary.albums, 25);
    assert_eq!(engine.listener().albums.len(), 20);
    assert_eq!(engine.listener().albums, engine.index().all()[..20]);
    assert_eq!(engine.listener().pages, vec![PageInfo { count: 2 }]);
    assert_eq!(engine.page_info(), PageInfo { count: 2 });

    engine.listener_mut().clear();
    engine.filter(&AlbumFilter::name("vacation"));

    assert_eq!(engine.page_info(), PageInfo { count: 1 });
    assert_eq!(engine.listener().pages, vec![PageInfo { count: 1 }]);
    assert_eq!(engine.listener().albums.len(), 3);
    assert!(engine.listener().names().iter().all(|n| n.contains("vacation")));
}

#[test]
fn nested_albums_are_found_and_image_free_parents_are_not() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("photos");
    let year = root.join("2023");
    fs::create_dir_all(&year).unwrap();
    fs::write(year.join("index.html"), b"x").unwrap();
    make_album(&year, "spring", &["1.JPG", "2.jpg"]);
    make_album(&year.join("deep").join("deeper"), "autumn", &["x.gif"]);

    let mut engine = engine();
    engine.scan(&[root]).unwrap();
    engine.sort(SortOrder::NameAsc);

    let albums = engine.index().all();
    let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["autumn", "spring"]);
    assert_eq!(albums[0].count, 1);
    assert_eq!(albums[1].count, 2);
    assert!(albums[1].folder.is_absolute());
}

#[test]
fn sidecar_cover_override_is_used() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    let album = make_album(&root, "trip", &["a.jpg", "b.jpg", "c.jpg"]);
    fs::write(album.join("album.json"), r#"{"cover": "c.jpg"}"#).unwrap();

    let mut engine = engine();
    engine.scan(&[root]).unwrap();

    let albums = engine.index().all();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].cover, album.join("c.jpg"));
    assert_eq!(albums[0].count, 3);
}

#[test]
fn malformed_sidecar_falls_back_to_an_image() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    let album = make_album(&root, "trip", &["only.png"]);
    fs::write(album.join("album.json"), "{cover").unwrap();

    let mut engine = engine();
    engine.scan(&[root]).unwrap();

    assert_eq!(engine.index().all()[0].cover, album.join("only.png"));
}

#[test]
fn missing_root_is_rejected() {
    let tmp = tempdir().unwrap();
    let bogus = tmp.path().join("does-not-exist");

    let mut engine = engine();
    let err = engine.scan(&[bogus]).unwrap_err();

    assert!(matches!(err, Error::BadRoot(_)));
    assert!(!err.to_string().is_empty());
    assert!(engine.listener().pages.is_empty());
}

#[test]
fn file_root_is_rejected_and_keeps_previous_index() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("photos");
    make_album(&root, "trip", &["a.jpg"]);
    let file = root.join("trip").join("a.jpg");

    let mut engine = engine();
    engine.scan(&[root]).unwrap();
    engine.listener_mut().clear();

    let err = engine.scan(&[file]).unwrap_err();

    assert!(matches!(err, Error::BadRoot(_)));
    assert!(engine.listener().albums.is_empty());
    assert!(engine.listener().pages.is_empty());
    assert_eq!(engine.index().len(), 1);
    assert_eq!(engine.index().all()[0].name, "trip");
}

#[test]
fn rescanning_other_roots_replaces_the_index() {
    let tmp = tempdir().unwrap();
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");
    make_album(&first, "old times", &["a.jpg"]);
    make_album(&second, "new times", &["a.jpg"]);

    let mut engine = engine();
    engine.scan(&[first]).unwrap();
    engine.scan(&[second]).unwrap();
    engine.listener_mut().clear();
    engine.filter(&AlbumFilter::name("times"));

    assert_eq!(engine.listener().names(), vec!["new times"]);
}

#[test]
fn album_images_are_in_natural_order() {
    let tmp = tempdir().unwrap();
    let album = make_album(
        tmp.path(),
        "trip",
        &["IMG10.jpg", "img2.jpg", "img1.png", "notes.txt", "img3.gif"],
    );
    let exts = Configuration::default().image_extensions;

    let images = album_images(&LocalFs, &album, &exts).unwrap();

    let names: Vec<String> = images
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["img1.png", "img2.jpg", "img3.gif", "IMG10.jpg"]);
}
