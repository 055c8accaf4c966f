//! Viewer service tests
//!
//! Exercises navigation and editing together against real files on disk.

use image::{Rgb, RgbImage};
use pro_image_viewer::error::{AppError, DecodeError, NavigationError};
use pro_image_viewer::image_loader::{encode_image, load_image_blocking};
use pro_image_viewer::services::{EditCommand, ViewerService};
use pro_image_viewer::state::LiveParameter;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn solid(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value / 2, 255 - value]))
}

/// a.png (10x10), b.bmp (20x10), c.png (30x10) plus some noise files
fn gallery() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    encode_image(&solid(10, 10, 10), &dir.path().join("a.png")).unwrap();
    encode_image(&solid(20, 10, 20), &dir.path().join("b.bmp")).unwrap();
    encode_image(&solid(30, 10, 30), &dir.path().join("c.png")).unwrap();
    fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
    fs::write(dir.path().join("anim.gif"), "GIF89a").unwrap();
    dir
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

#[test]
fn test_open_file_loads_it_and_lists_siblings() {
    let dir = gallery();
    let mut service = ViewerService::default();

    let opened = service.open(&dir.path().join("b.bmp")).unwrap();

    assert_eq!(file_name(&opened), "b.bmp");
    assert_eq!(service.lister().image_count(), 3);
    assert_eq!(service.lister().current_index(), Some(1));
    assert_eq!(service.session().dimensions(), Some((20, 10)));
    assert_eq!(
        service.status_line().as_deref(),
        Some("File: b.bmp | Res: 20x10")
    );
}

#[test]
fn test_open_directory_loads_first_image() {
    let dir = gallery();
    let mut service = ViewerService::default();

    let opened = service.open(dir.path()).unwrap();

    assert_eq!(file_name(&opened), "a.png");
    assert_eq!(service.session().dimensions(), Some((10, 10)));
}

#[test]
fn test_navigation_wraps_and_reloads() {
    let dir = gallery();
    let mut service = ViewerService::default();
    service.open(&dir.path().join("c.png")).unwrap();
    service.apply(EditCommand::Rotate).unwrap();
    assert_eq!(service.session().history_len(), 2);

    let next = service.next().unwrap();
    assert_eq!(file_name(&next), "a.png");
    assert_eq!(service.session().history_len(), 1);
    assert_eq!(service.session().dimensions(), Some((10, 10)));

    let prev = service.previous().unwrap();
    assert_eq!(file_name(&prev), "c.png");
    // edits are not carried across navigation
    assert_eq!(service.session().dimensions(), Some((30, 10)));
}

#[test]
fn test_open_empty_directory_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("readme.md"), "hi").unwrap();
    let mut service = ViewerService::default();

    let result = service.open(dir.path());

    assert!(matches!(
        result,
        Err(AppError::Navigation(NavigationError::EmptyDirectory(_)))
    ));
    assert!(!service.session().is_loaded());
}

#[test]
fn test_corrupt_sibling_keeps_previous_image() {
    let dir = gallery();
    fs::write(dir.path().join("broken.jpg"), b"not really a jpeg").unwrap();
    let mut service = ViewerService::default();
    service.open(&dir.path().join("b.bmp")).unwrap();

    // a.png, b.bmp, broken.jpg, c.png
    let result = service.next();

    assert!(matches!(
        result,
        Err(AppError::Decode(DecodeError::Image(_)))
    ));
    assert_eq!(service.lister().current_index(), Some(2));
    assert_eq!(service.session().dimensions(), Some((20, 10)));
    assert_eq!(file_name(service.session().source_path().unwrap()), "b.bmp");
}

#[test]
fn test_replayed_commands_save_in_place() {
    let dir = gallery();
    let path = dir.path().join("a.png");
    let mut service = ViewerService::default();
    service.open(&path).unwrap();

    let commands: Vec<EditCommand> = ["brightness=40", "commit", "rotate", "undo", "save"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    for command in commands {
        service.apply(command).unwrap();
    }

    let session = service.session();
    assert_eq!(session.history_len(), 3);
    assert_eq!(session.history_index(), Some(1));

    let on_disk = load_image_blocking(&path).unwrap();
    assert_eq!(&on_disk, session.display().unwrap());
    assert_eq!(on_disk.get_pixel(0, 0), &Rgb([50, 45, 255]));
}

#[test]
fn test_live_parameter_not_saved_into_history() {
    let dir = gallery();
    let mut service = ViewerService::default();
    service.open(&dir.path().join("a.png")).unwrap();

    service
        .apply(EditCommand::Live(LiveParameter::Blur(3)))
        .unwrap();
    service
        .apply(EditCommand::Live(LiveParameter::Saturation(-50)))
        .unwrap();

    assert_eq!(service.session().history_len(), 1);
    assert!(!service.session().can_undo());
}

#[test]
fn test_save_as_writes_copy_only() {
    let dir = gallery();
    let original_path = dir.path().join("c.png");
    let copy_path = dir.path().join("copy.png");
    let mut service = ViewerService::default();
    service.open(&original_path).unwrap();

    service.apply(EditCommand::Rotate).unwrap();
    service.session().save_as(&copy_path).unwrap();

    assert_eq!(load_image_blocking(&copy_path).unwrap().dimensions(), (10, 30));
    assert_eq!(
        load_image_blocking(&original_path).unwrap().dimensions(),
        (30, 10)
    );
}
