use invtxt::error::InvError;
use invtxt::model::Markers;
use invtxt::pictures::CopyImporter;
use invtxt::store::fs_backend::FsBackend;
use invtxt::store::{InventoryStore, StorageBackend};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup(inventory: &str) -> (TempDir, InventoryStore<FsBackend>) {
    let temp = tempfile::tempdir().unwrap();
    let store = InventoryStore::new(FsBackend::new(temp.path().to_path_buf()), Markers::default());
    store.init().unwrap();
    fs::write(temp.path().join("inv.txt"), inventory).unwrap();
    (temp, store)
}

fn touch(path: &Path) {
    fs::write(path, b"jpeg").unwrap();
}

#[test]
fn init_layout_requires_existing_directory() {
    let temp = tempfile::tempdir().unwrap();
    let missing = FsBackend::new(temp.path().join("nope"));
    assert!(matches!(missing.init_layout(), Err(InvError::Store(_))));
    assert!(!temp.path().join("nope").exists());
}

#[test]
fn init_layout_creates_files() {
    let temp = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(temp.path().to_path_buf());
    backend.init_layout().unwrap();

    assert!(temp.path().join("pics").is_dir());
    assert_eq!(fs::read_to_string(temp.path().join("inv.txt")).unwrap(), "");

    // A second run leaves existing contents alone.
    fs::write(temp.path().join("inv.txt"), "(1) kettle").unwrap();
    backend.init_layout().unwrap();
    assert_eq!(
        fs::read_to_string(temp.path().join("inv.txt")).unwrap(),
        "(1) kettle"
    );
}

#[test]
fn save_normalizes_and_removes_backup() {
    let (temp, store) = setup("  (2)   *kettle  electric kettle ->  #tea @kitchen\n\n\nbroom\n");
    let inv = store.load().unwrap();
    assert_eq!(inv.len(), 2);

    store.save(&inv).unwrap();
    assert_eq!(
        fs::read_to_string(temp.path().join("inv.txt")).unwrap(),
        "(2) *kettle electric kettle -> @kitchen #tea\nbroom"
    );
    assert!(!store.backend().backup_file().exists());
}

#[test]
fn saved_inventory_reloads_identically() {
    let (_temp, store) = setup("(1/4) *bulb light bulb -> @closet #e27 *lamp +1\n*lamp desk lamp");
    let first = store.load().unwrap();
    store.save(&first).unwrap();
    let second = store.load().unwrap();
    assert_eq!(first.to_text(), second.to_text());
    assert_eq!(second.get("bulb").unwrap().refs(), ["*lamp"]);
}

#[test]
fn picture_ids_fill_gaps_on_disk() {
    let (temp, store) = setup("");
    let pics = temp.path().join("pics");
    touch(&pics.join("1.jpg"));
    touch(&pics.join("2.jpg"));
    touch(&pics.join("4.jpg"));
    assert_eq!(store.allocate_picture_id().unwrap(), "3");
}

#[test]
fn import_copies_jpeg_under_new_id() {
    let (temp, store) = setup("");
    let source = temp.path().join("IMG_0001.JPG");
    touch(&source);

    let token = store.import_picture(&CopyImporter, &source).unwrap();
    assert_eq!(token, "+1");
    assert!(temp.path().join("pics/1.jpg").is_file());

    let png = temp.path().join("scan.png");
    touch(&png);
    assert!(store.import_picture(&CopyImporter, &png).is_err());
    assert_eq!(store.allocate_picture_id().unwrap(), "2");
}

#[test]
fn clean_quarantines_orphans_once() {
    let (temp, store) = setup("kettle -> @kitchen +2");
    let pics = temp.path().join("pics");
    touch(&pics.join("1.jpg"));
    touch(&pics.join("2.jpg"));
    let inv = store.load().unwrap();

    let report = store.clean_pictures(&inv).unwrap();
    assert_eq!(report.moved, ["1.jpg"]);
    assert!(temp.path().join("garbage/1.jpg").is_file());
    assert!(pics.join("2.jpg").is_file());

    touch(&pics.join("3.jpg"));
    assert!(matches!(
        store.clean_pictures(&inv),
        Err(InvError::GarbagePending(_))
    ));
    assert!(pics.join("3.jpg").is_file());
}
