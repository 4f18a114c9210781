//! Opening a database addressed relative to the working directory.
//!
//! Changing the working directory affects the whole process, so this file
//! holds a single test.
#![cfg(feature = "store-sqlite")]

use camino::Utf8PathBuf;
use guide_core::{EntityOptions, Guide, GuideStore, SqliteGuideStore};
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
fn opens_a_database_above_the_working_directory() {
    let scratch = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(scratch.path().to_path_buf()).expect("utf-8 temp dir");
    std::fs::create_dir(root.join("work")).expect("create work dir");
    let previous = std::env::current_dir().expect("read working dir");
    std::env::set_current_dir(root.join("work")).expect("enter work dir");

    let mut store = SqliteGuideStore::open("../city_guide.db").expect("open store");
    let mut guide =
        Guide::new("Oaxaca", EntityOptions::default().with_coordinates(17.0732, -96.7266))
            .expect("valid guide");
    store.create_guide(&mut guide).expect("create guide");
    store.close().expect("close store");

    std::env::set_current_dir(previous).expect("restore working dir");
    assert!(root.join("city_guide.db").is_file());
}
