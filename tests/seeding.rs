use std::fs;
use std::path::{Path, PathBuf};

use prof_simulator::db::seed::{bind_images, create_tables, populate_tables};
use prof_simulator::db::{is_fresh, seed_database, DataStore, SeedReport, Value, ALL_ROWS};

fn bundled_seed_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seed")
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write fixture");
}

#[test]
fn bundled_seed_populates_every_table() {
    let store = DataStore::open_in_memory().expect("store");
    let report = seed_database(&store, &bundled_seed_dir()).expect("seed");

    assert_eq!(
        report,
        SeedReport {
            tables: 7,
            rows: 20,
            images: 2,
        }
    );

    let classes = store
        .read_rows("classes", "year, section", "1 ORDER BY year, section", 0)
        .unwrap();
    assert_eq!(
        classes,
        vec![
            vec![Value::Integer(1), Value::Text("A".into())],
            vec![Value::Integer(3), Value::Text("A".into())],
            vec![Value::Integer(3), Value::Text("B".into())],
        ]
    );

    let prof = store
        .read_rows("profs", "first_name, is_coordinator", "prof_id = 1", 0)
        .unwrap();
    assert_eq!(
        prof,
        vec![vec![Value::Text("Maria".into()), Value::Text("True".into())]]
    );

    let logo = store
        .read_rows("images", "image", "image_id = 1", 0)
        .unwrap();
    match &logo[0][0] {
        Value::Blob(bytes) => assert!(bytes.starts_with(b"\x89PNG")),
        other => panic!("expected picture bytes, got {other:?}"),
    }
}

#[test]
fn manifests_convert_value_types() {
    let dir = tempfile::tempdir().unwrap();
    let generation = dir.path().join("generation.csv");
    let population = dir.path().join("population.csv");
    write(
        &generation,
        "marks,\"label TEXT, score REAL, attempts INTEGER, passed TEXT, code TEXT\"\n",
    );
    write(
        &population,
        "marks,\"label, score, attempts, passed, code\",\"'quiz', 3.5, 2, True, '42'\"\n",
    );

    let store = DataStore::open_in_memory().unwrap();
    assert_eq!(create_tables(&store, &generation).unwrap(), 1);
    assert_eq!(populate_tables(&store, &population).unwrap(), 1);

    let rows = store.read_rows("marks", "*", ALL_ROWS, 0).unwrap();
    assert_eq!(
        rows,
        vec![vec![
            Value::Text("quiz".into()),
            Value::Real(3.5),
            Value::Integer(2),
            Value::Text("True".into()),
            Value::Text("42".into()),
        ]]
    );
}

#[test]
fn failing_row_stops_seeding_but_keeps_earlier_rows() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("tables_generation.csv"),
        "classes,\"year INTEGER NOT NULL, section TEXT\"\n",
    );
    write(
        &dir.path().join("tables_population.csv"),
        concat!(
            "classes,\"year, section\",\"1, 'A'\"\n",
            "classes,\"section\",\"'B'\"\n",
            "classes,\"year, section\",\"2, 'C'\"\n",
        ),
    );

    let store = DataStore::open_in_memory().unwrap();
    let err = seed_database(&store, dir.path()).expect_err("not null violation");
    assert!(format!("{err:#}").contains("row 2"), "unexpected error: {err:#}");

    let rows = store.read_rows("classes", "section", ALL_ROWS, 0).unwrap();
    assert_eq!(rows, vec![vec![Value::Text("A".into())]]);
}

#[test]
fn pictures_bind_by_file_name_key() {
    let dir = tempfile::tempdir().unwrap();
    let pics = dir.path().join("pics");
    fs::create_dir(&pics).unwrap();
    fs::write(pics.join("2.png"), b"second").unwrap();
    fs::write(pics.join("1.png"), b"first").unwrap();
    fs::write(pics.join("7.png"), b"orphan").unwrap();
    fs::write(pics.join(".DS_Store"), b"hidden").unwrap();

    let store = DataStore::open_in_memory().unwrap();
    store
        .create_table("images", "image_id INTEGER PRIMARY KEY, image BLOB")
        .unwrap();
    for id in 1..=3 {
        store
            .insert_row("images", "image_id", &[Value::Integer(id)])
            .unwrap();
    }

    assert_eq!(bind_images(&store, &pics).unwrap(), 2);

    let rows = store
        .read_rows("images", "image_id, image", "1 ORDER BY image_id", 0)
        .unwrap();
    assert_eq!(
        rows,
        vec![
            vec![Value::Integer(1), Value::Blob(b"first".to_vec())],
            vec![Value::Integer(2), Value::Blob(b"second".to_vec())],
            vec![Value::Integer(3), Value::Null],
        ]
    );
}

#[test]
fn named_picture_does_not_overwrite_a_numbered_one() {
    let dir = tempfile::tempdir().unwrap();
    let pics = dir.path().join("pics");
    fs::create_dir(&pics).unwrap();
    fs::write(pics.join("2.png"), b"two").unwrap();
    fs::write(pics.join("logo.png"), b"logo").unwrap();

    let store = DataStore::open_in_memory().unwrap();
    store
        .create_table("images", "image_id INTEGER PRIMARY KEY, image BLOB")
        .unwrap();
    for id in 1..=2 {
        store
            .insert_row("images", "image_id", &[Value::Integer(id)])
            .unwrap();
    }

    assert_eq!(bind_images(&store, &pics).unwrap(), 2);

    let rows = store
        .read_rows("images", "image_id, image", "1 ORDER BY image_id", 0)
        .unwrap();
    assert_eq!(
        rows,
        vec![
            vec![Value::Integer(1), Value::Blob(b"logo".to_vec())],
            vec![Value::Integer(2), Value::Blob(b"two".to_vec())],
        ]
    );
}

#[test]
fn missing_pictures_folder_binds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::open_in_memory().unwrap();
    assert_eq!(bind_images(&store, &dir.path().join("pics")).unwrap(), 0);
}

#[test]
fn fresh_means_missing_or_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("school.sqlite");
    assert!(is_fresh(&path));

    let store = DataStore::open(&path).unwrap();
    assert!(is_fresh(&path));

    store.create_table("classes", "year INTEGER").unwrap();
    assert!(!is_fresh(&path));
}
