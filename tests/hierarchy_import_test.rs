// ==========================================
// Hierarchy import integration tests
// ==========================================
// Covers: tree materialization, idempotent re-import, positional
// unit/sub-component coupling, skip-list, empty sheets.
// ==========================================


use refdata_import::importer::{SheetOutcome, SkipReason};
use refdata_import::repository::{list_groups, sub_components_of, units_of};
use refdata_import::{import_hierarchy, logging, ImportConfig, ImportError};
use test_helpers::{create_test_db, hierarchy_counts, write_workbook};

fn fixture_workbook() -> Vec<(&'static str, Vec<Vec<&'static str>>)> {
    vec![
        // metadata sheet, must never become a group
        ("General", vec![vec!["Option", "Wert"]]),
        (
            "Produktion",
            vec![
                vec!["Presse", "Ofen"],
                vec!["Hydraulik", "Brenner"],
                vec!["Steuerung", "   "], // whitespace-only cell is empty
            ],
        ),
        (
            "Instandhaltung",
            vec![vec!["Kran"], vec!["Seilzug"], vec!["Laufkatze"]],
        ),
    ]
}

#[test]
fn test_basic_hierarchy_import() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().unwrap();
    let source = tempfile::NamedTempFile::with_suffix(".xlsx").unwrap();
    write_workbook(source.path(), &fixture_workbook()).unwrap();

    let config = ImportConfig::default();
    let summary = import_hierarchy(source.path(), &db_path, &config).unwrap();

    assert_eq!(summary.groups_created, 2);
    assert_eq!(summary.units_created, 3);
    assert_eq!(summary.sub_components_created, 5);
    assert_eq!(summary.sheets_failed, 0);

    // skip-list honored
    assert!(matches!(
        summary.counts_for("General"),
        Some(SheetOutcome::Skipped {
            reason: SkipReason::SkipListed
        })
    ));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let groups = list_groups(&conn).unwrap();
    assert_eq!(
        groups.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        vec!["Produktion", "Instandhaltung"]
    );

    let units = units_of(&conn, groups[0].id).unwrap();
    assert_eq!(
        units.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Presse", "Ofen"]
    );

    let presse_parts = sub_components_of(&conn, units[0].id).unwrap();
    assert_eq!(
        presse_parts
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Hydraulik", "Steuerung"]
    );
    let ofen_parts = sub_components_of(&conn, units[1].id).unwrap();
    assert_eq!(
        ofen_parts.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Brenner"]
    );
}

#[test]
fn test_reimport_is_idempotent() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().unwrap();
    let source = tempfile::NamedTempFile::with_suffix(".xlsx").unwrap();
    write_workbook(source.path(), &fixture_workbook()).unwrap();

    let config = ImportConfig::default();
    import_hierarchy(source.path(), &db_path, &config).unwrap();

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let before = hierarchy_counts(&conn);

    let second = import_hierarchy(source.path(), &db_path, &config).unwrap();
    let after = hierarchy_counts(&conn);

    assert_eq!(before, after, "re-import must not create duplicates");
    assert_eq!(second.groups_created, 0);
    assert_eq!(second.units_created, 0);
    assert_eq!(second.sub_components_created, 0);
}

#[test]
fn test_grown_source_adds_only_new_children() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().unwrap();
    let source = tempfile::NamedTempFile::with_suffix(".xlsx").unwrap();
    write_workbook(
        source.path(),
        &[("Produktion", vec![vec!["Presse"], vec!["Hydraulik"]])],
    )
    .unwrap();

    let config = ImportConfig::default();
    import_hierarchy(source.path(), &db_path, &config).unwrap();

    // same sheet, one new sub-component appended
    write_workbook(
        source.path(),
        &[(
            "Produktion",
            vec![vec!["Presse"], vec!["Hydraulik"], vec!["Steuerung"]],
        )],
    )
    .unwrap();
    let second = import_hierarchy(source.path(), &db_path, &config).unwrap();

    assert_eq!(second.groups_created, 0);
    assert_eq!(second.units_created, 0);
    assert_eq!(second.sub_components_created, 1);

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    assert_eq!(hierarchy_counts(&conn), (1, 1, 2));
}

#[test]
fn test_orphan_column_dropped() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().unwrap();
    let source = tempfile::NamedTempFile::with_suffix(".xlsx").unwrap();
    write_workbook(
        source.path(),
        &[(
            "Werk",
            vec![
                vec!["A", "", "B"],
                vec!["x1", "y-orphan", "x2"],
            ],
        )],
    )
    .unwrap();

    let config = ImportConfig::default();
    let summary = import_hierarchy(source.path(), &db_path, &config).unwrap();

    assert_eq!(summary.units_created, 2);
    assert_eq!(summary.sub_components_created, 2);
    assert_eq!(summary.orphan_cells, 1, "y-orphan has no unit above it");

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let groups = list_groups(&conn).unwrap();
    let units = units_of(&conn, groups[0].id).unwrap();
    assert_eq!(
        units.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["A", "B"]
    );

    let a_parts = sub_components_of(&conn, units[0].id).unwrap();
    assert_eq!(a_parts.len(), 1);
    assert_eq!(a_parts[0].name, "x1");
    let b_parts = sub_components_of(&conn, units[1].id).unwrap();
    assert_eq!(b_parts.len(), 1);
    assert_eq!(b_parts[0].name, "x2");
}

#[test]
fn test_empty_sheet_skipped_with_warning() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().unwrap();
    let source = tempfile::NamedTempFile::with_suffix(".xlsx").unwrap();
    write_workbook(
        source.path(),
        &[("Leer", vec![]), ("Werk", vec![vec!["Presse"]])],
    )
    .unwrap();

    let config = ImportConfig::default();
    let summary = import_hierarchy(source.path(), &db_path, &config).unwrap();

    assert!(matches!(
        summary.counts_for("Leer"),
        Some(SheetOutcome::Skipped {
            reason: SkipReason::EmptySheet
        })
    ));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    // only "Werk" produced a group
    assert_eq!(hierarchy_counts(&conn).0, 1);
}

#[test]
fn test_custom_skip_list() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().unwrap();
    let source = tempfile::NamedTempFile::with_suffix(".xlsx").unwrap();
    write_workbook(
        source.path(),
        &[("Meta", vec![vec!["x"]]), ("Werk", vec![vec!["Presse"]])],
    )
    .unwrap();

    let config = ImportConfig {
        skip_sheets: vec!["Meta".to_string()],
        ..ImportConfig::default()
    };
    let summary = import_hierarchy(source.path(), &db_path, &config).unwrap();

    assert_eq!(summary.groups_created, 1);
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let groups = list_groups(&conn).unwrap();
    assert_eq!(groups[0].name, "Werk");
}

#[test]
fn test_missing_workbook_is_fatal() {
    logging::init_test();
    let (_db_file, db_path) = create_test_db().unwrap();

    let result = import_hierarchy("does_not_exist.xlsx", &db_path, &ImportConfig::default());
    assert!(matches!(
        result,
        Err(ImportError::SourceUnreadable { .. })
    ));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    assert_eq!(hierarchy_counts(&conn), (0, 0, 0));
}
