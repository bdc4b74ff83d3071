//! Round-trip tests between the layout store and configuration documents.

mod fixtures;
use fixtures::*;

use tablecrop::models::{Area, DataType, PageRole};
use tablecrop::parser::{
    export_document, export_document_with, import_document, import_json, CodecError,
    ExportOptions, KeyCollisionPolicy,
};
use tablecrop::services::LayoutStore;

#[test]
fn test_import_pipeline_document() {
    let fragment = import_json(STATEMENT_JSON).expect("document should import");

    assert_eq!(fragment.columns.len(), 2);
    assert_eq!(fragment.columns[0].name, "Date");
    assert_eq!(fragment.columns[0].data_type, DataType::Date);
    assert_eq!(fragment.columns[1].position_for(PageRole::First), 48.0);
    assert_eq!(fragment.cleaning.date_format, "%d/%m/%Y");
    assert_eq!(fragment.cleaning.trans_detail, "below");
    assert!(fragment.cleaning.drops_empty("Amount"));
    assert_eq!(
        fragment.areas.default,
        Some(Area::from_edges(0.0, 0.0, 100.0, 200.0))
    );
}

#[test]
fn test_loaded_store_exports_the_same_document() {
    let document: tablecrop::parser::ConfigDocument =
        serde_json::from_str(STATEMENT_JSON).unwrap();

    let mut store = LayoutStore::new();
    store.load(import_document(&document).unwrap());

    assert_eq!(export_document(store.state()).unwrap(), document);
}

#[test]
fn test_round_trip_after_editing() {
    let mut store = statement_store();
    store.add_column(20.4, "Description", DataType::String);
    store.set_area(PageRole::First, Area::from_edges(0.0, 60.2, 100.0, 200.0));
    store.set_drop_empty("Description", true);

    let document = export_document(store.state()).unwrap();
    let fragment = import_document(&document).unwrap();

    let names: Vec<_> = fragment.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Date", "Description", "Amount"]);
    assert_eq!(fragment.columns[1].position_for(PageRole::Default), 20.0);
    assert_eq!(
        fragment.areas.first,
        Some(Area::from_edges(0.0, 60.0, 100.0, 200.0))
    );
    assert_eq!(
        fragment.areas.default,
        Some(Area::from_edges(0.0, 0.0, 100.0, 200.0))
    );
    assert!(fragment.cleaning.drops_empty("Description"));
}

#[test]
fn test_reorder_does_not_change_export() {
    let mut store = statement_store();
    store.add_column(20.0, "Description", DataType::String);
    let before = export_document(store.state()).unwrap();

    store.reorder_column(2, 0);
    store.reorder_column(1, 2);
    assert_eq!(export_document(store.state()).unwrap(), before);
}

#[test]
fn test_collision_policies() {
    let mut store = statement_store();
    store.add_column(80.0, "AMOUNT", DataType::Number);

    assert!(matches!(
        export_document(store.state()),
        Err(CodecError::DuplicateKey { .. })
    ));

    let options = ExportOptions {
        key_collisions: KeyCollisionPolicy::Suffix,
    };
    let document = export_document_with(store.state(), &options).unwrap();
    let fragment = import_document(&document).unwrap();
    let names: Vec<_> = fragment.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Date", "Amount", "AMOUNT"]);
}

#[test]
fn test_export_needs_both_areas() {
    let mut store = statement_store();
    store.clear_area(PageRole::First);

    let err = export_document(store.state()).unwrap_err();
    assert!(matches!(err, CodecError::MissingArea(PageRole::First)));
    assert!(err.to_string().contains("first"));
}
