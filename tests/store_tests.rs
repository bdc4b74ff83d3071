//! Editing-session tests: screen pointer events through the viewport into the store.

use std::cell::RefCell;
use std::rc::Rc;

use tablecrop::models::{Area, AreaEdge, DataType, InteractionMode, PageRole, Point, Viewport};
use tablecrop::services::geometry::surface_point;
use tablecrop::services::{LayoutStore, StoreEvent};

/// Viewport showing a 3-page statement at 150% zoom, page drawn at (40, 10).
fn zoomed_viewport() -> Viewport {
    let mut viewport = Viewport::default();
    viewport.set_total_pages(3);
    viewport.set_scale(1.5);
    viewport.set_page_origin(Some(Point::new(40.0, 10.0)));
    viewport
}

fn page_point(viewport: &Viewport, x: f64, y: f64) -> Point {
    surface_point(viewport, Point::new(x, y)).expect("page is rendered")
}

#[test]
fn test_drag_on_zoomed_page_commits_page_space_area() {
    let viewport = zoomed_viewport();
    let mut store = LayoutStore::new();
    store.set_active_role(viewport.page_role());

    // Drag from bottom-right to top-left in screen pixels
    store.pointer_down(page_point(&viewport, 190.0, 310.0));
    store.pointer_move(page_point(&viewport, 100.0, 160.0));
    store.pointer_move(page_point(&viewport, 40.0, 10.0));
    let committed = store.pointer_up();

    let expected = Area::from_edges(0.0, 0.0, 100.0, 200.0);
    assert_eq!(committed, Some(expected));
    assert_eq!(store.area(PageRole::First), Some(expected));
    // First commit of the session seeds the other role too
    assert_eq!(store.area(PageRole::Default), Some(expected));
}

#[test]
fn test_page_navigation_switches_role_for_edits() {
    let mut viewport = zoomed_viewport();
    let mut store = LayoutStore::new();
    store.set_area(PageRole::Default, Area::from_edges(0.0, 0.0, 100.0, 200.0));

    assert!(viewport.next_page());
    store.set_active_role(viewport.page_role());
    assert_eq!(store.active_role(), PageRole::Default);

    assert!(viewport.previous_page());
    store.set_active_role(viewport.page_role());
    store.set_area_edge(AreaEdge::Top, 40.0);

    assert_eq!(store.area(PageRole::First), Some(Area::from_edges(0.0, 40.0, 100.0, 200.0)));
    assert_eq!(store.area(PageRole::Default), Some(Area::from_edges(0.0, 0.0, 100.0, 200.0)));
}

#[test]
fn test_insert_column_clicks_and_edit() {
    let viewport = zoomed_viewport();
    let mut store = LayoutStore::new();
    store.set_mode(InteractionMode::InsertColumn);

    store.pointer_down(page_point(&viewport, 47.5, 100.0));
    store.pointer_up();
    store.pointer_down(page_point(&viewport, 115.0, 100.0));
    store.pointer_up();

    assert_eq!(store.active_positions(), vec![5.0, 50.0]);
    assert!(store.update_column_name(0, "Date"));
    assert!(store.update_column_type(0, DataType::Date));
    assert!(store.update_column_name(1, "Amount"));
    assert_eq!(store.columns()[0].data_type, DataType::Date);
    assert_eq!(store.area(PageRole::Default), None);
}

#[test]
fn test_release_outside_page_still_ends_drag() {
    let viewport = zoomed_viewport();
    let mut store = LayoutStore::new();

    store.pointer_down(page_point(&viewport, 40.0, 10.0));
    store.pointer_move(page_point(&viewport, 100.0, 100.0));
    store.pointer_leave();
    assert_eq!(store.pointer(), None);
    assert!(store.preview().is_some());

    assert_eq!(store.pointer_up(), Some(Area::from_edges(0.0, 0.0, 40.0, 60.0)));
    assert_eq!(store.preview(), None);
}

#[test]
fn test_observer_sees_drag_lifecycle() {
    let viewport = zoomed_viewport();
    let mut store = LayoutStore::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |event| sink.borrow_mut().push(*event));

    store.pointer_down(page_point(&viewport, 40.0, 10.0));
    store.pointer_move(page_point(&viewport, 100.0, 100.0));
    store.pointer_up();

    assert_eq!(
        *events.borrow(),
        vec![
            StoreEvent::PointerMoved,
            StoreEvent::PreviewChanged,
            StoreEvent::AreaChanged(PageRole::Default),
            StoreEvent::AreaChanged(PageRole::First),
        ]
    );
}

#[test]
fn test_remove_out_of_range_leaves_store_unchanged() {
    let mut store = LayoutStore::new();
    store.add_column(5.0, "Date", DataType::Date);
    store.add_column(50.0, "Amount", DataType::Number);
    let before = store.state().clone();

    assert!(!store.remove_column(99));
    assert_eq!(store.state(), &before);
}
