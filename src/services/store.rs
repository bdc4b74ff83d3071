//! Layout store.
//!
//! The store owns every editable piece of the extraction layout: the crop area
//! for each page role, the column list, and the cleaning options. It also runs
//! the pointer gesture state machine that turns drags on the rendered page into
//! committed areas and clicks into new columns.
//!
//! The application shell owns exactly one store and feeds it pointer events.
//! Presentation code reads state through the getters and can register a
//! callback with [`LayoutStore::subscribe`] to hear about changes.
//!
//! # Gesture state machine
//!
//! ```text
//! Idle --down(Select)--> Selecting --move--> Selecting (preview updated)
//!                          |
//!                          +--up (anywhere)--> Idle (preview committed)
//! Idle --down(InsertColumn)--> Idle (column appended at x)
//! ```
//!
//! Leaving the page surface only clears the pointer readout; a drag ends on
//! pointer-up alone, so the shell must route releases from anywhere on screen
//! to [`LayoutStore::pointer_up`].

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::models::{
    Area, AreaEdge, CleaningOptions, Column, DataType, InteractionMode, PageRole, Point,
    Rectangle, RoleMap,
};
use crate::services::geometry::rectangle_from_points;

/// Editable layout state.
///
/// This is the snapshot the codec reads from. It carries no gesture state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutState {
    /// Crop area per page role (`None` until the user selects one)
    pub areas: RoleMap<Option<Area>>,
    /// Columns in on-screen order (drag-reorderable)
    pub columns: Vec<Column>,
    /// Cleaning options
    pub cleaning: CleaningOptions,
    /// Page role that edits apply to
    pub active_role: PageRole,
    /// What pointer-down produces
    pub mode: InteractionMode,
}

impl LayoutState {
    /// Area for a role, if one has been set.
    #[must_use]
    pub fn area(&self, role: PageRole) -> Option<Area> {
        *self.areas.get(role)
    }

    /// Checks whether both page roles have an area (required for export).
    #[must_use]
    pub fn has_both_areas(&self) -> bool {
        self.areas.default.is_some() && self.areas.first.is_some()
    }
}

/// The part of the state a configuration document can restore.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutFragment {
    /// Crop area per page role
    pub areas: RoleMap<Option<Area>>,
    /// Columns in document order
    pub columns: Vec<Column>,
    /// Cleaning options
    pub cleaning: CleaningOptions,
}

impl From<LayoutFragment> for LayoutState {
    fn from(fragment: LayoutFragment) -> Self {
        Self {
            areas: fragment.areas,
            columns: fragment.columns,
            cleaning: fragment.cleaning,
            active_role: PageRole::Default,
            mode: InteractionMode::Select,
        }
    }
}

/// Progress of the current pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No button held
    #[default]
    Idle,
    /// Dragging out an area
    Selecting {
        /// Page-space point where the drag began
        anchor: Point,
        /// Live rectangle; drawn by the shell but not yet part of the layout
        preview: Option<Rectangle>,
    },
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreEvent {
    /// The committed area for a role changed (set or cleared)
    AreaChanged(PageRole),
    /// The drag preview rectangle changed
    PreviewChanged,
    /// The live pointer readout changed
    PointerMoved,
    /// Columns were added, removed, edited, or reordered
    ColumnsChanged,
    /// A cleaning option changed
    CleaningChanged,
    /// Interaction mode changed
    ModeChanged(InteractionMode),
    /// The role being edited changed
    ActiveRoleChanged(PageRole),
    /// State was replaced from a configuration document
    Loaded,
}

/// Handle returned by [`LayoutStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Single source of truth for the layout being edited.
pub struct LayoutStore {
    state: LayoutState,
    gesture: Gesture,
    pointer: Option<Point>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutStore")
            .field("state", &self.state)
            .field("gesture", &self.gesture)
            .field("pointer", &self.pointer)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutStore {
    /// Creates an empty store with default cleaning options.
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(LayoutState::default())
    }

    /// Creates an empty store with the given cleaning options.
    #[must_use]
    pub fn with_cleaning(cleaning: CleaningOptions) -> Self {
        Self::from_state(LayoutState {
            cleaning,
            ..LayoutState::default()
        })
    }

    /// Creates a store around an existing state snapshot.
    #[must_use]
    pub fn from_state(state: LayoutState) -> Self {
        Self {
            state,
            gesture: Gesture::Idle,
            pointer: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ----------------------------------------------------------------------
    // Read access
    // ----------------------------------------------------------------------

    /// Borrows the full editable state.
    #[must_use]
    pub const fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Committed area for a role.
    #[must_use]
    pub fn area(&self, role: PageRole) -> Option<Area> {
        self.state.area(role)
    }

    /// Committed area for the active role.
    #[must_use]
    pub fn active_area(&self) -> Option<Area> {
        self.state.area(self.state.active_role)
    }

    /// Columns in on-screen order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.state.columns
    }

    /// Cleaning options.
    #[must_use]
    pub const fn cleaning(&self) -> &CleaningOptions {
        &self.state.cleaning
    }

    /// Role that edits currently apply to.
    #[must_use]
    pub const fn active_role(&self) -> PageRole {
        self.state.active_role
    }

    /// Current interaction mode.
    #[must_use]
    pub const fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    /// Current gesture.
    #[must_use]
    pub const fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Live drag rectangle, if a drag is in progress and the pointer has moved.
    #[must_use]
    pub const fn preview(&self) -> Option<Rectangle> {
        match self.gesture {
            Gesture::Selecting { preview, .. } => preview,
            Gesture::Idle => None,
        }
    }

    /// Last page-space pointer position over the page, for the coordinate readout.
    #[must_use]
    pub const fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Column positions for the active role, parallel to [`columns`](Self::columns).
    #[must_use]
    pub fn active_positions(&self) -> Vec<f64> {
        let role = self.state.active_role;
        self.state
            .columns
            .iter()
            .map(|column| column.position_for(role))
            .collect()
    }

    // ----------------------------------------------------------------------
    // Subscriptions
    // ----------------------------------------------------------------------

    /// Registers a callback invoked after every effective mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&event);
        }
    }

    // ----------------------------------------------------------------------
    // Mode and role
    // ----------------------------------------------------------------------

    /// Switches the interaction mode.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if self.state.mode != mode {
            self.state.mode = mode;
            self.notify(StoreEvent::ModeChanged(mode));
        }
    }

    /// Switches which page role edits apply to.
    pub fn set_active_role(&mut self, role: PageRole) {
        if self.state.active_role != role {
            self.state.active_role = role;
            self.notify(StoreEvent::ActiveRoleChanged(role));
        }
    }

    // ----------------------------------------------------------------------
    // Pointer gestures
    // ----------------------------------------------------------------------

    /// Handles a button press on the page at a page-space point.
    ///
    /// - `Select` starts a drag anchored at `point`.
    /// - `InsertColumn` appends an unnamed `String` column at `point.x`.
    /// - `Move` and `Resize` are reserved and ignored.
    pub fn pointer_down(&mut self, point: Point) {
        match self.state.mode {
            InteractionMode::Select => {
                self.gesture = Gesture::Selecting {
                    anchor: point,
                    preview: None,
                };
            }
            InteractionMode::InsertColumn => {
                self.add_column(point.x, "", DataType::String);
            }
            InteractionMode::Move | InteractionMode::Resize => {}
        }
    }

    /// Handles pointer motion over the page.
    ///
    /// Always refreshes the pointer readout. During a drag, also recomputes
    /// the preview rectangle from the anchor.
    pub fn pointer_move(&mut self, point: Point) {
        self.pointer = Some(point);
        self.notify(StoreEvent::PointerMoved);

        if let Gesture::Selecting { anchor, .. } = self.gesture {
            self.gesture = Gesture::Selecting {
                anchor,
                preview: rectangle_from_points(Some(anchor), Some(point)),
            };
            self.notify(StoreEvent::PreviewChanged);
        }
    }

    /// Handles a button release anywhere on screen.
    ///
    /// Ends a drag and commits its preview as the active role's area. A
    /// press-release without motion commits nothing. Returns the committed area.
    pub fn pointer_up(&mut self) -> Option<Area> {
        let gesture = std::mem::take(&mut self.gesture);
        let Gesture::Selecting { preview, .. } = gesture else {
            return None;
        };

        let area = preview?.to_area();
        self.set_area(self.state.active_role, area);
        Some(area)
    }

    /// Handles the pointer leaving the page surface.
    ///
    /// Only the readout is cleared; an in-progress drag keeps going.
    pub fn pointer_leave(&mut self) {
        if self.pointer.take().is_some() {
            self.notify(StoreEvent::PointerMoved);
        }
    }

    // ----------------------------------------------------------------------
    // Areas
    // ----------------------------------------------------------------------

    /// Sets the area for a role.
    ///
    /// If the other role has no area yet, it receives the same rectangle.
    /// Once both roles have an area they are edited independently.
    pub fn set_area(&mut self, role: PageRole, area: Area) {
        self.state.areas.set(role, Some(area));
        debug!(
            "Area for {} page set to ({}, {}) - ({}, {})",
            role,
            area.x1(),
            area.y1(),
            area.x2(),
            area.y2()
        );
        self.notify(StoreEvent::AreaChanged(role));

        let other = role.other();
        if self.state.areas.get(other).is_none() {
            self.state.areas.set(other, Some(area));
            debug!("Seeded {} page area from {} page", other, role);
            self.notify(StoreEvent::AreaChanged(other));
        }
    }

    /// Moves one edge of the active role's area.
    ///
    /// Does nothing when the active role has no area. Returns the new area.
    pub fn set_area_edge(&mut self, edge: AreaEdge, value: f64) -> Option<Area> {
        let area = self.active_area()?.with_edge(edge, value);
        self.set_area(self.state.active_role, area);
        Some(area)
    }

    /// Discards a role's area and returns to `Select` mode.
    pub fn clear_area(&mut self, role: PageRole) {
        if self.state.areas.get(role).is_some() {
            self.state.areas.set(role, None);
            debug!("Cleared {} page area", role);
            self.notify(StoreEvent::AreaChanged(role));
        }
        self.set_mode(InteractionMode::Select);
    }

    // ----------------------------------------------------------------------
    // Columns
    // ----------------------------------------------------------------------

    /// Appends a column whose boundary is `position` for both page roles.
    pub fn add_column(&mut self, position: f64, name: impl Into<String>, data_type: DataType) {
        let column = Column::new(name, data_type, position);
        debug!("Adding column '{}' at x={}", column.name, position);
        self.state.columns.push(column);
        self.notify(StoreEvent::ColumnsChanged);
    }

    /// Appends an unnamed column at the right edge of the active area
    /// (or at 0 when there is no area yet).
    pub fn append_column(&mut self) {
        let position = self.active_area().map_or(0.0, |area| area.x2());
        self.add_column(position, "", DataType::String);
    }

    /// Removes a column. Out-of-range indices are ignored.
    pub fn remove_column(&mut self, index: usize) -> bool {
        if index >= self.state.columns.len() {
            return false;
        }
        let removed = self.state.columns.remove(index);
        debug!("Removed column {} ('{}')", index, removed.name);
        self.notify(StoreEvent::ColumnsChanged);
        true
    }

    /// Moves a column's boundary for the active role only.
    pub fn update_column_position(&mut self, index: usize, value: f64) -> bool {
        let role = self.state.active_role;
        self.edit_column(index, |column| column.position.set(role, value))
    }

    /// Renames a column.
    pub fn update_column_name(&mut self, index: usize, name: impl Into<String>) -> bool {
        let name = name.into();
        self.edit_column(index, |column| column.name = name)
    }

    /// Changes a column's data type.
    pub fn update_column_type(&mut self, index: usize, data_type: DataType) -> bool {
        self.edit_column(index, |column| column.data_type = data_type)
    }

    /// Moves the column at `old_index` to `new_index`, shifting the ones in
    /// between. Relative order of all other columns is preserved.
    pub fn reorder_column(&mut self, old_index: usize, new_index: usize) -> bool {
        let len = self.state.columns.len();
        if old_index >= len || new_index >= len {
            return false;
        }
        if old_index != new_index {
            let column = self.state.columns.remove(old_index);
            self.state.columns.insert(new_index, column);
            debug!("Moved column {} to {}", old_index, new_index);
            self.notify(StoreEvent::ColumnsChanged);
        }
        true
    }

    fn edit_column(&mut self, index: usize, edit: impl FnOnce(&mut Column)) -> bool {
        let Some(column) = self.state.columns.get_mut(index) else {
            return false;
        };
        edit(column);
        self.notify(StoreEvent::ColumnsChanged);
        true
    }

    // ----------------------------------------------------------------------
    // Cleaning options
    // ----------------------------------------------------------------------

    /// Sets the date format pattern.
    pub fn set_date_format(&mut self, date_format: impl Into<String>) {
        self.state.cleaning.date_format = date_format.into();
        self.notify(StoreEvent::CleaningChanged);
    }

    /// Sets the transaction-detail placement.
    pub fn set_trans_detail(&mut self, trans_detail: impl Into<String>) {
        self.state.cleaning.trans_detail = trans_detail.into();
        self.notify(StoreEvent::CleaningChanged);
    }

    /// Marks or unmarks a column (by display name) for empty-row dropping.
    pub fn set_drop_empty(&mut self, name: impl Into<String>, drop: bool) {
        if self.state.cleaning.set_drop_empty(name, drop) {
            self.notify(StoreEvent::CleaningChanged);
        }
    }

    /// Replaces the whole set of columns marked for empty-row dropping.
    pub fn set_drop_empty_columns(&mut self, names: BTreeSet<String>) {
        self.state.cleaning.drop_empty_columns = names;
        self.notify(StoreEvent::CleaningChanged);
    }

    // ----------------------------------------------------------------------
    // Loading
    // ----------------------------------------------------------------------

    /// Replaces areas, columns, and cleaning options in one step.
    ///
    /// Any gesture in progress is dropped, the active role returns to
    /// `Default`, and the mode returns to `Select`.
    pub fn load(&mut self, fragment: LayoutFragment) {
        debug!("Loading layout with {} columns", fragment.columns.len());
        self.state = LayoutState::from(fragment);
        self.gesture = Gesture::Idle;
        self.notify(StoreEvent::Loaded);
    }
}
