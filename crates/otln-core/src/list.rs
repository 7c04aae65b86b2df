//! Position-ordered item container
//!
//! A `PositionalList` holds text items on a 2-D canvas and never stores an
//! explicit sequence: the canonical order is re-derived from each item's
//! vertical position whenever a caller asks for it. Dragging an item is a
//! plain position update; nothing is reordered until the next order query.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::geometry::{Extent, Point};

/// Default gap, in canvas units, between two adjacent appended items
pub const DEFAULT_ITEM_GAP: f64 = 10.0;

/// Opaque handle to an item in a `PositionalList`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from item lookups
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    #[error("no item with id {0}")]
    UnknownItem(ItemId),
}

/// A positioned entry on a list's canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    text: String,
    top_left: Point,
    extent: Extent,
}

impl Item {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Anchor point used for hit tests: the top-center of the item,
    /// matching how items are anchored when inserted.
    pub fn anchor(&self) -> Point {
        Point::new(self.top_left.x + self.extent.width / 2.0, self.top_left.y)
    }

    fn top(&self) -> f64 {
        self.top_left.y
    }
}

/// A container whose order is a function of item positions
///
/// Items are appended top-center anchored at `(width / 2, next_depth)`, where
/// `next_depth` only ever grows: removing an item does not reclaim its slot,
/// so a fresh insert can never land on top of an item the user dragged back
/// up into previously used space.
#[derive(Debug)]
pub struct PositionalList {
    width: f64,
    height: f64,
    gap: f64,
    next_depth: f64,
    items: HashMap<ItemId, Item>,
}

impl PositionalList {
    /// Create an empty list with the default inter-item gap
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_gap(width, height, DEFAULT_ITEM_GAP)
    }

    /// Create an empty list with an explicit inter-item gap
    pub fn with_gap(width: f64, height: f64, gap: f64) -> Self {
        Self {
            width,
            height,
            gap,
            next_depth: 0.0,
            items: HashMap::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Vertical offset at which the next appended item will be placed
    pub fn next_depth(&self) -> f64 {
        self.next_depth
    }

    /// Append a new item below everything inserted so far
    ///
    /// The extent comes from whatever renders the item; the list only needs
    /// the numbers. Advances `next_depth` by `gap + extent.height`.
    pub fn insert(&mut self, text: impl Into<String>, extent: Extent) -> ItemId {
        let id = ItemId::new();
        let top_left = Point::new(self.width / 2.0 - extent.width / 2.0, self.next_depth);
        self.items.insert(
            id,
            Item {
                id,
                text: text.into(),
                top_left,
                extent,
            },
        );
        self.next_depth += self.gap + extent.height;
        id
    }

    /// Remove an item, returning it
    ///
    /// Remaining items keep their positions and `next_depth` is untouched.
    pub fn remove(&mut self, id: ItemId) -> Result<Item, ListError> {
        self.items.remove(&id).ok_or(ListError::UnknownItem(id))
    }

    /// Shift an item by a delta. O(1); never reorders anything.
    pub fn relocate(&mut self, id: ItemId, dx: f64, dy: f64) -> Result<(), ListError> {
        let item = self.items.get_mut(&id).ok_or(ListError::UnknownItem(id))?;
        item.top_left.x += dx;
        item.top_left.y += dy;
        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// All items sorted by the top edge of their extent, topmost first
    ///
    /// This is an O(n log n) operation on every call: the list keeps no order
    /// state, because a drag can move any item at any time and re-deriving is
    /// always correct. Callers only need the order at save/export/query
    /// boundaries, not per frame. Equal top-y is undefined order.
    pub fn ordered(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_by(|a, b| a.top().total_cmp(&b.top()));
        items
    }

    /// Item texts in canonical order
    pub fn ordered_texts(&self) -> Vec<String> {
        self.ordered().iter().map(|i| i.text.clone()).collect()
    }

    /// Nearest item to a point, by Euclidean distance to each item's anchor
    ///
    /// Used for drag starts. Returns `None` only when the list is empty.
    pub fn item_at(&self, point: Point) -> Option<ItemId> {
        self.items
            .values()
            .min_by(|a, b| {
                point
                    .distance_to(a.anchor())
                    .total_cmp(&point.distance_to(b.anchor()))
            })
            .map(|item| item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent() -> Extent {
        Extent::new(100.0, 20.0)
    }

    #[test]
    fn test_insert_places_items_downward() {
        let mut list = PositionalList::new(700.0, 800.0);
        let first = list.insert("first", extent());
        let second = list.insert("second", extent());

        let a = list.get(first).unwrap();
        let b = list.get(second).unwrap();
        assert_eq!(a.top_left().y, 0.0);
        assert_eq!(b.top_left().y, DEFAULT_ITEM_GAP + 20.0);
        // Top-center anchored on the canvas midline
        assert_eq!(a.top_left().x, 700.0 / 2.0 - 50.0);
        assert_eq!(a.anchor().x, 350.0);
    }

    #[test]
    fn test_ordered_tracks_live_item_count() {
        let mut list = PositionalList::new(700.0, 800.0);
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(list.insert(format!("note {i}"), extent()));
        }
        list.relocate(ids[2], 15.0, -3.0).unwrap();
        list.relocate(ids[4], -40.0, 120.0).unwrap();
        assert_eq!(list.ordered().len(), 5);

        list.remove(ids[1]).unwrap();
        assert_eq!(list.ordered().len(), 4);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_relocate_far_up_moves_item_first() {
        let mut list = PositionalList::new(700.0, 800.0);
        list.insert("a", extent());
        list.insert("b", extent());
        let c = list.insert("c", extent());

        list.relocate(c, 0.0, -1000.0).unwrap();
        let ordered = list.ordered();
        assert_eq!(ordered[0].id(), c);
        assert_eq!(list.ordered_texts(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_next_depth_never_decreases() {
        let mut list = PositionalList::new(700.0, 800.0);
        list.insert("a", extent());
        let b = list.insert("b", extent());
        let depth = list.next_depth();

        list.remove(b).unwrap();
        assert_eq!(list.next_depth(), depth);

        // A later insert still appends below the historical maximum
        let c = list.insert("c", extent());
        assert_eq!(list.get(c).unwrap().top_left().y, depth);
    }

    #[test]
    fn test_remove_unknown_item() {
        let mut list = PositionalList::new(700.0, 800.0);
        let id = list.insert("a", extent());
        list.remove(id).unwrap();
        assert_eq!(list.remove(id), Err(ListError::UnknownItem(id)));
        assert_eq!(
            list.relocate(id, 1.0, 1.0),
            Err(ListError::UnknownItem(id))
        );
    }

    #[test]
    fn test_ordered_on_empty_list() {
        let list = PositionalList::new(700.0, 800.0);
        assert!(list.ordered().is_empty());
        assert!(list.item_at(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_item_at_picks_nearest_anchor() {
        let mut list = PositionalList::new(700.0, 800.0);
        let a = list.insert("a", extent());
        let b = list.insert("b", extent());

        // Anchors sit at (350, 0) and (350, 30)
        assert_eq!(list.item_at(Point::new(340.0, 5.0)), Some(a));
        assert_eq!(list.item_at(Point::new(360.0, 28.0)), Some(b));
        // Far-away clicks still resolve to the nearest item
        assert_eq!(list.item_at(Point::new(0.0, 500.0)), Some(b));
    }
}
