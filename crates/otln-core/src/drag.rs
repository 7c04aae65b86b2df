//! Pointer-drag state machine
//!
//! Translates pointer down/move/up events into `PositionalList` position
//! updates. The controller never reorders anything: a drag only shifts the
//! grabbed item, and the new order surfaces the next time someone calls
//! `PositionalList::ordered`.

use std::mem;

use crate::geometry::Point;
use crate::list::{ItemId, ListError, PositionalList};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        item: ItemId,
        anchor: Point,
    },
}

/// A finished drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    pub item: ItemId,
    pub released_at: Point,
}

impl DragEnd {
    /// True when the pointer came up above the canvas, in the strip that
    /// doubles as the drop-to-remove target for topic note lists.
    pub fn in_removal_zone(&self) -> bool {
        self.released_at.y < 0.0
    }
}

/// Tracks one pointer's drag gesture over a single list
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Item currently being dragged, if any
    pub fn active_item(&self) -> Option<ItemId> {
        match self.state {
            DragState::Dragging { item, .. } => Some(item),
            DragState::Idle => None,
        }
    }

    /// Pointer pressed at `at`: hit-test the list and start dragging
    ///
    /// Returns the grabbed item, or `None` when the list is empty. A press
    /// while already dragging re-anchors on the new hit, which is what a
    /// missed release event degrades to.
    pub fn pointer_down(&mut self, list: &PositionalList, at: Point) -> Option<ItemId> {
        let item = list.item_at(at)?;
        self.state = DragState::Dragging { item, anchor: at };
        Some(item)
    }

    /// Pointer moved while the button is held
    ///
    /// Shifts the grabbed item by the delta since the last event and
    /// re-anchors. Runs on every move event; no batching is needed for
    /// correctness. Ignored while idle.
    pub fn pointer_move(&mut self, list: &mut PositionalList, at: Point) -> Result<(), ListError> {
        if let DragState::Dragging { item, anchor } = &mut self.state {
            let (dx, dy) = (at.x - anchor.x, at.y - anchor.y);
            let item = *item;
            *anchor = at;
            if let Err(err) = list.relocate(item, dx, dy) {
                // The item vanished under us; the gesture is over.
                self.state = DragState::Idle;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Pointer released at `at`
    ///
    /// Ends the gesture and reports where it ended. The item stays wherever
    /// the last move left it; callers that care about the removal zone check
    /// `DragEnd::in_removal_zone`. A release outside any tracked canvas is
    /// just a pointer-up with the last known coordinates.
    pub fn pointer_up(&mut self, at: Point) -> Option<DragEnd> {
        match mem::take(&mut self.state) {
            DragState::Dragging { item, .. } => Some(DragEnd {
                item,
                released_at: at,
            }),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;

    fn list_with(texts: &[&str]) -> PositionalList {
        let mut list = PositionalList::new(700.0, 800.0);
        for text in texts {
            list.insert(*text, Extent::new(100.0, 20.0));
        }
        list
    }

    #[test]
    fn test_full_gesture_moves_item() {
        let mut list = list_with(&["a", "b"]);
        let mut drag = DragController::new();

        let grabbed = drag.pointer_down(&list, Point::new(350.0, 1.0)).unwrap();
        assert!(drag.is_dragging());
        assert_eq!(drag.active_item(), Some(grabbed));
        let before = list.get(grabbed).unwrap().top_left();

        drag.pointer_move(&mut list, Point::new(355.0, 11.0)).unwrap();
        drag.pointer_move(&mut list, Point::new(355.0, 61.0)).unwrap();

        let after = list.get(grabbed).unwrap().top_left();
        assert_eq!(after.x, before.x + 5.0);
        assert_eq!(after.y, before.y + 60.0);

        let end = drag.pointer_up(Point::new(355.0, 61.0)).unwrap();
        assert_eq!(end.item, grabbed);
        assert!(!end.in_removal_zone());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drag_reorders_only_through_query() {
        let mut list = list_with(&["a", "b"]);
        let mut drag = DragController::new();

        // Grab "b" (anchor at y=30) and drag it above "a"
        let b = drag.pointer_down(&list, Point::new(350.0, 30.0)).unwrap();
        drag.pointer_move(&mut list, Point::new(350.0, -20.0)).unwrap();
        drag.pointer_up(Point::new(350.0, -20.0));

        let ordered = list.ordered();
        assert_eq!(ordered[0].id(), b);
        assert_eq!(list.ordered_texts(), vec!["b", "a"]);
    }

    #[test]
    fn test_release_above_canvas_is_removal_zone() {
        let mut list = list_with(&["a"]);
        let mut drag = DragController::new();

        drag.pointer_down(&list, Point::new(350.0, 0.0)).unwrap();
        drag.pointer_move(&mut list, Point::new(350.0, -15.0)).unwrap();
        let end = drag.pointer_up(Point::new(350.0, -15.0)).unwrap();
        assert!(end.in_removal_zone());
    }

    #[test]
    fn test_events_while_idle_are_noops() {
        let mut list = list_with(&["a"]);
        let mut drag = DragController::new();

        assert!(drag.pointer_move(&mut list, Point::new(1.0, 1.0)).is_ok());
        assert!(drag.pointer_up(Point::new(1.0, 1.0)).is_none());
        assert_eq!(
            list.get(list.item_at(Point::new(0.0, 0.0)).unwrap())
                .unwrap()
                .top_left()
                .y,
            0.0
        );
    }

    #[test]
    fn test_pointer_down_on_empty_list() {
        let list = PositionalList::new(700.0, 800.0);
        let mut drag = DragController::new();
        assert!(drag.pointer_down(&list, Point::new(10.0, 10.0)).is_none());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_vanished_item_ends_gesture() {
        let mut list = list_with(&["a"]);
        let mut drag = DragController::new();

        let item = drag.pointer_down(&list, Point::new(350.0, 0.0)).unwrap();
        list.remove(item).unwrap();

        let err = drag
            .pointer_move(&mut list, Point::new(350.0, 10.0))
            .unwrap_err();
        assert_eq!(err, ListError::UnknownItem(item));
        assert!(!drag.is_dragging());
    }
}
