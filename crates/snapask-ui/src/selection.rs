use snapask_types::{Point, SelectionRect};

/// Input fed to the selector by the overlay window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Dragging { anchor: Point, current: Point },
    Released(SelectionRect),
    Cancelled,
}

/// Drag-to-select state machine.
///
/// `Idle -> Dragging -> Released`, or `Cancelled` on Escape. A release that
/// spans zero width or zero height also ends in `Cancelled`. Both end states
/// are terminal and ignore further events.
#[derive(Debug)]
pub struct RegionSelector {
    state: SelectionState,
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSelector {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn handle(&mut self, event: SelectionEvent) -> SelectionState {
        self.state = match (self.state, event) {
            (SelectionState::Released(_) | SelectionState::Cancelled, _) => self.state,
            (_, SelectionEvent::Escape) => SelectionState::Cancelled,
            (SelectionState::Idle, SelectionEvent::PointerDown(at)) => SelectionState::Dragging {
                anchor: at,
                current: at,
            },
            (SelectionState::Dragging { anchor, .. }, SelectionEvent::PointerMove(at)) => {
                SelectionState::Dragging {
                    anchor,
                    current: at,
                }
            }
            (SelectionState::Dragging { anchor, .. }, SelectionEvent::PointerUp(at)) => {
                let rect = SelectionRect::from_corners(anchor, at);
                if rect.is_empty() {
                    tracing::debug!("Empty selection {:?}, treating as cancel", rect);
                    SelectionState::Cancelled
                } else {
                    SelectionState::Released(rect)
                }
            }
            (state, _) => state,
        };
        self.state
    }

    /// Force cancellation unless a terminal state was already reached
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            self.state = SelectionState::Cancelled;
        }
    }

    /// Rectangle to draw while dragging
    pub fn outline(&self) -> Option<SelectionRect> {
        match self.state {
            SelectionState::Dragging { anchor, current } => {
                Some(SelectionRect::from_corners(anchor, current))
            }
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            SelectionState::Released(_) | SelectionState::Cancelled
        )
    }

    /// The released rectangle, if the drag completed
    pub fn outcome(&self) -> Option<SelectionRect> {
        match self.state {
            SelectionState::Released(rect) => Some(rect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(from: Point, via: Point, to: Point) -> RegionSelector {
        let mut selector = RegionSelector::new();
        selector.handle(SelectionEvent::PointerDown(from));
        selector.handle(SelectionEvent::PointerMove(via));
        selector.handle(SelectionEvent::PointerUp(to));
        selector
    }

    #[test]
    fn test_drag_releases_normalized_rect() {
        let selector = drag(Point::new(10, 10), Point::new(50, 40), Point::new(100, 60));

        assert!(selector.is_finished());
        assert_eq!(
            selector.outcome(),
            Some(SelectionRect {
                x1: 10,
                y1: 10,
                x2: 100,
                y2: 60,
            })
        );
    }

    #[test]
    fn test_drag_direction_does_not_matter() {
        let forward = drag(Point::new(10, 10), Point::new(50, 40), Point::new(100, 60));
        let backward = drag(Point::new(100, 60), Point::new(50, 40), Point::new(10, 10));

        assert_eq!(forward.outcome(), backward.outcome());
    }

    #[test]
    fn test_outline_follows_pointer() {
        let mut selector = RegionSelector::new();
        assert_eq!(selector.outline(), None);

        selector.handle(SelectionEvent::PointerDown(Point::new(20, 20)));
        selector.handle(SelectionEvent::PointerMove(Point::new(5, 30)));
        assert_eq!(
            selector.outline(),
            Some(SelectionRect {
                x1: 5,
                y1: 20,
                x2: 20,
                y2: 30,
            })
        );

        selector.handle(SelectionEvent::PointerMove(Point::new(40, 45)));
        assert_eq!(
            selector.outline(),
            Some(SelectionRect {
                x1: 20,
                y1: 20,
                x2: 40,
                y2: 45,
            })
        );
    }

    #[test]
    fn test_escape_cancels_from_idle_and_dragging() {
        let mut idle = RegionSelector::new();
        assert_eq!(idle.handle(SelectionEvent::Escape), SelectionState::Cancelled);
        assert_eq!(idle.outcome(), None);

        let mut dragging = RegionSelector::new();
        dragging.handle(SelectionEvent::PointerDown(Point::new(1, 1)));
        dragging.handle(SelectionEvent::PointerMove(Point::new(30, 30)));
        assert_eq!(dragging.handle(SelectionEvent::Escape), SelectionState::Cancelled);
        assert_eq!(dragging.outline(), None);
    }

    #[test]
    fn test_click_without_drag_is_cancelled() {
        let mut selector = RegionSelector::new();
        selector.handle(SelectionEvent::PointerDown(Point::new(7, 7)));
        selector.handle(SelectionEvent::PointerUp(Point::new(7, 7)));

        assert_eq!(selector.state(), SelectionState::Cancelled);

        let flat = drag(Point::new(0, 5), Point::new(10, 5), Point::new(30, 5));
        assert_eq!(flat.state(), SelectionState::Cancelled);
    }

    #[test]
    fn test_idle_ignores_move_and_release() {
        let mut selector = RegionSelector::new();
        selector.handle(SelectionEvent::PointerMove(Point::new(3, 3)));
        selector.handle(SelectionEvent::PointerUp(Point::new(9, 9)));

        assert_eq!(selector.state(), SelectionState::Idle);
    }

    #[test]
    fn test_terminal_states_ignore_events() {
        let mut selector = drag(Point::new(0, 0), Point::new(5, 5), Point::new(10, 10));
        let released = selector.state();

        selector.handle(SelectionEvent::Escape);
        selector.handle(SelectionEvent::PointerDown(Point::new(50, 50)));
        selector.cancel();

        assert_eq!(selector.state(), released);
    }

    #[test]
    fn test_cancel_when_window_closes_mid_drag() {
        let mut selector = RegionSelector::new();
        selector.handle(SelectionEvent::PointerDown(Point::new(0, 0)));
        selector.cancel();

        assert_eq!(selector.state(), SelectionState::Cancelled);
    }
}
