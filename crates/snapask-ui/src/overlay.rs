use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use image::RgbaImage;
use slint::ComponentHandle;
use snapask_types::{Point, SelectionRect};

use crate::SelectionOverlay;
use crate::selection::{RegionSelector, SelectionEvent, SelectionState};

/// Time for the compositor to remove the hidden overlay before capturing
const SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Let the user drag out a screen region and capture it.
///
/// Blocks on the overlay's event loop. Returns `Ok(None)` when the user
/// pressed Escape, closed the overlay, or released without an area.
pub fn select_region() -> Result<Option<RgbaImage>> {
    let Some(rect) = run_overlay()? else {
        tracing::info!("Selection cancelled");
        return Ok(None);
    };

    tracing::info!(
        "Selected {}x{} at ({}, {})",
        rect.width(),
        rect.height(),
        rect.x1,
        rect.y1
    );

    std::thread::sleep(SETTLE_DELAY);
    snapask_ocr::capture_screen_region(rect).map(Some)
}

/// Show the overlay until the selector reaches a terminal state.
fn run_overlay() -> Result<Option<SelectionRect>> {
    let window = SelectionOverlay::new().context("Failed to create overlay window")?;
    let selector = Rc::new(RefCell::new(RegionSelector::new()));

    let dispatch: Rc<dyn Fn(SelectionEvent)> = {
        let selector = selector.clone();
        let window_weak = window.as_weak();
        Rc::new(move |event: SelectionEvent| {
            let Some(window) = window_weak.upgrade() else {
                return;
            };
            let mut selector = selector.borrow_mut();
            let state = selector.handle(event);

            let scale = window.window().scale_factor();
            match selector.outline() {
                Some(rect) => {
                    window.set_outline_x(rect.x1 as f32 / scale);
                    window.set_outline_y(rect.y1 as f32 / scale);
                    window.set_outline_width(rect.width() as f32 / scale);
                    window.set_outline_height(rect.height() as f32 / scale);
                    window.set_outline_visible(true);
                }
                None => window.set_outline_visible(false),
            }

            if matches!(state, SelectionState::Released(_) | SelectionState::Cancelled) {
                tracing::debug!("Overlay finished in {:?}", state);
                window.hide().ok();
                slint::quit_event_loop().ok();
            }
        })
    };

    let to_point = {
        let window_weak = window.as_weak();
        move |x: f32, y: f32| {
            let scale = window_weak
                .upgrade()
                .map(|w| w.window().scale_factor())
                .unwrap_or(1.0);
            Point::new((x * scale).round() as i32, (y * scale).round() as i32)
        }
    };

    {
        let dispatch = dispatch.clone();
        let to_point = to_point.clone();
        window.on_pointer_pressed(move |x, y| {
            dispatch(SelectionEvent::PointerDown(to_point(x, y)));
        });
    }
    {
        let dispatch = dispatch.clone();
        let to_point = to_point.clone();
        window.on_pointer_moved(move |x, y| {
            dispatch(SelectionEvent::PointerMove(to_point(x, y)));
        });
    }
    {
        let dispatch = dispatch.clone();
        window.on_pointer_released(move |x, y| {
            dispatch(SelectionEvent::PointerUp(to_point(x, y)));
        });
    }
    window.on_escape_pressed(move || dispatch(SelectionEvent::Escape));

    window.window().set_fullscreen(true);
    window.show().context("Failed to show overlay window")?;

    let loop_result = slint::run_event_loop();

    // The overlay must never outlive the selection, whatever ended the loop
    let hide_result = window.hide();
    drop(window);
    loop_result.context("Overlay event loop failed")?;
    hide_result.context("Failed to hide overlay window")?;

    let mut selector = selector.borrow_mut();
    selector.cancel();
    Ok(selector.outcome())
}
