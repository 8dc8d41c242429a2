mod overlay;
mod selection;

pub use overlay::select_region;
pub use selection::{RegionSelector, SelectionEvent, SelectionState};

slint::include_modules!();
