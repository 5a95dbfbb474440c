//! Search panel state machine.
//!
//! - `state` - toggles, text and categorical selections plus the pure
//!   `transition` function turning one event into filter changes
//! - `controller` - owns the filter set, applies those changes and publishes
//!   the visible records

mod controller;
mod state;

pub use controller::{SearchController, SearchObserver};
pub use state::{transition, FilterDelta, SearchEvent, SearchMode, SearchState, Transition};
