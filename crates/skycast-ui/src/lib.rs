//! Interaction layer for Skycast: the controller, the view capability it renders
//! through, and the async services that do the network work.

pub mod controller;
pub mod error_mapping;
pub mod services;
pub mod view;

pub use controller::{render_all, AppController, Phase};
pub use services::ServiceMessage;
pub use view::{EntryList, EntryView, Region, Slot, ViewSink, ViewState};
