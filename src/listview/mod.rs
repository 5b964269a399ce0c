// src/listview/mod.rs
// Generic list view: a Row Source run through filter, sort and paginate
// stages, rendered into whatever target the caller injects.

pub mod actions;
pub mod controller;
pub mod filter;
pub mod mode;
pub mod paginate;
pub mod record;
pub mod render;
pub mod sort;
pub mod state;
pub mod stats;
pub mod view;

pub use actions::{ActionKind, ActionResponse, ActionTicket, Notice, NoticeKind};
pub use controller::ListViewController;
pub use record::{FieldValue, Record, RecordId, RowSource};
pub use render::{Region, RenderTarget, SnapshotTarget};
pub use state::CategoryChoice;
pub use view::ViewSpec;
