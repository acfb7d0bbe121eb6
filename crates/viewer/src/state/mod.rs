//! State module — the session that owns a loaded collection and its view.

pub mod view;
pub mod display;
pub mod session;

pub use view::{reconcile, ViewState};
pub use display::{DisplaySnapshot, PageView};
pub use session::Session;
