//! Services
//!
//! Application logic behind the guidelines builder. Services own state
//! transitions and store orchestration and are driven by whatever shell
//! renders them.

pub mod community;
pub mod draft;
pub mod items;
pub mod session;

pub use community::CommunityBrowser;
pub use draft::{DraftController, DraftPhase, SaveReceipt};
pub use items::ItemsEditor;
pub use session::SessionGate;
