pub mod session;
pub mod window;

pub use session::{Session, SessionRecord};
pub use window::{WindowGeometry, WindowId, WindowRecord};
