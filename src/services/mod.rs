pub mod capture;
pub mod desktop;
pub mod enumerator;
pub mod fingerprint;
pub mod restore;
pub mod session_store;

pub use desktop::create_desktop;
pub use restore::launch::LaunchTable;
pub use session_store::SessionStore;
