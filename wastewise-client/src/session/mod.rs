/// Client session management
///
/// - `storage`: durable key-value storage holding the session pair
/// - `navigator`: where to send the user after login and logout
/// - `store`: the session store tying both to a backend

pub mod navigator;
pub mod storage;
pub mod store;

pub use navigator::{Destination, LoggingNavigator, Navigator, RecordingNavigator};
pub use storage::{DurableStorage, FileStorage, MemoryStorage, StorageError};
pub use store::SessionStore;
