pub mod connectivity;
pub mod controller;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use connectivity::{spawn_connectivity_polling, spawn_connectivity_watcher};
pub use controller::{AppController, AppPaths, RecognitionTicket, Services};
pub use state::{AppState, Completion, RequestId};
