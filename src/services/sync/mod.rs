pub mod controller;
mod poller;

pub use controller::SyncController;
