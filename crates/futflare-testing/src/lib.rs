//! Testing infrastructure for futflare integration tests.
//!
//! - `mock`: scripted, call-recording stand-ins for the capsule API and
//!   object storage
//! - `ports`: notifier and navigator doubles that remember what they were told
//! - `fixtures`: sample capsules, pages and media files
//! - `world`: `TestWorld`, an isolated environment for running the CLI

pub mod fixtures;
pub mod mock;
pub mod ports;
pub mod world;

pub use mock::{ApiCall, MockApi, MockStore, PutRecord};
pub use ports::{Navigation, Notification, RecordingNavigator, RecordingNotifier};
pub use world::{CliResult, TestWorld};
