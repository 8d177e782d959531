// NOTE: Layering
//
// The binary only parses arguments, wires config into the runtime facade and
// renders results. Draft rules, query sync and pagination live in
// futflare-engine; every network call goes through futflare-runtime.

mod args;
mod commands;
mod handlers;
pub mod item_spec;
pub mod ports;
pub mod presentation;
pub mod types;

pub use args::{CapsuleCommand, Cli, Commands, ConfigCommand};
pub use commands::run;

/// Process exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<futflare_runtime::Error>()
        .map(futflare_runtime::Error::exit_code)
        .unwrap_or(1)
}
