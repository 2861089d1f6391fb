//! Menu item model, snapshots, and the per-session command-id table.

mod command_map;
mod descriptor;
mod snapshot;

pub use {
    command_map::{COMMAND_ID_BASE, CommandMap},
    descriptor::MenuItemDescriptor,
    snapshot::{MenuSnapshot, parse_menu_items},
};
