//! Effects the core asks of the shell.
//!
//! Render is Crux's built-in capability; storage and delay are local ones
//! with a deliberately small operation set.

mod delay;
mod storage;

pub use self::delay::{Delay, DelayOperation};
pub use self::storage::{
    expect_values, Storage, StorageError, StorageKey, StorageOperation, StorageOutput,
    StorageResult, TRUE_VALUE,
};
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

// Field types are spelled out: the derive names each effect variant after
// the capability type.
#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub storage: Storage<Event>,
    pub delay: Delay<Event>,
}
