//! ybridge core: introspection of host values at the WebAssembly boundary.
//!
//! # Architecture
//!
//! Three pieces, leaves first:
//!
//! - [`reflect`]: read the module-side pointer and the masked type tag off a
//!   foreign object.
//! - [`classify`]: turn an arbitrary host value into a wire [`Tag`] plus a
//!   numeric payload. Text is UTF-8 encoded once, up front, into a
//!   [`StagedText`].
//! - [`stage`]: copy staged text into linear memory at an offset chosen by
//!   the module, through a [`MemoryView`] that is rebuilt whenever the
//!   memory's backing store has been replaced by a grow.
//!
//! [`Bridge`] owns the state one module instance needs (configuration,
//! handoff slot, memory view) and exposes the four boundary entry points.
//!
//! ## Two-phase protocol
//!
//! ```text
//! classify(value)  ->  (tag, payload)      tag 5 => payload = UTF-8 length
//! stage_into(off)  ->  bytes written       copies into [off, off + payload)
//! ```
//!
//! Callers that hold the value and the destination together can skip the
//! slot entirely: [`classify()`] returns an owned [`Classified`] whose text
//! variant stages itself.

pub mod bridge;
pub mod classify;
pub mod memory;
pub mod reflect;
pub mod stage;

pub use bridge::Bridge;
pub use classify::{classify, Classified, Classify};
pub use memory::{GrowableMemory, LinearMemory, MemoryView, MemoryWindow, PAGE_SIZE};
pub use reflect::{get_foreign_pointer, get_type_tag};
pub use stage::{HandoffSlot, StagedText};

pub use ybridge_types::{
    BridgeConfig, BridgeError, ForeignObject, HostObject, HostValue, Result, Tag, TypeTag,
};
