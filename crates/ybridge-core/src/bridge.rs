//! Per-instance boundary state.

use tracing::debug;
use ybridge_types::{BridgeConfig, ForeignObject, Result, Tag, TypeTag};

use crate::classify::Classify;
use crate::memory::{LinearMemory, MemoryView};
use crate::reflect;
use crate::stage::HandoffSlot;

/// The four boundary entry points for one module instance.
///
/// Runs on a single thread: `classify` of a string must be followed by
/// exactly one `stage_into` before the next string is classified.
pub struct Bridge<M: LinearMemory> {
    config: BridgeConfig,
    memory: M,
    view: MemoryView<M>,
    slot: HandoffSlot,
}

impl<M: LinearMemory> Bridge<M> {
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, BridgeConfig::default())
    }

    pub fn with_config(memory: M, config: BridgeConfig) -> Self {
        Self {
            config,
            memory,
            view: MemoryView::new(),
            slot: HandoffSlot::new(),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BridgeConfig) {
        self.config = config;
    }

    /// Module-side pointer of `obj`.
    pub fn get_foreign_pointer<O: ForeignObject + ?Sized>(&self, obj: &O) -> Result<u32> {
        reflect::get_foreign_pointer(obj, &self.config.pointer_field)
    }

    /// Masked type tag of `obj`, or [`TypeTag::UNKNOWN`].
    pub fn get_type_tag<O: ForeignObject + ?Sized>(&self, obj: &O) -> TypeTag {
        reflect::get_type_tag(obj, &self.config.type_field)
    }

    /// Classify `value`. Text is encoded and parked in the handoff slot
    /// until [`Bridge::stage_into`] copies it out.
    pub fn classify<V: Classify + ?Sized>(&mut self, value: &V) -> (Tag, f64) {
        let (wire, text) = value.classify().into_parts();
        debug!(tag = %wire.0, payload = wire.1, "classified host value");
        if let Some(text) = text {
            self.slot.put(text);
        }
        wire
    }

    /// [`Bridge::classify`], delivering the result through `on_result`
    /// before returning.
    pub fn classify_with<V, F>(&mut self, value: &V, on_result: F)
    where
        V: Classify + ?Sized,
        F: FnOnce(Tag, f64),
    {
        let (tag, payload) = self.classify(value);
        on_result(tag, payload);
    }

    /// Copy the pending string to `offset` in linear memory and drain the
    /// slot. The slot is drained even if the copy fails.
    pub fn stage_into(&mut self, offset: usize) -> Result<usize> {
        let text = self.slot.take()?;
        let window = self.view.acquire(&self.memory);
        text.stage_into(window, offset)
    }

    pub fn has_pending(&self) -> bool {
        self.slot.is_pending()
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the memory, e.g. to grow it. Cached windows are
    /// revalidated on the next `stage_into`.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Number of memory window rebuilds so far.
    pub fn view_refreshes(&self) -> u64 {
        self.view.refreshes()
    }
}
