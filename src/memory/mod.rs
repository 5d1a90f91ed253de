//! Memory model for the allocator simulator
//!
//! A single module today: [`heap`] holds the free-list manager, the
//! variable table, and the state report. Addresses are plain `u64`
//! offsets into the simulated space `[0, heap_size)`; there is no
//! backing storage, only bookkeeping about which ranges are owned by
//! which names.

pub mod heap;
