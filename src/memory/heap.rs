//! Free-list heap model for the simulator
//!
//! This module owns the simulated address space `[0, heap_size)`:
//! - First-fit allocation carved from a sorted free list
//! - Reference-counted release (blocks reclaimed when the count hits 0)
//! - Adjacency-merging compaction
//! - A deterministic textual state report
//!
//! # Failure Handling
//!
//! `allocate`, `copy` and `free` never error. A request that cannot be
//! satisfied (no block large enough, unbound name, self-copy) leaves the
//! heap untouched and returns `false`; callers are free to ignore the
//! return value. The script language defines these failures as silent.

use rustc_hash::FxHashMap;

/// Simulated address within the heap
pub type Address = u64;

/// A contiguous region of the simulated address space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub address: Address,
    pub size: u64,
    pub ref_count: u32,
}

impl Block {
    pub fn new(address: Address, size: u64, ref_count: u32) -> Self {
        Block {
            address,
            size,
            ref_count,
        }
    }

    /// One past the last address covered by this block
    pub fn end(&self) -> Address {
        self.address + self.size
    }
}

/// The simulated heap: free list plus variable bindings.
///
/// Invariants held after every mutation: free-list blocks are disjoint,
/// sorted by address, and carry `ref_count == 0`; every bound block
/// carries `ref_count >= 1` equal to the number of names aliasing it;
/// free and bound ranges together cover `[0, heap_size)` exactly.
#[derive(Debug, Clone)]
pub struct Heap {
    /// Unallocated ranges, kept sorted by start address
    free_list: Vec<Block>,

    /// Live allocated blocks, keyed by start address
    blocks: FxHashMap<Address, Block>,

    /// Variable name → start address of the block it is bound to
    variables: FxHashMap<String, Address>,

    heap_size: u64,
}

impl Heap {
    /// Create a heap whose entire address space is one free block.
    pub fn new(heap_size: u64) -> Self {
        let mut free_list = Vec::new();
        if heap_size > 0 {
            free_list.push(Block::new(0, heap_size, 0));
        }
        Heap {
            free_list,
            blocks: FxHashMap::default(),
            variables: FxHashMap::default(),
            heap_size,
        }
    }

    /// Allocate `size` units to `name`, first-fit.
    ///
    /// An existing binding for `name` is released before the fit search,
    /// even if the new request then fails. Returns `false` (heap
    /// unchanged beyond that release) when no free block is large enough
    /// or `size` is 0.
    pub fn allocate(&mut self, name: &str, size: u64) -> bool {
        if self.variables.contains_key(name) {
            self.free(name);
        }

        if size == 0 {
            return false;
        }

        // First fit: the free list is address-sorted, so this scan is
        // deterministic for a given list state
        let slot = match self.free_list.iter().position(|b| b.size >= size) {
            Some(slot) => slot,
            None => return false,
        };

        let address = self.free_list[slot].address;
        self.free_list[slot].address += size;
        self.free_list[slot].size -= size;
        if self.free_list[slot].size == 0 {
            self.free_list.remove(slot);
        }
        self.normalize();

        self.blocks.insert(address, Block::new(address, size, 1));
        self.variables.insert(name.to_string(), address);
        true
    }

    /// Alias `dst` to the block `src` is bound to.
    ///
    /// No-op when `dst == src` or `src` is unbound. An existing binding
    /// for `dst` is released before the alias is installed.
    pub fn copy(&mut self, dst: &str, src: &str) -> bool {
        if dst == src {
            return false;
        }

        let address = match self.variables.get(src) {
            Some(&address) => address,
            None => return false,
        };

        if self.variables.contains_key(dst) {
            // src still holds a reference, so the shared block survives
            // even when dst was its other alias
            self.free(dst);
        }

        if let Some(block) = self.blocks.get_mut(&address) {
            block.ref_count += 1;
        }
        self.variables.insert(dst.to_string(), address);
        true
    }

    /// Release the reference held by `name`.
    ///
    /// The name is unbound unconditionally; the block returns to the
    /// free list only when its last reference is gone. No-op when `name`
    /// is unbound.
    pub fn free(&mut self, name: &str) -> bool {
        let address = match self.variables.remove(name) {
            Some(address) => address,
            None => return false,
        };

        let reclaimed = match self.blocks.get_mut(&address) {
            Some(block) => {
                block.ref_count -= 1;
                block.ref_count == 0
            }
            None => false,
        };

        if reclaimed {
            if let Some(block) = self.blocks.remove(&address) {
                self.free_list.push(Block::new(block.address, block.size, 0));
                self.normalize();
            }
        }
        true
    }

    /// Merge adjacent free blocks.
    ///
    /// One left-to-right pass over the address-sorted list; each merge
    /// extends the accumulating block, so chains of adjacent blocks
    /// collapse in a single pass. Idempotent.
    pub fn compress(&mut self) {
        if self.free_list.is_empty() {
            return;
        }
        self.normalize();

        let mut merged: Vec<Block> = Vec::with_capacity(self.free_list.len());
        for block in self.free_list.drain(..) {
            match merged.last_mut() {
                Some(last) if last.end() == block.address => last.size += block.size,
                _ => merged.push(block),
            }
        }
        self.free_list = merged;
    }

    /// Produce the state report.
    ///
    /// Variables sorted by name, then free blocks in address order;
    /// `Empty` stands in for either list with no entries.
    pub fn dump(&self) -> String {
        let mut report = String::from("Variables:\n");

        let bindings = self.bindings();
        if bindings.is_empty() {
            report.push_str("Empty\n");
        } else {
            for (name, block) in &bindings {
                report.push_str(&format!(
                    "{}:{}({}) [{}]\n",
                    name, block.address, block.size, block.ref_count
                ));
            }
        }

        report.push_str("Free List:\n");
        if self.free_list.is_empty() {
            report.push_str("Empty\n");
        } else {
            let entries: Vec<String> = self
                .free_list
                .iter()
                .map(|b| format!("{}({}) [{}]", b.address, b.size, b.ref_count))
                .collect();
            report.push_str(&entries.join(", "));
            report.push('\n');
        }

        report.push_str(&"=".repeat(60));
        report.push('\n');
        report
    }

    /// All variable bindings, sorted by name.
    pub fn bindings(&self) -> Vec<(&str, Block)> {
        let mut bindings: Vec<(&str, Block)> = self
            .variables
            .iter()
            .filter_map(|(name, address)| {
                self.blocks.get(address).map(|b| (name.as_str(), *b))
            })
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }

    /// The free list, in address order.
    pub fn free_list(&self) -> &[Block] {
        &self.free_list
    }

    /// Live allocated blocks, in address order.
    pub fn allocated_blocks(&self) -> Vec<Block> {
        let mut blocks: Vec<Block> = self.blocks.values().copied().collect();
        blocks.sort_by_key(|b| b.address);
        blocks
    }

    /// Total size of the simulated address space.
    pub fn heap_size(&self) -> u64 {
        self.heap_size
    }

    /// Restore the address ordering of the free list.
    fn normalize(&mut self) {
        self.free_list.sort_by_key(|b| b.address);
    }
}
