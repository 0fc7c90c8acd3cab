//! Memoized pagination window
//!
//! A [`PaginatedWindow`] exposes one page of a backing sequence. The page is
//! sliced the first time it is read and the same slice is returned from then
//! on, even if the backing sequence is edited later.
//!
//! # Window bounds
//!
//! - A negative page size, or an empty backing sequence, returns the whole
//!   backing sequence. Nothing is cached in that case.
//! - Otherwise the window is `start..start + page_size`, with the end clamped
//!   to the backing length. An end of `0` (page size `0` at start `0`) also
//!   means "up to the backing length".
//! - A start at or past the end yields an empty window.
//!
//! The cache is a [`OnceLock`]: when several threads read an uncomputed
//! window at the same time, exactly one computes it while the others wait,
//! and all of them get the same slice.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

/// One page of a larger result set
#[derive(Debug)]
pub struct PaginatedWindow<T> {
    backing: Vec<T>,
    page_size: i32,
    start: usize,
    total_count: u64,
    window: OnceLock<Vec<T>>,
}

impl<T: Clone> PaginatedWindow<T> {
    /// `total_count` is the size of the full collection, which may be larger
    /// than `backing` when only part of it was fetched.
    pub fn new(backing: Vec<T>, page_size: i32, start: usize, total_count: u64) -> Self {
        Self {
            backing,
            page_size,
            start,
            total_count,
            window: OnceLock::new(),
        }
    }

    /// Window over a backing sequence holding the full collection.
    pub fn over(backing: Vec<T>, page_size: i32, start: usize) -> Self {
        let total_count = backing.len() as u64;
        Self::new(backing, page_size, start, total_count)
    }

    /// The current page, computed on the first call.
    pub fn window(&self) -> &[T] {
        if let Some(window) = self.window.get() {
            return window;
        }

        if self.page_size < 0 || self.backing.is_empty() {
            return &self.backing;
        }

        self.window.get_or_init(|| self.slice())
    }

    fn slice(&self) -> Vec<T> {
        let length = self.backing.len();
        let mut end = self.start.saturating_add(self.page_size as usize);
        if end > length || end == 0 {
            end = length;
        }

        if self.start >= end {
            return Vec::new();
        }
        self.backing[self.start..end].to_vec()
    }

    /// Whether the window has been computed and cached.
    pub fn is_computed(&self) -> bool {
        self.window.get().is_some()
    }

    pub fn backing(&self) -> &[T] {
        &self.backing
    }

    /// Mutable access to the backing sequence. A window already computed is
    /// not affected.
    pub fn backing_mut(&mut self) -> &mut Vec<T> {
        &mut self.backing
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }
}

/// Serializes as `{ data, pageSize, start, totalCount }`, `data` being the window.
impl<T: Clone + Serialize> Serialize for PaginatedWindow<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PaginatedWindow", 4)?;
        state.serialize_field("data", self.window())?;
        state.serialize_field("pageSize", &self.page_size)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("totalCount", &self.total_count)?;
        state.end()
    }
}
