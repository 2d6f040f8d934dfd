//! Fixed-capacity regions with bump allocation and whole-region reset

use super::RuntimeError;

/// Fixed-capacity backing region for one element type
///
/// Plain data with a `const` constructor so it can live in a `static`.
/// Buffers are never freed individually: [`Arena::reset`] starts a new
/// logical run and hands out a [`Bump`] cursor over the whole region.
#[derive(Debug, Clone)]
pub struct Arena<T, const N: usize> {
    mem: [T; N],
}

impl<T: Copy + Default, const N: usize> Arena<T, N> {
    /// Create a region with every element set to `fill`
    pub const fn new(fill: T) -> Self {
        Self { mem: [fill; N] }
    }

    /// Total number of elements the region holds
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Release every buffer of the previous run and start a new one
    ///
    /// Buffers from the returned cursor borrow the arena, so none of them
    /// can outlive the next reset.
    pub fn reset(&mut self) -> Bump<'_, T> {
        Bump::over(&mut self.mem)
    }
}

/// Bump cursor over a borrowed region
///
/// Each allocation splits the front off the remaining region, so buffers
/// never alias and all of them live as long as the region borrow.
#[derive(Debug)]
pub struct Bump<'a, T> {
    rest: &'a mut [T],
    used: usize,
}

impl<'a, T: Copy + Default> Bump<'a, T> {
    /// Start a cursor at the front of a caller-supplied region
    pub fn over(region: &'a mut [T]) -> Self {
        Self {
            rest: region,
            used: 0,
        }
    }

    /// Take the next `len` elements, reset to `T::default()`
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ArenaExhausted`] if fewer than `len` elements remain
    pub fn alloc(&mut self, len: usize) -> Result<&'a mut [T], RuntimeError> {
        if len > self.rest.len() {
            return Err(RuntimeError::ArenaExhausted {
                requested: len,
                remaining: self.rest.len(),
            });
        }

        let (head, tail) = std::mem::take(&mut self.rest).split_at_mut(len);
        self.rest = tail;
        self.used += len;

        head.fill(T::default());
        Ok(head)
    }

    /// Elements handed out so far
    pub const fn used(&self) -> usize {
        self.used
    }

    /// Elements still available
    pub const fn remaining(&self) -> usize {
        self.rest.len()
    }
}
