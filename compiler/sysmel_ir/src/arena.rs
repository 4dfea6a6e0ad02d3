//! Grow-only typed arenas.
//!
//! Every runtime object (environments, boxes, aggregates, functions, types)
//! is carved out of an [`Arena`] and referenced through a 32-bit handle.
//! Nothing is ever removed: handles stay valid until the arena itself is
//! dropped, which releases every object in one pass.

use std::fmt;
use std::marker::PhantomData;

/// A typed 32-bit handle into an [`Arena`].
pub trait ArenaIndex: Copy {
    /// Build a handle from a raw slot index.
    fn from_raw(raw: u32) -> Self;

    /// Slot index of this handle.
    fn index(self) -> usize;
}

/// Declare a `Copy` handle type usable as an [`ArenaIndex`] and as an
/// identity key in [`IdentitySet`](crate::IdentitySet) /
/// [`IdentityDictionary`](crate::IdentityDictionary).
#[macro_export]
macro_rules! define_index {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        $vis struct $name(u32);

        impl $name {
            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl $crate::ArenaIndex for $name {
            #[inline]
            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl $crate::Identity for $name {
            #[inline]
            fn identity(&self) -> u64 {
                u64::from(self.0)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

/// Convert a slot count into a 32-bit handle value.
///
/// # Panics
/// Panics if the arena holds more than `u32::MAX` objects.
#[inline]
pub(crate) fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena overflow: more than u32::MAX {what}"))
}

/// Grow-only storage for objects of one kind.
///
/// Handles start at the arena's base. A [`successor`](Arena::successor)
/// arena starts where its predecessor stopped, so handles issued by the
/// predecessor are never valid in it.
pub struct Arena<I, T> {
    items: Vec<T>,
    base: u32,
    _index: PhantomData<fn(I) -> I>,
}

impl<I: ArenaIndex, T> Arena<I, T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Arena {
            items: Vec::new(),
            base: 0,
            _index: PhantomData,
        }
    }

    /// Empty arena whose handles continue after this arena's last one.
    pub fn successor(&self) -> Self {
        Arena {
            items: Vec::new(),
            base: to_u32(self.end(), "arena handles"),
            _index: PhantomData,
        }
    }

    /// One past the last handle value this arena has issued.
    #[inline]
    fn end(&self) -> usize {
        self.base as usize + self.items.len()
    }

    #[inline]
    fn slot(&self, id: I) -> Option<usize> {
        id.index()
            .checked_sub(self.base as usize)
            .filter(|slot| *slot < self.items.len())
    }

    /// Allocate an object, returning its handle.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.items.push(item);
        id
    }

    /// Whether `id` was issued by this arena.
    #[inline]
    pub fn contains(&self, id: I) -> bool {
        self.slot(id).is_some()
    }

    /// Borrow the object behind a handle.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this arena.
    #[inline]
    pub fn get(&self, id: I) -> &T {
        &self.items[id.index() - self.base as usize]
    }

    /// Borrow the object behind a handle, or `None` for a foreign handle.
    #[inline]
    pub fn try_get(&self, id: I) -> Option<&T> {
        self.slot(id).map(|slot| &self.items[slot])
    }

    /// Mutably borrow the object behind a handle.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this arena.
    #[inline]
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.index() - self.base as usize]
    }

    /// Handle of the next object to be allocated.
    #[inline]
    pub fn next_id(&self) -> I {
        I::from_raw(to_u32(self.end(), "arena objects"))
    }

    /// Number of allocated objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been allocated yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all objects with their handles, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        let base = self.base as usize;
        self.items
            .iter()
            .enumerate()
            .map(move |(index, item)| (I::from_raw(to_u32(base + index, "arena objects")), item))
    }
}

impl<I: ArenaIndex, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T: fmt::Debug> fmt::Debug for Arena<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests;
