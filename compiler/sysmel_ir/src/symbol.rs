//! Interned symbols.
//!
//! A [`Symbol`] is a 64-bit handle: a 32-bit index into the interner's
//! string storage plus the cached content hash. Two symbols produced by the
//! same [`Interner`] are equal iff their bytes are equal, so symbol equality
//! is a single integer compare.
//!
//! The interner is itself an open-addressing table (see [`crate::table`])
//! located with the polynomial rolling hash of the bytes. Interned strings are
//! leaked and live for the rest of the process.

use std::fmt;
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;

use crate::arena::to_u32;
use crate::table::raw::{RawTable, Search};
use crate::Identity;

/// Initial slot count of an interner.
pub const INTERNER_INITIAL_CAPACITY: usize = 1024;

/// Multiplier of the rolling content hash.
const HASH_MULTIPLIER: u32 = 31;

/// Polynomial rolling hash over raw bytes (`h = h * 31 + byte`).
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |hash, byte| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(u32::from(*byte))
    })
}

/// Interned string handle with cached hash.
#[derive(Copy, Clone)]
pub struct Symbol {
    id: u32,
    hash: u32,
}

impl Symbol {
    /// Index of the symbol in its interner.
    #[inline]
    pub const fn id(self) -> u32 {
        self.id
    }

    /// Cached content hash of the symbol's bytes.
    #[inline]
    pub const fn content_hash(self) -> u32 {
        self.hash
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identity for Symbol {
    #[inline]
    fn identity(&self) -> u64 {
        u64::from(self.id)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.id)
    }
}

struct InternTable {
    slots: RawTable<Symbol, ()>,
    strings: Vec<&'static str>,
}

impl InternTable {
    fn new() -> Self {
        InternTable {
            slots: RawTable::with_capacity(INTERNER_INITIAL_CAPACITY),
            strings: Vec::with_capacity(INTERNER_INITIAL_CAPACITY),
        }
    }

    fn find(&self, text: &str, hash: u32) -> Option<Symbol> {
        let strings = &self.strings;
        let search = self.slots.search(u64::from(hash), |candidate| {
            candidate.hash == hash && strings[candidate.id as usize] == text
        });
        match search {
            Search::Found(index) => self.slots.entry(index).map(|(symbol, ())| *symbol),
            Search::Vacant(_) | Search::Saturated => None,
        }
    }

    fn intern(&mut self, text: &str, hash: u32) -> Symbol {
        loop {
            let strings = &self.strings;
            let search = self.slots.search(u64::from(hash), |candidate| {
                candidate.hash == hash && strings[candidate.id as usize] == text
            });
            match search {
                Search::Found(index) => {
                    if let Some((symbol, ())) = self.slots.entry(index) {
                        return *symbol;
                    }
                }
                Search::Vacant(index) if !self.slots.insertion_needs_growth() => {
                    let symbol = Symbol {
                        id: to_u32(self.strings.len(), "interned symbols"),
                        hash,
                    };
                    let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
                    self.strings.push(leaked);
                    self.slots.fill(index, symbol, ());
                    return symbol;
                }
                Search::Vacant(_) | Search::Saturated => {
                    self.slots.grow(|symbol| u64::from(symbol.hash));
                }
            }
        }
    }
}

/// Symbol interner.
///
/// Interning takes `&self`; the table sits behind a read/write lock so the
/// parser and the evaluator can share one interner by reference.
pub struct Interner {
    table: RwLock<InternTable>,
}

impl Interner {
    /// Create an empty interner with [`INTERNER_INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Interner {
            table: RwLock::new(InternTable::new()),
        }
    }

    /// Intern a string, returning its unique symbol.
    ///
    /// Symbol text is always UTF-8; see [`Interner::intern_bytes`] for
    /// byte input.
    pub fn intern(&self, text: &str) -> Symbol {
        let hash = hash_bytes(text.as_bytes());

        // Fast path: already interned
        if let Some(symbol) = self.table.read().find(text, hash) {
            return symbol;
        }

        self.table.write().intern(text, hash)
    }

    /// Intern raw bytes. Symbol text is stored as `str`, so bytes that are
    /// not valid UTF-8 are rejected instead of being interned lossily.
    pub fn intern_bytes(&self, bytes: &[u8]) -> Result<Symbol, std::str::Utf8Error> {
        std::str::from_utf8(bytes).map(|text| self.intern(text))
    }

    /// Look up a symbol without interning it.
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.table.read().find(text, hash_bytes(text.as_bytes()))
    }

    /// The text of a symbol.
    pub fn lookup(&self, symbol: Symbol) -> &'static str {
        self.table.read().strings[symbol.id as usize]
    }

    /// Number of interned symbols.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Returns `true` if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current slot count of the interning table.
    pub fn capacity(&self) -> usize {
        self.table.read().slots.capacity()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
