//! Polynomial (base 31) hashing used for fingerprints.
//!
//! The values computed here are compared against fingerprints that were
//! produced by the JVM client and stored server side, so every primitive
//! hashes exactly the way the JVM does: strings over their UTF-16 code units,
//! longs folded into 32 bits, booleans as 1/0, and all arithmetic wrapping.

/// A hash that is stable across runs, platforms and client implementations.
///
/// Unlike [std::hash::Hash] the result is fully defined, so it can be stored
/// and compared later.
pub trait StableHash {
    fn stable_hash(&self) -> i32;
}

const MULTIPLIER: i32 = 31;

/// Accumulates hashes field by field: `result = 31 * result + hash`, seeded
/// with 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashAccumulator {
    result: i32,
}

impl HashAccumulator {
    pub fn new() -> Self {
        Self { result: 0 }
    }

    /// Fold the stable hash of `value` into the accumulator
    pub fn push<T: StableHash + ?Sized>(self, value: &T) -> Self {
        self.push_hash(value.stable_hash())
    }

    /// Fold an already computed hash into the accumulator
    pub fn push_hash(self, hash: i32) -> Self {
        Self {
            result: self
                .result
                .wrapping_mul(MULTIPLIER)
                .wrapping_add(hash),
        }
    }

    pub fn finish(self) -> i32 {
        self.result
    }
}

/// Combined hash over an ordered sequence of items.
///
/// Order sensitive, `[]` hashes to 0 and `[x]` hashes to `x.stable_hash()`.
/// Absent items (`None`) contribute 0, so `[None]` and `[Some(x)]` where `x`
/// hashes to 0 can't be told apart.
pub fn hash_list<I>(items: I) -> i32
where
    I: IntoIterator,
    I::Item: StableHash,
{
    items
        .into_iter()
        .fold(HashAccumulator::new(), |acc, it| acc.push(&it))
        .finish()
}

impl StableHash for str {
    fn stable_hash(&self) -> i32 {
        self.encode_utf16()
            .fold(HashAccumulator::new(), |acc, unit| acc.push_hash(unit as i32))
            .finish()
    }
}

impl StableHash for String {
    fn stable_hash(&self) -> i32 {
        self.as_str().stable_hash()
    }
}

impl StableHash for i32 {
    fn stable_hash(&self) -> i32 {
        *self
    }
}

impl StableHash for i64 {
    fn stable_hash(&self) -> i32 {
        let v = *self;
        (v ^ ((v as u64) >> 32) as i64) as i32
    }
}

impl StableHash for bool {
    fn stable_hash(&self) -> i32 {
        if *self {
            1
        } else {
            0
        }
    }
}

impl<T: StableHash> StableHash for Option<T> {
    fn stable_hash(&self) -> i32 {
        match self {
            Some(v) => v.stable_hash(),
            None => 0,
        }
    }
}

impl<T: StableHash> StableHash for [T] {
    fn stable_hash(&self) -> i32 {
        hash_list(self)
    }
}

impl<T: StableHash> StableHash for Vec<T> {
    fn stable_hash(&self) -> i32 {
        hash_list(self)
    }
}

impl<T: StableHash + ?Sized> StableHash for &T {
    fn stable_hash(&self) -> i32 {
        (**self).stable_hash()
    }
}
