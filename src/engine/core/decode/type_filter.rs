use std::fmt;
use std::str::FromStr;

use crate::engine::core::row::format::NUMERIC_TYPE;

/// Answers whether a query wants data of a given type tag.
pub trait TypeFilter: Send + Sync {
    fn wants_type(&self, tag: u8) -> bool;
}

impl<F> TypeFilter for F
where
    F: Fn(u8) -> bool + Send + Sync,
{
    fn wants_type(&self, tag: u8) -> bool {
        self(tag)
    }
}

/// A set of wanted type tags.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DataTypeFilter {
    bits: [u64; 4],
}

impl DataTypeFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self { bits: [u64::MAX; 4] }
    }

    pub fn numeric_only() -> Self {
        Self::none().with(NUMERIC_TYPE)
    }

    pub fn with(mut self, tag: u8) -> Self {
        self.insert(tag);
        self
    }

    pub fn insert(&mut self, tag: u8) {
        self.bits[(tag >> 6) as usize] |= 1u64 << (tag & 63);
    }

    pub fn remove(&mut self, tag: u8) {
        self.bits[(tag >> 6) as usize] &= !(1u64 << (tag & 63));
    }

    pub fn contains(&self, tag: u8) -> bool {
        self.bits[(tag >> 6) as usize] & (1u64 << (tag & 63)) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|w| *w == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |tag| self.contains(*tag))
    }
}

impl TypeFilter for DataTypeFilter {
    fn wants_type(&self, tag: u8) -> bool {
        self.contains(tag)
    }
}

impl FromIterator<u8> for DataTypeFilter {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut filter = Self::none();
        for tag in iter {
            filter.insert(tag);
        }
        filter
    }
}

impl fmt::Debug for DataTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Parses a comma separated tag list such as `1,7`, or `*` for every type.
impl FromStr for DataTypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "*" {
            return Ok(Self::all());
        }
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u8>()
                    .map_err(|e| format!("invalid data type '{part}': {e}"))
            })
            .collect()
    }
}
