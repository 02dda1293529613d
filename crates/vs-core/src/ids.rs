//! Strongly typed identifier for population members.
//!
//! The inner integer is `pub` to allow direct indexing into the status
//! buffer via `id.0 as usize`, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Row-major grid index of one population member.  Max ~4.3 billion members.
    pub struct MemberId(u32);
}
