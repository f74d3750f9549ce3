//! Arena-index newtypes for the knowledge model.
//!
//! Each graph owns three independent arenas (entities, predicates,
//! expressions). Indices are niche-optimized `NonZeroU32`s so
//! `Option<EntityId>` etc. cost nothing extra, the same trick the teacher
//! uses for `SymbolId`.

use std::num::NonZeroU32;

macro_rules! arena_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Construct from a 1-based arena index.
            pub(crate) fn from_index(index: usize) -> Self {
                let raw = u32::try_from(index + 1).expect("arena index overflowed u32");
                $name(NonZeroU32::new(raw).expect("arena index is never zero"))
            }

            /// 0-based slot into the owning arena's backing `Vec`.
            pub(crate) fn slot(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

arena_id!(EntityId, "e");
arena_id!(PredicateId, "p");
arena_id!(ExprId, "x");
