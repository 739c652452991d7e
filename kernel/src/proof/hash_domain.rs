//! Typed domain separators for canonical hashing.
//!
//! Every hash computed by the toolkit selects a domain via [`HashDomain`], so
//! a program and a search node that serialize to the same bytes can never
//! collide. Adding a domain is a single change to the macro invocation below.

/// Declares `HashDomain`, `as_bytes()`, `ALL` and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domains in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Canonical JSON of a symbolic program.
    SExpression => b"NEUROSYM::SEXPRESSION::V1\0",

    /// Partial program identity inside a search graph (visited sets, metadata keys).
    SearchNode => b"NEUROSYM::SEARCH_NODE::V1\0",

    /// DSL catalog (symbols and signatures in declaration order).
    DslCatalog => b"NEUROSYM::DSL_CATALOG::V1\0",
}
