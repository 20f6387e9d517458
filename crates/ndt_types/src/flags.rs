//! Pre-computed dtype metadata flags.
//!
//! `DtypeFlags` are computed once when a dtype is built and stored with it,
//! so layout questions are answered without walking child dtypes.
//!
//! Flags are organized into categories:
//! - **Presence flags**: What does this dtype or any child contain?
//! - **Category flags**: What sort of dtype is this?
//! - **Layout flags**: How is its data stored?

use bitflags::bitflags;

bitflags! {
    /// Pre-computed dtype properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct DtypeFlags: u32 {
        // === Presence Flags (bits 0-7) ===
        // Propagate from children to parents.

        /// Somewhere holds a reference to out-of-line memory.
        const HAS_BLOCKREF = 1 << 0;
        /// Somewhere contains a pointer or conversion.
        const HAS_EXPRESSION = 1 << 1;
        /// Somewhere contains a registry-declared dtype.
        const HAS_CUSTOM = 1 << 2;
        /// Somewhere contains a flexible-layout struct.
        const HAS_VARIABLE_LAYOUT = 1 << 3;

        // === Category Flags (bits 8-15) ===

        /// Parameterless scalar (or date).
        const IS_SCALAR = 1 << 8;
        /// Fixed or variable string.
        const IS_STRING = 1 << 9;
        /// Struct or fixed struct.
        const IS_STRUCT = 1 << 10;
        /// Fixed array.
        const IS_ARRAY = 1 << 11;
        /// Pointer or conversion.
        const IS_EXPRESSION = 1 << 12;

        // === Layout Flags (bits 16-23) ===

        /// Element occupies a fixed number of bytes.
        const FIXED_SIZE = 1 << 16;
        /// Plain old data: fixed size, no references, bitwise copyable.
        const POD = 1 << 17;
        /// Element occupies zero bytes.
        const ZERO_SIZED = 1 << 18;
    }
}

impl DtypeFlags {
    /// Flags that propagate from child dtypes to parents.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::HAS_BLOCKREF.bits()
            | Self::HAS_EXPRESSION.bits()
            | Self::HAS_CUSTOM.bits()
            | Self::HAS_VARIABLE_LAYOUT.bits(),
    );

    /// Combine propagated flags from child dtypes.
    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        children
            .into_iter()
            .fold(Self::empty(), |acc, child| acc | (child & Self::PROPAGATE_MASK))
    }

    /// Check if the dtype occupies a fixed number of bytes.
    #[inline]
    pub const fn is_fixed_size(self) -> bool {
        self.contains(Self::FIXED_SIZE)
    }

    /// Check if the dtype is plain old data.
    #[inline]
    pub const fn is_pod(self) -> bool {
        self.contains(Self::POD)
    }

    /// Check if the dtype or a child holds out-of-line references.
    #[inline]
    pub const fn has_blockref(self) -> bool {
        self.contains(Self::HAS_BLOCKREF)
    }

    /// Check if the dtype or a child is an expression dtype.
    #[inline]
    pub const fn has_expression(self) -> bool {
        self.contains(Self::HAS_EXPRESSION)
    }
}

impl Default for DtypeFlags {
    fn default() -> Self {
        Self::empty()
    }
}
