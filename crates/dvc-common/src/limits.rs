//! Centralized limits for the directive compiler.
//!
//! Directive values are short, so these limits only exist to keep
//! pathological input (deeply nested parentheses, giant array literals)
//! from exhausting the stack. Hitting a limit produces a diagnostic, never a
//! panic.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth accepted by the binding parser.
///
/// Each nested parenthesis, array literal, generic argument list or
/// interpolation hole adds one level.
pub const MAX_PARSE_DEPTH: u32 = 256;

/// Maximum number of links in the chains one syntax path runs through:
/// binary operators (`1 + 2 + ...`), member accesses (`A.B.C`) and type
/// suffixes (`int[][]`).
///
/// Chains are parsed in a loop but still produce a tree as deep as the
/// chain is long, which cloning and dropping walk recursively.
pub const MAX_CHAIN_LENGTH: u32 = 512;

/// Maximum nesting depth for constant-initializer evaluation.
///
/// Left-associative operator chains are folded iteratively and do not add
/// to the depth; parentheses, unary operators, array literals and
/// interpolation holes do.
pub const MAX_CONSTANT_EVAL_DEPTH: u32 = 256;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum number of elements evaluated in one array literal.
pub const MAX_ARRAY_LITERAL_ELEMENTS: usize = 65_536;
