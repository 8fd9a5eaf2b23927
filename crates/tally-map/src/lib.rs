//! Alias registry and per-file schema resolution.
//!
//! Different source files name the same logical field differently. The
//! registry records, per logical alias, the ordered list of raw header
//! names that may represent it; the resolver turns one file's header row
//! into a bidirectional header/alias mapping for exactly the aliases a
//! tally run needs.

pub mod error;
pub mod registry;
pub mod resolver;

pub use error::ResolveError;
pub use registry::AliasRegistry;
pub use resolver::{HeaderMap, ResolvedColumn, resolve_header};
