//! Modifying combinators
//!
//! Wrap a single parser to add optionality, defaults, repetition,
//! non-emptiness constraints, or a result transformation, without changing
//! its token-recognition shape.

pub mod map;
pub mod multiple;
pub mod non_empty;
pub mod optional;
pub mod wrap;

pub use map::{map, Map};
pub use multiple::{multiple, Multiple};
pub use non_empty::{non_empty, NonEmpty};
pub use optional::{optional, with_default, Optional, WithDefault};
pub use wrap::{hidden, with_priority, Hidden, Prioritized};
