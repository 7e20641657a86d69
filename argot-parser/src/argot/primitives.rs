//! Primitive parsers
//!
//! Options, flags, positional arguments, sub-commands and pass-through
//! capture. Each wraps at most one value parser and knows how to recognize
//! its own token shapes; everything above this layer is composition.

pub mod argument;
pub mod command;
pub mod flag;
pub mod option;
pub mod passthrough;

pub use argument::{argument, ArgumentParser};
pub use command::{command, CommandParser};
pub use flag::{flag, FlagParser};
pub use option::{option, OptionParser, OptionState};
pub use passthrough::{passthrough, trailing, Passthrough};
