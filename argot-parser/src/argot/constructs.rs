//! Construct combinators and their arbitration rules
//!
//! These compose multiple parsers into one: labeled-field aggregation
//! ([`object`]), exclusive alternation ([`one_of`]), discriminated branching
//! ([`conditional`]), longest-match arbitration ([`longest`]) and the merging
//! of independently-defined aggregates ([`merge`]).
//!
//! Ambiguity is resolved locally at each construct boundary with the
//! consumption-aware rules described on each type; there is no global search
//! and no unbounded backtracking.

pub mod conditional;
pub mod longest;
pub mod merge;
pub mod object;
pub mod one_of;

pub use conditional::{conditional, Conditional};
pub use longest::{longest, Longest};
pub use merge::{merge, Merge};
pub use object::{field, object, Field, FieldEntry, Object, Record};
pub use one_of::{one_of, OneOf};

use crate::argot::error::{ErrorKind, Failure};

/// Keep the most informative zero-consumption failure while scanning
/// children. A duplicate-use rejection beats a generic "not mine", so a bare
/// `--port 1 --port 2` still reports as duplicate use at the top level.
pub(crate) fn note_pending(pending: &mut Option<Failure>, failure: Failure) {
    let specific = !matches!(
        failure.kind(),
        ErrorKind::UnexpectedToken | ErrorKind::MissingRequired
    );
    match pending {
        None => *pending = Some(failure),
        Some(current) => {
            let current_specific = !matches!(
                current.kind(),
                ErrorKind::UnexpectedToken | ErrorKind::MissingRequired
            );
            if specific && !current_specific {
                *pending = Some(failure);
            }
        }
    }
}
