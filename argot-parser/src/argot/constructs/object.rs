//! Labeled-field aggregation
//!
//! An [`Object`] holds a set of named child parsers with no fixed order. Each
//! attempt offers the head of the buffer to every still-open field in
//! declaration order; the first field that accepts a leading token wins it,
//! and the engine repeats to a fixed point. Finalization delegates to every
//! field in declaration order and fails on the first field failure.
//!
//! The aggregate value is a [`Record`]: a typed-key map addressed by the
//! [`Field`] handles the grammar was declared with, usually converted to a
//! domain struct right away with `.map(..)`.

use crate::argot::constructs::note_pending;
use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, DocSection, UsageTerm};
use crate::argot::error::Failure;
use crate::argot::message::Message;
use crate::argot::modifiers;
use crate::argot::parser::{Attempt, DynState, ErasedParser, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;
use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;

type AnyValue = Box<dyn Any>;

/// Typed handle naming one object field.
pub struct Field<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    pub const fn new(name: &'static str) -> Self {
        Field {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

/// The typed-key value map an object finalizes to.
#[derive(Default)]
pub struct Record {
    slots: BTreeMap<&'static str, AnyValue>,
}

impl Record {
    pub fn get<T: 'static>(&self, field: &Field<T>) -> Option<&T> {
        self.slots.get(field.name).and_then(|v| v.downcast_ref())
    }

    /// Move a field's value out of the record. If the object finalized
    /// successfully, every declared field is present.
    pub fn take<T: 'static>(&mut self, field: &Field<T>) -> Option<T> {
        if !self.slots.get(field.name)?.is::<T>() {
            return None;
        }
        self.slots
            .remove(field.name)
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }

    pub fn contains<T>(&self, field: &Field<T>) -> bool {
        self.slots.contains_key(field.name)
    }

    /// Fold another record in; the receiving record keeps its value on a
    /// name collision (first-come, matching token-claim discipline).
    pub fn absorb(&mut self, other: Record) {
        for (name, value) in other.slots {
            self.slots.entry(name).or_insert(value);
        }
    }

    fn insert(&mut self, name: &'static str, value: AnyValue) {
        self.slots.insert(name, value);
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.slots.keys()).finish()
    }
}

/// One named child of an object.
pub struct FieldEntry {
    name: &'static str,
    parser: Box<dyn ErasedParser<AnyValue>>,
}

/// Pair a field handle with the parser that produces its value.
pub fn field<T, P>(key: &Field<T>, parser: P) -> FieldEntry
where
    T: 'static,
    P: Parser<Value = T> + 'static,
{
    let erased = modifiers::map(parser, |value| Box::new(value) as AnyValue);
    FieldEntry {
        name: key.name,
        parser: Box::new(erased),
    }
}

/// Labeled aggregation of named child parsers.
pub struct Object {
    title: Option<String>,
    brief: Option<Message>,
    description: Option<Message>,
    fields: Vec<FieldEntry>,
}

pub fn object(fields: Vec<FieldEntry>) -> Object {
    Object {
        title: None,
        brief: None,
        description: None,
        fields,
    }
}

impl Object {
    /// Heading for this aggregate's documentation section.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn brief(mut self, brief: impl Into<Message>) -> Self {
        self.brief = Some(brief.into());
        self
    }

    pub fn describe(mut self, description: impl Into<Message>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Clone)]
pub struct ObjectState {
    fields: Vec<DynState>,
}

impl Parser for Object {
    type State = ObjectState;
    type Value = Record;

    fn mode(&self) -> Mode {
        self.fields
            .iter()
            .fold(Mode::Sync, |mode, f| mode.combine(f.parser.mode()))
    }

    fn usage(&self) -> Vec<UsageTerm> {
        self.fields.iter().flat_map(|f| f.parser.usage()).collect()
    }

    fn initial(&self) -> ObjectState {
        ObjectState {
            fields: self.fields.iter().map(|f| f.parser.initial()).collect(),
        }
    }

    fn attempt(&self, state: &ObjectState, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<ObjectState> {
        let mut pending: Option<Failure> = None;
        for (i, entry) in self.fields.iter().enumerate() {
            match entry.parser.attempt(&state.fields[i], buffer, ctx) {
                Attempt::Progressed {
                    state: next,
                    consumed,
                } if consumed > 0 => {
                    let mut fields = state.fields.clone();
                    fields[i] = next;
                    return Attempt::Progressed {
                        state: ObjectState { fields },
                        consumed,
                    };
                }
                Attempt::Progressed { .. } => {}
                Attempt::Rejected { failure, consumed } if consumed > 0 => {
                    // The field was entered and then broke; that is final
                    // for the whole aggregate.
                    return Attempt::Rejected { failure, consumed };
                }
                Attempt::Rejected { failure, .. } => note_pending(&mut pending, failure),
            }
        }
        let failure = pending
            .unwrap_or_else(|| Failure::unexpected(buffer.peek().unwrap_or("")));
        Attempt::Rejected {
            failure,
            consumed: 0,
        }
    }

    fn finalize<'a>(&'a self, state: ObjectState, ctx: &'a Annotations) -> Finalize<'a, Record> {
        if Parser::mode(self) == Mode::Sync {
            let mut record = Record::default();
            for (entry, field_state) in self.fields.iter().zip(state.fields) {
                match entry.parser.finalize(field_state, ctx).expect_ready() {
                    Ok(value) => record.insert(entry.name, value),
                    Err(failure) => return Finalize::err(failure),
                }
            }
            Finalize::ok(record)
        } else {
            Finalize::Deferred(Box::pin(async move {
                let mut record = Record::default();
                for (entry, field_state) in self.fields.iter().zip(state.fields) {
                    let value = entry.parser.finalize(field_state, ctx).into_future().await?;
                    record.insert(entry.name, value);
                }
                Ok(record)
            }))
        }
    }

    fn suggest<'a>(&'a self, state: &'a ObjectState, prefix: &str) -> Suggestions<'a> {
        let prefix = prefix.to_string();
        Box::new(
            self.fields
                .iter()
                .zip(state.fields.iter())
                .flat_map(move |(entry, field_state)| entry.parser.suggest(field_state, &prefix)),
        )
    }

    fn doc(&self) -> DocFragments {
        let mut section = DocSection {
            title: self.title.clone(),
            entries: Vec::new(),
        };
        let mut extra_sections = Vec::new();
        for entry in &self.fields {
            for child_section in entry.parser.doc().sections {
                if child_section.title.is_none() {
                    section.entries.extend(child_section.entries);
                } else {
                    extra_sections.push(child_section);
                }
            }
        }
        let mut sections = Vec::new();
        if !section.entries.is_empty() {
            sections.push(section);
        }
        sections.extend(extra_sections);
        DocFragments {
            brief: self.brief.clone(),
            description: self.description.clone(),
            sections,
        }
    }
}
