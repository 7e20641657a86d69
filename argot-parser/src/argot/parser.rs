//! The parser contract
//!
//! Every combinator implements [`Parser`]. Progress through a token stream is
//! threaded as an explicit, owned state value: `attempt` never mutates the
//! parser, it returns the next state alongside the number of tokens consumed.
//! This keeps a single attempt deterministic and makes one parser definition
//! safely reusable across independent parse passes.
//!
//! Outcome semantics are consumption-aware and every construct depends on
//! them: a rejection that consumed zero tokens means "not mine, try someone
//! else"; a rejection that consumed one or more tokens means "this was mine
//! and it is broken", which is final for the enclosing commitment boundary.
//!
//! Constructs hold heterogeneous children through the object-safe
//! [`ErasedParser`] form, which erases the child's state behind [`DynState`].

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageTerm};
use crate::argot::error::{ErrorKind, Failure, ParseResult};
use crate::argot::message::Message;
use crate::argot::suggest::Suggestion;
use crate::argot::token::TokenBuffer;
use crate::argot::value::BoxedFuture;
use std::any::Any;

/// Whether producing the final value may require awaiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sync,
    Async,
}

impl Mode {
    /// Async is contagious: a construct is async as soon as any child is.
    pub fn combine(self, other: Mode) -> Mode {
        if self == Mode::Async || other == Mode::Async {
            Mode::Async
        } else {
            Mode::Sync
        }
    }
}

/// Outcome of offering a buffer to a parser.
#[derive(Debug)]
pub enum Attempt<S> {
    /// The parser advanced, consuming `consumed` leading tokens. At the
    /// engine boundary `consumed` is at least one; zero-token transitions
    /// complete inside a single call.
    Progressed { state: S, consumed: usize },
    /// The parser did not advance. `consumed > 0` means the parser was
    /// entered and then failed, which downstream disambiguation treats very
    /// differently from "never matched".
    Rejected { failure: Failure, consumed: usize },
}

/// A finalize result: available now, or once awaited.
pub enum Finalize<'a, T> {
    Ready(ParseResult<T>),
    Deferred(BoxedFuture<'a, ParseResult<T>>),
}

impl<'a, T: 'a> Finalize<'a, T> {
    pub fn ok(value: T) -> Self {
        Finalize::Ready(Ok(value))
    }

    pub fn err(failure: Failure) -> Self {
        Finalize::Ready(Err(failure))
    }

    pub fn map<U: 'a>(self, f: impl FnOnce(T) -> U + 'a) -> Finalize<'a, U> {
        match self {
            Finalize::Ready(result) => Finalize::Ready(result.map(f)),
            Finalize::Deferred(future) => {
                Finalize::Deferred(Box::pin(async move { future.await.map(f) }))
            }
        }
    }

    /// Post-process the full result, sync or deferred alike.
    pub fn then(self, f: impl FnOnce(ParseResult<T>) -> ParseResult<T> + 'a) -> Finalize<'a, T> {
        match self {
            Finalize::Ready(result) => Finalize::Ready(f(result)),
            Finalize::Deferred(future) => {
                Finalize::Deferred(Box::pin(async move { f(future.await) }))
            }
        }
    }

    /// Resolve a result that must be synchronous. A deferred result here
    /// means an async tree was driven through a sync entry point.
    pub fn expect_ready(self) -> ParseResult<T> {
        match self {
            Finalize::Ready(result) => result,
            Finalize::Deferred(_) => Err(Failure::new(
                ErrorKind::ModeMismatch,
                Message::new().text("parser is async; drive it through the async entry point"),
            )),
        }
    }

    pub fn into_future(self) -> BoxedFuture<'a, ParseResult<T>> {
        match self {
            Finalize::Ready(result) => Box::pin(std::future::ready(result)),
            Finalize::Deferred(future) => future,
        }
    }
}

/// Lazy, finite stream of completion candidates. Fresh per call.
pub type Suggestions<'a> = Box<dyn Iterator<Item = Suggestion> + 'a>;

/// The capability every combinator exposes.
pub trait Parser {
    /// Explicit match-progress state, threaded through `attempt`.
    type State: Clone + 'static;
    /// The typed value `finalize` produces.
    type Value: 'static;

    fn mode(&self) -> Mode {
        Mode::Sync
    }

    /// Orders sibling attempts in alternation; higher goes first.
    fn priority(&self) -> i16 {
        0
    }

    /// Structural usage description, independent of runtime state.
    fn usage(&self) -> Vec<UsageTerm>;

    /// The starting state for an incremental matching pass.
    fn initial(&self) -> Self::State;

    /// Advance the match by consuming zero or more leading tokens.
    fn attempt(
        &self,
        state: &Self::State,
        buffer: &TokenBuffer,
        ctx: &Annotations,
    ) -> Attempt<Self::State>;

    /// Produce the terminal value once no more tokens will be supplied.
    fn finalize<'a>(&'a self, state: Self::State, ctx: &'a Annotations) -> Finalize<'a, Self::Value>;

    /// Completion candidates at the current match state.
    fn suggest<'a>(&'a self, _state: &'a Self::State, _prefix: &str) -> Suggestions<'a> {
        Box::new(std::iter::empty())
    }

    /// Structural description for help and man-page generation.
    fn doc(&self) -> DocFragments {
        DocFragments::default()
    }
}

// Clone-able erasure for states. `Box<dyn Any>` alone cannot be cloned, and
// constructs must be able to re-thread a child's state without consuming it.
trait AnyState: Any {
    fn clone_box(&self) -> Box<dyn AnyState>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<S: Any + Clone> AnyState for S {
    fn clone_box(&self) -> Box<dyn AnyState> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A child parser's state with its concrete type erased.
pub struct DynState(Box<dyn AnyState>);

impl Clone for DynState {
    fn clone(&self) -> Self {
        DynState(self.0.clone_box())
    }
}

impl std::fmt::Debug for DynState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DynState")
    }
}

impl DynState {
    pub fn new<S: Any + Clone>(state: S) -> Self {
        DynState(Box::new(state))
    }

    /// Downcast to the concrete state type. The pairing of a parser with the
    /// states it produced is an engine invariant; a mismatch is a bug, not a
    /// user error.
    pub fn downcast_ref<S: Any>(&self) -> &S {
        self.0
            .as_any()
            .downcast_ref()
            .expect("parser state type mismatch")
    }

    pub fn into_state<S: Any>(self) -> S {
        *self
            .0
            .into_any()
            .downcast()
            .expect("parser state type mismatch")
    }
}

/// Object-safe form of [`Parser`], used wherever a construct holds children
/// of differing concrete types that produce the same value type `T`.
pub trait ErasedParser<T> {
    fn mode(&self) -> Mode;
    fn priority(&self) -> i16;
    fn usage(&self) -> Vec<UsageTerm>;
    fn initial(&self) -> DynState;
    fn attempt(&self, state: &DynState, buffer: &TokenBuffer, ctx: &Annotations)
        -> Attempt<DynState>;
    fn finalize<'a>(&'a self, state: DynState, ctx: &'a Annotations) -> Finalize<'a, T>;
    fn suggest<'a>(&'a self, state: &'a DynState, prefix: &str) -> Suggestions<'a>;
    fn doc(&self) -> DocFragments;
}

impl<P: Parser> ErasedParser<P::Value> for P {
    fn mode(&self) -> Mode {
        Parser::mode(self)
    }

    fn priority(&self) -> i16 {
        Parser::priority(self)
    }

    fn usage(&self) -> Vec<UsageTerm> {
        Parser::usage(self)
    }

    fn initial(&self) -> DynState {
        DynState::new(Parser::initial(self))
    }

    fn attempt(
        &self,
        state: &DynState,
        buffer: &TokenBuffer,
        ctx: &Annotations,
    ) -> Attempt<DynState> {
        match Parser::attempt(self, state.downcast_ref(), buffer, ctx) {
            Attempt::Progressed { state, consumed } => Attempt::Progressed {
                state: DynState::new(state),
                consumed,
            },
            Attempt::Rejected { failure, consumed } => Attempt::Rejected { failure, consumed },
        }
    }

    fn finalize<'a>(&'a self, state: DynState, ctx: &'a Annotations) -> Finalize<'a, P::Value> {
        Parser::finalize(self, state.into_state(), ctx)
    }

    fn suggest<'a>(&'a self, state: &'a DynState, prefix: &str) -> Suggestions<'a> {
        Parser::suggest(self, state.downcast_ref(), prefix)
    }

    fn doc(&self) -> DocFragments {
        Parser::doc(self)
    }
}

/// A boxed, type-erased parser producing `T`. This is the seam through which
/// alternation, arbitration and branching hold their children.
pub struct Boxed<T> {
    inner: Box<dyn ErasedParser<T>>,
}

impl<T: 'static> Boxed<T> {
    pub fn new<P>(parser: P) -> Self
    where
        P: Parser<Value = T> + 'static,
    {
        Boxed {
            inner: Box::new(parser),
        }
    }
}

impl<T: 'static> Parser for Boxed<T> {
    type State = DynState;
    type Value = T;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn priority(&self) -> i16 {
        self.inner.priority()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        self.inner.usage()
    }

    fn initial(&self) -> DynState {
        self.inner.initial()
    }

    fn attempt(&self, state: &DynState, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<DynState> {
        self.inner.attempt(state, buffer, ctx)
    }

    fn finalize<'a>(&'a self, state: DynState, ctx: &'a Annotations) -> Finalize<'a, T> {
        self.inner.finalize(state, ctx)
    }

    fn suggest<'a>(&'a self, state: &'a DynState, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(state, prefix)
    }

    fn doc(&self) -> DocFragments {
        self.inner.doc()
    }
}

/// Builder-style composition helpers available on every parser.
pub trait ParserExt: Parser + Sized {
    /// Transform the successful value without changing token recognition.
    fn map<U: 'static, F>(self, f: F) -> crate::argot::modifiers::Map<Self, F>
    where
        F: Fn(Self::Value) -> U,
    {
        crate::argot::modifiers::map(self, f)
    }

    /// Succeed with `None` when the inner parser was simply never supplied.
    fn optional(self) -> crate::argot::modifiers::Optional<Self> {
        crate::argot::modifiers::optional(self)
    }

    /// Like `optional`, substituting a default instead of `None`.
    fn with_default(self, default: Self::Value) -> crate::argot::modifiers::WithDefault<Self>
    where
        Self::Value: Clone,
    {
        crate::argot::modifiers::with_default(self, default)
    }

    /// Repeat greedily; enforce `min` occurrences at finalize.
    fn multiple(self, min: usize) -> crate::argot::modifiers::Multiple<Self> {
        crate::argot::modifiers::multiple(self, min)
    }

    /// Reject at finalize unless at least one token was consumed.
    fn non_empty(self) -> crate::argot::modifiers::NonEmpty<Self> {
        crate::argot::modifiers::non_empty(self)
    }

    /// Override the priority used to order sibling attempts in alternation.
    fn with_priority(self, priority: i16) -> crate::argot::modifiers::Prioritized<Self> {
        crate::argot::modifiers::with_priority(self, priority)
    }

    /// Suppress this parser from rendered usage; matching is unaffected.
    fn hidden(self) -> crate::argot::modifiers::Hidden<Self> {
        crate::argot::modifiers::hidden(self)
    }

    /// Erase the concrete type for use in alternation and branching.
    fn boxed(self) -> Boxed<Self::Value>
    where
        Self: 'static,
    {
        Boxed::new(self)
    }
}

impl<P: Parser> ParserExt for P {}
