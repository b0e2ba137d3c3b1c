//! Predicate schema leaves
//!
//! A [`Predicate`] pairs a decision closure with an optional bound error
//! message. It is immutable and cheap to clone, so the same predicate can
//! appear in many places in a schema and be shared across threads.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::keychain::KeyChain;
use crate::options::ValidationOptions;

/// Outcome of evaluating a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The value is valid
    Valid,
    /// The value is invalid, no specific message
    Invalid,
    /// The value is invalid, with an ad hoc message
    Message(String),
    /// The value is invalid, with a fully resolved error
    Error(ValidationError),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

impl From<String> for Verdict {
    fn from(message: String) -> Self {
        Verdict::Message(message)
    }
}

impl From<Option<ValidationError>> for Verdict {
    fn from(outcome: Option<ValidationError>) -> Self {
        match outcome {
            None => Verdict::Valid,
            Some(err) => Verdict::Error(err),
        }
    }
}

/// What a predicate can see besides the value itself
#[derive(Debug, Clone, Copy)]
pub struct PredicateContext<'a> {
    /// The object or array containing the value, `None` at the root
    pub parent: Option<&'a Value>,
    /// Options of the running validation
    pub options: &'a ValidationOptions,
    /// Location of the value
    pub keychain: &'a KeyChain,
}

type CheckFn = dyn Fn(Option<&Value>, &PredicateContext<'_>) -> Result<Verdict> + Send + Sync;

/// A decision closure usable as a schema leaf
#[derive(Clone)]
pub struct Predicate {
    check: Arc<CheckFn>,
    message: Option<Arc<str>>,
}

impl Predicate {
    /// Predicate over the value alone
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self::fallible(move |value, _| Ok(f(value).into()))
    }

    /// Predicate that also sees its parent, the options and its location
    pub fn with_context<F, V>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &PredicateContext<'_>) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        Self::fallible(move |value, ctx| Ok(f(value, ctx).into()))
    }

    /// Predicate that may itself hit an authoring error (e.g. when it
    /// evaluates nested schema nodes)
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &PredicateContext<'_>) -> Result<Verdict> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(f),
            message: None,
        }
    }

    /// Bind the message used when the predicate returns a plain `false`
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(Arc::from(message.into()));
        self
    }

    /// The bound message, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Evaluate the decision closure
    pub fn evaluate(&self, value: Option<&Value>, ctx: &PredicateContext<'_>) -> Result<Verdict> {
        (self.check)(value, ctx)
    }

    /// Evaluate at the root with default options and no parent
    pub fn accepts(&self, value: Option<&Value>) -> Result<bool> {
        let keychain = KeyChain::new();
        let ctx = PredicateContext {
            parent: None,
            options: &ValidationOptions::DEFAULT,
            keychain: &keychain,
        };
        Ok(self.evaluate(value, &ctx)?.is_valid())
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
