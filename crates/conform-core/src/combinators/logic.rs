//! Logical combinators over schema nodes
//!
//! Sub-nodes are evaluated at the combinator's own location, against the same
//! value and parent.

use std::sync::Arc;

use serde_json::Value;

use crate::predicate::{Predicate, Verdict};
use crate::schema::SchemaNode;
use crate::walker::check_nested;

/// Message of an [`any_of`] with no satisfied alternative
pub const NO_ALTERNATIVE: &str = "Value did not satisfy any of the permitted alternatives.";

fn collect<I, N>(nodes: I) -> Arc<[SchemaNode]>
where
    I: IntoIterator<Item = N>,
    N: Into<SchemaNode>,
{
    nodes.into_iter().map(Into::into).collect()
}

/// Valid only if every node is; reports the first failing node's own error
///
/// An empty `all_of` accepts everything.
pub fn all_of<I, N>(nodes: I) -> Predicate
where
    I: IntoIterator<Item = N>,
    N: Into<SchemaNode>,
{
    let nodes = collect(nodes);
    Predicate::fallible(move |value, ctx| {
        for node in nodes.iter() {
            if let Some(err) = check_nested(value, ctx, node)? {
                return Ok(Verdict::Error(err));
            }
        }
        Ok(Verdict::Valid)
    })
}

/// Valid if at least one node is
///
/// Branch errors are discarded; on failure a single generic message is
/// reported. An empty `any_of` rejects everything.
pub fn any_of<I, N>(nodes: I) -> Predicate
where
    I: IntoIterator<Item = N>,
    N: Into<SchemaNode>,
{
    let nodes = collect(nodes);
    Predicate::fallible(move |value, ctx| {
        for node in nodes.iter() {
            if check_nested(value, ctx, node)?.is_none() {
                return Ok(Verdict::Valid);
            }
        }
        Ok(Verdict::Invalid)
    })
    .with_message(NO_ALTERNATIVE)
}

/// Accept `null`, otherwise defer to `node`
pub fn nullable(node: impl Into<SchemaNode>) -> Predicate {
    let node = node.into();
    Predicate::fallible(move |value, ctx| match value {
        Some(Value::Null) => Ok(Verdict::Valid),
        _ => check_nested(value, ctx, &node).map(Verdict::from),
    })
}

/// Accept an absent value, otherwise defer to `node`
pub fn optional(node: impl Into<SchemaNode>) -> Predicate {
    let node = node.into();
    Predicate::fallible(move |value, ctx| match value {
        None => Ok(Verdict::Valid),
        Some(_) => check_nested(value, ctx, &node).map(Verdict::from),
    })
}

/// Accept anything, including an absent value
pub fn any() -> Predicate {
    Predicate::new(|_| true)
}
