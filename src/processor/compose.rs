//! Composition of scalar processors along an unwrapped function chain.

use crate::access::Value;
use crate::expression::Expression;
use crate::processor::{ProcessResult, Processor};
use log::trace;

/// Two processors applied in sequence: `outer(inner(v))`
#[derive(Debug)]
pub struct ComposeProcessor {
    outer: Box<dyn Processor>,
    inner: Box<dyn Processor>,
}

impl ComposeProcessor {
    pub fn new(outer: Box<dyn Processor>, inner: Box<dyn Processor>) -> Self {
        Self { outer, inner }
    }
}

impl Processor for ComposeProcessor {
    fn process(&self, input: Value) -> ProcessResult<Value> {
        let intermediate = self.inner.process(input)?;
        self.outer.process(intermediate)
    }
}

/// Build one processor for a chain produced by
/// [`unwrap_full_chain`](crate::expression::unwrap_full_chain).
///
/// The chain is ordered outermost first, so every function visited is
/// nested deeper than everything accumulated so far and becomes the inner
/// side of the composition. For `A(B(C(x)))` the result evaluates
/// `A(B(C(v)))`: C first, A last.
///
/// Walking stops at the first non-scalar element, the chain's leaf, whose
/// raw value is supplied at evaluation time. Returns `None` when the chain
/// holds no scalar call at all.
pub fn chain_processors(chain: &[&Expression]) -> Option<Box<dyn Processor>> {
    let mut composed: Option<Box<dyn Processor>> = None;

    for (position, expr) in chain.iter().enumerate() {
        let call = match expr {
            Expression::ScalarCall(call) => call,
            _ => {
                debug_assert_eq!(
                    position + 1,
                    chain.len(),
                    "non-scalar element {} is not the last element of the chain",
                    expr
                );
                break;
            }
        };

        let processor = call.as_processor();
        let next: Box<dyn Processor> = match composed.take() {
            None => processor,
            Some(outer) => Box::new(ComposeProcessor::new(outer, processor)),
        };
        composed = Some(next);
    }

    trace!(
        "composed {} chain elements, processor produced: {}",
        chain.len(),
        composed.is_some()
    );
    composed
}
