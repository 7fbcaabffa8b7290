//! Pattern-based field extraction.
//!
//! Each rule set (contact fields, experience/education headers, interview
//! requests) implements [`StructuredExtractor`] so it can be swapped or tested
//! apart from the code that drives it. Extractors never fail: a field the
//! patterns cannot find comes back empty.

pub trait StructuredExtractor {
    type Output;

    fn extract(&self, input: &str) -> Self::Output;
}
