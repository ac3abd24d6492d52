//! Reading and writing element values.
//!
//! Every element kind implements [`ValueMapper`] with its own value type.
//! [`SubmodelElement`](crate::model::SubmodelElement) implements it with
//! [`ValueNode`](crate::value::ValueNode), dispatching on the runtime kind;
//! that impl is the entry point for kind-erased values.
//!
//! Writes are atomic per call: [`ValueMapper::set_value`] checks the whole
//! incoming value against the tree before mutating anything, so a failed
//! write leaves the element untouched.
//!
//! Mappers borrow the element for the duration of one call and keep no
//! state. Concurrent writers must be serialized by the caller.

mod collection;
mod dispatch;
mod entity;
mod multi_language;
mod operation;
mod relationship;
mod scalar;
pub(crate) mod sequence;

use crate::error::MappingError;

/// Bidirectional mapping between an element and its value.
pub trait ValueMapper {
    /// The value-only form of this element.
    type Value;

    /// Reads a snapshot of the current value.
    fn value(&self) -> Self::Value;

    /// Checks that `value` could be written, without mutating anything.
    fn check_value(&self, value: &Self::Value) -> Result<(), MappingError>;

    /// Writes a value that already passed [`ValueMapper::check_value`].
    ///
    /// Parts of an unchecked value that do not fit the element (wrong
    /// shape, unknown idShort, extra list items) are skipped.
    fn apply_value(&mut self, value: Self::Value);

    /// Checks and writes `value`.
    fn set_value(&mut self, value: Self::Value) -> Result<(), MappingError> {
        self.check_value(&value)?;
        self.apply_value(value);
        Ok(())
    }
}
