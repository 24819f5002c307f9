//! The serialiser trait shared by the identifier and element serialisers.

use crate::error::SerialisationError;
use crate::types::TypeTag;

/// A schema-driven serialiser for one shape of graph data.
///
/// Implementations are stateless beyond the schema they were built from and
/// may be shared across threads.
pub trait Serialiser {
    /// The type this serialiser reads and writes.
    type Item;

    /// Name used in error messages.
    fn name(&self) -> &'static str;

    /// Returns `true` iff this serialiser can handle `type_tag`.
    fn can_handle(&self, type_tag: TypeTag) -> bool;

    /// Serialise an item to a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot encode the item.
    fn serialise(&self, item: &Self::Item) -> Result<Vec<u8>, SerialisationError> {
        let mut buf = Vec::new();
        self.serialise_to(item, &mut buf)?;
        Ok(buf)
    }

    /// Serialise an item, appending to `buf`.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot encode the item.
    fn serialise_to(&self, item: &Self::Item, buf: &mut Vec<u8>) -> Result<(), SerialisationError>;

    /// Deserialise an item from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] if the bytes are truncated or malformed.
    fn deserialise(&self, bytes: &[u8]) -> Result<Self::Item, SerialisationError>;

    /// Fails with [`SerialisationError::UnsupportedType`] unless `type_tag` is handled.
    ///
    /// # Errors
    ///
    /// Returns an error when [`can_handle`](Self::can_handle) is `false`.
    fn ensure_can_handle(&self, type_tag: TypeTag) -> Result<(), SerialisationError> {
        if self.can_handle(type_tag) {
            Ok(())
        } else {
            Err(SerialisationError::unsupported(self.name(), type_tag))
        }
    }
}
