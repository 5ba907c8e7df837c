// ABOUTME: Core domain library for namerecords, independent of HTTP and storage.
// ABOUTME: Exposes the record types, the field validator, and the escaping serializer.

pub mod model;
pub mod serialize;
pub mod validate;

pub use model::{NameRecord, NameRecordFields, NameRecordPatch, NewNameRecord};
pub use serialize::{SerializedNameRecord, serialize};
pub use validate::{ValidationError, validate};
