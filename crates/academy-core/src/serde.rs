// `::serde` is the external crate; this module's name hides it.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// `serialize_with` target for response timestamps: `2024-05-01T08:30:00.000Z`.
/// Sub-millisecond precision is dropped on the wire.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
