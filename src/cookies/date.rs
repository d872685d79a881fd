//! Date codec for cookie expiry values.
//!
//! Two fixed, UTC-only representations are used:
//!
//! | Format | Shape | Used for |
//! |--------|-------|----------|
//! | [`DateFormat::Descriptor`] | `2030-01-01T00:00:00.000+00:00` | descriptor/record exchange |
//! | [`DateFormat::Rfc1123`] | `Tue, 01 Jan 2030 00:00:00 GMT` | `expires=` on the wire |
//!
//! Neither [`parse`] nor [`format`] ever fails loudly: a malformed value is
//! logged and reported as `None`, which callers treat as "no expiry".

use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::{datetime, format_description};
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Latest expiry a cookie can carry; longer lifetimes are clamped to it.
pub const MAX_EXPIRY: OffsetDateTime = datetime!(9999-12-31 23:59:59 UTC);

const DESCRIPTOR_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory]:[offset_minute]"
);

const RFC1123_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// The date representations understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// ISO 8601 with millisecond precision and a numeric offset.
    Descriptor,
    /// RFC 1123 with English names and a literal `GMT` zone.
    Rfc1123,
}

/// Parse `input` in the given format.
///
/// Descriptor parsing also accepts any RFC 3339 timestamp, so `...Z` and
/// arbitrary fractional precision are tolerated.
pub fn parse(input: &str, format: DateFormat) -> Option<OffsetDateTime> {
    let input = input.trim();
    let parsed = match format {
        DateFormat::Descriptor => OffsetDateTime::parse(input, DESCRIPTOR_FORMAT)
            .or_else(|_| OffsetDateTime::parse(input, &Rfc3339)),
        DateFormat::Rfc1123 => {
            PrimitiveDateTime::parse(input, RFC1123_FORMAT).map(PrimitiveDateTime::assume_utc)
        }
    };

    match parsed {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(input = %input, format = ?format, error = %e, "unable to parse date");
            None
        }
    }
}

/// Format `date` in the given format, normalized to UTC.
pub fn format(date: OffsetDateTime, format: DateFormat) -> Option<String> {
    let utc = date.to_offset(UtcOffset::UTC);
    let formatted = match format {
        DateFormat::Descriptor => utc.format(DESCRIPTOR_FORMAT),
        DateFormat::Rfc1123 => utc.format(RFC1123_FORMAT),
    };

    match formatted {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::debug!(format = ?format, error = %e, "unable to format date");
            None
        }
    }
}

/// Expiry of a cookie with `Max-Age` of `max_age`, counted from `now`.
///
/// A non-positive age expires at `now`. Servers may send any run of digits,
/// so the result saturates at [`MAX_EXPIRY`] instead of overflowing.
pub fn expiry_from_max_age(now: OffsetDateTime, max_age: Duration) -> OffsetDateTime {
    if max_age <= Duration::ZERO {
        return now;
    }
    now.checked_add(max_age)
        .map_or(MAX_EXPIRY, |expiry| expiry.min(MAX_EXPIRY))
}
