//! Coercion of raw citation count fields
//!
//! Data files are edited by hand, so citation counts may be blank, missing or
//! not numbers at all. None of this is fatal: such counts are read as zero and
//! the row is kept.

use crate::Count;

/// Turn the raw text of a count field (if any) into a citation count
///
/// - Surrounding whitespace is ignored
/// - Integers are taken as-is
/// - Other finite numbers are truncated towards zero
/// - Negative, non-finite, blank, absent and non-numeric values become zero
pub fn coerce(field: Option<&str>) -> Count {
    let Some(text) = field.map(str::trim) else {
        log::trace!("Coerced absent count field to 0");
        return 0;
    };
    if let Ok(count) = text.parse::<Count>() {
        return count;
    }
    let count = match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.trunc() as Count,
        _ => 0,
    };
    log::trace!("Coerced count field {text:?} to {count}");
    count
}
