//! Report Filters

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use pool_ledger::{products::ProductUuid, suppliers::SupplierUuid};

use crate::domain::reports::errors::ReportsServiceError;

/// Report Filter
///
/// Dates are whole UTC days and both ends are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub supplier: Option<SupplierUuid>,
    pub product: Option<ProductUuid>,
}

impl ReportFilter {
    /// Half-open `[start, end)` timestamp range covering the filter's days.
    ///
    /// # Errors
    ///
    /// - [`ReportsServiceError::InvalidDateRange`]: `from` is after `to`.
    /// - [`ReportsServiceError::InvalidDate`]: a day cannot be placed on the timeline.
    pub fn bounds(&self) -> Result<(Option<Timestamp>, Option<Timestamp>), ReportsServiceError> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(ReportsServiceError::InvalidDateRange { from, to });
        }

        let start = self.from.map(start_of_day).transpose()?;
        let end = self
            .to
            .map(|to| to.tomorrow().and_then(start_of_day))
            .transpose()?;

        Ok((start, end))
    }
}

/// UTC day containing `point_in_time`, as a half-open range.
///
/// # Errors
///
/// Returns an error at the very end of the supported calendar.
pub fn day_bounds(point_in_time: Timestamp) -> Result<(Timestamp, Timestamp), jiff::Error> {
    let day = point_in_time.to_zoned(TimeZone::UTC).date();

    Ok((start_of_day(day)?, start_of_day(day.tomorrow()?)?))
}

fn start_of_day(day: Date) -> Result<Timestamp, jiff::Error> {
    Ok(day.to_zoned(TimeZone::UTC)?.timestamp())
}
