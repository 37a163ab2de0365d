//! Phenomenon time from class 04 qualifiers

use crate::app::models::{QualifierClass, QualifierValue, TimeSpan};
use crate::app::services::qualifier_context::QualifierContext;
use crate::constants::TIME_INCREMENT_DESCRIPTORS;
use crate::{Error, Result};
use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use tracing::{debug, error};

/// Unit of a `time_period` displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodUnit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl PeriodUnit {
    /// Parse a BUFR time unit (`a`, `mon`, `d`, `h`, `min`, `s`)
    pub fn from_units(units: &str) -> Option<Self> {
        match units {
            "a" => Some(Self::Years),
            "mon" => Some(Self::Months),
            "d" => Some(Self::Days),
            "h" => Some(Self::Hours),
            "min" => Some(Self::Minutes),
            "s" => Some(Self::Seconds),
            _ => None,
        }
    }

    fn seconds(&self) -> Option<f64> {
        match self {
            Self::Days => Some(86_400.0),
            Self::Hours => Some(3_600.0),
            Self::Minutes => Some(60.0),
            Self::Seconds => Some(1.0),
            Self::Years | Self::Months => None,
        }
    }
}

/// Derive the phenomenon time in force
///
/// An invalid or incomplete date is an [`Error::InvalidDate`] in strict mode;
/// in lenient mode it is logged and `Ok(None)` is returned. Increment
/// descriptors and unusable time periods always fail.
pub fn derive_time(context: &QualifierContext, strict: bool) -> Result<Option<TimeSpan>> {
    reject_increments(context)?;

    let base = match base_instant(context) {
        Ok(base) => base,
        Err(error) if !strict => {
            error!("{}, phenomenon time set to null", error);
            return Ok(None);
        }
        Err(error) => return Err(error),
    };

    let Some(record) = context.record(QualifierClass::Time, "time_period") else {
        return Ok(Some(TimeSpan::Instant(base)));
    };
    let Some(value) = record.value.as_ref() else {
        return Ok(Some(TimeSpan::Instant(base)));
    };

    let unit = PeriodUnit::from_units(&record.attributes.units).ok_or_else(|| {
        Error::unsupported_displacement(format!(
            "unknown time period units '{}'",
            record.attributes.units
        ))
    })?;
    let (start, end) = period_bounds(value)?;
    debug!("Applying time period [{}, {}] {:?}", start, end, unit);

    Ok(Some(TimeSpan::Interval {
        start: displace(base, start, unit)?,
        end: displace(base, end, unit)?,
    }))
}

/// Single displacements bound a period ending (negative) or starting (non-negative) now
pub fn period_bounds(value: &QualifierValue) -> Result<(f64, f64)> {
    match value {
        QualifierValue::Scalar(value) if *value < 0.0 => Ok((*value, 0.0)),
        QualifierValue::Scalar(value) => Ok((0.0, *value)),
        QualifierValue::Series(values) => match values.as_slice() {
            [single] if *single < 0.0 => Ok((*single, 0.0)),
            [single] => Ok((0.0, *single)),
            [start, end] => Ok((*start, *end)),
            _ => Err(Error::unsupported_displacement(format!(
                "expected at most two time displacements, found {}",
                values.len()
            ))),
        },
    }
}

fn base_instant(context: &QualifierContext) -> Result<DateTime<Utc>> {
    let field = |key: &str, default: Option<i64>| -> Result<i64> {
        match context.number(QualifierClass::Time, key) {
            Some(value) if value.fract() == 0.0 => Ok(value as i64),
            Some(value) => Err(Error::invalid_date(format!(
                "{} is not a whole number: {}",
                key, value
            ))),
            None => default.ok_or_else(|| Error::invalid_date(format!("{} is missing", key))),
        }
    };

    let year = field("year", None)?;
    let month = field("month", None)?;
    let day = field("day", Some(1))?;
    let mut hour = field("hour", Some(0))?;
    let minute = field("minute", Some(0))?;
    let second = field("second", Some(0))?;

    let mut day_offset = 0;
    if hour == 24 {
        debug!("Hour 24 found, advancing day by one");
        hour = 0;
        day_offset = 1;
    }

    let invalid = || {
        Error::invalid_date(format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            year, month, day, hour, minute, second
        ))
    };
    let date = NaiveDate::from_ymd_opt(
        i32::try_from(year).map_err(|_| invalid())?,
        u32::try_from(month).map_err(|_| invalid())?,
        u32::try_from(day).map_err(|_| invalid())?,
    )
    .ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(
        u32::try_from(hour).map_err(|_| invalid())?,
        u32::try_from(minute).map_err(|_| invalid())?,
        u32::try_from(second).map_err(|_| invalid())?,
    )
    .ok_or_else(invalid)?;

    let instant = date.and_time(time).and_utc();
    instant
        .checked_add_signed(Duration::days(day_offset))
        .ok_or_else(invalid)
}

fn displace(base: DateTime<Utc>, amount: f64, unit: PeriodUnit) -> Result<DateTime<Utc>> {
    let out_of_range = || {
        Error::unsupported_displacement(format!(
            "time period {} {:?} out of range",
            amount, unit
        ))
    };

    let months = match unit {
        PeriodUnit::Years => Some(amount * 12.0),
        PeriodUnit::Months => Some(amount),
        _ => None,
    };
    if let Some(months) = months {
        if months.fract() != 0.0 {
            return Err(Error::unsupported_displacement(format!(
                "fractional calendar period {} {:?}",
                amount, unit
            )));
        }
        let step = Months::new(u32::try_from(months.abs() as i64).map_err(|_| out_of_range())?);
        let shifted = if months < 0.0 {
            base.checked_sub_months(step)
        } else {
            base.checked_add_months(step)
        };
        return shifted.ok_or_else(out_of_range);
    }

    let seconds = amount * unit.seconds().ok_or_else(out_of_range)?;
    let offset =
        Duration::try_milliseconds((seconds * 1000.0).round() as i64).ok_or_else(out_of_range)?;
    base.checked_add_signed(offset).ok_or_else(out_of_range)
}

fn reject_increments(context: &QualifierContext) -> Result<()> {
    match context
        .records(QualifierClass::Time)
        .find(|record| TIME_INCREMENT_DESCRIPTORS.contains(&record.code.code().as_str()))
    {
        Some(record) => Err(Error::unsupported_increment(record.code.code(), &record.key)),
        None => Ok(()),
    }
}
