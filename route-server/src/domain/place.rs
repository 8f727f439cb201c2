//! Place token parsing.
//!
//! Callers identify locations with free-form place tokens. Two forms are
//! accepted: `"coord:<lon>:<lat>"` (the canonical stop-point form) and the
//! bare `"<lon>;<lat>"` pair.

use super::Coordinate;

/// Error returned when a place token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid place token `{token}`: {reason}")]
pub struct InvalidPlace {
    token: String,
    reason: &'static str,
}

impl InvalidPlace {
    fn new(token: &str, reason: &'static str) -> Self {
        Self {
            token: token.to_owned(),
            reason,
        }
    }
}

/// Parses a place token into a [`Coordinate`].
///
/// Both components must be finite decimal numbers.
///
/// # Examples
///
/// ```
/// use route_server::domain::parse_place;
///
/// let a = parse_place("coord:2.37:48.84").unwrap();
/// let b = parse_place("2.37;48.84").unwrap();
/// assert_eq!(a, b);
///
/// assert!(parse_place("somewhere").is_err());
/// ```
pub fn parse_place(token: &str) -> Result<Coordinate, InvalidPlace> {
    let (lon, lat) = if let Some(rest) = token.strip_prefix("coord:") {
        rest.split_once(':')
            .ok_or_else(|| InvalidPlace::new(token, "expected `coord:<lon>:<lat>`"))?
    } else {
        token
            .split_once(';')
            .ok_or_else(|| InvalidPlace::new(token, "expected `<lon>;<lat>`"))?
    };

    let lon: f64 = lon
        .parse()
        .map_err(|_| InvalidPlace::new(token, "longitude is not a number"))?;
    let lat: f64 = lat
        .parse()
        .map_err(|_| InvalidPlace::new(token, "latitude is not a number"))?;

    if !lon.is_finite() || !lat.is_finite() {
        return Err(InvalidPlace::new(token, "components must be finite"));
    }

    Ok(Coordinate::new(lon, lat))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any finite pair roundtrips through the semicolon form
        #[test]
        fn semicolon_roundtrip(lon in -180.0f64..180.0, lat in -90.0f64..90.0) {
            let c = parse_place(&format!("{lon};{lat}")).unwrap();
            prop_assert_eq!(c, Coordinate::new(lon, lat));
        }

        /// Any finite pair roundtrips through the coord form
        #[test]
        fn coord_form_roundtrip(lon in -180.0f64..180.0, lat in -90.0f64..90.0) {
            let c = parse_place(&format!("coord:{lon}:{lat}")).unwrap();
            prop_assert_eq!(c, Coordinate::new(lon, lat));
        }

        /// Tokens without a separator never parse
        #[test]
        fn no_separator_rejected(s in "[0-9a-zA-Z._-]{0,20}") {
            prop_assert!(parse_place(&s).is_err());
        }
    }
}
