use crate::constants::Degree;
use crate::ephem_errors::EphemError;

/// Split a sexagesimal string into its numeric fields and sign.
///
/// Fields may be separated by `:` or by whitespace (`"31:41:19.6"`, `"31 41 19.6"`).
/// One to three fields are accepted so that `"12"` and `"12:30"` are valid too. The sign is
/// carried by the first field only, which keeps `"-00:30:00"` negative.
///
/// Arguments
/// ---------
/// * `field`: the sexagesimal string.
///
/// Return
/// ------
/// * `(sign, value)` where `value = a + b/60 + c/3600` is non-negative.
fn split_sexagesimal(field: &str) -> Result<(f64, f64), EphemError> {
    let invalid = || EphemError::InvalidCoordinate(field.to_string());

    let parts: Vec<&str> = field
        .trim()
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() || parts.len() > 3 {
        return Err(invalid());
    }

    let sign = if parts[0].starts_with('-') { -1.0 } else { 1.0 };
    let head = parts[0].trim_start_matches(&['-', '+'][..]);

    let mut value = 0.0;
    for (i, raw) in std::iter::once(head).chain(parts[1..].iter().copied()).enumerate() {
        let x: f64 = raw.parse().map_err(|_| invalid())?;
        if !x.is_finite() || x < 0.0 || (i > 0 && x >= 60.0) {
            return Err(invalid());
        }
        value += x / 60f64.powi(i as i32);
    }

    Ok((sign, value))
}

/// Parse a right ascension string to degrees
///
/// Arguments
/// ---------
/// * `ra`: right ascension in hours, `HH:MM:SS.SS` or `HH MM SS.SS`
///
/// Returns
/// -------
/// * The right ascension in degrees, in `[0, 360)`.
pub fn parse_ra_to_deg(ra: &str) -> Result<Degree, EphemError> {
    let (sign, hours) = split_sexagesimal(ra)?;
    if sign < 0.0 || hours >= 24.0 {
        return Err(EphemError::InvalidCoordinate(format!(
            "right ascension out of range: {ra}"
        )));
    }
    Ok(hours * 15.0)
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `dec`: declination in degrees, `±DD:MM:SS.SS` or `±DD MM SS.SS`
///
/// Returns
/// -------
/// * The declination in degrees, in `[-90, 90]`.
pub fn parse_dec_to_deg(dec: &str) -> Result<Degree, EphemError> {
    let (sign, deg) = split_sexagesimal(dec)?;
    if deg > 90.0 {
        return Err(EphemError::InvalidCoordinate(format!(
            "declination out of range: {dec}"
        )));
    }
    Ok(sign * deg)
}

/// Format a decimal value as `±DD:MM:SS.s`.
///
/// The leading sign is only written for negative values unless `force_sign` is set.
pub fn format_sexagesimal(value: f64, force_sign: bool) -> String {
    let sign = if value < 0.0 {
        "-"
    } else if force_sign {
        "+"
    } else {
        ""
    };

    // round once at the tenth of a second to avoid "59.99 -> 60.0" carries
    let tenths = (value.abs() * 36_000.0).round() as u64;
    let units = tenths / 36_000;
    let minutes = (tenths / 600) % 60;
    let seconds = (tenths % 600) as f64 / 10.0;

    format!("{sign}{units:02}:{minutes:02}:{seconds:04.1}")
}
