use std::error::Error;
use std::fmt;

/// InputValueError is used if some playback option or session record does not fulfill the posed
/// requirements, e.g., by using a position of zero.
#[derive(Debug, Clone)]
pub struct InputValueError;

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value")
    }
}

impl Error for InputValueError {}

/// valid_duration returns the duration if it can be used as a timing value, i.e. if it is finite
/// and strictly positive. Missing, zero, negative and NaN values are mapped to None.
pub fn valid_duration(t: Option<f64>) -> Option<f64> {
    match t {
        Some(x) if x.is_finite() && x > 0.0 => Some(x),
        _ => None,
    }
}

/// format_laptime formats a duration in seconds as it is shown on a timing screen, e.g. 1:02.345
/// for 62.345s or 9.870 for a sector of 9.87s. Missing durations are shown as a dash.
pub fn format_laptime(t: Option<f64>) -> String {
    let t = match valid_duration(t) {
        Some(x) => x,
        None => return String::from("-"),
    };

    // work on rounded milliseconds to avoid floating point artifacts such as 1:02.344
    let t_ms = (t * 1000.0).round() as u64;
    let mins = t_ms / 60_000;
    let secs = (t_ms / 1000) % 60;
    let millis = t_ms % 1000;

    if mins > 0 {
        format!("{}:{:02}.{:03}", mins, secs, millis)
    } else {
        format!("{}.{:03}", secs, millis)
    }
}
