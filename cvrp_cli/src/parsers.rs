use jiff::SpanRelativeTo;

/// Accepts `"1s"`, `"PT2S"`, friendly spans such as `"1 minute"`, or a number
/// of seconds.
pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(format!("Invalid duration: {input}"))
}

/// Parses a `key=value` algorithm parameter.
pub fn parse_parameter(input: &str) -> Result<(String, f64), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("Expected key=value, got {input}"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Missing parameter name in {input}"));
    }

    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid value for {key}: {value}"))?;
    if !value.is_finite() {
        return Err(format!("Invalid value for {key}: {value}"));
    }

    Ok((key.to_owned(), value))
}
