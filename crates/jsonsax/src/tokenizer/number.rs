use crate::options::NumberMode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Long(i64),
    Double(f64),
}

/// Picks the listener call for an already validated numeric literal.
///
/// Literals without a fraction or exponent that fit in an `i64` become
/// [`Number::Long`] (unless `mode` asks for doubles only); everything else is
/// rounded to the nearest `f64`.
pub(crate) fn classify(text: &str, mode: NumberMode) -> Option<Number> {
    let integral = !text.contains(['.', 'e', 'E']);
    if integral && mode == NumberMode::Longs {
        if let Ok(value) = text.parse::<i64>() {
            return Some(Number::Long(value));
        }
    }
    text.parse::<f64>().ok().map(Number::Double)
}
