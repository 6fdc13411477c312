/// Width budget for one wrapped line, in both of the units a [`LineMeasure`] may use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapMetrics {
    /// Heuristic character budget per line.
    pub chars_per_line: usize,
    /// Available text width in px.
    pub max_width_px: f64,
    /// Quote font size in px.
    pub font_size: f64,
}

/// Decides whether a candidate line fits inside the wrap budget.
///
/// Implementations must be deterministic for a fixed input and font.
pub trait LineMeasure {
    /// Return `true` when `candidate` can be rendered on a single line.
    fn fits(&mut self, candidate: &str, metrics: &WrapMetrics) -> bool;
}

/// Approximate measure: compares the character count against [`WrapMetrics::chars_per_line`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CharCountMeasure;

impl LineMeasure for CharCountMeasure {
    fn fits(&mut self, candidate: &str, metrics: &WrapMetrics) -> bool {
        candidate.chars().count() <= metrics.chars_per_line
    }
}

/// Greedily pack whitespace-separated words into lines.
///
/// A word that does not fit next to the current line starts a new one. A word that does not fit
/// even on its own line is still emitted whole.
pub fn wrap_words(text: &str, metrics: &WrapMetrics, measure: &mut dyn LineMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.fits(&candidate, metrics) {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
