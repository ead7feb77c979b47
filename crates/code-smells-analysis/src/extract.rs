use tracing::debug;

use crate::AnalysisError;

const OPEN_MARKER: &str = "<output>";
const CLOSE_MARKER: &str = "</output>";

/// Locate the `<output>...</output>` fragment inside raw model text.
///
/// Models usually wrap the structured fragment in explanatory prose; the
/// fragment is the span from the first opening marker through the first
/// closing marker after it, both markers included. The search spans
/// newlines.
pub fn extract_fragment(response: &str) -> Result<&str, AnalysisError> {
    let start = response.find(OPEN_MARKER).ok_or(AnalysisError::NoFragment)?;
    let search_from = start + OPEN_MARKER.len();
    let end = response[search_from..]
        .find(CLOSE_MARKER)
        .map(|pos| search_from + pos + CLOSE_MARKER.len())
        .ok_or(AnalysisError::NoFragment)?;

    debug!(start, len = end - start, "Found output fragment");

    Ok(&response[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_fragment_between_prose() {
        let response = "Here is my analysis:\n\n<output><analysis_process>ok</analysis_process></output>\n\nLet me know if you need more.";
        let fragment = extract_fragment(response).unwrap();
        assert!(fragment.starts_with("<output>"));
        assert!(fragment.ends_with("</output>"));
        assert!(fragment.contains("analysis_process"));
    }

    #[test]
    fn test_fragment_spans_newlines() {
        let response = "prose\n<output>\n<analysis_process>\nmulti\nline\n</analysis_process>\n</output>\nmore prose";
        let fragment = extract_fragment(response).unwrap();
        assert!(fragment.starts_with("<output>\n"));
        assert!(fragment.ends_with("\n</output>"));
    }

    #[test]
    fn test_no_markers_is_an_error() {
        let result = extract_fragment("The model refused to answer in the requested format.");
        assert!(matches!(result, Err(AnalysisError::NoFragment)));
    }

    #[test]
    fn test_opening_marker_without_closing_is_an_error() {
        let result = extract_fragment("<output><analysis_process>truncated");
        assert!(matches!(result, Err(AnalysisError::NoFragment)));
    }

    #[test]
    fn test_stops_at_first_closing_marker() {
        let response = "<output>a</output> trailing <output>b</output>";
        let fragment = extract_fragment(response).unwrap();
        assert_eq!(fragment, "<output>a</output>");
    }
}
