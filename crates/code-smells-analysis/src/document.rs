use roxmltree::{Document, Node};
use tracing::debug;

use crate::AnalysisError;

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

const EXAMPLE_FIX_OPEN: &str = "<example_fix>";
const EXAMPLE_FIX_CLOSE: &str = "</example_fix>";

/// Elements that must be present somewhere in the fragment for it to count
/// as a complete analysis.
const REQUIRED_ELEMENTS: [&str; 2] = ["output", "analysis_process"];

/// One identified code smell.
///
/// Every field is free text; an element that is absent or empty in the
/// fragment yields an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flag {
    pub description: String,
    pub location: String,
    pub explanation: String,
    pub suggestion: String,
    pub example_fix: String,
}

/// The parsed result of one model response.
///
/// Construction either succeeds with both required elements present or
/// fails; there is no partially-valid document. All content is extracted
/// eagerly, so accessors are plain reads.
#[derive(Debug, Clone)]
pub struct AnalysisDocument {
    flags: Vec<Flag>,
    overall_assessment: String,
}

impl AnalysisDocument {
    /// Parse an extracted `<output>` fragment.
    ///
    /// Models are not guaranteed to escape code embedded in
    /// `<example_fix>` elements, so a direct parse failure triggers one
    /// recovery attempt: every `example_fix` interior is shielded in a
    /// CDATA section and the fragment is parsed again. If both attempts
    /// fail, the error from the first attempt is reported since it points
    /// at the model's actual output.
    pub fn parse(fragment: &str) -> Result<Self, AnalysisError> {
        let shielded;
        let doc = match Document::parse(fragment) {
            Ok(doc) => doc,
            Err(first_error) => {
                debug!(error = %first_error, "Direct parse failed, shielding example_fix regions");
                shielded = shield_example_fixes(fragment);
                match Document::parse(&shielded) {
                    Ok(doc) => doc,
                    Err(_) => return Err(AnalysisError::Malformed(first_error)),
                }
            }
        };

        for name in REQUIRED_ELEMENTS {
            if !doc.descendants().any(|n| n.has_tag_name(name)) {
                return Err(AnalysisError::MissingElement(name));
            }
        }

        let flags: Vec<Flag> = doc
            .descendants()
            .filter(|n| n.has_tag_name("flag"))
            .map(read_flag)
            .collect();

        let overall_assessment = doc
            .descendants()
            .find(|n| n.has_tag_name("overall_assessment"))
            .map(|n| element_text(n).trim().to_string())
            .unwrap_or_default();

        debug!(flags = flags.len(), "Parsed analysis document");

        Ok(Self {
            flags,
            overall_assessment,
        })
    }

    /// All identified flags, in document order, not deduplicated.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// The model's summary assessment, or an empty string if it was
    /// omitted.
    pub fn overall_assessment(&self) -> &str {
        &self.overall_assessment
    }

    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }
}

/// Build a [`Flag`] from the immediate element children of a `<flag>`
/// subtree. Only the known field names are mapped; anything else the model
/// invents is ignored rather than silently accepted.
fn read_flag(node: Node) -> Flag {
    let mut flag = Flag::default();
    for child in node.children().filter(|c| c.is_element()) {
        let text = element_text(child);
        match child.tag_name().name() {
            "description" => flag.description = text.trim().to_string(),
            "location" => flag.location = text.trim().to_string(),
            "explanation" => flag.explanation = text.trim().to_string(),
            "suggestion" => flag.suggestion = text.trim().to_string(),
            "example_fix" => flag.example_fix = strip_cdata_markers(&text).trim().to_string(),
            _ => {}
        }
    }
    flag
}

/// Concatenated text of an element's immediate text children. CDATA
/// sections surface as text nodes, so this recovers shielded code intact.
fn element_text(node: Node) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

/// Remove CDATA markers that survived parsing, e.g. when the model emitted
/// them as literal text inside an already-shielded region.
fn strip_cdata_markers(text: &str) -> String {
    if text.contains(CDATA_OPEN) {
        text.replace(CDATA_OPEN, "").replace(CDATA_CLOSE, "")
    } else {
        text.to_string()
    }
}

/// Wrap the interior of every `<example_fix>` region in a CDATA section so
/// unescaped code text cannot break the structural parse.
///
/// Idempotent: an interior that already contains a CDATA marker is left
/// untouched, so running the transform twice produces identical output.
fn shield_example_fixes(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len() + CDATA_OPEN.len() + CDATA_CLOSE.len());
    let mut rest = fragment;

    while let Some(open) = rest.find(EXAMPLE_FIX_OPEN) {
        let body_start = open + EXAMPLE_FIX_OPEN.len();
        let Some(body_len) = rest[body_start..].find(EXAMPLE_FIX_CLOSE) else {
            // Unclosed region, leave the tail for the parser to complain about
            break;
        };
        let body = &rest[body_start..body_start + body_len];

        out.push_str(&rest[..body_start]);
        if body.contains(CDATA_OPEN) {
            out.push_str(body);
        } else {
            out.push_str(CDATA_OPEN);
            out.push_str(body);
            out.push_str(CDATA_CLOSE);
        }
        out.push_str(EXAMPLE_FIX_CLOSE);

        rest = &rest[body_start + body_len + EXAMPLE_FIX_CLOSE.len()..];
    }

    out.push_str(rest);
    out
}
