use super::error::StructureError;
use crate::core::candidate::ResidueRange;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const DEFAULT_VIEWER_SCRIPT_URL: &str = "https://3Dmol.org/build/3Dmol-min.js";

/// Appearance of the generated 3Dmol.js page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub width: u32,
    pub height: u32,
    pub backbone_color: String,
    pub highlight_scheme: String,
    pub script_url: String,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            backbone_color: "white".to_string(),
            highlight_scheme: "redCarbon".to_string(),
            script_url: DEFAULT_VIEWER_SCRIPT_URL.to_string(),
        }
    }
}

/// Encodes a value as a JavaScript literal that is safe inside `<script>`.
fn js_literal<T: Serialize + ?Sized>(value: &T) -> Result<String, StructureError> {
    serde_json::to_string(value)
        .map(|json| json.replace("</", "<\\/"))
        .map_err(|e| StructureError::Render(e.to_string()))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Builds a standalone HTML page that renders `structure_text` as a cartoon
/// and adds one stick highlight per range.
///
/// Ranges are passed through one by one, in the given order; overlapping
/// ranges are not merged.
pub fn render_overlay(
    title: &str,
    structure_text: &str,
    ranges: &[ResidueRange],
    style: &OverlayStyle,
) -> Result<String, StructureError> {
    let highlights: Vec<Vec<usize>> = ranges.iter().map(|r| r.residues().collect()).collect();

    let mut html = String::new();
    let fmt_err = |e: std::fmt::Error| StructureError::Render(e.to_string());

    writeln!(html, "<!DOCTYPE html>").map_err(fmt_err)?;
    writeln!(html, "<html>").map_err(fmt_err)?;
    writeln!(html, "<head>").map_err(fmt_err)?;
    writeln!(html, "<meta charset=\"utf-8\">").map_err(fmt_err)?;
    writeln!(html, "<title>{}</title>", escape_html(title)).map_err(fmt_err)?;
    writeln!(
        html,
        "<script src=\"{}\"></script>",
        escape_html(&style.script_url)
    )
    .map_err(fmt_err)?;
    writeln!(html, "</head>").map_err(fmt_err)?;
    writeln!(html, "<body>").map_err(fmt_err)?;
    writeln!(html, "<h2>{}</h2>", escape_html(title)).map_err(fmt_err)?;
    writeln!(
        html,
        "<div id=\"viewer\" style=\"width: {}px; height: {}px; position: relative;\"></div>",
        style.width, style.height
    )
    .map_err(fmt_err)?;
    writeln!(html, "<script>").map_err(fmt_err)?;
    writeln!(html, "const structureData = {};", js_literal(structure_text)?).map_err(fmt_err)?;
    writeln!(html, "const highlights = {};", js_literal(&highlights)?).map_err(fmt_err)?;
    writeln!(
        html,
        "const viewer = $3Dmol.createViewer(document.getElementById(\"viewer\"));"
    )
    .map_err(fmt_err)?;
    writeln!(html, "viewer.addModel(structureData, \"pdb\");").map_err(fmt_err)?;
    writeln!(
        html,
        "viewer.setStyle({{}}, {{cartoon: {{color: {}}}}});",
        js_literal(&style.backbone_color)?
    )
    .map_err(fmt_err)?;
    writeln!(html, "for (const resi of highlights) {{").map_err(fmt_err)?;
    writeln!(
        html,
        "  viewer.addStyle({{resi: resi}}, {{stick: {{colorscheme: {}}}}});",
        js_literal(&style.highlight_scheme)?
    )
    .map_err(fmt_err)?;
    writeln!(html, "}}").map_err(fmt_err)?;
    writeln!(html, "viewer.zoomTo();").map_err(fmt_err)?;
    writeln!(html, "viewer.render();").map_err(fmt_err)?;
    writeln!(html, "</script>").map_err(fmt_err)?;
    writeln!(html, "</body>").map_err(fmt_err)?;
    writeln!(html, "</html>").map_err(fmt_err)?;

    Ok(html)
}
