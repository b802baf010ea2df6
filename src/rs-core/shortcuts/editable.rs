use crate::page::DomTree;

/// Words which, found in a node name or attribute name, hint at a text
/// field. Catches `INPUT` and `TEXTAREA` as well as custom elements such as
/// search bars or comment boxes.
const TEXT_ENTRY_KEYWORDS: [&str; 6] = ["INPUT", "TEXT", "SEARCH", "COMMENT", "COMPOSE", "CHAT"];

/// Returns `true` if the focused element probably receives typed text, in
/// which case key presses must be left alone.
pub fn focus_has_editable_text<H: DomTree>(host: &H) -> bool {
    let Some(focused) = host.focused_element() else {
        return false;
    };
    if host.is_content_editable(&focused) {
        return true;
    }
    let name = host.node_name(&focused).to_uppercase();
    if contains_keyword(&name) {
        return true;
    }
    host.attribute_names(&focused)
        .iter()
        .any(|attr| contains_keyword(&attr.to_uppercase()))
}

fn contains_keyword(name: &str) -> bool {
    TEXT_ENTRY_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}
