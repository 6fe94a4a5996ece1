//! Markup extraction for the Schedule of Classes menu page.
//!
//! The search form is rendered inside a secondary tab; only the inputs under
//! the `#tabs-sub` region carry live search state; everything else on the
//! page belongs to other tabs.

use html_scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use crate::soc::errors::SocApiError;
use crate::soc::models::{FormField, TermMap};

static TERM_SELECT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#selectedTerm").expect("valid selector"));
static OPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("valid selector"));
static SEARCH_FORM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form#socFacSearch").expect("valid selector"));
static SUB_REGION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#tabs-sub").expect("valid selector"));
static INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("valid selector"));

/// Extract the term code → label mapping from the term dropdown.
///
/// Options missing a value or text are skipped. Both sides are trimmed;
/// a repeated code keeps its first position but takes the later label.
pub fn parse_terms(html: &str) -> Result<TermMap, SocApiError> {
    let document = Html::parse_document(html);
    let select = document
        .select(&TERM_SELECT)
        .next()
        .ok_or(SocApiError::StructuralParse("term selector"))?;

    let mut terms = TermMap::new();
    for option in select.select(&OPTION) {
        let Some(code) = option.attr("value").filter(|v| !v.is_empty()) else {
            continue;
        };
        let label = option.text().collect::<String>();
        if label.is_empty() {
            continue;
        }
        terms.insert(code.trim().to_owned(), label.trim().to_owned());
    }

    debug!(count = terms.len(), "parsed terms from menu page");
    Ok(terms)
}

/// Extract the live `(name, value)` inputs of the schedule search form.
///
/// Inputs without both a `name` and a `value` attribute (unvalued checkboxes,
/// bare buttons) are skipped. Values are kept verbatim; hidden tokens may
/// depend on exact whitespace.
pub fn parse_form_inputs(html: &str) -> Result<Vec<FormField>, SocApiError> {
    let document = Html::parse_document(html);
    let form = document
        .select(&SEARCH_FORM)
        .next()
        .ok_or(SocApiError::StructuralParse("schedule search form"))?;
    let region = form
        .select(&SUB_REGION)
        .next()
        .ok_or(SocApiError::StructuralParse("form inputs section"))?;

    let fields: Vec<FormField> = region
        .select(&INPUT)
        .filter_map(|input| match (input.attr("name"), input.attr("value")) {
            (Some(name), Some(value)) => Some(FormField::new(name, value)),
            _ => None,
        })
        .collect();

    debug!(count = fields.len(), "parsed search form inputs");
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERMS_HTML: &str = r#"
        <html><body>
          <select id="selectedTerm" name="selectedTerm">
            <option value="FA25">Fall 2025</option>
            <option value="WI25"> Winter 2025 </option>
            <option value="">Choose a term</option>
            <option>No value</option>
            <option value="SP25"></option>
          </select>
        </body></html>"#;

    #[test]
    fn test_parse_terms_trims_and_skips() {
        let terms = parse_terms(TERMS_HTML).unwrap();
        assert_eq!(
            terms.iter().collect::<Vec<_>>(),
            vec![
                (&"FA25".to_owned(), &"Fall 2025".to_owned()),
                (&"WI25".to_owned(), &"Winter 2025".to_owned()),
            ]
        );
    }

    #[test]
    fn test_parse_terms_duplicate_code_last_wins() {
        let html = r#"
            <select id="selectedTerm">
              <option value="FA25">Fall 2025</option>
              <option value="SP25">Spring 2025</option>
              <option value=" FA25 ">Fall Quarter 2025</option>
            </select>"#;
        let terms = parse_terms(html).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms.get_index(0).unwrap().0, "FA25");
        assert_eq!(terms["FA25"], "Fall Quarter 2025");
    }

    #[test]
    fn test_parse_terms_missing_selector() {
        let html = r#"<select id="otherDropdown"><option value="FA25">Fall 2025</option></select>"#;
        let err = parse_terms(html).unwrap_err();
        assert!(matches!(err, SocApiError::StructuralParse("term selector")));
    }

    #[test]
    fn test_parse_terms_empty_selector_is_not_an_error() {
        let terms = parse_terms(r#"<select id="selectedTerm"></select>"#).unwrap();
        assert!(terms.is_empty());
    }

    const FORM_HTML: &str = r#"
        <html><body>
          <form id="socFacSearch" method="post">
            <div id="tabs-dept">
              <input type="hidden" name="selectedDepartments" value="CSE">
            </div>
            <div id="tabs-sub">
              <input type="hidden" name="tabNum" value="tabs-sub">
              <input type="hidden" name="token" value=" a1b2 ">
              <input type="checkbox" name="schedOption1">
              <input type="submit" value="Search">
              <div><input type="checkbox" name="schedOption2" value="true" checked></div>
              <input type="hidden" name="_schedOption2" value="on">
            </div>
          </form>
        </body></html>"#;

    #[test]
    fn test_parse_form_inputs_scoped_to_sub_region() {
        let fields = parse_form_inputs(FORM_HTML).unwrap();
        assert_eq!(
            fields,
            vec![
                FormField::new("tabNum", "tabs-sub"),
                FormField::new("token", " a1b2 "),
                FormField::new("schedOption2", "true"),
                FormField::new("_schedOption2", "on"),
            ]
        );
    }

    #[test]
    fn test_parse_form_inputs_keeps_empty_values() {
        let html = r#"
            <form id="socFacSearch"><div id="tabs-sub">
              <input name="courses" value="">
            </div></form>"#;
        let fields = parse_form_inputs(html).unwrap();
        assert_eq!(fields, vec![FormField::new("courses", "")]);
    }

    #[test]
    fn test_parse_form_inputs_missing_form() {
        let html = r#"<form id="otherForm"><div id="tabs-sub"></div></form>"#;
        let err = parse_form_inputs(html).unwrap_err();
        assert!(matches!(err, SocApiError::StructuralParse("schedule search form")));
    }

    #[test]
    fn test_parse_form_inputs_missing_sub_region() {
        let html = r#"
            <form id="socFacSearch"><div id="tabs-dept"></div></form>
            <div id="tabs-sub"><input name="outside" value="1"></div>"#;
        let err = parse_form_inputs(html).unwrap_err();
        assert!(matches!(err, SocApiError::StructuralParse("form inputs section")));
    }
}
