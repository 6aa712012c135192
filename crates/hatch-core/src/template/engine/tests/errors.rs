//! Error handling tests for template engine

use super::helpers::{runtime_context, simple_context};
use super::*;

fn assert_malformed(template: &str, expected_line: usize) {
    for context in [TemplateContext::empty(), runtime_context("nodejs6.11")] {
        match render(template, &context) {
            Err(TemplateError::MalformedTemplate { line, .. }) => {
                assert_eq!(line, expected_line, "template {:?}", template)
            }
            other => panic!("Expected MalformedTemplate for {:?}, got {:?}", template, other),
        }
    }
}

#[test]
fn test_error_undefined_placeholder() {
    let result = render("Value:\n{{nonexistent}}", &simple_context());
    match result {
        Err(TemplateError::UndefinedVariable { key, line }) => {
            assert_eq!(key, "nonexistent");
            assert_eq!(line, 2);
        }
        _ => panic!("Expected UndefinedVariable error"),
    }
}

#[test]
fn test_error_undefined_predicate_variable() {
    let template = "{% if cookiecutter.runtime == 'nodejs6.11' %}a{% endif %}";
    let result = render(template, &simple_context());
    assert_eq!(
        result,
        Err(TemplateError::UndefinedVariable {
            key: "cookiecutter.runtime".to_string(),
            line: 1,
        })
    );
}

#[test]
fn test_error_undefined_in_unselected_branch() {
    // Every referenced variable must be supplied, not only those on the taken path
    let template = "{% if cookiecutter.runtime == 'nodejs8.10' %}ok{% else %}{{ cookiecutter.missing }}{% endif %}";
    let result = render(template, &runtime_context("nodejs8.10"));
    assert!(matches!(
        result,
        Err(TemplateError::UndefinedVariable { ref key, .. }) if key == "cookiecutter.missing"
    ));
}

#[test]
fn test_error_undefined_short_circuited_operand() {
    let template = "{% if cookiecutter.runtime == 'nodejs8.10' or other == 'x' %}ok{% endif %}";
    let result = render(template, &runtime_context("nodejs8.10"));
    assert!(matches!(
        result,
        Err(TemplateError::UndefinedVariable { ref key, .. }) if key == "other"
    ));
}

#[test]
fn test_error_unclosed_if() {
    assert_malformed("a\n{% if cookiecutter.runtime == 'x' %}\nb", 2);
}

#[test]
fn test_error_unclosed_if_reports_innermost() {
    assert_malformed("{% if a %}\n{% if b %}\n{% endif %}\n{% if c %}{% elif d %}", 4);
}

#[test]
fn test_error_endif_without_if() {
    assert_malformed("a\n\n{% endif %}", 3);
}

#[test]
fn test_error_else_without_if() {
    assert_malformed("{% else %}", 1);
}

#[test]
fn test_error_elif_without_if() {
    assert_malformed("{% elif a %}", 1);
}

#[test]
fn test_error_duplicate_else() {
    assert_malformed("{% if a %}1{% else %}2\n{% else %}3{% endif %}", 2);
}

#[test]
fn test_error_elif_after_else() {
    assert_malformed("{% if a %}1{% else %}2{% elif b %}3{% endif %}", 1);
}

#[test]
fn test_error_extra_endif() {
    assert_malformed("{% if a %}1{% endif %}{% endif %}", 1);
}

#[test]
fn test_error_unknown_tag() {
    assert_malformed("{% for x in xs %}{% endfor %}", 1);
}

#[test]
fn test_error_if_without_predicate() {
    assert_malformed("{% if %}x{% endif %}", 1);
}

#[test]
fn test_error_else_with_arguments() {
    assert_malformed("{% if a %}x{% else b %}y{% endif %}", 1);
}

#[test]
fn test_error_unclosed_markers() {
    assert_malformed("Value: {{title", 1);
    assert_malformed("x\n{% if a", 2);
    assert_malformed("{# comment", 1);
}

#[test]
fn test_error_unclosed_raw() {
    assert_malformed("{% raw %}{{ x }}", 1);
}

#[test]
fn test_error_endraw_without_raw() {
    assert_malformed("{% endraw %}", 1);
}

#[test]
fn test_error_invalid_placeholder() {
    assert_malformed("{{ }}", 1);
    assert_malformed("{{ name | upper }}", 1);
}

#[test]
fn test_error_stray_brace_in_placeholder() {
    assert_malformed("{{{a}}}", 1);
    assert_malformed("x\n{{ a}b }}", 2);
}

#[test]
fn test_error_quoted_boolean_condition() {
    assert_malformed("{% if 'true' %}T{% endif %}", 1);
}

#[test]
fn test_error_table_in_placeholder() {
    let result = render("{{ cookiecutter }}", &runtime_context("nodejs8.10"));
    assert_eq!(
        result,
        Err(TemplateError::NonScalarValue {
            key: "cookiecutter".to_string(),
            line: 1,
        })
    );
}

#[test]
fn test_error_array_in_comparison() {
    let template = "{% if cookiecutter.handlers == 'x' %}{% endif %}";
    let result = render(template, &runtime_context("nodejs8.10"));
    assert!(matches!(result, Err(TemplateError::NonScalarValue { .. })));
}

#[test]
fn test_array_truthiness_is_allowed() {
    let template = "{% if cookiecutter.handlers %}has handlers{% endif %}";
    let result = render(template, &runtime_context("nodejs8.10")).unwrap();
    assert_eq!(result, "has handlers");
}

#[test]
fn test_error_display() {
    let undefined = TemplateError::UndefinedVariable {
        key: "cookiecutter.runtime".to_string(),
        line: 3,
    };
    assert_eq!(
        undefined.to_string(),
        "Undefined variable 'cookiecutter.runtime' at line 3"
    );
    assert_eq!(undefined.line(), 3);

    let malformed = TemplateError::MalformedTemplate {
        message: "{% endif %} without matching {% if %}".to_string(),
        line: 9,
    };
    assert_eq!(
        malformed.to_string(),
        "Malformed template at line 9: {% endif %} without matching {% if %}"
    );
}
