//! Integration tests for compiling and expanding templates

use json_template::{expand, CompileError, RenderError, Template, TemplateOptions, Value};
use pretty_assertions::assert_eq;

fn data(json: &str) -> Value {
    Value::from(serde_json::from_str::<serde_json::Value>(json).expect("valid JSON"))
}

#[test]
fn test_text_without_directives_is_unchanged() {
    let input = "Plain text\nwith lines, commas, and : | characters.\n";
    assert_eq!(expand(input, &Value::Null).unwrap(), input);
}

#[test]
fn test_same_source_compiles_to_equivalent_programs() {
    let source = "{.section user}{name}{.or}anonymous{.end}";
    let first = Template::new(source).unwrap();
    let second = Template::new(source).unwrap();

    for input in [r#"{"user": {"name": "ann"}}"#, r#"{"user": null}"#, "{}"] {
        let d = data(input);
        assert_eq!(first.expand(&d).unwrap(), second.expand(&d).unwrap());
    }
}

#[test]
fn test_balanced_nesting_compiles() {
    let source = "{.section a}{.repeated section b}{.section c}x{.end}{.end}{.end}";
    assert!(Template::new(source).is_ok());
}

#[test]
fn test_unbalanced_nesting_fails() {
    for source in [
        "{.section a}",
        "{.section a}{.repeated section b}{.end}",
        "{.end}",
        "{.section a}{.end}{.end}",
    ] {
        let err = Template::new(source).unwrap_err();
        assert!(
            matches!(err, CompileError::Syntax { .. }),
            "{source} should fail with a syntax error"
        );
    }
}

#[test]
fn test_deeply_nested_template_compiles_expands_and_drops() {
    let depth = 10_000;
    let source = format!("{}x{}", "{.section a}".repeat(depth), "{.end}".repeat(depth));
    let template = Template::new(&source).unwrap();
    assert_eq!(template.expand(&data("{}")).unwrap(), "");
    drop(template);
}

#[test]
fn test_words_after_section_name_ignored() {
    let template = Template::new("{.section a extra}{b}{.or}none{.end}").unwrap();
    assert_eq!(template.expand(&data(r#"{"a": {"b": "x"}}"#)).unwrap(), "x");
    assert_eq!(template.expand(&data("{}")).unwrap(), "none");
}

#[test]
fn test_section_truthiness() {
    let template = Template::new("{.section x}A{.or}B{.end}").unwrap();
    assert_eq!(template.expand(&data(r#"{"x": []}"#)).unwrap(), "B");
    assert_eq!(template.expand(&data(r#"{"x": [1]}"#)).unwrap(), "A");
}

#[test]
fn test_repeated_section_separators() {
    let template = Template::new("{.repeated section x}{@}{.alternates with},{.end}").unwrap();
    assert_eq!(template.expand(&data(r#"{"x": [1, 2, 3]}"#)).unwrap(), "1,2,3");
}

#[test]
fn test_dynamic_scoping() {
    let template = Template::new("{.section a}{.section b}{x}{.end}{.end}").unwrap();
    let out = template
        .expand(&data(r#"{"a": {"b": {}, "x": "outer"}}"#))
        .unwrap();
    assert_eq!(out, "outer");
}

#[test]
fn test_undefined_lookup() {
    let template = Template::new("{missing}").unwrap();
    let err = template.expand(&data("{}")).unwrap_err();
    assert!(matches!(err, RenderError::UndefinedVariable { ref name } if name == "missing"));
}

#[test]
fn test_formatter_pipeline() {
    let template = Template::new("{x|html}").unwrap();
    assert_eq!(template.expand(&data(r#"{"x": "<b>"}"#)).unwrap(), "&lt;b&gt;");

    // html then htmltag: the & from the first pass is escaped again
    let template = Template::new("{x|html|htmltag}").unwrap();
    assert_eq!(
        template.expand(&data(r#"{"x": "<\"b\">"}"#)).unwrap(),
        "&amp;lt;&quot;b&quot;&amp;gt;"
    );
}

#[test]
fn test_cursor_over_bare_list() {
    let template = Template::new("{.repeated section @}{@}{.end}").unwrap();
    assert_eq!(template.expand(&data("[1, 2, 3]")).unwrap(), "123");
}

#[test]
fn test_custom_delimiters_and_format_char() {
    let options = TemplateOptions::new().with_meta("[[]]").with_format_char(':');
    let template = Template::with_options("{literal} [[x:html]] [[.meta-left]]", &options).unwrap();
    assert_eq!(
        template.expand(&data(r#"{"x": "&"}"#)).unwrap(),
        "{literal} &amp; [["
    );
}

#[test]
fn test_configuration_errors() {
    let err = Template::with_options("x", &TemplateOptions::new().with_format_char('#')).unwrap_err();
    assert_eq!(err.kind(), "ConfigurationError");

    let err = Template::with_options("x", &TemplateOptions::new().with_meta("<%>")).unwrap_err();
    assert_eq!(err.kind(), "ConfigurationError");
}

#[test]
fn test_explicit_formatters_required() {
    let options = TemplateOptions::new().without_default_formatter();
    let err = Template::with_options("{x}", &options).unwrap_err();
    assert!(matches!(err, CompileError::MissingFormatter { .. }));

    let template = Template::with_options("{x|raw}", &options).unwrap();
    assert_eq!(template.expand(&data(r#"{"x": "<"}"#)).unwrap(), "<");
}

#[test]
fn test_default_formatter_option() {
    let options = TemplateOptions::new().with_default_formatter("html");
    let template = Template::with_options("{x}", &options).unwrap();
    assert_eq!(template.expand(&data(r#"{"x": "a&b"}"#)).unwrap(), "a&amp;b");
}

#[test]
fn test_bad_formatter() {
    let err = Template::new("{x|bogus}").unwrap_err();
    assert_eq!(err.kind(), "BadFormatter");
    assert_eq!(err.to_string(), "bogus is not a valid formatter");
}

#[test]
fn test_more_formatters_override_builtins() {
    let options = TemplateOptions::new()
        .with_formatter("html", json_template::formatter(|v| format!("[{}]", v)));
    let template = Template::with_options("{x|html}", &options).unwrap();
    assert_eq!(template.expand(&data(r#"{"x": "<"}"#)).unwrap(), "[<]");

    // Built-in table is untouched for other templates
    let template = Template::new("{x|html}").unwrap();
    assert_eq!(template.expand(&data(r#"{"x": "<"}"#)).unwrap(), "&lt;");
}

#[test]
fn test_comments_and_space() {
    let out = expand("a{# note}{.space}b", &Value::Null).unwrap();
    assert_eq!(out, "a b");
}

#[test]
fn test_concurrent_renders_share_program() {
    let template = Template::new("{.repeated section n}{@}{.end}").unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let template = &template;
                scope.spawn(move || {
                    let d = Value::from_serialize(&serde_json::json!({ "n": [i, i] })).unwrap();
                    template.expand(&d).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("{i}{i}"));
        }
    });
}
