//! The failure taxonomy, matched against rendered diagnostics the way the
//! compiler's callers see them.

use tracecfg::trace_config_txt_to_pb;

fn compile_err(input: &str) -> String {
    trace_config_txt_to_pb(input)
        .expect_err("compile should fail")
        .to_string()
}

#[test]
fn test_unknown_field() {
    let msg = compile_err(
        "
        not_a_label: false
        ",
    );
    assert!(
        msg.contains("No field named \"not_a_label\" in proto TraceConfig"),
        "got: {msg}"
    );
}

#[test]
fn test_unknown_nested_field() {
    let msg = compile_err(
        "
        data_sources {
            config {
                not_a_field_name {
                }
            }
        }
        ",
    );
    assert!(
        msg.contains("No field named \"not_a_field_name\" in proto DataSourceConfig"),
        "got: {msg}"
    );
}

#[test]
fn test_bad_boolean() {
    let msg = compile_err(
        "
        write_into_file: foo;
        ",
    );
    assert!(
        msg.contains(
            "Expected 'true' or 'false' for boolean field write_into_file \
             in proto TraceConfig instead saw 'foo'"
        ),
        "got: {msg}"
    );
}

#[test]
fn test_missing_boolean() {
    let msg = compile_err(
        "
        write_into_file:
        ",
    );
    assert!(msg.contains("Unexpected end of input"), "got: {msg}");
}

#[test]
fn test_root_proto_must_not_end_with_brace() {
    let msg = compile_err("  }");
    assert!(msg.contains("Unmatched closing brace"), "got: {msg}");
}

#[test]
fn test_saw_non_repeated_field_twice() {
    let msg = compile_err(
        "
        write_into_file: true;
        write_into_file: true;
        ",
    );
    assert!(
        msg.contains("Saw non-repeating field 'write_into_file' more than once"),
        "got: {msg}"
    );
}

#[test]
fn test_duplicate_only_applies_at_same_nesting_level() {
    // The same field name in two sibling messages is not a duplicate.
    let result = trace_config_txt_to_pb(
        "
        buffers: { size_kb: 1 }
        buffers: { size_kb: 2 }
        ",
    );
    assert!(result.is_ok());
}

#[test]
fn test_wrong_type_boolean() {
    let msg = compile_err(
        "
        duration_ms: true;
        ",
    );
    assert!(
        msg.contains(
            "Expected value of type uint32 for field duration_ms in \
             proto TraceConfig instead saw 'true'"
        ),
        "got: {msg}"
    );
}

#[test]
fn test_wrong_type_number() {
    let msg = compile_err(
        "
        buffers: 100;
        ",
    );
    assert!(
        msg.contains(
            "Expected value of type message for field buffers in \
             proto TraceConfig instead saw '100'"
        ),
        "got: {msg}"
    );
}

#[test]
fn test_wrong_type_string() {
    let msg = compile_err(r#"duration_ms: "abc""#);
    assert!(
        msg.contains(
            "Expected value of type uint32 for field duration_ms in \
             proto TraceConfig instead saw 'abc'"
        ),
        "got: {msg}"
    );
}

#[test]
fn test_brace_on_scalar_field() {
    let msg = compile_err("duration_ms: {");
    assert!(
        msg.contains(
            "Expected value of type uint32 for field duration_ms in \
             proto TraceConfig instead saw '{'"
        ),
        "got: {msg}"
    );
}

#[test]
fn test_nested_message_did_not_terminate() {
    let msg = compile_err(
        "
        buffers: {
        ",
    );
    assert!(msg.contains("Nested message not closed"), "got: {msg}");
}

#[test]
fn test_bad_escape() {
    let msg = compile_err(
        r#"
        data_sources {
            config {
                ftrace_config {
                    ftrace_events: "\p"
                }
            }
        }"#,
    );
    assert!(
        msg.contains("Unknown string escape in ftrace_events in proto FtraceConfig: '\\p'"),
        "got: {msg}"
    );
}

#[test]
fn test_bad_enum_value() {
    let msg = compile_err("compression_type: FOO");
    assert!(
        msg.contains("Unexpected value 'FOO' for enum field compression_type in proto TraceConfig"),
        "got: {msg}"
    );
}

#[test]
fn test_unexpected_bracket() {
    let msg = compile_err("{");
    assert!(msg.contains("Unexpected character '{'"), "got: {msg}");
}

#[test]
fn test_unknown_nested() {
    let msg = compile_err("foo {}; bar: 42");
    assert!(
        msg.contains("No field named \"foo\" in proto TraceConfig"),
        "got: {msg}"
    );
}

#[test]
fn test_number_on_enum_field() {
    let msg = compile_err("compression_type: 1");
    assert!(
        msg.contains("Unexpected value '1' for enum field compression_type in proto TraceConfig"),
        "got: {msg}"
    );
}

#[test]
fn test_unterminated_string() {
    let msg = compile_err(r#"data_sources { config { name: "linux"#);
    assert!(msg.contains("Unexpected end of input"), "got: {msg}");
}

#[test]
fn test_diagnostics_carry_position() {
    let err = trace_config_txt_to_pb("\n    not_a_label: false").expect_err("should fail");
    assert_eq!((err.line, err.column), (2, 5));
    assert!(err.to_string().starts_with("2:5 error: "));
}

#[test]
fn test_failure_returns_no_partial_bytes() {
    // Valid leading fields do not leak out of a failing compile.
    let result = trace_config_txt_to_pb("duration_ms: 1234 not_a_label: false");
    assert!(result.is_err());
}
