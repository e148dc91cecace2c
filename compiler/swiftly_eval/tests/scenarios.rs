//! End-to-end programs: parser JSON in, printed output and program value out.
//!
//! Each program is written the way the external transformer emits it, so
//! these also cover the decoder's aliases.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use swiftly_eval::{buffer_handler, EvalErrorKind, Interpreter, Value};

struct Outcome {
    value: Result<Value, swiftly_eval::EvalError>,
    output: String,
}

fn run(json: &str) -> Outcome {
    let program = swiftly_ir::parse_program(json).unwrap();
    let handler = buffer_handler();
    let mut interp = Interpreter::builder()
        .print_handler(handler.clone())
        .build();
    let value = interp.run(&program);
    assert_eq!(interp.env().depth(), 1, "frames left on the stack");
    assert_eq!(interp.call_depth(), 0, "calls left on the stack");
    Outcome {
        value,
        output: handler.get_output(),
    }
}

#[test]
fn increment_a_variable() {
    let outcome = run(r#"[
        {"kind": "variable_decl", "name": "x", "value": {"kind": "number", "value": 0}},
        {"kind": "assignment", "name": "x", "value": {
            "kind": "add",
            "left": {"kind": "var", "name": "x"},
            "right": {"kind": "number", "value": 1}
        }},
        {"kind": "var", "name": "x"}
    ]"#);
    assert_eq!(outcome.value.unwrap(), Value::Number(1.0));
}

#[test]
fn counter_class() {
    let outcome = run(r#"[
        {"kind": "class_decl", "name": "Counter", "body": [
            {"kind": "function_decl", "name": "init", "params": ["self"], "body": [
                {"kind": "assignment",
                 "target": {"kind": "member_access", "object": {"kind": "var", "name": "self"}, "member": "n"},
                 "value": {"kind": "number", "value": 0}}
            ]},
            {"kind": "function_decl", "name": "inc", "params": ["self"], "body": [
                {"kind": "assignment",
                 "target": {"kind": "member_access", "object": {"kind": "var", "name": "self"}, "member": "n"},
                 "value": {"kind": "binary_op", "op": "+",
                           "left": {"kind": "member_access", "object": {"kind": "var", "name": "self"}, "member": "n"},
                           "right": {"kind": "number", "value": 1}}}
            ]}
        ]},
        {"kind": "variable_decl", "name": "c", "value": {"kind": "new_instance", "class_name": "Counter", "args": []}},
        {"kind": "method_call", "object": {"kind": "var", "name": "c"}, "method": "inc", "args": []},
        {"kind": "method_call", "object": {"kind": "var", "name": "c"}, "method": "inc", "args": []},
        {"kind": "function_call", "name": "print", "args": [
            {"kind": "member_access", "object": {"kind": "var", "name": "c"}, "member": "n"}
        ]},
        {"kind": "member_access", "object": {"kind": "var", "name": "c"}, "member": "n"}
    ]"#);
    assert_eq!(outcome.value.unwrap(), Value::Number(2.0));
    assert_eq!(outcome.output, "2\n");
}

#[test]
fn set_operations() {
    let outcome = run(r#"[
        {"kind": "variable_decl", "name": "s", "value": {"kind": "set_literal", "elements": [
            {"kind": "number", "value": 1}, {"kind": "number", "value": 2}
        ]}},
        {"kind": "method_call", "object": {"kind": "var", "name": "s"}, "method": "add",
         "args": [{"kind": "number", "value": 3}]},
        {"kind": "function_call", "name": "print", "args": [
            {"kind": "method_call", "object": {"kind": "var", "name": "s"}, "method": "contains",
             "args": [{"kind": "number", "value": 3}]},
            {"kind": "method_call", "object": {"kind": "var", "name": "s"}, "method": "size", "args": []},
            {"kind": "var", "name": "s"}
        ]}
    ]"#);
    assert_eq!(outcome.output, "true 3 {1, 2, 3}\n");
}

#[test]
fn mapping_lookups() {
    let outcome = run(r#"[
        {"kind": "variable_decl", "name": "m", "value": {"kind": "dict_literal", "pairs": [
            {"key": {"kind": "string", "value": "a"}, "value": {"kind": "number", "value": 1}}
        ]}},
        {"kind": "function_call", "name": "print", "args": [
            {"kind": "method_call", "object": {"kind": "var", "name": "m"}, "method": "get",
             "args": [{"kind": "string", "value": "b"}]},
            {"kind": "method_call", "object": {"kind": "var", "name": "m"}, "method": "has_key",
             "args": [{"kind": "string", "value": "a"}]},
            {"kind": "var", "name": "m"}
        ]}
    ]"#);
    assert_eq!(outcome.output, "null true {\"a\": 1}\n");
}

#[test]
fn try_catches_a_raise_and_continues() {
    let outcome = run(r#"[
        {"kind": "try",
         "try_block": [{"kind": "raise", "value": {"kind": "string", "value": "fail"}}],
         "error_var": "e",
         "catch_block": [{"kind": "function_call", "name": "print", "args": [{"kind": "var", "name": "e"}]}]},
        {"kind": "function_call", "name": "print", "args": [{"kind": "string", "value": "done"}]}
    ]"#);
    assert_eq!(outcome.value.unwrap(), Value::Null);
    assert_eq!(outcome.output, "fail\ndone\n");
}

#[test]
fn while_loop_prints_in_order() {
    let outcome = run(r#"[
        {"kind": "variable_decl", "name": "i", "value": {"kind": "number", "value": 0}},
        {"kind": "while", "condition": {"kind": "lt",
            "left": {"kind": "var", "name": "i"}, "right": {"kind": "number", "value": 3}},
         "body": [
            {"kind": "function_call", "name": "print", "args": [{"kind": "var", "name": "i"}]},
            {"kind": "assignment", "name": "i", "value": {"kind": "add",
                "left": {"kind": "var", "name": "i"}, "right": {"kind": "number", "value": 1}}}
         ]},
        {"kind": "var", "name": "i"}
    ]"#);
    assert_eq!(outcome.output, "0\n1\n2\n");
    assert_eq!(outcome.value.unwrap(), Value::Number(3.0));
}

#[test]
fn field_shadows_method() {
    let outcome = run(r#"[
        {"kind": "class_decl", "name": "Greeter", "body": [
            {"kind": "function_decl", "name": "greet", "params": ["self"], "body": [
                {"kind": "return_stmt", "value": {"kind": "string", "value": "hello"}}
            ]}
        ]},
        {"kind": "variable_decl", "name": "g", "value": {"kind": "new_instance", "class_name": "Greeter"}},
        {"kind": "function_call", "name": "print", "args": [
            {"kind": "method_call", "object": {"kind": "var", "name": "g"}, "method": "greet", "args": []}
        ]},
        {"kind": "assignment",
         "target": {"kind": "member_access", "object": {"kind": "var", "name": "g"}, "member": "greet"},
         "value": {"kind": "string", "value": "hi"}},
        {"kind": "member_access", "object": {"kind": "var", "name": "g"}, "member": "greet"}
    ]"#);
    assert_eq!(outcome.output, "hello\n");
    assert_eq!(outcome.value.unwrap(), Value::from("hi"));
}

#[test]
fn division_keeps_fractions() {
    let outcome = run(r#"[
        {"kind": "div", "left": {"kind": "number", "value": 7}, "right": {"kind": "number", "value": 2}}
    ]"#);
    assert_eq!(outcome.value.unwrap(), Value::Number(3.5));
}

#[test]
fn recursive_function() {
    let outcome = run(r#"[
        {"kind": "function_decl", "name": "fact", "params": ["n"], "body": [
            {"kind": "if_stmt",
             "condition": {"kind": "le", "left": {"kind": "var", "name": "n"}, "right": {"kind": "number", "value": 1}},
             "then": [{"kind": "return_stmt", "value": {"kind": "number", "value": 1}}]},
            {"kind": "return_stmt", "value": {"kind": "mul",
                "left": {"kind": "var", "name": "n"},
                "right": {"kind": "function_call", "name": "fact", "args": [
                    {"kind": "sub", "left": {"kind": "var", "name": "n"}, "right": {"kind": "number", "value": 1}}
                ]}}}
        ]},
        {"kind": "function_call", "name": "fact", "args": [{"kind": "number", "value": 10}]}
    ]"#);
    assert_eq!(outcome.value.unwrap(), Value::Number(3_628_800.0));
}

#[test]
fn error_inside_method_leaves_frames_balanced() {
    let outcome = run(r#"[
        {"kind": "class_decl", "name": "Box", "body": [
            {"kind": "function_decl", "name": "open", "params": ["self"], "body": [
                {"kind": "var", "name": "missing"}
            ]}
        ]},
        {"kind": "method_call", "object": {"kind": "new_instance", "class_name": "Box"}, "method": "open", "args": []}
    ]"#);
    let err = outcome.value.unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "missing".to_string()
        }
    );
    assert_eq!(
        err.backtrace.map(|bt| bt.frames().to_vec()),
        Some(vec!["Box.open".to_string()])
    );
}

#[test]
fn uncaught_error_stops_the_program() {
    let outcome = run(r#"[
        {"kind": "function_call", "name": "print", "args": [{"kind": "string", "value": "before"}]},
        {"kind": "method_call", "object": {"kind": "array_literal", "elements": []}, "method": "pop", "args": []},
        {"kind": "function_call", "name": "print", "args": [{"kind": "string", "value": "after"}]}
    ]"#);
    assert_eq!(outcome.output, "before\n");
    assert_eq!(
        outcome.value.unwrap_err().message,
        "pop from empty sequence"
    );
}

#[test]
fn sequence_holding_itself_prints_and_compares() {
    let outcome = run(r#"[
        {"kind": "variable_decl", "name": "xs", "value": {"kind": "array_literal", "elements": []}},
        {"kind": "method_call", "object": {"kind": "var", "name": "xs"}, "method": "push",
         "args": [{"kind": "var", "name": "xs"}]},
        {"kind": "function_call", "name": "print", "args": [{"kind": "var", "name": "xs"}]},
        {"kind": "variable_decl", "name": "ys", "value": {"kind": "array_literal", "elements": []}},
        {"kind": "method_call", "object": {"kind": "var", "name": "ys"}, "method": "push",
         "args": [{"kind": "var", "name": "ys"}]},
        {"kind": "binary_op", "op": "==",
         "left": {"kind": "var", "name": "xs"}, "right": {"kind": "var", "name": "ys"}}
    ]"#);
    assert_eq!(outcome.output, "[[...]]\n");
    assert_eq!(outcome.value.unwrap(), Value::Bool(true));
}
