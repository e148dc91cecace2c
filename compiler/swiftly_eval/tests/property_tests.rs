//! Property-based tests for scoping, sequences and arithmetic.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use swiftly_eval::{
    buffer_handler, dispatch_builtin_method, evaluate_binary, AssignError, Environment,
    EvalErrorKind, Interpreter, Value,
};
use swiftly_ir::{BinaryOp, Node, Program};

/// Identifiers that never collide with the fixed names used below.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,12}")
        .unwrap()
        .prop_filter("reserved", |s| s != "print")
}

fn whole_number() -> impl Strategy<Value = f64> {
    (-1000i32..1000).prop_map(f64::from)
}

proptest! {
    #[test]
    fn undeclared_lookup_fails_and_declare_binds(name in identifier_strategy(), n in whole_number()) {
        let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
        let program = Program { items: vec![Node::Ident(name.clone())] };
        let err = interp.run(&program).unwrap_err();
        prop_assert_eq!(err.kind, EvalErrorKind::UndefinedVariable { name: name.clone() });

        interp.env_mut().declare(name.as_str(), Value::Number(n));
        prop_assert_eq!(interp.run(&program).unwrap(), Value::Number(n));
    }

    #[test]
    fn assign_mutates_only_the_nearest_frame(name in identifier_strategy(), outer in whole_number(), inner in whole_number()) {
        let mut env = Environment::new();
        prop_assert_eq!(env.assign(&name, Value::Null), Err(AssignError::Undefined));

        env.declare(name.as_str(), Value::Number(outer));
        env.push_frame();
        env.declare(name.as_str(), Value::Number(0.0));
        env.assign(&name, Value::Number(inner)).unwrap();
        prop_assert_eq!(env.lookup(&name), Some(Value::Number(inner)));
        env.pop_frame();
        prop_assert_eq!(env.lookup(&name), Some(Value::Number(outer)));
    }

    #[test]
    fn frame_depth_is_restored(pushes in 0usize..16) {
        let mut env = Environment::new();
        for _ in 0..pushes {
            env.push_frame();
        }
        prop_assert_eq!(env.depth(), pushes + 1);
        for _ in 0..pushes + 3 {
            env.pop_frame();
        }
        prop_assert_eq!(env.depth(), 1);
    }

    #[test]
    fn size_after_pushes_and_pops(items in prop::collection::vec(whole_number(), 0..32), pops in 0usize..32) {
        let pops = pops.min(items.len());
        let xs = Value::sequence(vec![]);
        for item in &items {
            dispatch_builtin_method(&xs, "push", vec![Value::Number(*item)]).unwrap();
        }
        for expected in items.iter().rev().take(pops) {
            let popped = dispatch_builtin_method(&xs, "pop", vec![]).unwrap();
            prop_assert_eq!(popped, Value::Number(*expected));
        }
        let size = dispatch_builtin_method(&xs, "size", vec![]).unwrap();
        #[allow(clippy::cast_precision_loss, reason = "small test sizes")]
        let expected = (items.len() - pops) as f64;
        prop_assert_eq!(size, Value::Number(expected));
    }

    #[test]
    fn division_is_not_truncated(a in whole_number(), b in whole_number()) {
        prop_assume!(b != 0.0);
        let result = evaluate_binary(Value::Number(a), Value::Number(b), BinaryOp::Div).unwrap();
        prop_assert_eq!(result, Value::Number(a / b));
    }
}
