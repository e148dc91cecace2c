use super::*;
use crate::errors::{undefined_variable, ControlAction};

#[test]
fn test_scoped_interpreter_drops_on_normal_exit() {
    let mut interp = Interpreter::new();

    // Start with the global frame only
    assert_eq!(interp.env.depth(), 1);

    {
        let scoped = interp.scoped();
        assert_eq!(scoped.env.depth(), 2);
    }

    assert_eq!(interp.env.depth(), 1);
}

#[test]
fn test_scoped_interpreter_drops_on_panic() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let mut interp = Interpreter::new();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let scoped = interp.scoped();
        assert_eq!(scoped.env.depth(), 2);
        panic!("test panic");
    }));

    assert!(result.is_err());
    assert_eq!(interp.env.depth(), 1);
}

#[test]
fn test_scoped_interpreter_drops_on_nested_panic() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let mut interp = Interpreter::new();

    let result = catch_unwind(AssertUnwindSafe(|| {
        interp.with_env_scope(|scoped1| {
            assert_eq!(scoped1.env.depth(), 2);
            scoped1.with_env_scope(|scoped2| {
                assert_eq!(scoped2.env.depth(), 3);
                scoped2.with_env_scope(|_| {
                    panic!("deep panic");
                });
            });
        });
    }));

    assert!(result.is_err());
    assert_eq!(interp.env.depth(), 1);
}

#[test]
fn test_with_env_scope_closure() {
    let mut interp = Interpreter::new();

    let result = interp.with_env_scope(|scoped| {
        scoped.env.declare("x", Value::Number(42.0));
        scoped.env.lookup("x")
    });

    assert_eq!(result, Some(Value::Number(42.0)));
    // Binding was local to the popped frame
    assert_eq!(interp.env.lookup("x"), None);
}

#[test]
fn test_with_bindings_sees_globals() {
    let mut interp = Interpreter::new();
    interp.env.declare("g", Value::Number(1.0));

    let bindings = vec![("a".to_string(), Value::Number(2.0))];
    let (a, g) = interp.with_bindings(bindings, |scoped| {
        (scoped.env.lookup("a"), scoped.env.lookup("g"))
    });

    assert_eq!(a, Some(Value::Number(2.0)));
    assert_eq!(g, Some(Value::Number(1.0)));
    assert_eq!(interp.env.lookup("a"), None);
}

#[test]
fn test_frame_popped_on_error_and_raise() {
    let mut interp = Interpreter::new();

    let err: Result<(), ControlAction> =
        interp.with_env_scope(|_| Err(undefined_variable("x").into()));
    assert!(err.is_err());
    assert_eq!(interp.env.depth(), 1);

    let raised: Result<(), ControlAction> =
        interp.with_env_scope(|_| Err(ControlAction::Raise(Value::string("boom"))));
    assert!(raised.is_err());
    assert_eq!(interp.env.depth(), 1);
}
