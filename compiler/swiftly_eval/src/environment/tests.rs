use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_scope_declare_lookup() {
    let mut scope = Scope::new();
    scope.declare("x", Value::Number(42.0));
    assert_eq!(scope.lookup("x"), Some(Value::Number(42.0)));
    assert_eq!(scope.lookup("y"), None);
}

#[test]
fn test_scope_shadowing() {
    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().declare("x", Value::Number(1.0));

    let mut child = Scope::with_parent(parent.clone());
    child.declare("x", Value::Number(2.0));

    // Child's binding shadows parent's
    assert_eq!(child.lookup("x"), Some(Value::Number(2.0)));
    assert_eq!(parent.borrow().lookup("x"), Some(Value::Number(1.0)));
}

#[test]
fn test_scope_redeclare_overwrites() {
    let mut scope = Scope::new();
    scope.declare("x", Value::Number(1.0));
    scope.declare("x", Value::string("one"));
    assert_eq!(scope.lookup("x"), Some(Value::string("one")));
}

#[test]
fn test_environment_push_pop() {
    let mut env = Environment::new();
    env.declare("x", Value::Number(1.0));

    env.push_frame();
    env.declare("x", Value::Number(2.0));
    assert_eq!(env.lookup("x"), Some(Value::Number(2.0)));

    env.pop_frame();
    assert_eq!(env.lookup("x"), Some(Value::Number(1.0)));
}

#[test]
fn test_environment_assign_mutates_nearest_binding() {
    let mut env = Environment::new();
    env.declare("x", Value::Number(1.0));

    env.push_frame();
    env.declare("x", Value::Number(10.0));
    assert!(env.assign("x", Value::Number(11.0)).is_ok());
    assert_eq!(env.lookup("x"), Some(Value::Number(11.0)));
    env.pop_frame();

    // The global binding was shadowed, so it is untouched
    assert_eq!(env.lookup("x"), Some(Value::Number(1.0)));
}

#[test]
fn test_environment_assign_reaches_global() {
    let mut env = Environment::new();
    env.declare("count", Value::Number(0.0));

    env.push_frame();
    assert!(env.assign("count", Value::Number(5.0)).is_ok());
    env.pop_frame();

    assert_eq!(env.lookup("count"), Some(Value::Number(5.0)));
}

#[test]
fn test_environment_assign_undefined() {
    let mut env = Environment::new();
    assert_eq!(
        env.assign("ghost", Value::Null),
        Err(AssignError::Undefined)
    );
    // Assignment never creates a binding
    assert_eq!(env.lookup("ghost"), None);
}

#[test]
fn test_call_frames_do_not_see_each_other() {
    let mut env = Environment::new();
    env.push_frame();
    env.declare("local", Value::Bool(true));

    // A nested call frame hangs off the global frame, not the caller's
    env.push_frame();
    assert_eq!(env.lookup("local"), None);
    env.pop_frame();

    assert_eq!(env.lookup("local"), Some(Value::Bool(true)));
    env.pop_frame();
    assert_eq!(env.lookup("local"), None);
}

#[test]
fn test_global_frame_is_never_popped() {
    let mut env = Environment::new();
    env.declare("x", Value::Null);
    env.pop_frame();
    env.pop_frame();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup("x"), Some(Value::Null));
}

#[test]
fn test_local_scope_clone() {
    let scope1 = LocalScope::new(42);
    let scope2 = scope1.clone();

    // Both point to the same allocation
    *scope1.borrow_mut() = 100;
    assert_eq!(*scope2.borrow(), 100);
}

#[test]
fn test_local_scope_deref() {
    let scope = LocalScope::new(42);
    // Deref returns &RefCell<T>
    let borrowed = scope.deref().borrow();
    assert_eq!(*borrowed, 42);
}
