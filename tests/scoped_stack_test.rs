//! Integration tests for `ScopedStack`
//!
//! These tests validate the generic cache-plus-stack contract:
//! - Memoization: one construction per key, ever
//! - First-load-is-default baseline seeding
//! - Stack restoration, including randomized push/pop sequences
//! - Explicit error on pop without a matching push
//! - Guard restoration on every exit path

use rand::Rng;
use stagehand::core::{ResourceLoader, ScopedStack, StackError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Loader whose "resources" are strings; counts constructions per key.
struct TestLoader {
    loads: Arc<AtomicUsize>,
}

impl ResourceLoader<(u8, u32)> for TestLoader {
    type Resource = String;

    fn load(&mut self, key: &(u8, u32)) -> String {
        self.loads.fetch_add(1, Ordering::SeqCst);
        format!("res-{}-{}", key.0, key.1)
    }

    fn activate(&mut self, _resource: &String) {}

    fn deactivate(&mut self) {}
}

fn test_stack() -> (ScopedStack<(u8, u32), TestLoader>, Arc<AtomicUsize>) {
    let loads = Arc::new(AtomicUsize::new(0));
    let loader = TestLoader {
        loads: Arc::clone(&loads),
    };
    (ScopedStack::new(loader), loads)
}

// ============================================================================
// MEMOIZATION
// ============================================================================

#[test]
fn preload_constructs_exactly_once() {
    let (stack, loads) = test_stack();
    stack.preload(&(0, 15));
    stack.preload(&(0, 15));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(stack.get(&(0, 15)).as_deref(), Some("res-0-15"));
}

#[test]
fn push_twice_constructs_exactly_once() {
    let (stack, loads) = test_stack();
    stack.push((1, 22));
    stack.push((1, 22));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(stack.loaded_count(), 1);
    assert_eq!(stack.get(&(1, 22)).as_deref(), Some("res-1-22"));
}

#[test]
fn distinct_keys_construct_distinct_resources() {
    let (stack, loads) = test_stack();
    stack.preload(&(0, 15));
    stack.preload(&(0, 22));
    stack.preload(&(1, 15));
    assert_eq!(loads.load(Ordering::SeqCst), 3);
    assert_eq!(stack.loaded_count(), 3);
}

// ============================================================================
// BASELINE SEEDING
// ============================================================================

#[test]
fn first_preloaded_key_is_current_before_any_push() {
    let (stack, _) = test_stack();
    stack.preload(&(3, 15));
    stack.preload(&(4, 15));
    assert_eq!(stack.current(), Some((3, 15)));
}

#[test]
fn first_pushed_key_seeds_the_baseline_too() {
    let (stack, _) = test_stack();
    stack.push((5, 15));
    // One baseline entry plus the pushed entry.
    assert_eq!(stack.depth(), 2);
    stack.pop().unwrap();
    assert_eq!(stack.current(), Some((5, 15)));
    // The baseline itself is permanent.
    assert_eq!(stack.pop(), Err(StackError::PopWithoutPush));
}

// ============================================================================
// STACK RESTORATION
// ============================================================================

#[test]
fn pop_restores_exactly_the_previous_top() {
    let (stack, _) = test_stack();
    stack.push((0, 15));
    stack.push((1, 22));
    stack.pop().unwrap();
    assert_eq!(stack.current(), Some((0, 15)));
}

#[test]
fn randomized_push_sequences_restore_in_order() {
    let (stack, _) = test_stack();
    let mut rng = rand::rng();

    // Seed a baseline so pops always have a floor.
    stack.preload(&(0, 0));

    let mut pushed: Vec<(u8, u32)> = Vec::new();
    for _ in 0..200 {
        if pushed.is_empty() || rng.random_range(0..3) > 0 {
            let key = (rng.random_range(0..4u8), rng.random_range(10..14u32));
            stack.push(key);
            pushed.push(key);
        } else {
            stack.pop().unwrap();
            pushed.pop();
            // After popping back to depth d, the top is whatever was
            // pushed at depth d (or the baseline when none remain).
            let expected = pushed.last().copied().unwrap_or((0, 0));
            assert_eq!(stack.current(), Some(expected));
        }
    }
    while pushed.pop().is_some() {
        stack.pop().unwrap();
    }
    assert_eq!(stack.current(), Some((0, 0)));
}

// ============================================================================
// USAGE ERRORS AND GUARDS
// ============================================================================

#[test]
fn pop_on_fresh_stack_is_an_error_not_undefined_behavior() {
    let (stack, _) = test_stack();
    assert_eq!(stack.pop(), Err(StackError::PopWithoutPush));
}

#[test]
fn guard_restores_on_normal_exit() {
    let (stack, _) = test_stack();
    stack.push((0, 15));
    {
        let _guard = stack.scoped((9, 30));
        assert_eq!(stack.current(), Some((9, 30)));
    }
    assert_eq!(stack.current(), Some((0, 15)));
}

#[test]
fn nested_guards_unwind_in_order() {
    let (stack, _) = test_stack();
    stack.push((0, 15));
    {
        let _outer = stack.scoped((1, 15));
        {
            let _inner = stack.scoped((2, 15));
            assert_eq!(stack.current(), Some((2, 15)));
        }
        assert_eq!(stack.current(), Some((1, 15)));
    }
    assert_eq!(stack.current(), Some((0, 15)));
}

#[test]
fn guard_restores_during_panic_unwind() {
    let (stack, _) = test_stack();
    stack.push((0, 15));
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = stack.scoped((7, 7));
        panic!("draw call failed");
    }));
    assert!(result.is_err());
    assert_eq!(stack.current(), Some((0, 15)));
}
