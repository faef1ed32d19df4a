//! Generic memoizing resource cache with push/pop scope stacking.
//!
//! A [`ScopedStack`] lazily materializes a resource from a key on first
//! reference, memoizes it for the lifetime of the stack (entries are never
//! evicted), and maintains an ordered stack of "currently active" keys:
//! the top of the stack is the effective resource; push appends, pop
//! restores the previous top. A [`ScopeGuard`] binds a push/pop pair to a
//! lexical scope so restoration is guaranteed on every exit path,
//! including unwinding.
//!
//! The first resource ever loaded is seeded as a permanent baseline entry,
//! so the stack always has a fallback "current" resource once anything has
//! been loaded. Popping down to the baseline is an explicit
//! [`StackError::PopWithoutPush`] rather than undefined behavior.
//!
//! # Concurrency
//!
//! One mutex guards the cache, the stack, and the loader; it is held across
//! a miss-then-construct sequence, so a loader must never recursively
//! preload or push the key it is constructing. The render-binding calls a
//! loader makes from `activate`/`deactivate` are assumed to be confined to
//! the presentation thread; the mutex protects the data structures against
//! cross-thread preload races, not concurrent use of the bound resource.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::error;

use super::error::StackError;

/// Materializes resources from keys and binds them to the render frame.
///
/// `load` is infallible by contract: an implementation degrades internally
/// (fallback resource, skipped overlay) rather than surfacing construction
/// errors to the stack. See [`FontLoader`](crate::font::FontLoader) for the
/// reference implementation.
pub trait ResourceLoader<K> {
    /// The cached resource handle. Cloned out of the cache on access.
    type Resource: Clone;

    /// Construct the resource for `key`. Called at most once per key.
    fn load(&mut self, key: &K) -> Self::Resource;

    /// Make `resource` the effective one in the underlying binding.
    /// Called on every push, after the resource is cached.
    fn activate(&mut self, resource: &Self::Resource);

    /// Restore the previously effective resource in the underlying
    /// binding. Called on every successful pop.
    fn deactivate(&mut self);
}

struct StackState<K, L: ResourceLoader<K>> {
    loader: L,
    cache: HashMap<K, L::Resource>,
    stack: Vec<K>,
    /// Set once the first-ever load has seeded the permanent baseline.
    baseline_seeded: bool,
}

impl<K, L> StackState<K, L>
where
    K: Clone + Eq + Hash,
    L: ResourceLoader<K>,
{
    /// Construct-on-miss; the very first load also seeds the baseline.
    fn ensure_loaded(&mut self, key: &K) {
        if self.cache.contains_key(key) {
            return;
        }
        let resource = self.loader.load(key);
        self.cache.insert(key.clone(), resource);
        if !self.baseline_seeded {
            self.stack.push(key.clone());
            self.baseline_seeded = true;
        }
    }

    fn push(&mut self, key: K) {
        self.ensure_loaded(&key);
        if let Some(resource) = self.cache.get(&key) {
            self.loader.activate(resource);
        }
        self.stack.push(key);
    }

    fn pop(&mut self) -> Result<(), StackError> {
        // The seeded baseline entry is permanent.
        let floor = usize::from(self.baseline_seeded);
        if self.stack.len() <= floor {
            return Err(StackError::PopWithoutPush);
        }
        self.stack.pop();
        self.loader.deactivate();
        Ok(())
    }
}

/// Memoizing cache plus active-scope stack over an arbitrary key type.
///
/// An explicit object with injectable lifetime: construct one at startup
/// and pass it by reference to consumers. Tests can instantiate as many
/// independent stacks as they like.
pub struct ScopedStack<K, L: ResourceLoader<K>> {
    inner: Mutex<StackState<K, L>>,
}

impl<K, L> ScopedStack<K, L>
where
    K: Clone + Eq + Hash,
    L: ResourceLoader<K>,
{
    /// Create an empty stack backed by `loader`.
    pub fn new(loader: L) -> Self {
        Self {
            inner: Mutex::new(StackState {
                loader,
                cache: HashMap::new(),
                stack: Vec::new(),
                baseline_seeded: false,
            }),
        }
    }

    /// Ensure the resource for `key` is cached, constructing it if absent.
    ///
    /// Idempotent: a second call with the same key is a no-op. The first
    /// resource ever constructed (via `preload` or a push) becomes the
    /// permanent baseline entry of the stack.
    pub fn preload(&self, key: &K) {
        self.inner.lock().ensure_loaded(key);
    }

    /// Make `key` the new top of the active-scope stack, constructing and
    /// caching its resource first if needed. The previous top remains
    /// beneath it, to be restored by the matching [`pop`](Self::pop).
    pub fn push(&self, key: K) {
        self.inner.lock().push(key);
    }

    /// Push a key derived from the current top (partial-key pushes).
    ///
    /// `derive` runs under the stack lock and sees the current top, or
    /// `None` for a stack nothing has been loaded into yet.
    pub fn push_derived<F>(&self, derive: F)
    where
        F: FnOnce(Option<&K>) -> K,
    {
        let mut state = self.inner.lock();
        let key = derive(state.stack.last());
        state.push(key);
    }

    /// Remove the top of the stack, restoring the entry beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::PopWithoutPush`] when only the seeded
    /// baseline, or nothing at all, remains.
    pub fn pop(&self) -> Result<(), StackError> {
        self.inner.lock().pop()
    }

    /// The currently effective key (top of stack), if anything has been
    /// loaded. After the very first `preload`, this is that key even
    /// before any explicit push.
    #[must_use]
    pub fn current(&self) -> Option<K> {
        self.inner.lock().stack.last().cloned()
    }

    /// Clone the cached resource handle for `key`, if it has been loaded.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<L::Resource> {
        self.inner.lock().cache.get(key).cloned()
    }

    /// Number of distinct resources constructed so far.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.inner.lock().cache.len()
    }

    /// Current stack depth, including the seeded baseline entry.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner.lock().stack.len()
    }

    /// Push `key` for the lifetime of the returned guard; the matching pop
    /// runs when the guard is dropped, on every exit path.
    pub fn scoped(&self, key: K) -> ScopeGuard<'_, K, L> {
        self.push(key);
        ScopeGuard { stack: self }
    }

    /// [`push_derived`](Self::push_derived) for the lifetime of the
    /// returned guard.
    pub fn scoped_derived<F>(&self, derive: F) -> ScopeGuard<'_, K, L>
    where
        F: FnOnce(Option<&K>) -> K,
    {
        self.push_derived(derive);
        ScopeGuard { stack: self }
    }
}

/// Scoped acquisition: pushes on construction (via
/// [`ScopedStack::scoped`]), pops on drop.
///
/// Restoration is guaranteed on normal return, early return, and unwind.
#[must_use = "dropping the guard immediately pops the scope it just pushed"]
pub struct ScopeGuard<'a, K, L>
where
    K: Clone + Eq + Hash,
    L: ResourceLoader<K>,
{
    stack: &'a ScopedStack<K, L>,
}

impl<K, L> Drop for ScopeGuard<'_, K, L>
where
    K: Clone + Eq + Hash,
    L: ResourceLoader<K>,
{
    fn drop(&mut self) {
        if let Err(e) = self.stack.pop() {
            // Unreachable for a guard's own push; indicates an unbalanced
            // manual pop elsewhere.
            error!(error = %e, "scope guard failed to restore previous resource");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Loader that counts constructions and activation churn.
    struct CountingLoader {
        loads: Arc<AtomicUsize>,
        activations: Arc<AtomicUsize>,
        deactivations: Arc<AtomicUsize>,
    }

    impl ResourceLoader<u32> for CountingLoader {
        type Resource = String;

        fn load(&mut self, key: &u32) -> String {
            self.loads.fetch_add(1, Ordering::SeqCst);
            format!("resource-{key}")
        }

        fn activate(&mut self, _resource: &String) {
            self.activations.fetch_add(1, Ordering::SeqCst);
        }

        fn deactivate(&mut self) {
            self.deactivations.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_stack() -> (ScopedStack<u32, CountingLoader>, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            loads: Arc::clone(&loads),
            activations: Arc::new(AtomicUsize::new(0)),
            deactivations: Arc::new(AtomicUsize::new(0)),
        };
        (ScopedStack::new(loader), loads)
    }

    #[test]
    fn preload_is_idempotent() {
        let (stack, loads) = counting_stack();
        stack.preload(&1);
        stack.preload(&1);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(stack.get(&1).as_deref(), Some("resource-1"));
    }

    #[test]
    fn first_load_becomes_baseline() {
        let (stack, _) = counting_stack();
        stack.preload(&7);
        assert_eq!(stack.current(), Some(7));
        // Baseline is permanent: nothing to pop yet.
        assert_eq!(stack.pop(), Err(StackError::PopWithoutPush));
    }

    #[test]
    fn pop_restores_previous_top() {
        let (stack, _) = counting_stack();
        stack.push(1);
        stack.push(2);
        stack.pop().unwrap();
        assert_eq!(stack.current(), Some(1));
    }

    #[test]
    fn pop_on_empty_stack_errors() {
        let (stack, _) = counting_stack();
        assert_eq!(stack.pop(), Err(StackError::PopWithoutPush));
    }

    #[test]
    fn guard_pops_on_unwind() {
        let (stack, _) = counting_stack();
        stack.push(1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = stack.scoped(2);
            panic!("render failure");
        }));
        assert!(result.is_err());
        assert_eq!(stack.current(), Some(1));
    }

    #[test]
    fn push_derived_sees_current_top() {
        let (stack, _) = counting_stack();
        stack.push(10);
        stack.push_derived(|top| top.copied().map_or(0, |t| t + 1));
        assert_eq!(stack.current(), Some(11));
    }
}
