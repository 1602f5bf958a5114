use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use depindexd_base::PackageName;
use tracing::debug;

use crate::node::PackageNode;

/// Outcome of a store operation: every operation is total, so this is the
/// only signal it ever produces (parse-level failures never reach here —
/// see `depindexd-proto::ParseError` for those).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Ok,
    Fail,
}

/// The in-memory dependency graph: a `PackageName -> PackageNode` map
/// behind a single mutex. `Store` is cheap to `Clone` (an `Arc` bump) so
/// every session thread holds its own handle to the same underlying map.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<HashMap<PackageName, PackageNode>>>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &PackageName) -> bool {
        self.inner.lock().expect("store mutex poisoned").contains_key(name)
    }

    /// Idempotent if `name` is already indexed: the stored dependencies are
    /// authoritative and the new `deps` argument is silently discarded.
    /// Otherwise every name in `deps` must already be present, or this
    /// fails and leaves the store unchanged.
    pub fn index(&self, name: PackageName, deps: Vec<PackageName>) -> Outcome {
        let mut map = self.inner.lock().expect("store mutex poisoned");

        if map.contains_key(&name) {
            debug!(package = %name, "index: already present, no-op");
            return Outcome::Ok;
        }

        for dep in &deps {
            if !map.contains_key(dep) {
                debug!(package = %name, missing_dep = %dep, "index: missing dependency");
                return Outcome::Fail;
            }
        }

        for dep in &deps {
            map.get_mut(dep)
                .expect("just checked presence above")
                .dependents
                .insert(name.clone());
        }
        map.insert(name.clone(), PackageNode::new(name.clone(), deps));
        debug!(package = %name, "index: created");
        Outcome::Ok
    }

    /// Idempotent if `name` is absent. Fails without effect if `name` has
    /// any remaining dependents (it isn't a leaf).
    pub fn remove(&self, name: &PackageName) -> Outcome {
        let mut map = self.inner.lock().expect("store mutex poisoned");

        let Some(node) = map.get(name) else {
            debug!(package = %name, "remove: already absent, no-op");
            return Outcome::Ok;
        };

        if !node.dependents.is_empty() {
            debug!(package = %name, "remove: has dependents, refusing");
            return Outcome::Fail;
        }

        let deps = node.dependencies.clone();
        map.remove(name);
        for dep in deps {
            if let Some(dep_node) = map.get_mut(&dep) {
                dep_node.dependents.remove(name);
            }
        }
        debug!(package = %name, "remove: deleted");
        Outcome::Ok
    }

    pub fn query(&self, name: &PackageName) -> Outcome {
        if self.contains(name) {
            Outcome::Ok
        } else {
            Outcome::Fail
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    fn pkg(s: &str) -> PackageName {
        PackageName::parse(s).unwrap()
    }

    #[test]
    fn query_absent_fails() {
        let store = Store::new();
        assert_eq!(store.query(&pkg("coffee")), Outcome::Fail);
    }

    #[test]
    fn happy_path_with_dependencies() {
        let store = Store::new();
        assert_eq!(store.query(&pkg("coffee")), Outcome::Fail);
        assert_eq!(store.index(pkg("coffee"), vec![]), Outcome::Ok);
        assert_eq!(store.index(pkg("tea"), vec![]), Outcome::Ok);
        assert_eq!(
            store.index(pkg("vim"), vec![pkg("coffee"), pkg("tea")]),
            Outcome::Ok
        );
        assert_eq!(store.query(&pkg("vim")), Outcome::Ok);
        assert_eq!(store.remove(&pkg("coffee")), Outcome::Fail);
        assert_eq!(store.remove(&pkg("vim")), Outcome::Ok);
        assert_eq!(store.remove(&pkg("coffee")), Outcome::Ok);
    }

    #[test]
    fn index_fails_on_missing_dependency_and_makes_no_change() {
        let store = Store::new();
        assert_eq!(store.index(pkg("vim"), vec![pkg("coffee")]), Outcome::Fail);
        assert_eq!(store.contains(&pkg("vim")), false);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn self_dependency_is_rejected_as_fail_not_special_cased() {
        let store = Store::new();
        assert_eq!(store.index(pkg("vim"), vec![pkg("vim")]), Outcome::Fail);
        assert!(!store.contains(&pkg("vim")));
    }

    #[test]
    fn reindex_is_idempotent_and_discards_new_deps() {
        let store = Store::new();
        assert_eq!(store.index(pkg("a"), vec![]), Outcome::Ok);
        assert_eq!(store.index(pkg("b"), vec![pkg("a")]), Outcome::Ok);
        // Re-INDEX of "b" with no deps is a no-op: the a-dependency survives.
        assert_eq!(store.index(pkg("b"), vec![]), Outcome::Ok);
        assert_eq!(store.remove(&pkg("a")), Outcome::Fail);
    }

    #[test]
    fn remove_of_absent_package_is_ok_and_stays_absent() {
        let store = Store::new();
        assert_eq!(store.remove(&pkg("ghost")), Outcome::Ok);
        assert_eq!(store.query(&pkg("ghost")), Outcome::Fail);
    }

    #[test]
    fn duplicate_deps_are_tolerated_via_set_semantics() {
        let store = Store::new();
        assert_eq!(store.index(pkg("a"), vec![]), Outcome::Ok);
        assert_eq!(
            store.index(pkg("b"), vec![pkg("a"), pkg("a"), pkg("a")]),
            Outcome::Ok
        );
        assert_eq!(store.remove(&pkg("b")), Outcome::Ok);
        assert_eq!(store.remove(&pkg("a")), Outcome::Ok);
    }

    #[test]
    fn index_then_remove_on_a_leaf_leaves_store_unchanged() {
        let store = Store::new();
        assert_eq!(store.index(pkg("base"), vec![]), Outcome::Ok);
        let before = store.len();
        assert_eq!(store.index(pkg("leaf"), vec![pkg("base")]), Outcome::Ok);
        assert_eq!(store.remove(&pkg("leaf")), Outcome::Ok);
        assert_eq!(store.len(), before);
        assert!(!store.contains(&pkg("leaf")));
    }

    #[test]
    fn double_index_and_double_remove_are_both_idempotent() {
        let store = Store::new();
        assert_eq!(store.index(pkg("p"), vec![]), Outcome::Ok);
        assert_eq!(store.index(pkg("p"), vec![]), Outcome::Ok);
        assert_eq!(store.remove(&pkg("p")), Outcome::Ok);
        assert_eq!(store.remove(&pkg("p")), Outcome::Ok);
    }

    #[test]
    fn dependents_are_cleaned_up_on_removal() {
        let store = Store::new();
        assert_eq!(store.index(pkg("a"), vec![]), Outcome::Ok);
        assert_eq!(store.index(pkg("b"), vec![pkg("a")]), Outcome::Ok);
        assert_eq!(store.remove(&pkg("b")), Outcome::Ok);
        // a has no dependents left, so it becomes removable.
        assert_eq!(store.remove(&pkg("a")), Outcome::Ok);
    }

    #[test]
    fn concurrent_disjoint_sessions_do_not_interfere() {
        use std::thread;

        let store = Store::new();
        let mut handles = Vec::new();
        for i in 0..3 {
            let store = store.clone();
            handles.push(thread::spawn(move || {
                let base = pkg(&format!("base{i}"));
                let leaf = pkg(&format!("leaf{i}"));
                assert_eq!(store.query(&base), Outcome::Fail);
                assert_eq!(store.index(base.clone(), vec![]), Outcome::Ok);
                assert_eq!(store.index(leaf.clone(), vec![base.clone()]), Outcome::Ok);
                assert_eq!(store.query(&leaf), Outcome::Ok);
                assert_eq!(store.remove(&base), Outcome::Fail);
                assert_eq!(store.remove(&leaf), Outcome::Ok);
                assert_eq!(store.remove(&base), Outcome::Ok);
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 0);
    }
}
