use std::collections::HashSet;

use depindexd_base::PackageName;

/// A package currently present in the index. `name` and `dependencies` are
/// fixed at creation; only `dependents` is ever mutated afterward, and only
/// by sibling INDEX/REMOVE operations on other nodes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackageNode {
    pub name: PackageName,
    pub dependencies: Vec<PackageName>,
    pub dependents: HashSet<PackageName>,
}

impl PackageNode {
    pub fn new(name: PackageName, dependencies: Vec<PackageName>) -> Self {
        PackageNode {
            name,
            dependencies,
            dependents: HashSet::new(),
        }
    }
}
