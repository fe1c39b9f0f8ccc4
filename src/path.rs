//! Element identities and paths.

use std::fmt;

/// Identifies a child within its sibling set.
///
/// If a child doesn’t have a user-specified key, it’ll be auto-keyed sequentially by index
/// ignoring user-keyed siblings, e.g.
///
/// ```text
/// children  [A, B, C(key=1), D(key=2), E]
/// identity   0  1  Key(1)    Key(2)    2
/// ```
///
/// This way fixed children keep their identity when keyed children around them come and go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identity {
    /// A user-specified key.
    Key(u64),
    /// An automatically assigned key.
    Auto(u64),
}

/// Hands out identities to one sibling set, in order.
#[derive(Debug, Default)]
pub struct IdentityAssigner {
    auto_key_counter: u64,
}

impl IdentityAssigner {
    pub fn new() -> IdentityAssigner {
        IdentityAssigner::default()
    }

    /// Returns the identity for the next child.
    ///
    /// Nothing stops two children from passing the same key; the reconciler reports that.
    pub fn next(&mut self, key: Option<u64>) -> Identity {
        match key {
            Some(key) => Identity::Key(key),
            None => {
                let k = self.auto_key_counter;
                self.auto_key_counter += 1;
                Identity::Auto(k)
            }
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Identity::Key(key) => write!(f, "#{}", key),
            Identity::Auto(index) => write!(f, "{}", index),
        }
    }
}

/// The identities from some ancestor down to a node.
///
/// Elements that don’t produce a native view are flattened away during resolution, so a native
/// view’s slot among its native siblings is the path through those elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementPath(Vec<Identity>);

impl ElementPath {
    /// The empty path.
    pub fn empty() -> ElementPath {
        ElementPath(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn identities(&self) -> &[Identity] {
        &self.0
    }

    /// Returns this path with `identity` in front.
    pub fn prepending(&self, identity: Identity) -> ElementPath {
        let mut identities = Vec::with_capacity(self.0.len() + 1);
        identities.push(identity);
        identities.extend_from_slice(&self.0);
        ElementPath(identities)
    }

    /// Returns this path followed by `other`.
    pub fn appending(&self, other: &ElementPath) -> ElementPath {
        let mut identities = self.0.clone();
        identities.extend_from_slice(&other.0);
        ElementPath(identities)
    }
}

impl From<Vec<Identity>> for ElementPath {
    fn from(identities: Vec<Identity>) -> Self {
        ElementPath(identities)
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for identity in &self.0 {
            write!(f, "/{}", identity)?;
        }
        Ok(())
    }
}

#[test]
fn test_auto_keys_skip_keyed_siblings() {
    let mut assigner = IdentityAssigner::new();
    let keys = [None, None, Some(1), Some(2), None];
    let identities: Vec<_> = keys.iter().map(|key| assigner.next(*key)).collect();
    assert_eq!(
        identities,
        vec![
            Identity::Auto(0),
            Identity::Auto(1),
            Identity::Key(1),
            Identity::Key(2),
            Identity::Auto(2),
        ]
    );
}

#[test]
fn test_path_display() {
    let path = ElementPath::from(vec![Identity::Key(3)]).prepending(Identity::Auto(0));
    assert_eq!(path.to_string(), "/0/#3");
    assert_eq!(ElementPath::empty().to_string(), "/");
}
