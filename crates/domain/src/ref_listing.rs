/// One advertised `(ref name, commit)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    pub name: String,
    pub commit: String,
}

impl RemoteRef {
    pub fn new(name: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit: commit.into(),
        }
    }
}

/// References advertised by a remote, in the order the remote sent them.
///
/// The content comes straight from an untrusted remote and is only ever
/// compared against, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefListing {
    refs: Vec<RemoteRef>,
}

impl RefListing {
    pub fn new(refs: Vec<RemoteRef>) -> Self {
        Self { refs }
    }

    pub fn refs(&self) -> &[RemoteRef] {
        &self.refs
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// First ref named exactly `refs/heads/<branch>`.
    pub fn find_branch(&self, branch: &str) -> Option<&RemoteRef> {
        self.refs.iter().find(|r| {
            r.name
                .strip_prefix("refs/heads/")
                .is_some_and(|head| head == branch)
        })
    }
}

impl FromIterator<RemoteRef> for RefListing {
    fn from_iter<I: IntoIterator<Item = RemoteRef>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
