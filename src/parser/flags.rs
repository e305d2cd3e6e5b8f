//! Bookkeeping for which tables a document may still extend.
//!
//! Flags live in a tree keyed by key path, separate from the value tree, and
//! are dropped once parsing finishes.

use foldhash::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub(super) enum Flag {
    /// Inline tables and static arrays. Nothing beneath them may be added.
    Frozen = 1,
    /// Declared by a header, or opened by dotted keys in an earlier section.
    ExplicitNest = 2,
}

#[derive(Default)]
struct Node {
    flags: u8,
    recursive_flags: u8,
    nested: HashMap<String, Node>,
}

impl Drop for Node {
    // Long dotted keys build chains as deep as the key, so children are
    // unlinked onto a heap stack instead of being dropped recursively.
    fn drop(&mut self) {
        if self.nested.is_empty() {
            return;
        }
        let mut stack: Vec<Node> = self.nested.drain().map(|(_, node)| node).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.nested.drain().map(|(_, node)| node));
        }
    }
}

#[derive(Default)]
pub(super) struct Flags {
    root: HashMap<String, Node>,
    // Dotted keys only take effect at the next header, so that the section
    // which opened them may keep using them. Paths are relative to that
    // section's header.
    pending: Vec<(Vec<String>, Flag)>,
}

impl Flags {
    pub(super) fn add_pending(&mut self, key: Vec<String>, flag: Flag) {
        self.pending.push((key, flag));
    }

    /// Applies the pending flags below `header` to every prefix of their
    /// paths.
    pub(super) fn finalize_pending(&mut self, header: &[String]) {
        if self.pending.is_empty() {
            return;
        }
        let mut section = &mut self.root;
        for k in header {
            section = &mut section.entry(k.clone()).or_default().nested;
        }
        for (key, flag) in std::mem::take(&mut self.pending) {
            let mut cont = &mut *section;
            for k in key {
                let node = cont.entry(k).or_default();
                node.flags |= flag as u8;
                cont = &mut node.nested;
            }
        }
    }

    /// Forgets every flag at and beneath `key`.
    pub(super) fn unset_all(&mut self, key: &[String]) {
        let Some((stem, parent)) = key.split_last() else {
            return;
        };
        let mut cont = &mut self.root;
        for k in parent {
            let Some(node) = cont.get_mut(k) else {
                return;
            };
            cont = &mut node.nested;
        }
        cont.remove(stem);
    }

    /// Sets `flag` on `key`. A recursive flag also applies to every path
    /// beneath `key`.
    pub(super) fn set<'k>(
        &mut self,
        key: impl IntoIterator<Item = &'k String>,
        flag: Flag,
        recursive: bool,
    ) {
        let mut parts = key.into_iter();
        let Some(first) = parts.next() else {
            return;
        };
        let mut node = self.root.entry(first.clone()).or_default();
        for k in parts {
            node = node.nested.entry(k.clone()).or_default();
        }
        if recursive {
            node.recursive_flags |= flag as u8;
        } else {
            node.flags |= flag as u8;
        }
    }

    /// Whether `key` carries `flag`, either directly or through a recursive
    /// flag on one of its ancestors. The empty path has no flags.
    pub(super) fn has<'k>(&self, key: impl IntoIterator<Item = &'k String>, flag: Flag) -> bool {
        let bit = flag as u8;
        let mut cont = &self.root;
        let mut last: Option<&Node> = None;
        for k in key {
            if let Some(node) = last {
                if node.recursive_flags & bit != 0 {
                    return true;
                }
                cont = &node.nested;
            }
            match cont.get(k) {
                Some(node) => last = Some(node),
                None => return false,
            }
        }
        last.is_some_and(|node| (node.flags | node.recursive_flags) & bit != 0)
    }

    /// The length of the shortest non-empty prefix of `parts` for which
    /// `base` followed by that prefix carries `flag`.
    pub(super) fn first_flagged(
        &self,
        base: &[String],
        parts: &[String],
        flag: Flag,
    ) -> Option<usize> {
        let bit = flag as u8;
        let mut cont = Some(&self.root);
        let mut inherited = false;
        for (i, k) in base.iter().chain(parts).enumerate() {
            if cont.is_none() && !inherited {
                return None;
            }
            let node = cont.and_then(|c| c.get(k));
            let own = node.is_some_and(|n| (n.flags | n.recursive_flags) & bit != 0);
            if i >= base.len() && (inherited || own) {
                return Some(i + 1 - base.len());
            }
            inherited |= node.is_some_and(|n| n.recursive_flags & bit != 0);
            cont = node.map(|n| &n.nested);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn direct_flags_do_not_propagate() {
        let mut flags = Flags::default();
        flags.set(&k(&["a", "b"]), Flag::ExplicitNest, false);
        assert!(flags.has(&k(&["a", "b"]), Flag::ExplicitNest));
        assert!(!flags.has(&k(&["a", "b"]), Flag::Frozen));
        assert!(!flags.has(&k(&["a"]), Flag::ExplicitNest));
        assert!(!flags.has(&k(&["a", "b", "c"]), Flag::ExplicitNest));
        assert!(!flags.has(&Vec::<String>::new(), Flag::ExplicitNest));
    }

    #[test]
    fn recursive_flags_cover_descendants() {
        let mut flags = Flags::default();
        flags.set(&k(&["t"]), Flag::Frozen, true);
        assert!(flags.has(&k(&["t"]), Flag::Frozen));
        assert!(flags.has(&k(&["t", "x"]), Flag::Frozen));
        assert!(flags.has(&k(&["t", "x", "y"]), Flag::Frozen));
        assert!(!flags.has(&k(&["u"]), Flag::Frozen));
    }

    #[test]
    fn pending_flags_wait_for_finalize() {
        let mut flags = Flags::default();
        flags.add_pending(k(&["a"]), Flag::ExplicitNest);
        flags.add_pending(k(&["a"]), Flag::ExplicitNest);
        assert!(!flags.has(&k(&["a"]), Flag::ExplicitNest));
        flags.finalize_pending(&[]);
        assert!(flags.has(&k(&["a"]), Flag::ExplicitNest));
        flags.finalize_pending(&[]);
        assert!(flags.has(&k(&["a"]), Flag::ExplicitNest));
    }

    #[test]
    fn pending_flags_cover_every_prefix_below_the_header() {
        let mut flags = Flags::default();
        flags.add_pending(k(&["b", "c"]), Flag::ExplicitNest);
        flags.finalize_pending(&k(&["a"]));
        assert!(!flags.has(&k(&["a"]), Flag::ExplicitNest));
        assert!(flags.has(&k(&["a", "b"]), Flag::ExplicitNest));
        assert!(flags.has(&k(&["a", "b", "c"]), Flag::ExplicitNest));
        assert!(!flags.has(&k(&["b"]), Flag::ExplicitNest));
    }

    #[test]
    fn first_flagged_prefix() {
        let mut flags = Flags::default();
        flags.set(&k(&["a", "b", "c"]), Flag::ExplicitNest, false);
        let base = k(&["a"]);
        assert_eq!(
            flags.first_flagged(&base, &k(&["b", "c", "d"]), Flag::ExplicitNest),
            Some(2)
        );
        assert_eq!(flags.first_flagged(&base, &k(&["b"]), Flag::ExplicitNest), None);
        assert_eq!(flags.first_flagged(&base, &k(&["x", "y"]), Flag::ExplicitNest), None);
        // the base itself is never reported
        flags.set(&base, Flag::ExplicitNest, false);
        assert_eq!(flags.first_flagged(&base, &k(&["b"]), Flag::ExplicitNest), None);

        flags.set(&k(&["t"]), Flag::Frozen, true);
        assert_eq!(flags.first_flagged(&k(&["t"]), &k(&["u", "v"]), Flag::Frozen), Some(1));
        assert_eq!(flags.first_flagged(&[], &k(&["t", "u"]), Flag::Frozen), Some(1));
    }

    #[test]
    fn deep_chains_drop_without_recursion() {
        let mut flags = Flags::default();
        let key: Vec<String> = (0..200_000).map(|i| i.to_string()).collect();
        flags.add_pending(key[1..].to_vec(), Flag::ExplicitNest);
        flags.finalize_pending(&key[..1]);
        assert!(flags.has(&key, Flag::ExplicitNest));
        drop(flags);
    }

    #[test]
    fn unset_all_clears_subtree() {
        let mut flags = Flags::default();
        flags.set(&k(&["arr"]), Flag::ExplicitNest, false);
        flags.set(&k(&["arr", "sub"]), Flag::ExplicitNest, false);
        flags.set(&k(&["other"]), Flag::ExplicitNest, false);
        flags.unset_all(&k(&["arr"]));
        assert!(!flags.has(&k(&["arr"]), Flag::ExplicitNest));
        assert!(!flags.has(&k(&["arr", "sub"]), Flag::ExplicitNest));
        assert!(flags.has(&k(&["other"]), Flag::ExplicitNest));
        // unknown paths are a no-op
        flags.unset_all(&k(&["missing", "deeper"]));
        flags.unset_all(&[]);
    }
}
