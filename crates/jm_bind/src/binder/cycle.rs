use alloc::string::{String, ToString};
use core::cell::RefCell;

use jm_path::NamePath;
use jm_reflect::hash::HashSet;

// -----------------------------------------------------------------------------
// CycleDetector

/// The set of paths currently being bound.
///
/// Entering a path hands out a [`CycleGuard`]; the path stays registered
/// until the guard is dropped, whatever the outcome of the bind.
#[derive(Debug, Default)]
pub(crate) struct CycleDetector {
    in_flight: RefCell<HashSet<String>>,
}

impl CycleDetector {
    /// Registers `path`, or returns `None` if it is already in flight.
    pub fn enter(&self, path: &NamePath) -> Option<CycleGuard<'_>> {
        let key = path.to_string();
        if !self.in_flight.borrow_mut().insert(key.clone()) {
            log::trace!("path `{key}` is already in flight");
            return None;
        }
        log::trace!("enter `{key}`");
        Some(CycleGuard {
            detector: self,
            path: key,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.in_flight.borrow().len()
    }
}

// -----------------------------------------------------------------------------
// CycleGuard

/// Unregisters its path on drop.
pub(crate) struct CycleGuard<'a> {
    detector: &'a CycleDetector,
    path: String,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        log::trace!("leave `{}`", self.path);
        self.detector.in_flight.borrow_mut().remove(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use jm_path::NamePath;

    use super::CycleDetector;

    #[test]
    fn guard_releases_path() {
        let detector = CycleDetector::default();
        let path = NamePath::new("server.port");

        let guard = detector.enter(&path);
        assert!(guard.is_some());
        assert!(detector.enter(&path).is_none());
        assert_eq!(detector.len(), 1);

        drop(guard);
        assert_eq!(detector.len(), 0);
        assert!(detector.enter(&path).is_some());
    }

    #[test]
    fn nested_paths_are_distinct() {
        let detector = CycleDetector::default();

        let outer = detector.enter(&NamePath::new("server"));
        let inner = detector.enter(&NamePath::new("server.port"));
        assert!(outer.is_some() && inner.is_some());
        assert_eq!(detector.len(), 2);

        drop(inner);
        drop(outer);
        assert_eq!(detector.len(), 0);
    }
}
