//! Read-only traversal shared by Get and ForEach.

use tracing::trace;

use super::WalkError;
use super::select::{Selector, Step, select};
use crate::path::{JsonPath, PathSegment};
use crate::value::Value;

/// Walks a parsed path over an immutable value, handing each match to `visit`.
///
/// `visit` returns `true` to stop the whole traversal.
pub(crate) struct Reader<'p, F> {
    operation: &'static str,
    path: &'p JsonPath,
    visit: F,
    stopped: bool,
}

impl<'p, F> Reader<'p, F>
where
    F: FnMut(&JsonPath, &Value) -> bool,
{
    pub(crate) fn new(operation: &'static str, path: &'p JsonPath, visit: F) -> Self {
        Self {
            operation,
            path,
            visit,
            stopped: false,
        }
    }

    /// Runs the traversal from `root`
    pub(crate) fn run(mut self, root: &Value) -> Result<(), WalkError> {
        self.descend(root, 0, 0, &JsonPath::root(), true)
    }

    /// Ordinary descent through the segments of `group`, starting at `seg`.
    fn descend(
        &mut self,
        value: &Value,
        group: usize,
        seg: usize,
        here: &JsonPath,
        strict: bool,
    ) -> Result<(), WalkError> {
        if self.stopped {
            return Ok(());
        }
        let value = value.deref_value();
        let path = self.path;
        let groups = path.groups();
        let segments = groups[group].segments();

        let Some(segment) = segments.get(seg) else {
            if group + 1 == groups.len() {
                trace!(operation = self.operation, path = %here, "visiting match");
                self.stopped = (self.visit)(here, value);
                return Ok(());
            }
            return self.search(value, group + 1, here);
        };
        if matches!(segment, PathSegment::Root) {
            return self.descend(value, group, seg + 1, here, strict);
        }

        let selector = Selector {
            operation: self.operation,
            here,
            strict,
            create: false,
            searching: group > 0 && seg == 0,
        };
        let steps = select(&selector, value, segment)?;
        let child_strict = strict && !segment.is_multi_valued();
        for step in steps {
            let Some(child) = step.child(value) else {
                continue;
            };
            self.descend(child, group, seg + 1, &step.append_to(here), child_strict)?;
            if self.stopped {
                break;
            }
        }
        Ok(())
    }

    /// Recursive-descent search for the first segment of `group`.
    ///
    /// Matches directly below `value` are visited before matches deeper in the subtree.
    fn search(&mut self, value: &Value, group: usize, here: &JsonPath) -> Result<(), WalkError> {
        let value = value.deref_value();
        self.descend(value, group, 0, here, false)?;
        for step in Step::children_of(value) {
            if self.stopped {
                break;
            }
            if let Some(child) = step.child(value) {
                self.search(child, group, &step.append_to(here))?;
            }
        }
        Ok(())
    }
}
