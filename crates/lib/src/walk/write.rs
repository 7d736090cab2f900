//! Mutating traversal shared by Set and Delete.
//!
//! The [`Writer`] owns the cursor over the parsed path and the modification count. What happens at
//! the final segment is delegated to a [`WriteAction`].

use tracing::{debug, trace};

use super::WalkError;
use super::select::{Selector, Step, select};
use crate::path::{JsonPath, PathSegment};
use crate::schema::{Schema, lookup_path};
use crate::value::{Kind, List, Map, Value};

/// Terminal behaviour of a mutating traversal.
pub(crate) trait WriteAction {
    /// Operation name used in errors and logs
    fn operation(&self) -> &'static str;

    /// Whether missing structure is created on the way down
    fn creates(&self) -> bool;

    /// Applies the action to the root itself (path `$`), returning the modification count
    fn apply_root(&mut self, root: &mut Value) -> u64;

    /// Applies the action to the children of `target` selected by the final segment.
    ///
    /// `target` is dereferenced. `strict` is false once the final segment or anything before it
    /// expanded to several children. Returns the modification count.
    fn apply(
        &mut self,
        ctx: &WriteContext<'_>,
        target: &mut Value,
        steps: &[Step],
        here: &JsonPath,
        strict: bool,
    ) -> Result<u64, WalkError>;
}

/// Schema access available to write actions.
pub(crate) struct WriteContext<'s> {
    schema: Option<&'s Schema>,
}

impl WriteContext<'_> {
    /// Zero value for the location at `path`: the schema's zero if one is known, null otherwise
    pub(crate) fn zero_at(&self, path: &JsonPath) -> Value {
        self.schema
            .and_then(|schema| lookup_path(path, schema).ok())
            .map(|node| node.zero_value())
            .unwrap_or(Value::Null)
    }

    /// Builds the container to create at `here` so that `segment` can be applied to it.
    ///
    /// With a schema, the node at `here` decides the container (references use their pointee).
    /// Otherwise, and whenever the schema does not describe a container there, a growable list
    /// is created for index-shaped segments and a map for everything else.
    fn container_for(&self, here: &JsonPath, segment: &PathSegment) -> Value {
        if let Some(schema) = self.schema {
            match lookup_path(here, schema) {
                Ok(node) => {
                    let node = match node.kind() {
                        Kind::Ref => node.pointee().and_then(Schema::primary_node).cloned(),
                        _ => Some(node),
                    };
                    if let Some(node) = node.filter(|n| n.kind().is_container()) {
                        debug!(path = %here, schema = %node.describe(), "creating container from schema");
                        return node.zero_value();
                    }
                }
                Err(err) => {
                    debug!(path = %here, error = %err, "no schema for container, using generic shape");
                }
            }
        }
        if segment.is_index_shaped() {
            Value::List(List::new())
        } else {
            Value::Map(Map::new())
        }
    }
}

/// Walks a parsed path over a mutable value.
pub(crate) struct Writer<'p, 's, A> {
    path: &'p JsonPath,
    ctx: WriteContext<'s>,
    action: A,
    count: u64,
    matched: bool,
}

impl<'p, 's, A: WriteAction> Writer<'p, 's, A> {
    pub(crate) fn new(path: &'p JsonPath, schema: Option<&'s Schema>, action: A) -> Self {
        Self {
            path,
            ctx: WriteContext { schema },
            action,
            count: 0,
            matched: false,
        }
    }

    /// Runs the traversal from `root`, returning the modification count.
    ///
    /// Fails with value-at-path-invalid when nothing at all was selected.
    pub(crate) fn run(mut self, root: &mut Value) -> Result<u64, WalkError> {
        let here = JsonPath::root();
        let creates = self.action.creates();
        self.descend(root, 0, 0, &here, true, creates)?;
        if !self.matched {
            return Err(WalkError::value_invalid(
                self.action.operation(),
                self.path,
                root,
                "path matched nothing",
            ));
        }
        Ok(self.count)
    }

    fn descend(
        &mut self,
        value: &mut Value,
        group: usize,
        mut seg: usize,
        here: &JsonPath,
        strict: bool,
        create: bool,
    ) -> Result<(), WalkError> {
        let path = self.path;
        let groups = path.groups();
        let segments = groups[group].segments();
        while matches!(segments.get(seg), Some(PathSegment::Root)) {
            seg += 1;
        }
        let last_group = group + 1 == groups.len();

        let Some(segment) = segments.get(seg) else {
            if last_group {
                self.matched = true;
                self.count += self.action.apply_root(value);
                return Ok(());
            }
            return self.search(value, group + 1, here);
        };

        if create {
            self.vivify(value, here, segment);
        }
        let target = value.deref_value_mut();
        let selector = Selector {
            operation: self.action.operation(),
            here,
            strict,
            create,
            searching: group > 0 && seg == 0,
        };
        let steps = select(&selector, target, segment)?;
        let child_strict = strict && !segment.is_multi_valued();

        if last_group && seg + 1 == segments.len() {
            trace!(operation = self.action.operation(), path = %here, targets = steps.len(), "applying");
            self.matched |= !steps.is_empty();
            self.count += self
                .action
                .apply(&self.ctx, target, &steps, here, child_strict)?;
            return Ok(());
        }

        let child_create = self.action.creates();
        for step in steps {
            let child_path = step.append_to(here);
            let placeholder = create && self.prepare_child(target, &step, here)?;
            let result = match step.child_mut(target) {
                Some(child) => {
                    self.descend(child, group, seg + 1, &child_path, child_strict, child_create)
                }
                None => Ok(()),
            };
            if placeholder {
                discard_placeholder(target, &step);
            }
            result?;
        }
        Ok(())
    }

    /// Recursive-descent search for the first segment of `group`.
    ///
    /// The subtree is scanned depth-first and matches are applied bottom-up, so a freshly written
    /// value is never searched again.
    fn search(&mut self, value: &mut Value, group: usize, here: &JsonPath) -> Result<(), WalkError> {
        let node = value.deref_value_mut();
        for step in Step::children_of(node) {
            let child_path = step.append_to(here);
            if let Some(child) = step.child_mut(node) {
                self.search(child, group, &child_path)?;
            }
        }
        self.descend(node, group, 0, here, false, false)
    }

    /// Replaces an absent value (null or nil reference) with a container `segment` can apply to.
    fn vivify(&self, value: &mut Value, here: &JsonPath, segment: &PathSegment) {
        let slot = value.deref_value_mut();
        if !slot.is_absent() {
            return;
        }
        let container = self.ctx.container_for(here, segment);
        debug!(path = %here, kind = %container.kind(), "auto-vivifying");
        if matches!(slot, Value::Ref(_)) {
            slot.rebind(container);
        } else {
            *slot = container;
        }
    }

    /// Makes room for `step` below `target` before descending into it.
    ///
    /// Returns true if a placeholder map entry was inserted.
    fn prepare_child(
        &self,
        target: &mut Value,
        step: &Step,
        here: &JsonPath,
    ) -> Result<bool, WalkError> {
        match (step, target) {
            (Step::Key(key), Value::Map(map)) if !map.contains_key(key) => {
                map.insert(key.clone(), Value::Null);
                Ok(true)
            }
            (Step::Index(index), Value::List(list)) if *index >= list.len() => {
                list.grow_to(index + 1, |i| self.ctx.zero_at(&here.clone().index(i)))
                    .map_err(|err| {
                        WalkError::value_invalid(
                            self.action.operation(),
                            here,
                            &Value::Null,
                            err.to_string(),
                        )
                    })?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}

/// Removes a placeholder entry that nothing was written into.
fn discard_placeholder(target: &mut Value, step: &Step) {
    if let (Step::Key(key), Value::Map(map)) = (step, target) {
        if map.get(key).is_some_and(Value::is_absent) {
            map.remove(key);
        }
    }
}
