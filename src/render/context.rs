//! Rendering context - coordinate system, classes and bounds for one subtree

use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::CoordinateSystem;
use crate::transform::Transform;
use crate::types::{Bounds, Point};

use super::config::RenderConfig;

/// Rendering context
///
/// Cheap to clone. Children made with [`RenderContext::child`] share the
/// parent's bounds accumulator; [`RenderContext::isolated`] starts a fresh one
/// whose content the caller merges back explicitly.
#[derive(Clone, Debug)]
pub struct RenderContext<'a> {
    /// Coordinate system of this subtree
    pub cs: CoordinateSystem,
    /// Coordinate system of the sheet the tree started from
    root: CoordinateSystem,
    /// CSS classes inherited by every element drawn here
    classes: Vec<String>,
    /// Bounds accumulator, possibly shared with ancestors
    bounds: Rc<RefCell<Bounds>>,
    pub config: &'a RenderConfig,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a RenderConfig, cs: CoordinateSystem) -> Self {
        RenderContext {
            cs,
            root: cs,
            classes: Vec::new(),
            bounds: Rc::new(RefCell::new(Bounds::new())),
            config,
        }
    }

    /// Nested context sharing this context's bounds.
    pub fn child(&self, local: Option<&Transform>) -> Self {
        RenderContext {
            cs: self.cs.child(local),
            ..self.clone()
        }
    }

    /// Same context with its own, empty bounds accumulator.
    pub fn isolated(&self) -> Self {
        RenderContext {
            bounds: Rc::new(RefCell::new(Bounds::new())),
            ..self.clone()
        }
    }

    /// Same bounds and classes under a different coordinate system.
    pub fn with_cs(&self, cs: CoordinateSystem) -> Self {
        RenderContext { cs, ..self.clone() }
    }

    /// Child with extra classes; classes already present are not repeated.
    pub fn with_classes<I, S>(&self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ctx = self.child(None);
        for class in classes {
            push_unique(&mut ctx.classes, class.as_ref());
        }
        ctx
    }

    pub fn root(&self) -> &CoordinateSystem {
        &self.root
    }

    pub fn point(&self, p: Point) -> Point {
        self.cs.point(p)
    }

    /// Value for the `class` attribute: inherited classes plus `extra`.
    pub fn class_attr<S: AsRef<str>>(&self, extra: &[S]) -> String {
        let mut classes = self.classes.clone();
        for class in extra {
            push_unique(&mut classes, class.as_ref());
        }
        classes.join(" ")
    }

    pub fn update_bounds(&self, p: Point) {
        self.bounds.borrow_mut().update(p);
    }

    pub fn merge_bounds(&self, other: &Bounds) {
        self.bounds.borrow_mut().merge(other);
    }

    pub fn translate_bounds(&self, offset: Point) {
        self.bounds.borrow_mut().translate(offset);
    }

    /// Snapshot of the accumulated bounds.
    pub fn bounds(&self) -> Bounds {
        *self.bounds.borrow()
    }

    pub fn shares_bounds_with(&self, other: &RenderContext<'_>) -> bool {
        Rc::ptr_eq(&self.bounds, &other.bounds)
    }
}

fn push_unique(classes: &mut Vec<String>, class: &str) {
    if !class.is_empty() && !classes.iter().any(|c| c == class) {
        classes.push(class.to_string());
    }
}
