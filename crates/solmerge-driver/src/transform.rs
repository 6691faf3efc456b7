//! Export transforms
//!
//! Every export that passes the inclusion policy runs through a
//! [`TransformPipeline`] before it is emitted. A transform can rewrite the
//! item or suppress it; suppression is not an error, the item simply does not
//! appear in the output.
//!
//! # Example
//!
//! ```rust,ignore
//! use solmerge_driver::transform::{ExcludeDeclarations, TransformOutcome, TransformPipeline};
//!
//! let mut pipeline = TransformPipeline::new();
//! pipeline.register(ExcludeDeclarations::new(["Console"]));
//! pipeline.register(|mut item: ExportItem| {
//!     item.body = item.body.replace("\r\n", "\n");
//!     TransformOutcome::Keep(item)
//! });
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use log::trace;
use solmerge_ast::ExportItem;

/// What a transform did with an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    Keep(ExportItem),
    Suppress,
}

/// One step of the export pipeline.
pub trait ExportTransform: Send + Sync {
    /// Name used in log output
    fn name(&self) -> &str {
        "closure"
    }

    fn process(&self, item: ExportItem) -> TransformOutcome;
}

impl<F> ExportTransform for F
where
    F: Fn(ExportItem) -> TransformOutcome + Send + Sync,
{
    fn process(&self, item: ExportItem) -> TransformOutcome {
        self(item)
    }
}

/// Ordered list of transforms. Cloning shares the registered transforms.
#[derive(Clone, Default)]
pub struct TransformPipeline {
    transforms: Vec<Arc<dyn ExportTransform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform; transforms run in registration order.
    pub fn register(&mut self, transform: impl ExportTransform + 'static) {
        self.transforms.push(Arc::new(transform));
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Runs `item` through every transform. Stops at the first suppression.
    pub fn apply(&self, mut item: ExportItem) -> Option<ExportItem> {
        for transform in &self.transforms {
            match transform.process(item) {
                TransformOutcome::Keep(next) => item = next,
                TransformOutcome::Suppress => {
                    trace!("transform '{}' suppressed an export", transform.name());
                    return None;
                }
            }
        }
        Some(item)
    }
}

impl fmt::Debug for TransformPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.transforms.iter().map(|t| t.name()))
            .finish()
    }
}

/// Suppresses declarations by name. Comments always pass.
#[derive(Debug, Clone, Default)]
pub struct ExcludeDeclarations {
    names: IndexSet<String>,
}

impl ExcludeDeclarations {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn excludes(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl ExportTransform for ExcludeDeclarations {
    fn name(&self) -> &str {
        "exclude-declarations"
    }

    fn process(&self, item: ExportItem) -> TransformOutcome {
        if !item.is_comment() && self.excludes(&item.name) {
            TransformOutcome::Suppress
        } else {
            TransformOutcome::Keep(item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solmerge_ast::{DeclarationKind, Span};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn item(name: &str) -> ExportItem {
        ExportItem::declaration(
            DeclarationKind::Library,
            name,
            format!("library {} {{}}", name),
            Some(Span::new(8, 8 + name.len())),
            Span::default(),
        )
    }

    #[test]
    fn test_empty_pipeline_keeps_items() {
        let pipeline = TransformPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(item("Math")), Some(item("Math")));
    }

    #[test]
    fn test_transforms_run_in_order() {
        let mut pipeline = TransformPipeline::new();
        pipeline.register(|mut item: ExportItem| {
            item.body.push_str(" // a");
            TransformOutcome::Keep(item)
        });
        pipeline.register(|mut item: ExportItem| {
            item.body.push_str(" // b");
            TransformOutcome::Keep(item)
        });

        let out = pipeline.apply(item("Math")).unwrap();
        assert_eq!(out.body, "library Math {} // a // b");
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_suppression_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut pipeline = TransformPipeline::new();
        pipeline.register(ExcludeDeclarations::new(["Console"]));
        pipeline.register(move |item: ExportItem| {
            counter.fetch_add(1, Ordering::SeqCst);
            TransformOutcome::Keep(item)
        });

        assert_eq!(pipeline.apply(item("Console")), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(pipeline.apply(item("Math")).is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_exclude_keeps_comments() {
        let exclude = ExcludeDeclarations::new(["Console"]);
        let comment = ExportItem::comment("// Console", Span::new(0, 10));
        assert_eq!(exclude.process(comment.clone()), TransformOutcome::Keep(comment));
    }

    #[test]
    fn test_debug_lists_transform_names() {
        let mut pipeline = TransformPipeline::new();
        pipeline.register(ExcludeDeclarations::new(["A"]));
        pipeline.register(|item: ExportItem| TransformOutcome::Keep(item));
        assert_eq!(format!("{:?}", pipeline), "[\"exclude-declarations\", \"closure\"]");
    }
}
