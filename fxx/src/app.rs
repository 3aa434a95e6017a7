//! Composition entry point.

use crate::{Annotation, Container, Dependency, FxxResult, Invoke, Wiring};

/// A composed application: every provider registered, every invocation run.
#[derive(Debug)]
pub struct App {
    container: Container,
}

impl App {
    /// Register every provider in `wirings`, then run every invocation in the
    /// order it was supplied.
    ///
    /// # Errors
    ///
    /// Returns the first composition error (an [`Wiring::Error`] or a
    /// duplicate key) before any invocation runs, otherwise the first
    /// invocation failure.
    pub fn new<I>(wirings: I) -> FxxResult<Self>
    where
        I: IntoIterator<Item = Wiring>,
    {
        let mut container = Container::new();
        let mut invokes = Vec::new();
        for wiring in wirings {
            compose(wiring, &mut container, &mut invokes)?;
        }
        for (position, invoke) in invokes.iter().enumerate() {
            tracing::debug!(position, "running invoke");
            container.invoke(invoke)?;
        }
        Ok(Self { container })
    }

    /// The composed container.
    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    /// Resolve `D` by type identity.
    ///
    /// # Errors
    ///
    /// Returns the slot's resolution failure.
    pub fn resolve<D: Dependency>(&self) -> FxxResult<D> {
        self.container.resolve(None)
    }

    /// Resolve `D` through `annotation`.
    ///
    /// # Errors
    ///
    /// Returns the slot's resolution failure.
    pub fn resolve_annotated<D: Dependency>(&self, annotation: Annotation) -> FxxResult<D> {
        self.container.resolve(Some(annotation))
    }
}

fn compose(wiring: Wiring, container: &mut Container, invokes: &mut Vec<Invoke>) -> FxxResult<()> {
    match wiring {
        Wiring::Provide(provide) => container.provide(provide),
        Wiring::Invoke(invoke) => {
            invokes.push(invoke);
            Ok(())
        }
        Wiring::Error(err) => Err(err),
        Wiring::Many(wirings) => wirings
            .into_iter()
            .try_for_each(|wiring| compose(wiring, container, invokes)),
    }
}
