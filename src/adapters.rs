//! Elements that adapt or read the environment of their subtree.

use crate::attributes::LayoutAttributes;
use crate::constraint::SizeConstraint;
use crate::element::{Element, LayoutChild};
use crate::environment::{Environment, EnvironmentKey};
use crate::rect::Size;
use std::fmt;
use std::sync::Arc;

type Adaptation = dyn Fn(&mut Environment) + Send + Sync;

/// Measures and lays out its wrapped element in an adapted environment.
///
/// Only the wrapped element’s subtree sees the adaptation.
pub struct AdaptedEnvironment {
    wrapped: Arc<dyn Element>,
    adapt: Arc<Adaptation>,
}

impl AdaptedEnvironment {
    pub fn new<F>(wrapped: Arc<dyn Element>, adapt: F) -> AdaptedEnvironment
    where
        F: Fn(&mut Environment) + Send + Sync + 'static,
    {
        AdaptedEnvironment {
            wrapped,
            adapt: Arc::new(adapt),
        }
    }

    /// Sets a single key for the wrapped element’s subtree.
    pub fn setting<K: EnvironmentKey>(wrapped: Arc<dyn Element>, value: K::Value) -> AdaptedEnvironment {
        AdaptedEnvironment::new(wrapped, move |environment| {
            environment.set::<K>(value.clone())
        })
    }

    fn adapted(&self, environment: &Environment) -> Environment {
        environment.adapted(|environment| (self.adapt)(environment))
    }
}

impl fmt::Debug for AdaptedEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AdaptedEnvironment")
            .field("wrapped", &self.wrapped)
            .finish()
    }
}

impl Element for AdaptedEnvironment {
    fn measure(&self, constraint: SizeConstraint, environment: &Environment) -> Size {
        self.wrapped.measure(constraint, &self.adapted(environment))
    }

    fn layout(&self, size: Size, environment: &Environment) -> Vec<LayoutChild> {
        vec![LayoutChild::new(
            Arc::clone(&self.wrapped),
            LayoutAttributes::with_size(size),
            &self.adapted(environment),
        )]
    }
}

type Builder = dyn Fn(&Environment) -> Arc<dyn Element> + Send + Sync;

/// Builds its content from the environment it is measured and laid out in.
pub struct EnvironmentReader {
    build: Arc<Builder>,
}

impl EnvironmentReader {
    pub fn new<F>(build: F) -> EnvironmentReader
    where
        F: Fn(&Environment) -> Arc<dyn Element> + Send + Sync + 'static,
    {
        EnvironmentReader {
            build: Arc::new(build),
        }
    }
}

impl fmt::Debug for EnvironmentReader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EnvironmentReader").finish()
    }
}

impl Element for EnvironmentReader {
    fn measure(&self, constraint: SizeConstraint, environment: &Environment) -> Size {
        (self.build)(environment).measure(constraint, environment)
    }

    fn layout(&self, size: Size, environment: &Environment) -> Vec<LayoutChild> {
        vec![LayoutChild::new(
            (self.build)(environment),
            LayoutAttributes::with_size(size),
            environment,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutResultNode;
    use crate::rect::Rect;
    use crate::testing::{Leaf, MarkerKey};
    use cgmath::Vector2;

    fn reader() -> EnvironmentReader {
        EnvironmentReader::new(|environment| {
            let width = if environment.value::<MarkerKey>() == "wide" {
                80.
            } else {
                20.
            };
            Arc::new(Leaf::new("read", width, 10.))
        })
    }

    #[test]
    fn reader_builds_from_environment() {
        let wide = Environment::empty().setting::<MarkerKey>("wide".into());
        let unconstrained = SizeConstraint::UNCONSTRAINED;
        assert_eq!(reader().measure(unconstrained, &wide), Vector2::new(80., 10.));
        assert_eq!(
            reader().measure(unconstrained, &Environment::empty()),
            Vector2::new(20., 10.)
        );
    }

    #[test]
    fn adaptation_applies_to_measure_and_layout() {
        let adapted = AdaptedEnvironment::setting::<MarkerKey>(Arc::new(reader()), "wide".into());
        let environment = Environment::empty();
        assert_eq!(
            adapted.measure(SizeConstraint::UNCONSTRAINED, &environment),
            Vector2::new(80., 10.)
        );

        let element: Arc<dyn Element> = Arc::new(adapted);
        let node = LayoutResultNode::layout(
            &element,
            Rect::from_size(Vector2::new(100., 10.)),
            &environment,
        );
        let (_, reader_node) = &node.children[0];
        assert_eq!(reader_node.environment.value::<MarkerKey>(), "wide");
        assert_eq!(reader_node.attributes.bounds().size, Vector2::new(100., 10.));
        assert!(!environment.contains::<MarkerKey>());
    }
}
