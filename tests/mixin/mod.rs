//! Mixin injector check tests

pub mod tests_inject_into_constructor;
