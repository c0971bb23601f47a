use crate::registry::EnumRegistry;
use std::sync::Arc;

crate::enum_kind! {
    /// Post status; `archived` is stored under a remapped key.
    pub(crate) struct StatusEnum = "blog::StatusEnum" {
        draft,
        archived = "stored archive",
        published,
    }
}

crate::enum_kind! {
    pub(crate) struct ColorEnum = "blog::ColorEnum" {
        red,
        green,
    }
}

/// Fresh registry with every fixture enum registered.
pub(crate) fn registry() -> Arc<EnumRegistry> {
    let registry = EnumRegistry::new();
    registry
        .register_kind::<StatusEnum>()
        .expect("status enum should register");
    registry
        .register_kind::<ColorEnum>()
        .expect("color enum should register");

    Arc::new(registry)
}
