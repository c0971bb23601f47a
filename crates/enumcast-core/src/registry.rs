//! Enum member registry.
//!
//! The registry owns one table per enum type and is the single source of
//! truth for member identity: every lookup of the same (path, key) pair
//! returns a handle to the same instance.

use crate::{
    DEFAULT_DELIMITER,
    cast::{CastError, RawScalar},
    config::CastConfig,
    error::ErrorClass,
    model::{EnumModel, EnumModelError, MemberModel},
    obs::sink::{self, CastEvent},
    traits::{EnumKind, Path},
    value::{EnumValue, MemberEntry},
};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, OnceLock, PoisonError, RwLock},
};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("enum type '{path}' is already registered with a different model")]
    DuplicateEnumType { path: String },

    #[error(transparent)]
    InvalidModel(#[from] EnumModelError),
}

impl RegistryError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateEnumType { .. } => ErrorClass::Conflict,
            Self::InvalidModel(_) => ErrorClass::InvariantViolation,
        }
    }
}

///
/// MemberSlot
/// Declared member plus its lazily built singleton.
///

struct MemberSlot {
    model: MemberModel,
    instance: OnceLock<EnumValue>,
}

///
/// EnumTable
///

struct EnumTable {
    path: Arc<str>,
    model: EnumModel,
    slots: Vec<MemberSlot>,
    by_value: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    by_ordinal: BTreeMap<i64, usize>,
}

impl EnumTable {
    fn new(model: EnumModel) -> Self {
        let path: Arc<str> = Arc::from(model.path.as_str());
        let mut by_value = HashMap::with_capacity(model.len());
        let mut by_name = HashMap::with_capacity(model.len());
        let mut by_ordinal = BTreeMap::new();

        let slots = model
            .members
            .iter()
            .enumerate()
            .map(|(index, member)| {
                by_value.insert(member.value.clone(), index);
                by_name.insert(member.name.clone(), index);
                by_ordinal.insert(member.ordinal, index);

                MemberSlot {
                    model: member.clone(),
                    instance: OnceLock::new(),
                }
            })
            .collect();

        Self {
            path,
            model,
            slots,
            by_value,
            by_name,
            by_ordinal,
        }
    }

    // OnceLock makes first touch a compare-and-insert, so racing callers
    // all observe the instance that won.
    fn instance(&self, index: usize) -> EnumValue {
        let slot = &self.slots[index];

        slot.instance
            .get_or_init(|| {
                EnumValue::from_entry(Arc::new(MemberEntry {
                    enum_path: Arc::clone(&self.path),
                    name: slot.model.name.clone(),
                    value: slot.model.value.clone(),
                    label: slot.model.label.clone(),
                    ordinal: slot.model.ordinal,
                }))
            })
            .clone()
    }

    fn unknown(&self, key: impl Into<String>) -> CastError {
        CastError::UnknownMember {
            enum_path: self.path.to_string(),
            key: key.into(),
        }
    }
}

///
/// EnumRegistry
///
/// Per-type singleton tables, built once at startup and shared with the
/// casters behind an `Arc`.
///
/// Stored values are validated against the registry's delimiter, which
/// should match the `CastConfig` of the casters sharing it.
///

pub struct EnumRegistry {
    delimiter: char,
    tables: RwLock<BTreeMap<String, Arc<EnumTable>>>,
}

impl EnumRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Empty registry that reserves `delimiter` instead of `,`.
    #[must_use]
    pub const fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    /// Empty registry matching the delimiter of `config`.
    #[must_use]
    pub const fn with_config(config: &CastConfig) -> Self {
        Self::with_delimiter(config.delimiter)
    }

    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Register an enum model.
    ///
    /// Registering the same model twice is a no-op; a different model under
    /// an existing path is rejected.
    pub fn register(&self, model: EnumModel) -> Result<(), RegistryError> {
        model.validate(self.delimiter)?;

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = tables.get(&model.path) {
            if existing.model == model {
                return Ok(());
            }

            return Err(RegistryError::DuplicateEnumType { path: model.path });
        }

        let path = model.path.clone();
        let members = model.len();
        tables.insert(path.clone(), Arc::new(EnumTable::new(model)));
        drop(tables);

        tracing::debug!(enum_path = %path, members, "registered enum type");
        sink::record(CastEvent::Registered {
            enum_path: &path,
            members,
        });

        Ok(())
    }

    /// Register the model declared by `E`.
    pub fn register_kind<E: EnumKind>(&self) -> Result<(), RegistryError> {
        self.register(E::model())
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.read_table(path).is_some()
    }

    /// Registered enum paths, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Return the member of `path` whose canonical key is `key`.
    pub fn make(&self, path: &str, key: &str) -> Result<EnumValue, CastError> {
        let table = self.table(path)?;
        let index = *table.by_value.get(key).ok_or_else(|| table.unknown(key))?;

        Ok(table.instance(index))
    }

    /// Typed form of [`Self::make`].
    pub fn make_kind<E: Path>(&self, key: &str) -> Result<EnumValue, CastError> {
        self.make(E::PATH, key)
    }

    /// Resolve a raw storage scalar: text by canonical key, integers by ordinal.
    pub fn resolve(&self, path: &str, raw: &RawScalar) -> Result<EnumValue, CastError> {
        match raw {
            RawScalar::Text(key) => self.make(path, key),
            RawScalar::Int(ordinal) => self.resolve_ordinal(path, *ordinal),
        }
    }

    /// Return the member of `path` declared as `name`.
    pub fn resolve_name(&self, path: &str, name: &str) -> Result<EnumValue, CastError> {
        let table = self.table(path)?;
        let index = *table.by_name.get(name).ok_or_else(|| table.unknown(name))?;

        Ok(table.instance(index))
    }

    pub fn resolve_ordinal(&self, path: &str, ordinal: i64) -> Result<EnumValue, CastError> {
        let table = self.table(path)?;
        let index = *table
            .by_ordinal
            .get(&ordinal)
            .ok_or_else(|| table.unknown(ordinal.to_string()))?;

        Ok(table.instance(index))
    }

    /// All members of `path` in declaration order.
    pub fn members(&self, path: &str) -> Result<Vec<EnumValue>, CastError> {
        let table = self.table(path)?;

        Ok((0..table.slots.len())
            .map(|index| table.instance(index))
            .collect())
    }

    fn read_table(&self, path: &str) -> Option<Arc<EnumTable>> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    fn table(&self, path: &str) -> Result<Arc<EnumTable>, CastError> {
        self.read_table(path)
            .ok_or_else(|| CastError::UnknownEnumType {
                enum_path: path.to_string(),
            })
    }
}

impl Default for EnumRegistry {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ColorEnum, StatusEnum, registry};
    use std::thread;

    #[test]
    fn make_returns_the_same_instance() {
        let reg = registry();
        let a = reg.make_kind::<StatusEnum>("draft").unwrap();
        let b = reg.make(StatusEnum::PATH, "draft").unwrap();

        assert!(a.same_instance(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn make_uses_the_stored_value_not_the_name() {
        let reg = registry();
        let archived = reg.make_kind::<StatusEnum>("stored archive").unwrap();

        assert_eq!(archived.name(), "archived");
        assert!(matches!(
            reg.make_kind::<StatusEnum>("archived"),
            Err(CastError::UnknownMember { key, .. }) if key == "archived"
        ));
        assert!(
            reg.resolve_name(StatusEnum::PATH, "archived")
                .unwrap()
                .same_instance(&archived)
        );
    }

    #[test]
    fn resolve_routes_integers_to_ordinals() {
        let reg = registry();
        let published = reg.resolve(StatusEnum::PATH, &RawScalar::Int(2)).unwrap();
        let draft = reg
            .resolve(StatusEnum::PATH, &RawScalar::Text("draft".to_string()))
            .unwrap();

        assert_eq!(published.name(), "published");
        assert_eq!(draft.ordinal(), 0);
        assert!(matches!(
            reg.resolve(StatusEnum::PATH, &RawScalar::Int(9)),
            Err(CastError::UnknownMember { key, .. }) if key == "9"
        ));
    }

    #[test]
    fn unknown_paths_are_reported() {
        let reg = registry();

        assert!(matches!(
            reg.make("blog::Missing", "draft"),
            Err(CastError::UnknownEnumType { enum_path }) if enum_path == "blog::Missing"
        ));
        assert!(!reg.contains("blog::Missing"));
    }

    #[test]
    fn members_follow_declaration_order() {
        let reg = registry();
        let names: Vec<_> = reg
            .members(StatusEnum::PATH)
            .unwrap()
            .iter()
            .map(|member| member.name().to_string())
            .collect();

        assert_eq!(names, ["draft", "archived", "published"]);
        assert_eq!(reg.paths(), [ColorEnum::PATH, StatusEnum::PATH]);
    }

    #[test]
    fn re_registering_is_idempotent_but_conflicts_fail() {
        let reg = registry();

        reg.register_kind::<StatusEnum>().unwrap();
        assert_eq!(
            reg.register(EnumModel::new(StatusEnum::PATH).member("draft")),
            Err(RegistryError::DuplicateEnumType {
                path: StatusEnum::PATH.to_string(),
            })
        );
    }

    #[test]
    fn invalid_models_are_rejected() {
        let reg = EnumRegistry::new();
        let err = reg
            .register(EnumModel::new("blog::Bad").member_mapped("a", "x,y"))
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::InvalidModel(EnumModelError::DelimiterInValue { .. })
        ));
        assert!(!reg.contains("blog::Bad"));
    }

    #[test]
    fn registry_reserves_its_own_delimiter() {
        let piped = EnumRegistry::with_config(&CastConfig::default().with_delimiter('|'));
        piped
            .register(EnumModel::new("blog::Csv").member_mapped("pair", "a,b"))
            .unwrap();

        assert_eq!(piped.delimiter(), '|');
        assert_eq!(piped.make("blog::Csv", "a,b").unwrap().name(), "pair");
        assert!(matches!(
            piped.register(EnumModel::new("blog::Piped").member_mapped("pair", "a|b")),
            Err(RegistryError::InvalidModel(EnumModelError::DelimiterInValue {
                delimiter: '|',
                ..
            }))
        ));
        assert_eq!(EnumRegistry::default().delimiter(), DEFAULT_DELIMITER);
    }

    #[test]
    fn racing_first_touch_yields_one_instance() {
        let reg = registry();

        let values: Vec<EnumValue> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| reg.make_kind::<ColorEnum>("green").unwrap()))
                .collect();

            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let first = &values[0];
        assert!(values.iter().all(|value| value.same_instance(first)));
    }
}
