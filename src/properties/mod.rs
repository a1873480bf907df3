//! Property store shared by datasets and pools.
//!
//! Both tools describe every entity as a bag of `entity, property, value, source` facts. Values are
//! kept exactly as emitted and reinterpreted on demand by typed accessors, so the same raw value
//! can be read as a size by one caller and as an integer by another. Nothing here knows which
//! property has which type.
//!
//! Read path is lenient: malformed records are dropped and unparseable values read as absent.
//! Write path is strict: [`property_pairs`] and [`property_map_flags`] refuse names that would
//! make the tool do something else than intended.
use crate::parsers::Record;
use chrono::{DateTime, Utc};
use std::collections::{hash_map, BTreeMap, HashMap};

pub mod codecs;

/// Raw value meaning "not meaningfully present".
pub static BLANK: &str = "-";
/// Pseudo property that selects every property on read. Never a valid property to write.
pub static ALL: &str = "all";

quick_error! {
    #[derive(Debug, Clone)]
    pub enum PropertyError {
        /// Property name is empty.
        EmptyName {
            display("property name is empty")
        }
        /// Property name can't be used in this context.
        Reserved(name: String) {
            display("property name '{}' is reserved", name)
        }
        /// Nothing to set.
        NoProperties {
            display("no properties given")
        }
    }
}

impl PropertyError {
    pub fn kind(&self) -> PropertyErrorKind {
        match self {
            PropertyError::EmptyName => PropertyErrorKind::EmptyName,
            PropertyError::Reserved(_) => PropertyErrorKind::Reserved,
            PropertyError::NoProperties => PropertyErrorKind::NoProperties,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PropertyErrorKind {
    EmptyName,
    Reserved,
    NoProperties,
}

impl PartialEq for PropertyError {
    fn eq(&self, other: &Self) -> bool { self.kind() == other.kind() }
}

/// Name of a property that is going to be read or written. Rejects empty names and `all`.
pub fn validate_name(name: &str) -> Result<(), PropertyError> {
    if name.is_empty() {
        return Err(PropertyError::EmptyName);
    }
    if name == ALL {
        return Err(PropertyError::Reserved(name.to_string()));
    }
    Ok(())
}

/// One fact about one entity. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[get = "pub"]
pub struct Property {
    /// Dataset or pool this property belongs to.
    entity: String,
    name:   String,
    /// Raw value as printed by the tool.
    value:  String,
    /// Where the value comes from: `default`, `local`, `inherited from tank`, `-`...
    source: String,
}

impl Property {
    pub fn new<E, N, V, S>(entity: E, name: N, value: V, source: S) -> Self
    where
        E: Into<String>,
        N: Into<String>,
        V: Into<String>,
        S: Into<String>,
    {
        Property { entity: entity.into(), name: name.into(), value: value.into(), source: source.into() }
    }

    /// Accepts only `[entity, property, value, source]` with a non-empty entity.
    pub fn from_record(record: Record) -> Option<Self> {
        if record.len() != 4 {
            return None;
        }
        let mut fields = record.into_iter();
        let entity = fields.next()?;
        if entity.is_empty() {
            return None;
        }
        let name = fields.next()?;
        let value = fields.next()?;
        let source = fields.next()?;
        Some(Property { entity, name, value, source })
    }

    /// Value unless it is the blank sentinel.
    fn meaningful(&self) -> Option<&str> {
        if self.value == BLANK {
            None
        } else {
            Some(&self.value)
        }
    }

    /// Value unless it is blank or empty.
    fn non_empty(&self) -> Option<&str> { self.meaningful().filter(|value| !value.is_empty()) }
}

/// Properties keyed by property name. Built once per query, never mutated afterwards.
///
/// Accessors return `None` when the property is missing, blank (`-`) or doesn't parse. Some of
/// them treat an empty value as missing too:
///
/// | accessor | empty value |
/// |---|---|
/// | [`string`](#method.string) | `Some("")` |
/// | [`bool`](#method.bool), [`time`](#method.time), [`uint64`](#method.uint64) | `None` |
/// | [`bytes`](#method.bytes), [`percent`](#method.percent), [`ratio`](#method.ratio) | `None`, because `""` doesn't parse |
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    inner: HashMap<String, Property>,
}

impl Properties {
    pub fn new() -> Self { Properties::default() }

    pub fn get(&self, name: &str) -> Option<&Property> { self.inner.get(name) }

    pub fn contains(&self, name: &str) -> bool { self.inner.contains_key(name) }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    pub fn iter(&self) -> hash_map::Values<'_, String, Property> { self.inner.values() }

    /// Copy of this store with only the properties of `entity`.
    pub fn filtered(&self, entity: &str) -> Properties {
        self.iter().filter(|property| property.entity() == entity).cloned().collect()
    }

    /// Raw value, `-` is absent. Empty string is a legitimate value here.
    pub fn string(&self, name: &str) -> Option<&str> { self.get(name)?.meaningful() }

    /// `on` and `enabled` in any case are `true`, anything else is `false`.
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name)?.non_empty().map(codecs::parse_bool)
    }

    /// Size in bytes. Accepts both `-p` output and human readable sizes like `42K`.
    pub fn bytes(&self, name: &str) -> Option<u64> {
        self.get(name)?.meaningful().and_then(codecs::parse_size)
    }

    pub fn percent(&self, name: &str) -> Option<u64> {
        self.get(name)?.meaningful().and_then(codecs::parse_percent)
    }

    pub fn ratio(&self, name: &str) -> Option<f64> {
        self.get(name)?.meaningful().and_then(codecs::parse_ratio)
    }

    pub fn time(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name)?.non_empty().and_then(codecs::parse_time)
    }

    pub fn uint64(&self, name: &str) -> Option<u64> {
        self.get(name)?.non_empty().and_then(codecs::parse_u64)
    }
}

/// Later property with the same name wins.
impl std::iter::FromIterator<Property> for Properties {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let inner = iter.into_iter().map(|property| (property.name.clone(), property)).collect();
        Properties { inner }
    }
}

impl IntoIterator for Properties {
    type IntoIter = hash_map::IntoValues<String, Property>;
    type Item = Property;

    fn into_iter(self) -> Self::IntoIter { self.inner.into_values() }
}

impl<'a> IntoIterator for &'a Properties {
    type IntoIter = hash_map::Values<'a, String, Property>;
    type Item = &'a Property;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Group decoded records by entity. Anything that isn't a four-field record with an entity name is
/// noise from line splitting and is dropped. Records are applied in order, last one wins.
pub fn from_records<I>(records: I) -> BTreeMap<String, Properties>
where
    I: IntoIterator<Item = Record>,
{
    let mut entities: BTreeMap<String, Properties> = BTreeMap::new();
    for property in records.into_iter().filter_map(Property::from_record) {
        entities
            .entry(property.entity.clone())
            .or_default()
            .inner
            .insert(property.name.clone(), property);
    }
    entities
}

/// `name=value` strings in ascending order.
pub fn property_pairs<I, K, V>(properties: I) -> Result<Vec<String>, PropertyError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs = properties
        .into_iter()
        .map(|(name, value)| {
            let name = name.as_ref();
            validate_name(name)?;
            Ok(format!("{}={}", name, value.as_ref()))
        })
        .collect::<Result<Vec<String>, PropertyError>>()?;
    pairs.sort_unstable();
    Ok(pairs)
}

/// `[flag, name=value]` for every property, ordered by `name=value`. No properties means no
/// flags at all.
pub fn property_map_flags<I, K, V>(flag: &str, properties: I) -> Result<Vec<String>, PropertyError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let pairs = property_pairs(properties)?;
    let mut args = Vec::with_capacity(pairs.len() * 2);
    for pair in pairs {
        args.push(flag.to_string());
        args.push(pair);
    }
    Ok(args)
}
