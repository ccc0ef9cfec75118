use super::prelude::*;
use crate::record;
use bytes::Bytes;
use std::cell::Cell;

/// In-memory relation.
///
/// Tuples are kept in insertion order, the index maps the primary key of a
/// tuple to its position in that list. Relational operators never modify
/// their operands, they build new tables named after the source table with
/// a per-table sequence number appended.
#[derive(Debug)]
pub struct Table {
    name: String,
    attributes: Vec<String>,
    domains: Vec<Domain>,
    key: Vec<String>,
    key_positions: Vec<usize>,
    tuples: Vec<Tuple>,
    index: Box<dyn Index<Key, usize>>,
    index_config: IndexConfig,
    derived: Cell<usize>,
}

impl Table {
    pub(crate) fn new(
        name: String,
        attributes: Vec<String>,
        domains: Vec<Domain>,
        key: Vec<String>,
        index_config: IndexConfig,
    ) -> Result<Self> {
        if attributes.is_empty() {
            return Err(Error::wrong_config(format!(
                "table {} declares no attributes",
                name
            )));
        }
        let distinct: HashSet<_> = attributes.iter().collect();
        if distinct.len() != attributes.len() {
            return Err(Error::wrong_config(format!(
                "table {} declares an attribute twice: {:?}",
                name, attributes
            )));
        }
        if attributes.len() != domains.len() {
            return Err(Error::wrong_config(format!(
                "table {} declares {} attributes but {} domains",
                name,
                attributes.len(),
                domains.len()
            )));
        }
        if key.is_empty() {
            return Err(Error::wrong_config(format!("table {} has no key", name)));
        }
        let key_positions = key
            .iter()
            .map(|k| {
                attributes.iter().position(|a| a == k).ok_or_else(|| {
                    Error::wrong_config(format!("key attribute {} is not in table {}", k, name))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let index = index_config.build()?;
        debug!(
            "DDL> create table {} ({}) key ({})",
            name,
            attributes
                .iter()
                .zip(&domains)
                .map(|(a, d)| format!("{} {}", a, d))
                .collect::<Vec<_>>()
                .join(", "),
            key.join(", ")
        );
        Ok(Self {
            name,
            attributes,
            domains,
            key,
            key_positions,
            tuples: Vec::new(),
            index,
            index_config,
            derived: Cell::new(0),
        })
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute names in declaration order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Attribute domains in declaration order.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Primary key attribute names.
    pub fn key(&self) -> &[String] {
        &self.key
    }

    /// Stored tuples in insertion order.
    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    /// Number of stored tuples.
    pub fn tuple_count(&self) -> usize {
        self.tuples.len()
    }

    /// Index configuration this table and the tables derived from it use.
    pub fn index_config(&self) -> &IndexConfig {
        &self.index_config
    }

    /// The primary key index, mapping keys to positions in [`Table::tuples`].
    pub fn index(&self) -> &dyn Index<Key, usize> {
        self.index.as_ref()
    }

    /// Position of the attribute named `name`.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a == name)
    }

    pub(super) fn column_positions(&self, names: &[String]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                self.column_position(name).ok_or_else(|| {
                    Error::unknown_attribute(format!("{} in table {}", name, self.name))
                })
            })
            .collect()
    }

    pub(super) fn key_positions(&self) -> &[usize] {
        &self.key_positions
    }

    /// Primary key of `tuple`.
    pub fn key_of(&self, tuple: &[Value]) -> Result<Key> {
        Key::from_tuple(tuple, &self.key_positions)
    }

    /// Tuple stored under `key`.
    pub fn get(&self, key: &Key) -> Option<&Tuple> {
        self.index.get(key).and_then(|&pos| self.tuples.get(pos))
    }

    /// Whether a tuple is stored under `key`.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts `tuple` after checking it against the table domains.
    ///
    /// The tuple is stored only if the index accepts its key: with a
    /// [`IndexKind::BpTree`] index a second tuple under the same key is
    /// rejected, [`IndexKind::TreeMap`] repoints the key to the new tuple and
    /// [`IndexKind::ExtHash`] keeps both.
    ///
    /// # Errors
    /// `DomainMismatch` for a tuple that doesn't fit the schema, index errors
    /// as returned by the index.
    pub fn insert(&mut self, tuple: Tuple) -> Result<()> {
        debug!(
            "DML> insert into {} values ({})",
            self.name,
            tuple
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        type_check(&tuple, &self.domains)?;
        let key = self.key_of(&tuple)?;
        let pos = self.tuples.len();
        if let Err(e) = self.index.put(key, pos) {
            if e.is(Kind::DuplicateKey) {
                warn!("{}: insert skipped, {}", self.name, e);
            } else {
                error!("{}: insert failed, {}", self.name, e);
            }
            return Err(e);
        }
        self.tuples.push(tuple);
        Ok(())
    }

    /// Size of a packed tuple of this table.
    pub fn tuple_size(&self) -> usize {
        record::tuple_size(&self.domains)
    }

    /// Packs `tuple` with the table domains.
    pub fn pack(&self, tuple: &[Value]) -> Result<Bytes> {
        record::pack(tuple, &self.domains)
    }

    /// Unpacks a record produced by [`Table::pack`].
    pub fn unpack(&self, record: &[u8]) -> Result<Tuple> {
        record::unpack(record, &self.domains)
    }

    /// Whether `other` has the same number of attributes with the same
    /// domains, names may differ.
    pub fn is_compatible(&self, other: &Table) -> bool {
        self.domains == other.domains
    }

    /// Creates an empty table named after this one with the next sequence
    /// number, using the same index configuration.
    pub(super) fn derive(
        &self,
        attributes: Vec<String>,
        domains: Vec<Domain>,
        key: Vec<String>,
    ) -> Result<Table> {
        let n = self.derived.get();
        self.derived.set(n + 1);
        Table::new(
            format!("{}{}", self.name, n),
            attributes,
            domains,
            key,
            self.index_config.clone(),
        )
    }

    /// Empty table with this table's schema.
    pub(super) fn derive_same(&self) -> Result<Table> {
        self.derive(
            self.attributes.clone(),
            self.domains.clone(),
            self.key.clone(),
        )
    }
}
