use super::prelude::*;

/// `Builder` used for declaring a `Table`.
///
/// Attribute, domain and key lists are whitespace separated strings in the
/// same form the relational operators accept.
/// # Examples
/// ```
/// use tabula::{Builder, IndexKind};
///
/// let studio = Builder::new()
///     .name("studio")
///     .attributes("name address presNo")
///     .domains("String String Integer")
///     .key("name")
///     .index(IndexKind::ExtHash)
///     .hash_initial_buckets(4)
///     .build()
///     .unwrap();
/// assert_eq!(studio.attributes().len(), 3);
/// ```
#[derive(Default, Debug)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Initializes the `Builder` with defaults
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates `Table` based on given configuration
    ///
    /// # Errors
    /// Returns `WrongConfig` if the name is missing, the attribute, domain and
    /// key lists don't agree, or the index parameters are rejected, and
    /// `Parse` for an unknown domain name.
    pub fn build(self) -> Result<Table> {
        let name = self
            .config
            .name()
            .ok_or_else(|| Error::wrong_config("table name is not set"))?
            .to_owned();
        let domains = match self.config.domains() {
            Some(names) => crate::types::parse_domains(names)?,
            None => return Err(Error::wrong_config("domains are not set")),
        };
        Table::new(
            name,
            self.config.attributes().to_vec(),
            domains,
            self.config.key().to_vec(),
            self.config.index().clone(),
        )
    }

    /// Sets table name, derived tables are named after it.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        let name = name.into();
        if name.is_empty() {
            error!("passed empty table name, not set");
        } else {
            debug!("table name set to: {}", name);
            self.config.set_name(name);
        }
        self
    }

    /// Sets attribute names, e.g. `"title year length"`.
    pub fn attributes(mut self, attributes: &str) -> Self {
        self.config.set_attributes(split(attributes));
        self
    }

    /// Sets attribute domains, e.g. `"String Integer Integer"`.
    pub fn domains(mut self, domains: &str) -> Self {
        self.config.set_domains(domains.to_owned());
        self
    }

    /// Sets primary key attributes, e.g. `"title year"`.
    pub fn key(mut self, key: &str) -> Self {
        self.config.set_key(split(key));
        self
    }

    /// Selects the index structure with its default parameters kept.
    pub fn index(mut self, kind: IndexKind) -> Self {
        self.config.index_mut().kind = kind;
        debug!("index kind set to: {:?}", kind);
        self
    }

    /// Replaces the whole index configuration.
    pub fn index_config(mut self, config: IndexConfig) -> Self {
        self.config.set_index(config);
        self
    }

    /// Sets B+Tree order, used with [`IndexKind::BpTree`].
    pub fn bptree_order(mut self, order: usize) -> Self {
        self.config.index_mut().bptree_order = order;
        self
    }

    /// Sets initial extendible hash bucket count, used with
    /// [`IndexKind::ExtHash`]. Must be a power of two.
    pub fn hash_initial_buckets(mut self, buckets: usize) -> Self {
        self.config.index_mut().hash_initial_buckets = buckets;
        self
    }

    /// Sets extendible hash bucket capacity.
    pub fn hash_slots(mut self, slots: usize) -> Self {
        if slots > 0 {
            self.config.index_mut().hash_slots = slots;
        } else {
            error!("zero slot buckets are useless, not set");
        }
        self
    }
}

fn split(list: &str) -> Vec<String> {
    list.split_whitespace().map(str::to_owned).collect()
}
