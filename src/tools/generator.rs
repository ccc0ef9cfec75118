use super::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

const MAX_ATTEMPTS: usize = 1000;
const MAX_DOUBLE_SCALE: i32 = 100_000;

/// Foreign key of a generated relation: `columns` take their values from
/// `referenced` columns of a single tuple of `table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referencing attributes
    pub columns: Vec<String>,
    /// Referenced relation
    pub table: String,
    /// Referenced attributes, pairwise with `columns`
    pub referenced: Vec<String>,
}

impl ForeignKey {
    /// Builds foreign key from whitespace separated attribute lists.
    pub fn new(columns: &str, table: &str, referenced: &str) -> Self {
        Self {
            columns: split(columns),
            table: table.to_owned(),
            referenced: split(referenced),
        }
    }
}

#[derive(Debug, Clone)]
struct RelSchema {
    name: String,
    attributes: Vec<String>,
    domains: Vec<Domain>,
    key_positions: Vec<usize>,
    foreign_keys: Vec<ForeignKey>,
}

/// Foreign key resolved to positions.
#[derive(Debug)]
struct Link {
    relation: usize,
    columns: Vec<usize>,
    referenced: Vec<usize>,
}

/// Random tuple source for a schema of related tables.
///
/// Relations are generated in registration order. Every relation gets
/// unique primary keys, foreign key columns copy values from a random tuple
/// of an earlier relation, so a referenced relation must be registered first.
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use tabula::tools::{ForeignKey, TupleGenerator};
///
/// let mut gen = TupleGenerator::with_rng(StdRng::seed_from_u64(1));
/// gen.add_rel_schema("studio", "name address", "String String", "name", &[])
///     .unwrap();
/// gen.add_rel_schema(
///     "movie",
///     "title studioName",
///     "String String",
///     "title",
///     &[ForeignKey::new("studioName", "studio", "name")],
/// )
/// .unwrap();
/// let tuples = gen.generate(&[3, 10]).unwrap();
/// assert_eq!(tuples[1].len(), 10);
/// ```
#[derive(Debug)]
pub struct TupleGenerator<R = StdRng> {
    schemas: Vec<RelSchema>,
    rng: R,
}

impl Default for TupleGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl TupleGenerator<StdRng> {
    /// Creates generator seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> TupleGenerator<R> {
    /// Creates generator drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            schemas: Vec::new(),
            rng,
        }
    }

    /// Registers a relation. Lists are whitespace separated.
    ///
    /// # Errors
    /// `Parse` for an unknown domain, `WrongConfig` if the lists don't agree
    /// or a key or foreign key column is not an attribute.
    pub fn add_rel_schema(
        &mut self,
        name: &str,
        attributes: &str,
        domains: &str,
        primary_key: &str,
        foreign_keys: &[ForeignKey],
    ) -> Result<()> {
        let attributes = split(attributes);
        let domains = crate::types::parse_domains(domains)?;
        if attributes.is_empty() || attributes.len() != domains.len() {
            return Err(Error::wrong_config(format!(
                "relation {} has {} attributes and {} domains",
                name,
                attributes.len(),
                domains.len()
            )));
        }
        let key_positions = positions(name, &attributes, &split(primary_key))?;
        if key_positions.is_empty() {
            return Err(Error::wrong_config(format!("relation {} has no key", name)));
        }
        for fk in foreign_keys {
            if fk.columns.is_empty() || fk.columns.len() != fk.referenced.len() {
                return Err(Error::wrong_config(format!(
                    "foreign key {:?} of {} pairs {} columns with {}",
                    fk,
                    name,
                    fk.columns.len(),
                    fk.referenced.len()
                )));
            }
            let columns = positions(name, &attributes, &fk.columns)?;
            if let Some(target) = self.schemas.iter().find(|s| s.name == fk.table) {
                let referenced = positions(&target.name, &target.attributes, &fk.referenced)?;
                check_domains(name, &domains, &columns, target, &referenced)?;
            }
        }
        debug!("relation {} registered as #{}", name, self.schemas.len());
        self.schemas.push(RelSchema {
            name: name.to_owned(),
            attributes,
            domains,
            key_positions,
            foreign_keys: foreign_keys.to_vec(),
        });
        Ok(())
    }

    /// Names of the registered relations in registration order.
    pub fn relation_names(&self) -> Vec<&str> {
        self.schemas.iter().map(|s| s.name.as_str()).collect()
    }

    /// Generates `counts[i]` tuples for the `i`-th registered relation.
    ///
    /// # Errors
    /// `WrongConfig` if the counts don't match the relations, a foreign key
    /// refers to a relation registered later or to an empty one, or unique
    /// keys can't be found.
    pub fn generate(&mut self, counts: &[usize]) -> Result<Vec<Vec<Tuple>>> {
        if counts.len() != self.schemas.len() {
            return Err(Error::wrong_config(format!(
                "{} counts given for {} relations",
                counts.len(),
                self.schemas.len()
            )));
        }
        let Self { schemas, rng } = self;
        let mut generated: Vec<Vec<Tuple>> = Vec::with_capacity(schemas.len());
        for (i, (schema, &count)) in schemas.iter().zip(counts).enumerate() {
            let links = schema
                .foreign_keys
                .iter()
                .map(|fk| resolve(schemas, i, schema, fk))
                .collect::<Result<Vec<_>>>()?;
            if count > 0 {
                if let Some(link) = links.iter().find(|l| generated[l.relation].is_empty()) {
                    return Err(Error::wrong_config(format!(
                        "{} references {} which has no tuples",
                        schema.name, schemas[link.relation].name
                    )));
                }
            }
            let mut keys = HashSet::with_capacity(count);
            let mut tuples = Vec::with_capacity(count);
            for _ in 0..count {
                let tuple = unique_tuple(rng, schema, &links, &generated, &mut keys)?;
                tuples.push(tuple);
            }
            trace!("{} tuples generated for {}", tuples.len(), schema.name);
            generated.push(tuples);
        }
        Ok(generated)
    }
}

fn resolve(schemas: &[RelSchema], current: usize, schema: &RelSchema, fk: &ForeignKey) -> Result<Link> {
    let relation = schemas[..current]
        .iter()
        .position(|s| s.name == fk.table)
        .ok_or_else(|| {
            Error::wrong_config(format!(
                "{} references {}, which must be registered before it",
                schema.name, fk.table
            ))
        })?;
    let target = &schemas[relation];
    let columns = positions(&schema.name, &schema.attributes, &fk.columns)?;
    let referenced = positions(&target.name, &target.attributes, &fk.referenced)?;
    check_domains(&schema.name, &schema.domains, &columns, target, &referenced)?;
    Ok(Link {
        relation,
        columns,
        referenced,
    })
}

/// Foreign key columns copy values, so each pair must share a domain.
fn check_domains(
    name: &str,
    domains: &[Domain],
    columns: &[usize],
    target: &RelSchema,
    referenced: &[usize],
) -> Result<()> {
    for (&col, &referenced) in columns.iter().zip(referenced) {
        if domains[col] != target.domains[referenced] {
            return Err(Error::wrong_config(format!(
                "{} column #{} is {}, referenced {}.{} is {}",
                name,
                col,
                domains[col],
                target.name,
                target.attributes[referenced],
                target.domains[referenced]
            )));
        }
    }
    Ok(())
}

fn unique_tuple<R: Rng>(
    rng: &mut R,
    schema: &RelSchema,
    links: &[Link],
    generated: &[Vec<Tuple>],
    keys: &mut HashSet<Key>,
) -> Result<Tuple> {
    for _ in 0..MAX_ATTEMPTS {
        let tuple = random_tuple(rng, schema, links, generated);
        let key = Key::from_tuple(&tuple, &schema.key_positions)?;
        if keys.insert(key) {
            return Ok(tuple);
        }
    }
    Err(Error::wrong_config(format!(
        "no unique key for {} after {} attempts",
        schema.name, MAX_ATTEMPTS
    )))
}

fn random_tuple<R: Rng>(
    rng: &mut R,
    schema: &RelSchema,
    links: &[Link],
    generated: &[Vec<Tuple>],
) -> Tuple {
    let mut values: Vec<Option<Value>> = vec![None; schema.attributes.len()];
    for link in links {
        let source = &generated[link.relation];
        let row = &source[rng.gen_range(0..source.len())];
        for (&to, &from) in link.columns.iter().zip(&link.referenced) {
            values[to] = Some(row[from].clone());
        }
    }
    schema
        .attributes
        .iter()
        .zip(&schema.domains)
        .zip(values)
        .map(|((attribute, &domain), value)| {
            value.unwrap_or_else(|| random_value(rng, attribute, domain))
        })
        .collect()
}

fn random_value<R: Rng>(rng: &mut R, attribute: &str, domain: Domain) -> Value {
    match domain {
        Domain::Byte => Value::Byte(rng.gen()),
        Domain::Short => Value::Short(rng.gen()),
        Domain::Integer => Value::Int(rng.gen_range(0..i32::MAX)),
        Domain::Long => Value::Long(rng.gen_range(0..i64::from(i32::MAX))),
        Domain::Float => Value::Float(rng.gen_range(0.0..MAX_DOUBLE_SCALE as f32)),
        Domain::Double => {
            Value::Double(f64::from(rng.gen_range(0..MAX_DOUBLE_SCALE)) * rng.gen::<f64>())
        }
        Domain::Character => Value::Char(char::from(b'A' + rng.gen_range(0..26u8))),
        Domain::String => Value::Str(format!("{}{}", attribute, rng.gen_range(0..i32::MAX))),
    }
}

fn positions(relation: &str, attributes: &[String], names: &[String]) -> Result<Vec<usize>> {
    names
        .iter()
        .map(|n| {
            attributes.iter().position(|a| a == n).ok_or_else(|| {
                Error::wrong_config(format!("{} is not an attribute of {}", n, relation))
            })
        })
        .collect()
}

fn split(list: &str) -> Vec<String> {
    list.split_whitespace().map(str::to_owned).collect()
}
