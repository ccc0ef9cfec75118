use crate::prelude::*;

mod domain;
mod key;
mod value;

pub use self::{
    domain::{parse_domains, Domain},
    key::Key,
    value::Value,
};

/// Ordered sequence of values, one per table attribute.
pub type Tuple = Vec<Value>;

/// Checks tuple arity and the domain of every value.
pub fn type_check(tuple: &[Value], domains: &[Domain]) -> Result<()> {
    if tuple.len() != domains.len() {
        return Err(Error::domain_mismatch(format!(
            "tuple has {} values, domain declares {}",
            tuple.len(),
            domains.len()
        )));
    }
    tuple
        .iter()
        .zip(domains)
        .enumerate()
        .try_for_each(|(i, (value, domain))| {
            if value.domain() == *domain {
                Ok(())
            } else {
                Err(Error::domain_mismatch(format!(
                    "attribute {} expects {}, got {:?}",
                    i, domain, value
                )))
            }
        })
}
