use super::prelude::*;

#[derive(Debug, Clone, Default)]
pub(crate) struct Config {
    name: Option<String>,
    attributes: Vec<String>,
    domains: Option<String>,
    key: Vec<String>,
    index: IndexConfig,
}

// Getters
impl Config {
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[inline]
    pub fn domains(&self) -> Option<&str> {
        self.domains.as_deref()
    }

    #[inline]
    pub fn key(&self) -> &[String] {
        &self.key
    }

    #[inline]
    pub fn index(&self) -> &IndexConfig {
        &self.index
    }
}

//Setters
impl Config {
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub fn set_attributes(&mut self, attributes: Vec<String>) {
        self.attributes = attributes;
    }

    pub fn set_domains(&mut self, domains: String) {
        self.domains = Some(domains);
    }

    pub fn set_key(&mut self, key: Vec<String>) {
        self.key = key;
    }

    pub fn index_mut(&mut self) -> &mut IndexConfig {
        &mut self.index
    }

    pub fn set_index(&mut self, index: IndexConfig) {
        self.index = index;
    }
}
