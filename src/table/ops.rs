use super::prelude::*;

const JOIN_PREFIX: &str = "s_";
const QUALIFIER: &str = "s.";

/// Relational algebra operators.
impl Table {
    /// Projects the table onto a whitespace separated attribute list, e.g.
    /// `"title year"`.
    ///
    /// The result keeps the primary key if every key attribute is projected,
    /// otherwise all projected attributes form the key. Tuples whose result
    /// key is already present are dropped.
    ///
    /// # Errors
    /// `UnknownAttribute` for a name the table doesn't declare.
    pub fn project(&self, attribute_list: &str) -> Result<Table> {
        debug!("RA> {}.project ({})", self.name(), attribute_list);
        let names: Vec<String> = attribute_list
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        let positions = self.column_positions(&names)?;
        let domains = positions.iter().map(|&p| self.domains()[p]).collect();
        let key = if self.key().iter().all(|k| names.contains(k)) {
            self.key().to_vec()
        } else {
            names.clone()
        };
        let mut result = self.derive(names, domains, key)?;
        for tuple in self.tuples() {
            let projected: Tuple = positions.iter().map(|&p| tuple[p].clone()).collect();
            if !result.contains_key(&result.key_of(&projected)?) {
                result.insert(projected)?;
            }
        }
        Ok(result)
    }

    /// Selects tuples satisfying `condition`, e.g.
    /// `"1979 < year & year < 1990"`. An empty condition selects everything.
    ///
    /// # Errors
    /// Compilation and evaluation errors of the condition abort the select.
    pub fn select(&self, condition: &str) -> Result<Table> {
        debug!("RA> {}.select ({})", self.name(), condition);
        let condition = Condition::compile(condition)?;
        let mut result = self.derive_same()?;
        for tuple in self.tuples() {
            if condition.eval(tuple, self.attributes(), self.domains())? {
                result.insert(tuple.clone())?;
            }
        }
        Ok(result)
    }

    /// Tuples of `self` followed by tuples of `other` whose key `self`
    /// doesn't hold.
    ///
    /// # Errors
    /// `Incompatible` unless both tables have the same domains.
    pub fn union(&self, other: &Table) -> Result<Table> {
        debug!("RA> {}.union ({})", self.name(), other.name());
        self.ensure_compatible(other)?;
        let mut result = self.derive_same()?;
        for tuple in self.tuples() {
            result.insert(tuple.clone())?;
        }
        for tuple in other.tuples() {
            if !result.contains_key(&result.key_of(tuple)?) {
                result.insert(tuple.clone())?;
            }
        }
        Ok(result)
    }

    /// Tuples of `self` whose key `other` doesn't hold.
    ///
    /// # Errors
    /// `Incompatible` unless both tables have the same domains.
    pub fn minus(&self, other: &Table) -> Result<Table> {
        debug!("RA> {}.minus ({})", self.name(), other.name());
        self.ensure_compatible(other)?;
        let mut result = self.derive_same()?;
        for tuple in self.tuples() {
            if !other.contains_key(&self.key_of(tuple)?) {
                result.insert(tuple.clone())?;
            }
        }
        Ok(result)
    }

    /// Equi-joins with `other` on `"a == b"`, where `a` is an attribute of
    /// `self` and `b`, optionally written `s.b`, a primary key attribute of
    /// `other`.
    ///
    /// Attributes of `other` whose names clash with `self` get the `s_`
    /// prefix. The result is keyed by the keys of both tables.
    ///
    /// # Errors
    /// `InvalidJoin` for a malformed condition, an unknown attribute, or a
    /// `b` outside `other`'s key.
    pub fn join(&self, condition: &str, other: &Table) -> Result<Table> {
        debug!(
            "RA> {}.join ({}, {})",
            self.name(),
            condition,
            other.name()
        );
        let (left, right) = match condition.split_whitespace().collect::<Vec<_>>()[..] {
            [left, "==", right] => (left, right),
            _ => {
                return Err(Error::invalid_join(format!(
                    "'{}' is not of the form 'a == b'",
                    condition
                )))
            }
        };
        let left_pos = self.column_position(left).ok_or_else(|| {
            Error::invalid_join(format!("{} is not an attribute of {}", left, self.name()))
        })?;
        let right_pos = other
            .column_position(right)
            .or_else(|| {
                right
                    .strip_prefix(QUALIFIER)
                    .and_then(|name| other.column_position(name))
            })
            .ok_or_else(|| {
                Error::invalid_join(format!(
                    "{} is not an attribute of {}",
                    right,
                    other.name()
                ))
            })?;
        if !other.key_positions().contains(&right_pos) {
            return Err(Error::invalid_join(format!(
                "{} is not part of the primary key of {}",
                other.attributes()[right_pos],
                other.name()
            )));
        }

        let renamed = self.rename_clashing(other.attributes());
        let attributes = self.attributes().iter().chain(&renamed).cloned().collect();
        let domains = self.domains().iter().chain(other.domains()).copied().collect();
        let key = self
            .key()
            .iter()
            .cloned()
            .chain(other.key_positions().iter().map(|&p| renamed[p].clone()))
            .collect();
        let mut result = self.derive(attributes, domains, key)?;

        let by_index = other.key_positions() == [right_pos];
        for tuple in self.tuples() {
            let value = &tuple[left_pos];
            if by_index {
                if let Some(matched) = other.get(&Key::from(value.clone())) {
                    result.insert(joined(tuple, matched))?;
                }
            } else {
                for matched in other.tuples().iter().filter(|t| t[right_pos] == *value) {
                    result.insert(joined(tuple, matched))?;
                }
            }
        }
        Ok(result)
    }

    /// Prefixes each clashing name of `names` with `s_` until it is unique
    /// among this table's attributes, `names` and the names picked so far.
    fn rename_clashing(&self, names: &[String]) -> Vec<String> {
        let mut taken: Vec<String> = self
            .attributes()
            .iter()
            .chain(names)
            .map(|a| a.to_ascii_lowercase())
            .collect();
        names
            .iter()
            .map(|a| {
                if !self.attributes().iter().any(|s| s.eq_ignore_ascii_case(a)) {
                    return a.clone();
                }
                let mut name = format!("{}{}", JOIN_PREFIX, a);
                while taken.contains(&name.to_ascii_lowercase()) {
                    name = format!("{}{}", JOIN_PREFIX, name);
                }
                taken.push(name.to_ascii_lowercase());
                name
            })
            .collect()
    }

    fn ensure_compatible(&self, other: &Table) -> Result<()> {
        if self.is_compatible(other) {
            return Ok(());
        }
        error!(
            "table {} is not compatible with {}",
            self.name(),
            other.name()
        );
        Err(Error::incompatible(format!(
            "{} ({}) vs {} ({})",
            self.name(),
            list(self.domains()),
            other.name(),
            list(other.domains())
        )))
    }
}

fn joined(left: &[Value], right: &[Value]) -> Tuple {
    left.iter().chain(right).cloned().collect()
}

fn list(domains: &[Domain]) -> String {
    domains
        .iter()
        .map(Domain::name)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Builder;

    fn table(name: &str, attributes: &str, domains: &str, key: &str, kind: IndexKind) -> Table {
        Builder::new()
            .name(name)
            .attributes(attributes)
            .domains(domains)
            .key(key)
            .index(kind)
            .build()
            .unwrap()
    }

    fn movie(kind: IndexKind) -> Table {
        let mut movie = table(
            "movie",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
            kind,
        );
        for (title, year, length, genre, studio, producer) in [
            ("Star_Wars", 1977, 124, "sciFi", "Fox", 12345),
            ("Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345),
            ("Rocky", 1985, 200, "action", "Universal", 12125),
            ("Rambo", 1978, 100, "action", "Universal", 32355),
        ] {
            movie
                .insert(vec![
                    title.into(),
                    year.into(),
                    length.into(),
                    genre.into(),
                    studio.into(),
                    producer.into(),
                ])
                .unwrap();
        }
        movie
    }

    fn studio(kind: IndexKind) -> Table {
        let mut studio = table(
            "studio",
            "name address presNo",
            "String String Integer",
            "name",
            kind,
        );
        for (name, address, pres) in [
            ("Fox", "Los_Angeles", 7777),
            ("Universal", "Universal_City", 8888),
            ("DreamWorks", "Universal_City", 9999),
        ] {
            studio
                .insert(vec![name.into(), address.into(), pres.into()])
                .unwrap();
        }
        studio
    }

    const KINDS: [IndexKind; 3] = [IndexKind::TreeMap, IndexKind::BpTree, IndexKind::ExtHash];

    #[test]
    fn project_keeps_or_replaces_key() {
        for kind in KINDS {
            let movie = movie(kind);
            let keyed = movie.project("title year genre").unwrap();
            assert_eq!(keyed.key(), ["title", "year"]);
            assert_eq!(keyed.tuple_count(), 4);

            let genres = movie.project("genre").unwrap();
            assert_eq!(genres.key(), ["genre"]);
            assert_eq!(genres.tuple_count(), 2);
            assert_eq!(genres.domains(), [Domain::String]);

            assert_eq!(
                movie.project("title budget").unwrap_err().kind(),
                Kind::UnknownAttribute
            );
        }
    }

    #[test]
    fn select_counts() {
        for kind in KINDS {
            let movie = movie(kind);
            assert_eq!(movie.select("year < 1980").unwrap().tuple_count(), 2);
            assert_eq!(movie.select("1979 < year & year < 1990").unwrap().tuple_count(), 2);
            assert_eq!(movie.select("studioName == 'Fox'").unwrap().tuple_count(), 2);
            assert_eq!(movie.select("").unwrap().tuple_count(), 4);
            assert_eq!(movie.select("length > 500").unwrap().tuple_count(), 0);
            assert_eq!(
                movie.select("year < 'soon'").unwrap_err().kind(),
                Kind::Parse
            );
        }
    }

    #[test]
    fn union_and_minus() {
        for kind in KINDS {
            let movie = movie(kind);
            let old = movie.select("year < 1980").unwrap();
            let fox = movie.select("studioName == 'Fox'").unwrap();
            assert_eq!(old.union(&fox).unwrap().tuple_count(), 3);
            assert_eq!(old.minus(&fox).unwrap().tuple_count(), 1);
            assert_eq!(fox.minus(&fox).unwrap().tuple_count(), 0);

            let studio = studio(kind);
            assert_eq!(movie.union(&studio).unwrap_err().kind(), Kind::Incompatible);
            assert_eq!(movie.minus(&studio).unwrap_err().kind(), Kind::Incompatible);
        }
    }

    #[test]
    fn join_on_key() {
        for kind in KINDS {
            let movie = movie(kind);
            let studio = studio(kind);
            let joined = movie.join("studioName == name", &studio).unwrap();
            assert_eq!(joined.tuple_count(), 4);
            assert_eq!(joined.attributes().len(), 9);
            assert_eq!(joined.key(), ["title", "year", "name"]);

            let qualified = movie.join("studioName == s.name", &studio).unwrap();
            assert_eq!(qualified.tuple_count(), 4);
        }
    }

    #[test]
    fn join_renames_clashing_attributes() {
        let movie = movie(IndexKind::TreeMap);
        let joined = movie.join("title == title", &movie).unwrap();
        assert_eq!(joined.attributes()[6], "s_title");
        assert_eq!(joined.attributes()[7], "s_year");
        assert_eq!(joined.key(), ["title", "year", "s_title", "s_year"]);
        assert_eq!(joined.tuple_count(), 4);
    }

    #[test]
    fn join_on_partial_key_scans() {
        let movie = movie(IndexKind::BpTree);
        let star_in = {
            let mut t = table(
                "starsIn",
                "movieTitle movieYear starName",
                "String Integer String",
                "movieTitle movieYear starName",
                IndexKind::BpTree,
            );
            t.insert(vec!["Star_Wars".into(), 1977.into(), "Carrie_Fisher".into()])
                .unwrap();
            t.insert(vec!["Star_Wars".into(), 1977.into(), "Mark_Hamill".into()])
                .unwrap();
            t.insert(vec!["Rocky".into(), 1985.into(), "Sylvester_Stallone".into()])
                .unwrap();
            t
        };
        let joined = movie.join("title == movieTitle", &star_in).unwrap();
        assert_eq!(joined.tuple_count(), 3);
    }

    #[test]
    fn join_prefix_repeats_until_unique() {
        let mut left = table("a", "name s_name", "String String", "name", IndexKind::TreeMap);
        left.insert(vec!["Fox".into(), "x".into()]).unwrap();
        let mut right = table("b", "name", "String", "name", IndexKind::ExtHash);
        right.insert(vec!["Fox".into()]).unwrap();
        let joined = left.join("name == name", &right).unwrap();
        assert_eq!(joined.attributes(), ["name", "s_name", "s_s_name"]);
        assert_eq!(joined.tuple_count(), 1);

        let mut right = table("c", "name s_name", "String String", "name", IndexKind::BpTree);
        right.insert(vec!["Fox".into(), "y".into()]).unwrap();
        let mut left = table("d", "name", "String", "name", IndexKind::TreeMap);
        left.insert(vec!["Fox".into()]).unwrap();
        let joined = left.join("name == name", &right).unwrap();
        assert_eq!(joined.attributes(), ["name", "s_s_name", "s_name"]);
        assert_eq!(joined.tuple_count(), 1);
    }

    #[test]
    fn invalid_joins() {
        let movie = movie(IndexKind::TreeMap);
        let studio = studio(IndexKind::TreeMap);
        for bad in [
            "studioName = name",
            "studioName == ",
            "studioName == name & year == 1",
            "director == name",
            "studioName == owner",
            "studioName == address",
        ] {
            assert_eq!(
                movie.join(bad, &studio).unwrap_err().kind(),
                Kind::InvalidJoin,
                "{}",
                bad
            );
        }
    }
}
