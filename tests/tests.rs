#[macro_use]
extern crate log;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tabula::{
    tools::{sql, ForeignKey, TupleGenerator},
    BpTree, Builder, ExtHash, Index, IndexConfig, IndexKind, Key, Kind, OrderedIndex, Table,
    Value,
};

mod common;

use common::{classic_movies, film, recent_movies, studio_table, KINDS};

fn titles(table: &Table) -> Vec<String> {
    let mut titles: Vec<String> = table
        .tuples()
        .iter()
        .map(|t| t[0].to_string())
        .collect();
    titles.sort();
    titles
}

#[test]
fn test_project() {
    common::init_logger();
    for kind in KINDS {
        let movie = classic_movies(kind);
        let projected = movie.project("title year").unwrap();
        assert_eq!(projected.attributes().len(), 2);
        assert_eq!(projected.tuple_count(), 4);
        let projected = movie.project("year title genre length").unwrap();
        assert_eq!(projected.attributes().len(), 4);
        assert_eq!(projected.attributes()[0], "year");
        debug!("{}", projected);
    }
}

#[test]
fn test_project_drops_duplicates() {
    common::init_logger();
    for kind in KINDS {
        let genres = classic_movies(kind).project("genre").unwrap();
        assert_eq!(genres.key(), ["genre".to_owned()]);
        assert_eq!(genres.tuple_count(), 2);
    }
}

#[test]
fn test_project_unknown_attribute() {
    let movie = classic_movies(IndexKind::TreeMap);
    let err = movie.project("title budget").unwrap_err();
    assert_eq!(err.kind(), Kind::UnknownAttribute);
}

#[test]
fn test_select() {
    common::init_logger();
    for kind in KINDS {
        let movie = classic_movies(kind);
        assert_eq!(movie.select("'true' == 'true'").unwrap().tuple_count(), 4);
        assert_eq!(movie.select("").unwrap().tuple_count(), 4);
        assert_eq!(
            movie.select("title == 'Star_Wars'").unwrap().tuple_count(),
            1
        );

        let recent = recent_movies(kind);
        assert_eq!(
            recent
                .select("year < 2000 & year > 1900")
                .unwrap()
                .tuple_count(),
            3
        );
        let nested = recent
            .select("title == 'Star_Wars'")
            .unwrap()
            .select("year > 2000")
            .unwrap();
        assert_eq!(nested.tuple_count(), 0);
        let either = recent
            .select("title == 'Star_Wars' | title == 'A_Separation'")
            .unwrap();
        assert_eq!(either.tuple_count(), 2);
        assert_eq!(titles(&either), ["A_Separation", "Star_Wars"]);
        let both = recent
            .select("title == 'Star_Wars' & title == 'A_Separation'")
            .unwrap();
        assert_eq!(both.tuple_count(), 0);
    }
}

#[test]
fn test_select_literal_on_the_left() {
    for kind in KINDS {
        let movie = classic_movies(kind);
        let eighties = movie.select("1979 < year & year < 1990").unwrap();
        assert_eq!(titles(&eighties), ["Rocky", "Star_Wars_2"]);
    }
}

#[test]
fn test_select_mixed_operators() {
    let movie = classic_movies(IndexKind::BpTree);
    let picked = movie
        .select("length < 200 & producerNo == 32355 | year < 1978")
        .unwrap();
    assert_eq!(titles(&picked), ["Rambo", "Star_Wars"]);
}

#[test]
fn test_select_errors() {
    let movie = classic_movies(IndexKind::TreeMap);
    for bad in ["year <", "& year < 1990", "year 1990", "year & title"] {
        let err = movie.select(bad).unwrap_err();
        assert_eq!(err.kind(), Kind::Condition, "{}: {}", bad, err);
    }
    // unknown names are plain literals
    assert_eq!(movie.select("budget == 3").unwrap().tuple_count(), 0);
    let err = movie.select("year == 'abc'").unwrap_err();
    assert_eq!(err.kind(), Kind::Parse);
}

#[test]
fn test_union() {
    common::init_logger();
    for kind in KINDS {
        let classic = classic_movies(kind);
        let recent = recent_movies(kind);
        assert_eq!(classic.union(&recent).unwrap().tuple_count(), 5);
        assert_eq!(classic.union(&classic).unwrap().tuple_count(), 4);
        assert_eq!(recent.union(&recent).unwrap().tuple_count(), 4);
    }
}

#[test]
fn test_minus() {
    common::init_logger();
    for kind in KINDS {
        let classic = classic_movies(kind);
        let recent = recent_movies(kind);
        let diff = classic.minus(&recent).unwrap();
        assert_eq!(diff.tuple_count(), 1);
        assert_eq!(titles(&diff), ["Rambo"]);
        assert_eq!(classic.minus(&classic).unwrap().tuple_count(), 0);
        let diff = recent.minus(&classic).unwrap();
        assert_eq!(titles(&diff), ["A_Separation"]);
    }
}

#[test]
fn test_incompatible_tables() {
    let movie = classic_movies(IndexKind::TreeMap);
    let studio = studio_table(IndexKind::TreeMap);
    assert_eq!(movie.union(&studio).unwrap_err().kind(), Kind::Incompatible);
    assert_eq!(movie.minus(&studio).unwrap_err().kind(), Kind::Incompatible);
}

#[test]
fn test_derived_table_names() {
    let movie = classic_movies(IndexKind::TreeMap);
    assert_eq!(movie.select("").unwrap().name(), "movie0");
    assert_eq!(movie.project("title").unwrap().name(), "movie1");
    assert_eq!(movie.union(&movie).unwrap().name(), "movie2");
}

#[test]
fn test_join() {
    common::init_logger();
    for kind in KINDS {
        let movie = classic_movies(kind);
        let studio = studio_table(kind);
        let joined = movie.join("studioName == name", &studio).unwrap();
        assert_eq!(joined.attributes().len(), 9);
        assert_eq!(joined.tuple_count(), 4);
        assert_eq!(
            joined.key(),
            ["title".to_owned(), "year".to_owned(), "name".to_owned()]
        );
        let pos = joined.column_position("address").unwrap();
        for tuple in joined.tuples() {
            let expected = if tuple[4] == Value::from("Fox") {
                "Los_Angeles"
            } else {
                "Universal_City"
            };
            assert_eq!(tuple[pos], Value::from(expected));
        }
        let qualified = movie.join("studioName == s.name", &studio).unwrap();
        assert_eq!(qualified.tuple_count(), 4);
        debug!("{}", joined);
    }
}

#[test]
fn test_self_join_renames() {
    for kind in KINDS {
        let movie = classic_movies(kind);
        let joined = movie.join("title == title", &movie).unwrap();
        assert_eq!(joined.attributes().len(), 12);
        assert_eq!(joined.attributes()[6], "s_title");
        assert_eq!(joined.attributes()[11], "s_producerNo");
        assert_eq!(joined.tuple_count(), 4);
    }
}

#[test]
fn test_join_errors() {
    let movie = classic_movies(IndexKind::TreeMap);
    let studio = studio_table(IndexKind::TreeMap);
    for bad in [
        "studioName = name",
        "studioName == address",
        "budget == name",
        "studioName == owner",
        "studioName",
    ] {
        let err = movie.join(bad, &studio).unwrap_err();
        assert_eq!(err.kind(), Kind::InvalidJoin, "{}", bad);
    }
}

#[test]
fn test_insert_and_lookup() {
    for kind in KINDS {
        let mut movie = classic_movies(kind);
        let galaxy = film("Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890);
        movie.insert(galaxy.clone()).unwrap();
        let key = Key::new(vec!["Galaxy_Quest".into(), Value::Int(1999)]);
        assert_eq!(movie.get(&key), Some(&galaxy));
        assert_eq!(movie.tuple_count(), 5);

        let mut wrong = galaxy;
        wrong[1] = Value::Str("1999".into());
        assert_eq!(movie.insert(wrong).unwrap_err().kind(), Kind::DomainMismatch);
        assert_eq!(movie.tuple_count(), 5);
    }
}

#[test]
fn test_pack_unpack() {
    let movie = classic_movies(IndexKind::TreeMap);
    for tuple in movie.tuples() {
        let record = movie.pack(tuple).unwrap();
        assert_eq!(record.len(), movie.tuple_size());
        assert_eq!(&movie.unpack(&record).unwrap(), tuple);
    }
    let long = film(&"x".repeat(100), 1977, 124, "sciFi", "Fox", 12345);
    assert_eq!(movie.pack(&long).unwrap_err().kind(), Kind::Codec);
}

#[test]
fn test_bptree_ranges() {
    common::init_logger();
    let mut tree = BpTree::new();
    for k in [10, 20, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130] {
        tree.put(k, k * 2).unwrap();
    }
    let head: Vec<i32> = tree.head_map(&56).into_keys().collect();
    assert_eq!(head, [10, 20, 40, 50]);
    let sub: Vec<i32> = tree.sub_map(&49, &119).into_keys().collect();
    assert_eq!(sub, [50, 60, 70, 80, 90, 100, 110]);
    assert!(tree.sub_map(&90, &90).is_empty());
    assert_eq!(tree.first_key(), Some(&10));
    assert_eq!(tree.last_key(), Some(&130));
    assert_eq!(tree.size(), 12);
    assert_eq!(tree.put(40, 0).unwrap_err().kind(), Kind::DuplicateKey);
    assert_eq!(tree.get(&40), Some(&80));
    tree.check_invariants().unwrap();
}

#[test]
fn test_ext_hash_random_keys() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut table = ExtHash::with_buckets(4).unwrap();
    let keys: Vec<i64> = (0..2000).map(|_| rng.gen_range(0..1_000_000)).collect();
    let mut stored = std::collections::HashSet::new();
    for k in &keys {
        if stored.insert(*k) {
            table.put(*k, k.to_string()).unwrap();
        }
    }
    for k in &stored {
        assert_eq!(table.get(k), Some(&k.to_string()));
    }
    assert_eq!(table.entries().len(), stored.len());
    table.check_invariants().unwrap();
}

#[test]
fn test_index_config() {
    let config = IndexConfig {
        bptree_order: 4,
        ..IndexConfig::with_kind(IndexKind::BpTree)
    };
    let mut index = config.build::<i32, &str>().unwrap();
    index.put(1, "one").unwrap();
    assert_eq!(index.get(&1), Some(&"one"));

    let bad = IndexConfig {
        hash_initial_buckets: 3,
        ..IndexConfig::with_kind(IndexKind::ExtHash)
    };
    assert_eq!(bad.build::<i32, i32>().unwrap_err().kind(), Kind::WrongConfig);

    let table = Builder::new()
        .name("t")
        .attributes("a")
        .domains("Integer")
        .key("a")
        .index_config(config)
        .build()
        .unwrap();
    assert_eq!(table.select("").unwrap().index_config().bptree_order, 4);
}

#[test]
fn test_generated_tuples_load() {
    common::init_logger();
    let mut gen = TupleGenerator::with_rng(StdRng::seed_from_u64(2024));
    gen.add_rel_schema(
        "studio",
        "name address presNo",
        "String String Integer",
        "name",
        &[],
    )
    .unwrap();
    gen.add_rel_schema(
        "movie",
        common::MOVIE_ATTRIBUTES,
        common::MOVIE_DOMAINS,
        "title year",
        &[ForeignKey::new("studioName", "studio", "name")],
    )
    .unwrap();
    let generated = gen.generate(&[5, 40]).unwrap();
    assert_eq!(generated[0].len(), 5);
    assert_eq!(generated[1].len(), 40);

    for kind in KINDS {
        let mut studio = common::empty_studio(kind);
        for tuple in &generated[0] {
            studio.insert(tuple.clone()).unwrap();
        }
        let mut movie = common::movie_table(kind, Vec::new());
        for tuple in &generated[1] {
            movie.insert(tuple.clone()).unwrap();
        }
        assert_eq!(movie.tuple_count(), 40);
        let joined = movie.join("studioName == name", &studio).unwrap();
        assert_eq!(joined.tuple_count(), 40);
    }

    let columns: Vec<String> = ["name", "address", "presNo"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    let statements: Vec<String> =
        sql::insert_statements("studio", &columns, &generated[0]).collect();
    assert_eq!(statements.len(), 5);
    assert!(statements
        .iter()
        .all(|s| s.starts_with("insert into studio (name, address, presNo) VALUES ('")));
}
