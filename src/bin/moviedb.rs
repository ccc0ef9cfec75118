#[macro_use]
extern crate log;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use tabula::{
    tools::{sql, ForeignKey, TupleGenerator},
    Builder, IndexKind, Table, Tuple, Value,
};

struct Schema {
    name: &'static str,
    attributes: &'static str,
    domains: &'static str,
    key: &'static str,
}

const MOVIE: Schema = Schema {
    name: "movie",
    attributes: "title year length genre studioName producerNo",
    domains: "String Integer Integer String String Integer",
    key: "title year",
};
const CINEMA: Schema = Schema {
    name: "cinema",
    ..MOVIE
};
const MOVIE_STAR: Schema = Schema {
    name: "movieStar",
    attributes: "name address gender birthdate",
    domains: "String String Character String",
    key: "name",
};
const STARS_IN: Schema = Schema {
    name: "starsIn",
    attributes: "movieTitle movieYear starName",
    domains: "String Integer String",
    key: "movieTitle movieYear starName",
};
const MOVIE_EXEC: Schema = Schema {
    name: "movieExec",
    attributes: "certNo name address fee",
    domains: "Integer String String Float",
    key: "certNo",
};
const STUDIO: Schema = Schema {
    name: "studio",
    attributes: "name address presNo",
    domains: "String String Integer",
    key: "name",
};

fn main() -> Result<()> {
    let matches = prepare_matches();
    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("tabula", level)
        .filter_module("moviedb", level)
        .init();

    let kind: IndexKind = matches
        .value_of("index")
        .unwrap_or("treemap")
        .parse()
        .context("bad --index value")?;
    info!("index: {:?}", kind);

    match matches.value_of("generate") {
        Some(count) => {
            let count = count.parse().context("--generate expects a tuple count")?;
            generate(kind, count)
        }
        None => demo(kind),
    }
}

fn prepare_matches() -> ArgMatches {
    Command::new("moviedb")
        .about("Builds the movie database and runs relational queries on it")
        .arg(
            Arg::new("index")
                .long("index")
                .short('i')
                .takes_value(true)
                .possible_values(["treemap", "bptree", "exthash"])
                .default_value("treemap")
                .help("index structure backing every table"),
        )
        .arg(
            Arg::new("generate")
                .long("generate")
                .short('g')
                .takes_value(true)
                .value_name("N")
                .help("populate tables with N generated movies and print INSERT statements"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("log DDL, DML and relational algebra steps"),
        )
        .get_matches()
}

fn create(schema: &Schema, kind: IndexKind) -> Result<Table> {
    Builder::new()
        .name(schema.name)
        .attributes(schema.attributes)
        .domains(schema.domains)
        .key(schema.key)
        .index(kind)
        .build()
        .with_context(|| format!("create table {}", schema.name))
}

fn fill(table: &mut Table, tuples: Vec<Tuple>) -> Result<()> {
    for tuple in tuples {
        table
            .insert(tuple)
            .with_context(|| format!("insert into {}", table.name()))?;
    }
    println!("{}", table);
    Ok(())
}

fn film(title: &str, year: i32, length: i32, genre: &str, studio: &str, producer: i32) -> Tuple {
    vec![
        title.into(),
        year.into(),
        length.into(),
        genre.into(),
        studio.into(),
        producer.into(),
    ]
}

fn demo(kind: IndexKind) -> Result<()> {
    let mut movie = create(&MOVIE, kind)?;
    let mut cinema = create(&CINEMA, kind)?;
    let mut movie_star = create(&MOVIE_STAR, kind)?;
    let mut stars_in = create(&STARS_IN, kind)?;
    let mut movie_exec = create(&MOVIE_EXEC, kind)?;
    let mut studio = create(&STUDIO, kind)?;

    let films = [
        film("Star_Wars", 1977, 124, "sciFi", "Fox", 12345),
        film("Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345),
        film("Rocky", 1985, 200, "action", "Universal", 12125),
        film("Rambo", 1978, 100, "action", "Universal", 32355),
    ];
    fill(&mut movie, films.to_vec())?;
    fill(
        &mut cinema,
        vec![
            films[2].clone(),
            films[3].clone(),
            film("Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890),
        ],
    )?;
    fill(
        &mut movie_star,
        [
            ("Carrie_Fisher", "Hollywood", 'F', "9/9/99"),
            ("Mark_Hamill", "Brentwood", 'M', "8/8/88"),
            ("Harrison_Ford", "Beverly_Hills", 'M', "7/7/77"),
        ]
        .into_iter()
        .map(|(name, address, gender, born)| {
            vec![name.into(), address.into(), gender.into(), born.into()]
        })
        .collect(),
    )?;
    fill(
        &mut stars_in,
        vec![vec!["Star_Wars".into(), 1977.into(), "Carrie_Fisher".into()]],
    )?;
    fill(
        &mut movie_exec,
        vec![vec![
            9999.into(),
            "S_Spielberg".into(),
            "Hollywood".into(),
            Value::Float(10000.0),
        ]],
    )?;
    fill(
        &mut studio,
        [
            ("Fox", "Los_Angeles", 7777),
            ("Universal", "Universal_City", 8888),
            ("DreamWorks", "Universal_City", 9999),
        ]
        .into_iter()
        .map(|(name, address, pres)| vec![name.into(), address.into(), pres.into()])
        .collect(),
    )?;

    show(movie.select("title == 'Star_Wars'"));
    show(movie.select("length < 200 & producerNo == 32355 | year < 1978"));
    show(movie.project("title year"));
    show(movie_star.project("name address"));
    show(movie.union(&cinema));
    show(movie_star.union(&studio));
    show(movie.minus(&cinema));
    show(movie_star.minus(&studio));
    show(movie.join("studioName == name", &studio));
    show(movie_star.join("name == starName", &stars_in));
    Ok(())
}

/// Query failures are reported and the demo goes on.
fn show(result: tabula::Result<Table>) {
    match result {
        Ok(table) => println!("{}", table),
        Err(e) => error!("query failed: {}", e),
    }
}

fn generate(kind: IndexKind, movies: usize) -> Result<()> {
    let schemas = [&STUDIO, &MOVIE, &MOVIE_STAR, &STARS_IN];
    let mut generator = TupleGenerator::new();
    let references = [
        Vec::new(),
        vec![ForeignKey::new("studioName", "studio", "name")],
        Vec::new(),
        vec![
            ForeignKey::new("movieTitle movieYear", "movie", "title year"),
            ForeignKey::new("starName", "movieStar", "name"),
        ],
    ];
    for (schema, fks) in schemas.iter().zip(&references) {
        generator.add_rel_schema(
            schema.name,
            schema.attributes,
            schema.domains,
            schema.key,
            fks,
        )?;
    }
    let counts = [
        (movies / 10).max(1),
        movies,
        (movies / 2).max(1),
        movies,
    ];
    let generated = generator.generate(&counts)?;
    for (schema, tuples) in schemas.iter().zip(generated) {
        let mut table = create(schema, kind)?;
        for stmt in sql::insert_statements(table.name(), table.attributes(), &tuples) {
            println!("{}", stmt);
        }
        for tuple in tuples {
            table.insert(tuple)?;
        }
        info!("{}: {} tuples loaded", table.name(), table.tuple_count());
    }
    Ok(())
}
