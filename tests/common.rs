#![allow(dead_code)]

use env_logger::fmt::Color;
use log::Level;
use std::io::Write;

use tabula::{Builder, IndexKind, Table, Tuple, Value};

pub const KINDS: [IndexKind; 3] = [IndexKind::TreeMap, IndexKind::BpTree, IndexKind::ExtHash];

pub const MOVIE_ATTRIBUTES: &str = "title year length genre studioName producerNo";
pub const MOVIE_DOMAINS: &str = "String Integer Integer String String Integer";

pub fn init_logger() {
    env_logger::builder()
        .format(|buf, record: &log::Record| {
            let mut style = buf.style();
            let color = match record.level() {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Green,
                Level::Debug => Color::Cyan,
                Level::Trace => Color::White,
            };
            style.set_color(color);
            writeln!(
                buf,
                "[{} {} {:>30}:{:^4}] - {}",
                buf.timestamp(),
                style.value(record.level()),
                record.module_path().unwrap_or(""),
                style.value(record.line().unwrap_or(0)),
                style.value(record.args())
            )
        })
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .unwrap_or(());
}

pub fn film(title: &str, year: i32, length: i32, genre: &str, studio: &str, producer: i32) -> Tuple {
    vec![
        title.into(),
        Value::Int(year),
        Value::Int(length),
        genre.into(),
        studio.into(),
        Value::Int(producer),
    ]
}

pub fn movie_table(kind: IndexKind, films: Vec<Tuple>) -> Table {
    let mut table = Builder::new()
        .name("movie")
        .attributes(MOVIE_ATTRIBUTES)
        .domains(MOVIE_DOMAINS)
        .key("title year")
        .index(kind)
        .build()
        .expect("movie schema is valid");
    for film in films {
        table.insert(film).expect("fixture tuple fits the schema");
    }
    table
}

/// Star_Wars, Star_Wars_2, Rocky and Rambo.
pub fn classic_movies(kind: IndexKind) -> Table {
    movie_table(
        kind,
        vec![
            film("Star_Wars", 1977, 124, "sciFi", "Fox", 12345),
            film("Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345),
            film("Rocky", 1985, 200, "action", "Universal", 12125),
            film("Rambo", 1978, 100, "action", "Universal", 32355),
        ],
    )
}

/// Star_Wars, Star_Wars_2, Rocky and A_Separation.
pub fn recent_movies(kind: IndexKind) -> Table {
    movie_table(
        kind,
        vec![
            film("Star_Wars", 1977, 124, "sciFi", "Fox", 12345),
            film("Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345),
            film("Rocky", 1985, 200, "action", "Universal", 12125),
            film("A_Separation", 2011, 123, "drama", "Sony Pictures", 12126),
        ],
    )
}

pub fn empty_studio(kind: IndexKind) -> Table {
    Builder::new()
        .name("studio")
        .attributes("name address presNo")
        .domains("String String Integer")
        .key("name")
        .index(kind)
        .build()
        .expect("studio schema is valid")
}

/// Fox, Universal and DreamWorks.
pub fn studio_table(kind: IndexKind) -> Table {
    let mut table = empty_studio(kind);
    for (name, address, pres) in [
        ("Fox", "Los_Angeles", 7777),
        ("Universal", "Universal_City", 8888),
        ("DreamWorks", "Universal_City", 9999),
    ] {
        table
            .insert(vec![name.into(), address.into(), Value::Int(pres)])
            .expect("fixture tuple fits the schema");
    }
    table
}
