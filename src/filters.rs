//! Static filter schema of the archive search and the caller's selection.

use serde_json::{Value, json};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Select {
    pub name: &'static str,
    /// `(label, value)` pairs; the first one always means "any".
    pub options: &'static [(&'static str, &'static str)],
}

impl Select {
    /// Position of the option whose label or value matches `input`.
    pub fn position(&self, input: &str) -> Option<usize> {
        let input = input.trim();
        self.options
            .iter()
            .position(|(label, value)| {
                label.eq_ignore_ascii_case(input) || (!value.is_empty() && value.eq_ignore_ascii_case(input))
            })
    }

    fn value(&self, index: usize) -> &'static str {
        self.options.get(index).map(|(_, v)| *v).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: &'static str,
}

impl Genre {
    pub fn find(input: &str) -> Option<Genre> {
        let input = input.trim();
        GENRES.iter().copied().find(|g| g.name.eq_ignore_ascii_case(input))
    }
}

pub const TYPES: Select = Select {
    name: "Tipo",
    options: &[
        ("Tutti", ""),
        ("TV", "TV"),
        ("Movie", "Movie"),
        ("OVA", "OVA"),
        ("ONA", "ONA"),
        ("Special", "Special"),
    ],
};

pub const STATUSES: Select = Select {
    name: "Stato",
    options: &[
        ("Tutti", ""),
        ("In Corso", "In Corso"),
        ("Terminato", "Terminato"),
    ],
};

pub const YEARS: Select = Select {
    name: "Anno",
    options: &[
        ("Tutti", ""),
        ("2025", "2025"),
        ("2024", "2024"),
        ("2023", "2023"),
        ("2022", "2022"),
        ("2021", "2021"),
        ("2020", "2020"),
        ("2019", "2019"),
        ("2018", "2018"),
        ("2017", "2017"),
        ("2016", "2016"),
        ("2015", "2015"),
        ("2014", "2014"),
        ("2013", "2013"),
        ("2012", "2012"),
        ("2011", "2011"),
        ("2010", "2010"),
    ],
};

pub const SEASONS: Select = Select {
    name: "Stagione",
    options: &[
        ("Tutte", ""),
        ("Inverno", "winter"),
        ("Primavera", "spring"),
        ("Estate", "summer"),
        ("Autunno", "fall"),
    ],
};

#[rustfmt::skip]
pub const GENRES: &[Genre] = &[
    Genre { id: 51, name: "Action" },
    Genre { id: 21, name: "Adventure" },
    Genre { id: 37, name: "Comedy" },
    Genre { id: 13, name: "Demons" },
    Genre { id: 22, name: "Drama" },
    Genre { id: 5, name: "Ecchi" },
    Genre { id: 9, name: "Fantasy" },
    Genre { id: 44, name: "Game" },
    Genre { id: 52, name: "Gore" },
    Genre { id: 56, name: "Gourmet" },
    Genre { id: 15, name: "Harem" },
    Genre { id: 30, name: "Historical" },
    Genre { id: 3, name: "Horror" },
    Genre { id: 53, name: "Isekai" },
    Genre { id: 45, name: "Josei" },
    Genre { id: 31, name: "Martial Arts" },
    Genre { id: 38, name: "Mecha" },
    Genre { id: 46, name: "Military" },
    Genre { id: 16, name: "Music" },
    Genre { id: 24, name: "Mystery" },
    Genre { id: 32, name: "Parody" },
    Genre { id: 39, name: "Police" },
    Genre { id: 47, name: "Psychological" },
    Genre { id: 17, name: "Romance" },
    Genre { id: 25, name: "Samurai" },
    Genre { id: 33, name: "School" },
    Genre { id: 40, name: "Sci-fi" },
    Genre { id: 49, name: "Seinen" },
    Genre { id: 18, name: "Shoujo" },
    Genre { id: 34, name: "Shounen" },
    Genre { id: 50, name: "Slice of Life" },
    Genre { id: 19, name: "Space" },
    Genre { id: 27, name: "Sports" },
    Genre { id: 35, name: "Super Power" },
    Genre { id: 42, name: "Supernatural" },
    Genre { id: 48, name: "Thriller" },
    Genre { id: 20, name: "Vampire" },
];

pub const RANDOM: &str = "Anime Casuale";
pub const DUBBED: &str = "Solo Doppiati";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Header(&'static str),
    Separator,
    CheckBox(&'static str),
    Select(Select),
    Group(&'static str, &'static [Genre]),
}

/// The filters in the order a host should render them.
pub fn filter_list() -> Vec<Filter> {
    vec![
        Filter::Header("Attiva Random e cerca per un anime casuale"),
        Filter::CheckBox(RANDOM),
        Filter::Separator,
        Filter::Header("Filtri (funzionano solo con la ricerca)"),
        Filter::Select(TYPES),
        Filter::Select(STATUSES),
        Filter::Select(YEARS),
        Filter::CheckBox(DUBBED),
        Filter::Select(SEASONS),
        Filter::Group("Generi", GENRES),
    ]
}

/// State of the filter widgets: select indices and checked genre ids.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct FilterState {
    pub random: bool,
    pub dubbed: bool,
    pub kind: usize,
    pub status: usize,
    pub year: usize,
    pub season: usize,
    pub genres: Vec<u32>,
}

impl FilterState {
    pub fn params(&self) -> SearchParams {
        let genres = GENRES
            .iter()
            .copied()
            .filter(|g| self.genres.contains(&g.id))
            .collect();

        SearchParams {
            random: self.random,
            dubbed: self.dubbed,
            kind: TYPES.value(self.kind).to_owned(),
            status: STATUSES.value(self.status).to_owned(),
            year: YEARS.value(self.year).to_owned(),
            season: SEASONS.value(self.season).to_owned(),
            genres,
        }
    }
}

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub random: bool,
    pub dubbed: bool,
    pub kind: String,
    pub status: String,
    pub year: String,
    pub season: String,
    pub genres: Vec<Genre>,
}

impl SearchParams {
    /// Request body of `POST /archivio/get-animes`.
    pub fn body(&self, query: &str, offset: u32) -> Value {
        let genres = match self.genres.as_slice() {
            [] => Value::Bool(false),
            genres => genres
                .iter()
                .map(|g| json!({ "id": g.id, "name": g.name }))
                .collect(),
        };

        json!({
            "title": string_or_false(query),
            "type": string_or_false(&self.kind),
            "year": string_or_false(&self.year),
            "order": "title_eng",
            "status": string_or_false(&self.status),
            "genres": genres,
            "offset": offset,
            "dubbed": self.dubbed,
            "season": string_or_false(&self.season),
        })
    }
}

fn string_or_false(s: &str) -> Value {
    match s {
        "" => Value::Bool(false),
        s => Value::String(s.to_owned()),
    }
}
