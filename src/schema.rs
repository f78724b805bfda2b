//! Output schema: the eleven canonical columns and the typed record

use chrono::NaiveDate;
use serde::Serialize;

/// Canonical output columns, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    MovieTitle,
    MovieSummary,
    ReleaseDate,
    Genres,
    IndicativeRating,
    RunningTime,
    DomesticGross,
    InternationalGross,
    TotalGross,
    DomesticOpening,
    DomesticDistributor,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::MovieTitle,
        Column::MovieSummary,
        Column::ReleaseDate,
        Column::Genres,
        Column::IndicativeRating,
        Column::RunningTime,
        Column::DomesticGross,
        Column::InternationalGross,
        Column::TotalGross,
        Column::DomesticOpening,
        Column::DomesticDistributor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::MovieTitle => "movie_title",
            Column::MovieSummary => "movie_summary",
            Column::ReleaseDate => "release_date",
            Column::Genres => "genres",
            Column::IndicativeRating => "indicative_rating",
            Column::RunningTime => "running_time",
            Column::DomesticGross => "domestic_gross",
            Column::InternationalGross => "international_gross",
            Column::TotalGross => "total_gross",
            Column::DomesticOpening => "domestic_opening",
            Column::DomesticDistributor => "domestic_distributor",
        }
    }

    /// Header row for tabular output
    pub fn header() -> [&'static str; 11] {
        Column::ALL.map(Column::name)
    }
}

/// Gross figures in whole US dollars.
///
/// Domestic or international is `None` when the source marks it as not
/// applicable; it is never zero as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonetaryFigureSet {
    pub domestic: Option<u64>,
    pub international: Option<u64>,
    pub total: u64,
}

/// One output row. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRecord {
    pub movie_title: String,
    pub movie_summary: String,
    pub release_date: Option<NaiveDate>,
    pub genres: Option<String>,
    pub indicative_rating: Option<String>,
    /// Minutes
    pub running_time: Option<u32>,
    pub domestic_gross: Option<u64>,
    pub international_gross: Option<u64>,
    pub total_gross: u64,
    pub domestic_opening: Option<u64>,
    pub domestic_distributor: Option<String>,
}

/// Records collected for one release year, in index order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearDataset {
    year: i32,
    records: Vec<MovieRecord>,
}

impl YearDataset {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            records: Vec::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn push(&mut self, record: MovieRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_order() {
        assert_eq!(
            Column::header(),
            [
                "movie_title",
                "movie_summary",
                "release_date",
                "genres",
                "indicative_rating",
                "running_time",
                "domestic_gross",
                "international_gross",
                "total_gross",
                "domestic_opening",
                "domestic_distributor",
            ]
        );
    }

    #[test]
    fn test_serialized_field_order_matches_header() {
        let record = MovieRecord {
            movie_title: "Up".into(),
            movie_summary: "Balloons.".into(),
            release_date: NaiveDate::from_ymd_opt(2009, 5, 29),
            genres: Some("Adventure Animation".into()),
            indicative_rating: None,
            running_time: Some(96),
            domestic_gross: Some(293_004_164),
            international_gross: None,
            total_gross: 735_099_102,
            domestic_opening: None,
            domestic_distributor: None,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        writer.serialize(&record).unwrap();
        let row = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            row,
            "Up,Balloons.,2009-05-29,Adventure Animation,,96,293004164,,735099102,,\n"
        );
    }
}
