//! Record assembly: normalized fields onto the fixed output schema

use log::debug;

use crate::normalize::{AttributeValue, NormalizedFields};
use crate::schema::{Column, MovieRecord};

/// Source attribute label -> output column. Labels not listed are dropped.
pub const RENAMES: [(&str, Column); 6] = [
    ("Earliest Release Date", Column::ReleaseDate),
    ("Genres", Column::Genres),
    ("MPAA", Column::IndicativeRating),
    ("Running Time", Column::RunningTime),
    ("Domestic Opening", Column::DomesticOpening),
    ("Domestic Distributor", Column::DomesticDistributor),
];

/// Build the output record. Never fails: anything missing is `None`.
pub fn assemble(fields: NormalizedFields) -> MovieRecord {
    let mut record = MovieRecord {
        movie_title: fields.title,
        movie_summary: fields.summary,
        release_date: None,
        genres: None,
        indicative_rating: None,
        running_time: None,
        domestic_gross: fields.gross.domestic,
        international_gross: fields.gross.international,
        total_gross: fields.gross.total,
        domestic_opening: None,
        domestic_distributor: None,
    };

    for (label, value) in fields.attributes {
        let Some(column) = column_for(&label) else {
            debug!("dropping field {label:?}");
            continue;
        };

        match (column, value) {
            (_, AttributeValue::Absent) => {}
            (Column::ReleaseDate, AttributeValue::Date(date)) => record.release_date = Some(date),
            (Column::Genres, AttributeValue::Text(text)) => record.genres = Some(text),
            (Column::IndicativeRating, AttributeValue::Text(text)) => {
                record.indicative_rating = Some(text)
            }
            (Column::RunningTime, AttributeValue::Minutes(minutes)) => {
                record.running_time = Some(minutes)
            }
            (Column::DomesticOpening, AttributeValue::Amount(amount)) => {
                record.domestic_opening = Some(amount)
            }
            (Column::DomesticDistributor, AttributeValue::Text(text)) => {
                record.domestic_distributor = Some(text)
            }
            (column, value) => debug!("{} cannot hold {value:?}", column.name()),
        }
    }

    record
}

fn column_for(label: &str) -> Option<Column> {
    RENAMES
        .iter()
        .find(|(source, _)| *source == label)
        .map(|(_, column)| *column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MonetaryFigureSet;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn fields(attributes: BTreeMap<String, AttributeValue>) -> NormalizedFields {
        NormalizedFields {
            title: "Up".into(),
            summary: "Balloons.".into(),
            gross: MonetaryFigureSet {
                domestic: Some(293_004_164),
                international: None,
                total: 735_099_102,
            },
            attributes,
        }
    }

    #[test]
    fn test_assemble_full_record() {
        let mut attributes = BTreeMap::new();
        let date = NaiveDate::from_ymd_opt(2009, 5, 29).unwrap();
        attributes.insert("Earliest Release Date".into(), AttributeValue::Date(date));
        attributes.insert("Genres".into(), AttributeValue::Text("Adventure Animation".into()));
        attributes.insert("MPAA".into(), AttributeValue::Text("PG".into()));
        attributes.insert("Running Time".into(), AttributeValue::Minutes(96));
        attributes.insert("Domestic Opening".into(), AttributeValue::Amount(68_108_790));
        attributes.insert(
            "Domestic Distributor".into(),
            AttributeValue::Text("Walt Disney Studios Motion Pictures".into()),
        );
        attributes.insert("Budget".into(), AttributeValue::Amount(175_000_000));
        attributes.insert("Widest Release".into(), AttributeValue::Text("3,886 theaters".into()));

        let record = assemble(fields(attributes));
        assert_eq!(
            record,
            MovieRecord {
                movie_title: "Up".into(),
                movie_summary: "Balloons.".into(),
                release_date: Some(date),
                genres: Some("Adventure Animation".into()),
                indicative_rating: Some("PG".into()),
                running_time: Some(96),
                domestic_gross: Some(293_004_164),
                international_gross: None,
                total_gross: 735_099_102,
                domestic_opening: Some(68_108_790),
                domestic_distributor: Some("Walt Disney Studios Motion Pictures".into()),
            }
        );
    }

    #[test]
    fn test_assemble_missing_fields_are_null() {
        let mut attributes = BTreeMap::new();
        attributes.insert("Running Time".into(), AttributeValue::Absent);

        let record = assemble(fields(attributes));
        assert_eq!(record.release_date, None);
        assert_eq!(record.running_time, None);
        assert_eq!(record.genres, None);
        assert_eq!(record.domestic_distributor, None);
        assert_eq!(record.total_gross, 735_099_102);
    }
}
