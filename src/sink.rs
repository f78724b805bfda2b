//! Dataset sinks

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::SinkError;
use crate::schema::{Column, YearDataset};

/// Receives each completed year exactly once
pub trait Sink {
    fn write_year(&mut self, year: i32, dataset: &YearDataset) -> Result<(), SinkError>;
}

/// Writes `worldwide_box_office_{year}.csv` files into a directory
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_name(year: i32) -> String {
        format!("worldwide_box_office_{year}.csv")
    }

    pub fn path_for(&self, year: i32) -> PathBuf {
        self.dir.join(Self::file_name(year))
    }
}

impl Sink for CsvSink {
    fn write_year(&mut self, year: i32, dataset: &YearDataset) -> Result<(), SinkError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(year);
        write_csv(&path, dataset)?;
        info!("Wrote {} records to {}", dataset.len(), path.display());
        Ok(())
    }
}

/// Header row always present, even for an empty year
fn write_csv(path: &Path, dataset: &YearDataset) -> Result<(), SinkError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(Column::header())?;
    for record in dataset.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Keeps written datasets in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub written: Vec<YearDataset>,
}

impl MemorySink {
    pub fn get(&self, year: i32) -> Option<&YearDataset> {
        self.written.iter().find(|d| d.year() == year)
    }
}

impl Sink for MemorySink {
    fn write_year(&mut self, _year: i32, dataset: &YearDataset) -> Result<(), SinkError> {
        self.written.push(dataset.clone());
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_year(&mut self, year: i32, dataset: &YearDataset) -> Result<(), SinkError> {
        (**self).write_year(year, dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MovieRecord;

    fn record(title: &str) -> MovieRecord {
        MovieRecord {
            movie_title: title.into(),
            movie_summary: "A summary, with a comma.".into(),
            release_date: None,
            genres: Some("Drama".into()),
            indicative_rating: Some("R".into()),
            running_time: Some(121),
            domestic_gross: None,
            international_gross: Some(10),
            total_gross: 10,
            domestic_opening: None,
            domestic_distributor: None,
        }
    }

    #[test]
    fn test_csv_sink_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path().join("out"));
        let mut dataset = YearDataset::new(2012);
        dataset.push(record("First"));
        dataset.push(record("Second"));

        sink.write_year(2012, &dataset).unwrap();

        let written = fs::read_to_string(dir.path().join("out/worldwide_box_office_2012.csv")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], Column::header().join(","));
        assert_eq!(
            lines[1],
            "First,\"A summary, with a comma.\",,Drama,R,121,,10,10,,"
        );
        assert!(lines[2].starts_with("Second,"));
    }

    #[test]
    fn test_csv_sink_empty_year_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path());

        sink.write_year(1999, &YearDataset::new(1999)).unwrap();

        let written = fs::read_to_string(sink.path_for(1999)).unwrap();
        assert_eq!(written.trim_end(), Column::header().join(","));
    }
}
