use assay_engine::Plate;
use serde::Serialize;
use std::io;
use std::path::Path;

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "WellID")]
    well_id: &'a str,
    #[serde(rename = "Row")]
    row: char,
    #[serde(rename = "Column")]
    column: usize,
    #[serde(rename = "Test Article")]
    test_article: &'a str,
    #[serde(rename = "Cell Line")]
    cell_line: &'a str,
    #[serde(rename = "Timepoint (hr)")]
    timepoint: String,
}

/// Writes one CSV row per well, plates in order, with a header line.
pub fn write_plates_csv<W: io::Write>(plates: &[Plate], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for well in plates.iter().flat_map(|plate| plate.wells.iter()) {
        csv_writer.serialize(CsvRow {
            well_id: &well.well_id,
            row: well.row,
            column: well.column,
            test_article: &well.test_article,
            cell_line: &well.cell_line,
            timepoint: well.timepoint.to_string(),
        })?;
    }
    if plates.iter().all(|p| p.wells.is_empty()) {
        csv_writer.write_record(HEADER)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub const HEADER: [&str; 6] = [
    "WellID",
    "Row",
    "Column",
    "Test Article",
    "Cell Line",
    "Timepoint (hr)",
];

pub fn plates_to_csv(plates: &[Plate]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_plates_csv(plates, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

pub fn save_plates_csv(plates: &[Plate], path: &Path) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_plates_csv(plates, file)
}
