pub mod plate_csv;
pub mod plate_svg;

pub use plate_csv::{HEADER as CSV_HEADER, plates_to_csv, save_plates_csv, write_plates_csv};
pub use plate_svg::export_plate_svg;
