//! CSV export for annual projection results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::AnnualResult;

/// Column header for CSV results export.
const HEADER: &str = "year,demand_mwh,climate_factor,hydro_mwh,solar_mwh,thermal_mwh,\
                      deficit_mwh,emissions_tco2e,cost_usd,marginal_cost_usd_per_mwh";

/// Exports annual results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per year. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `results` - Complete per-year results
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[AnnualResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes annual results as CSV to any writer.
///
/// # Arguments
///
/// * `results` - Complete per-year results
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[AnnualResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in results {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.3}", r.demand_mwh),
            format!("{:.2}", r.climate_factor),
            format!("{:.3}", r.hydro_mwh),
            format!("{:.3}", r.solar_mwh),
            format!("{:.3}", r.thermal_mwh),
            format!("{:.3}", r.deficit_mwh),
            format!("{:.3}", r.emissions_tco2e),
            format!("{:.2}", r.cost_usd),
            format!("{:.4}", r.marginal_cost_usd_per_mwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_year(i: i32) -> AnnualResult {
        AnnualResult {
            year: 2025 + i,
            demand_mwh: 12_000.0 * 1.04_f64.powi(i),
            climate_factor: 1.0,
            hydro_mwh: 6_000.0,
            solar_mwh: 2_400.0,
            thermal_mwh: 3_600.0,
            deficit_mwh: 0.0,
            emissions_tco2e: 3_072.0,
            cost_usd: 600_000.0,
            marginal_cost_usd_per_mwh: 50.0,
        }
    }

    #[test]
    fn header_matches_schema() {
        let results = vec![make_year(0)];
        let mut buf = Vec::new();
        write_csv(&results, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "year,demand_mwh,climate_factor,hydro_mwh,solar_mwh,thermal_mwh,\
             deficit_mwh,emissions_tco2e,cost_usd,marginal_cost_usd_per_mwh"
        );
    }

    #[test]
    fn row_count_matches_year_count() {
        let results: Vec<AnnualResult> = (0..10).map(make_year).collect();
        let mut buf = Vec::new();
        write_csv(&results, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 10 data rows
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn deterministic_output() {
        let results: Vec<AnnualResult> = (0..5).map(make_year).collect();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&results, &mut buf1).ok();
        write_csv(&results, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let results: Vec<AnnualResult> = (0..3).map(make_year).collect();
        let mut buf = Vec::new();
        write_csv(&results, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(10));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            // Year parses as i32
            let year: Result<i32, _> = rec.unwrap()[0].parse();
            assert!(year.is_ok(), "year column should parse as i32");
            // Numeric columns parse as f64
            for i in 1..10 {
                let val: Result<f64, _> = rec.unwrap()[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }
}
