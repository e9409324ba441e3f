use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use color_eyre::eyre::{bail, eyre, WrapErr};
use csv::{ByteRecord, ReaderBuilder, StringRecord, Writer, WriterBuilder};
use log::{debug, info, warn};
use crate::address::{parse, ParsedAddress};
use crate::region::in_massachusetts;
use crate::zip::{normalize, NormalizedZip};

/// Columns appended to every output row, in this order
pub const ADDRESS_COLUMNS: [&str; 4] = ["street_number", "street_name", "street_suffix", "unit_number"];

#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// header of the free-text address column, matched case-insensitively
    pub address_column: String,
    /// header of the zip column, matched case-insensitively
    pub zip_column: String,
    /// drop rows whose zip is not a Massachusetts one
    pub massachusetts_only: bool,
    pub delimiter: u8,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            address_column: "address".to_string(),
            zip_column: "zip".to_string(),
            massachusetts_only: false,
            delimiter: b',',
        }
    }
}

/// Row counts of a cleaning run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    /// rows whose zip normalized to `00000`
    pub unknown_zips: usize,
    /// rows dropped by the Massachusetts filter
    pub filtered_out: usize,
    /// rows with cells that were not UTF-8, kept with `U+FFFD` in place of the bad bytes
    pub lossy_rows: usize,
}

/// positions of the columns we read
struct Columns {
    address: usize,
    zip: usize,
}

impl Columns {
    fn locate(headers: &StringRecord, options: &CleanOptions) -> color_eyre::Result<Self> {
        Ok(
            Self {
                address: Self::find(headers, &options.address_column)?,
                zip: Self::find(headers, &options.zip_column)?,
            }
        )
    }

    fn find(headers: &StringRecord, name: &str) -> color_eyre::Result<usize> {
        headers.iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| eyre!("column [{}] not found, available columns: {:?}", name, headers.iter().collect::<Vec<_>>()))
    }
}

/// Split the address column and repair the zip column of every row.
///
/// Rows keep their original columns, with the zip replaced by its normalized form,
/// followed by [`ADDRESS_COLUMNS`]. Missing cells count as empty and cells that are not
/// UTF-8 are decoded lossily; a malformed row never aborts the run, only unreadable CSV
/// or a missing column does.
#[tracing::instrument(skip_all, fields(address_column = %options.address_column, zip_column = %options.zip_column))]
pub fn clean<R: Read, W: Write>(input: R, output: W, options: &CleanOptions) -> color_eyre::Result<CleanSummary> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(input);
    // the header row is written by hand, `serialize` only appends the address parts
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .from_writer(output);

    let headers = decode_lossy(reader.byte_headers()
        .wrap_err("cannot read the header row")?);
    let columns = Columns::locate(&headers, options)?;

    let mut out_headers = headers.clone();
    out_headers.extend(ADDRESS_COLUMNS);
    writer.write_record(&out_headers)?;

    let mut summary = CleanSummary::default();
    for (idx, row) in reader.byte_records().enumerate() {
        let row = row.wrap_err_with(|| format!("cannot read row [{}]", idx + 1))?;
        summary.rows_read += 1;
        if std::str::from_utf8(row.as_slice()).is_err() {
            summary.lossy_rows += 1;
            warn!("row [{}] is not valid UTF-8, replacing the bad bytes", idx + 1);
        }
        let row = decode_lossy(&row);

        let address = parse(row.get(columns.address).unwrap_or_default());
        let zip = normalize(row.get(columns.zip));
        if zip.is_unknown() {
            summary.unknown_zips += 1;
            debug!("row [{}]: cannot normalize zip [{}]", idx + 1, row.get(columns.zip).unwrap_or_default());
        }
        if options.massachusetts_only && !in_massachusetts(&zip) {
            summary.filtered_out += 1;
            continue;
        }

        write_row(&mut writer, headers.len(), &row, columns.zip, &zip, &address)?;
        summary.rows_written += 1;
    }
    writer.flush()?;

    info!(
        "cleaned [{}] rows, wrote [{}], [{}] unknown zips, [{}] filtered out, [{}] not UTF-8",
        summary.rows_read, summary.rows_written, summary.unknown_zips, summary.filtered_out, summary.lossy_rows,
    );
    Ok(summary)
}

/// Clean a CSV file into another, creating the output directory if needed.
///
/// The output must not be the input: creating it would truncate the rows before they are read.
pub fn clean_path(input: impl AsRef<Path>, output: impl AsRef<Path>, options: &CleanOptions) -> color_eyre::Result<CleanSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let input_file = input.canonicalize()
        .wrap_err_with(|| format!("cannot open [{}]", input.display()))?;
    if output.exists() && output.canonicalize()? == input_file {
        bail!("output [{}] is the input file, refusing to overwrite it", output.display());
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("cannot create [{}]", parent.display()))?;
        }
    }
    let reader = File::open(input)
        .wrap_err_with(|| format!("cannot open [{}]", input.display()))?;
    let writer = File::create(output)
        .wrap_err_with(|| format!("cannot create [{}]", output.display()))?;
    clean(reader, writer, options)
}

fn decode_lossy(record: &ByteRecord) -> StringRecord {
    record.iter()
        .map(String::from_utf8_lossy)
        .collect()
}

/// original cells padded or cut to the header width, then the address parts
fn write_row<W: Write>(writer: &mut Writer<W>, width: usize, row: &StringRecord, zip_idx: usize, zip: &NormalizedZip, address: &ParsedAddress) -> csv::Result<()> {
    for idx in 0..width {
        if idx == zip_idx {
            writer.write_field(zip.as_str())?;
        } else {
            writer.write_field(row.get(idx).unwrap_or_default())?;
        }
    }
    writer.serialize(address)
}
