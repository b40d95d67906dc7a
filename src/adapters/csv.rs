use anyhow::anyhow;
use geoconsensus_core::{
    entities::*,
    gateways::sink::{Error, ResultSink},
};
use std::{
    fs::{File, OpenOptions},
    io::{self, Read as _, Seek as _, SeekFrom, Write as _},
    path::{Path, PathBuf},
};

const ADDRESS_COLUMN: &str = "address";
const MAX_ERROR_COLUMN: &str = "max_error";

/// The header row: the address, a lat/lon pair per provider
/// and the disagreement metric.
pub fn header(providers: &ProviderSet) -> Vec<String> {
    let mut columns = Vec::with_capacity(2 + 2 * providers.len());
    columns.push(ADDRESS_COLUMN.to_string());
    for p in providers.iter() {
        columns.push(format!("{p}_lat"));
        columns.push(format!("{p}_lon"));
    }
    columns.push(MAX_ERROR_COLUMN.to_string());
    columns
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord(Vec<String>);

impl CsvRecord {
    pub fn new(providers: &ProviderSet, record: &GeocodeRecord) -> Self {
        let GeocodeRecord {
            address,
            result,
            max_error,
        } = record;
        let mut fields = Vec::with_capacity(2 + 2 * providers.len());
        fields.push(address.clone());
        for p in providers.iter() {
            match result.get(p).and_then(Coordinate::point) {
                Some(pt) => {
                    fields.push(pt.lat().to_string());
                    fields.push(pt.lng().to_string());
                }
                None => {
                    fields.push(String::new());
                    fields.push(String::new());
                }
            }
        }
        fields.push(format!("{:.2}", max_error.to_meters()));
        Self(fields)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

/// Appends every record as a single CSV line to a file.
///
/// The file is created together with its header on the first
/// append. An existing file must start with the same header.
#[derive(Debug)]
pub struct CsvFileSink {
    path: PathBuf,
    providers: ProviderSet,
    header: Vec<String>,
    header_checked: bool,
}

impl CsvFileSink {
    pub fn new<P: Into<PathBuf>>(path: P, providers: ProviderSet) -> Self {
        let header = header(&providers);
        Self {
            path: path.into(),
            providers,
            header,
            header_checked: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_header(&self, file: &File) -> Result<(), Error> {
        let mut rdr = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(file);
        let mut first_row = ::csv::StringRecord::new();
        if !rdr.read_record(&mut first_row).map_err(anyhow::Error::from)? {
            return Ok(());
        }
        if first_row.iter().ne(self.header.iter().map(String::as_str)) {
            return Err(anyhow!(
                "{} has an unexpected header: expected '{}', found '{}'",
                self.path.display(),
                self.header.join(","),
                first_row.iter().collect::<Vec<_>>().join(",")
            )
            .into());
        }
        Ok(())
    }
}

impl ResultSink for CsvFileSink {
    fn append(&mut self, record: &GeocodeRecord) -> Result<(), Error> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;
        let is_empty = file.metadata()?.len() == 0;
        if !is_empty && !self.header_checked {
            self.check_header(&file)?;
        }
        let record = CsvRecord::new(&self.providers, record);
        let mut rows = Vec::with_capacity(2);
        if is_empty {
            log::info!("Create {}", self.path.display());
            rows.push(self.header.as_slice());
        }
        rows.push(record.fields());
        let mut buf = Vec::new();
        if !is_empty && !ends_with_newline(&file)? {
            buf.push(b'\n');
        }
        buf.extend(to_csv_bytes(&rows)?);
        file.write_all(&buf)?;
        self.header_checked = true;
        Ok(())
    }
}

// A line that was cut short must not swallow the next record
fn ends_with_newline(mut file: &File) -> io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn to_csv_bytes(rows: &[&[String]]) -> anyhow::Result<Vec<u8>> {
    let mut wtr = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    for row in rows {
        wtr.write_record(*row)?;
    }
    wtr.flush()?;
    Ok(wtr.into_inner().map_err(|err| err.into_error())?)
}
