//! CSV output of the labeled dataset.
//!
//! Column order and formatting are fixed:
//!   Amount,Country,Currency,MerchantId,CustomerId,HourOfDay,IsFraud
//! Amounts always carry two decimals, booleans are lowercase, rows end in `\n`.

use crate::{
    error::{GenError, GenResult},
    fraud_selection::LabeledRow,
    types::Hour,
};
use serde::{Deserialize, Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

pub const HEADER: [&str; 7] = [
    "Amount",
    "Country",
    "Currency",
    "MerchantId",
    "CustomerId",
    "HourOfDay",
    "IsFraud",
];

/// One output row, exactly as it appears on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionRecord {
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    pub country: String,
    pub currency: String,
    pub merchant_id: String,
    pub customer_id: String,
    pub hour_of_day: Hour,
    pub is_fraud: bool,
}

impl From<&LabeledRow> for TransactionRecord {
    fn from(labeled: &LabeledRow) -> Self {
        let row = &labeled.row;
        Self {
            amount: row.amount,
            country: row.country.clone(),
            currency: row.currency.clone(),
            merchant_id: row.merchant_id(),
            customer_id: row.customer_id(),
            hour_of_day: row.hour,
            is_fraud: labeled.is_fraud,
        }
    }
}

fn serialize_amount<S: Serializer>(amount: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{amount:.2}"))
}

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'));
    builder
}

fn write_records<W: Write>(
    writer: &mut csv::Writer<W>,
    records: &[TransactionRecord],
) -> csv::Result<()> {
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write header plus records to any sink. The header is written even for
/// an empty record list.
pub fn write_csv<W: Write>(sink: W, records: &[TransactionRecord]) -> GenResult<()> {
    let mut writer = writer_builder().from_writer(sink);
    write_records(&mut writer, records)?;
    Ok(())
}

/// Write the dataset to `path`, replacing any existing file.
/// The handle is scoped to this call and dropped on every path out.
pub fn write_csv_file(path: impl AsRef<Path>, records: &[TransactionRecord]) -> GenResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| GenError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = writer_builder().from_writer(BufWriter::new(file));
    write_records(&mut writer, records).map_err(|e| match e.into_kind() {
        csv::ErrorKind::Io(source) => GenError::Io {
            path: path.to_path_buf(),
            source,
        },
        kind => GenError::Other(anyhow::anyhow!(
            "cannot encode {}: {kind:?}",
            path.display()
        )),
    })?;

    log::info!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Render records to a string, byte-for-byte what write_csv_file writes.
pub fn to_csv_string(records: &[TransactionRecord]) -> GenResult<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| GenError::Other(anyhow::anyhow!("non-UTF-8 output: {e}")))
}

/// Parse a file produced by write_csv. The header row is required and
/// must match the fixed column order.
pub fn read_csv<R: Read>(source: R) -> GenResult<Vec<TransactionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(GenError::Other(anyhow::anyhow!(
            "unexpected header: {:?}",
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let records = reader
        .deserialize()
        .collect::<Result<Vec<TransactionRecord>, csv::Error>>()?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionRecord {
        TransactionRecord {
            amount: 123.4,
            country: "AU".into(),
            currency: "AUD".into(),
            merchant_id: "m_0042".into(),
            customer_id: "c_00391".into(),
            hour_of_day: 14,
            is_fraud: false,
        }
    }

    #[test]
    fn formats_match_wire_layout() {
        let out = to_csv_string(&[sample()]).unwrap();
        assert_eq!(
            out,
            "Amount,Country,Currency,MerchantId,CustomerId,HourOfDay,IsFraud\n\
             123.40,AU,AUD,m_0042,c_00391,14,false\n"
        );
    }

    #[test]
    fn empty_dataset_still_has_header() {
        let out = to_csv_string(&[]).unwrap();
        assert_eq!(out, format!("{}\n", HEADER.join(",")));
    }

    #[test]
    fn rejects_foreign_header() {
        let input = "a,b,c\n1,2,3\n";
        assert!(read_csv(input.as_bytes()).is_err());
    }
}
