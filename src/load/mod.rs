pub mod label;

use anyhow::{anyhow, ensure, Context, Result};
use arrow::{
    array::{Array, StringArray},
    csv::ReaderBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{
    fs::File,
    io::{BufRead, BufReader, Seek, SeekFrom},
    path::Path,
    sync::Arc,
};
use tracing::{debug, info, instrument};

use crate::table::{AgeTable, AGE_INDEX_NAME};
use label::{clean_str, parse_age_label};

const BATCH_SIZE: usize = 1024;

/// Load a population CSV: header row of column labels, first column of age
/// labels (`"<N> <unit>"`), remaining columns numeric counts.
#[instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn load_age_table(path: &Path) -> Result<AgeTable> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut header_line = String::new();
    reader
        .read_line(&mut header_line)
        .with_context(|| format!("reading header of {}", path.display()))?;
    let headers: Vec<String> = header_line.trim_end().split(',').map(clean_str).collect();
    ensure!(
        headers.len() >= 2,
        "{}: expected an age column and at least one count column, got {:?}",
        path.display(),
        headers
    );
    debug!(columns = ?headers, "parsed header");

    reader.seek(SeekFrom::Start(0))?;
    let batches = read_string_batches(reader, &headers)
        .with_context(|| format!("reading rows of {}", path.display()))?;

    let table = table_from_batches(&batches, &headers)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded age table"
    );
    Ok(table)
}

/// Read every cell as a nullable string; typing happens afterwards.
fn read_string_batches<R: std::io::Read>(input: R, headers: &[String]) -> Result<Vec<RecordBatch>> {
    let fields: Vec<Field> = headers
        .iter()
        .map(|n| Field::new(n, DataType::Utf8, true))
        .collect();
    let schema = Schema::new(fields);

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .with_quote(b'"')
        .with_delimiter(b',')
        .build(input)
        .context("creating CSV reader")?;

    reader
        .map(|b| b.map_err(anyhow::Error::from))
        .collect::<Result<Vec<_>>>()
}

fn string_column<'a>(batch: &'a RecordBatch, i: usize) -> Result<&'a StringArray> {
    batch
        .column(i)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| anyhow!("column {} is not a string column", i))
}

fn table_from_batches(batches: &[RecordBatch], headers: &[String]) -> Result<AgeTable> {
    let n_cols = headers.len() - 1;
    let mut ages = Vec::new();
    let mut counts: Vec<Vec<f64>> = vec![Vec::new(); n_cols];

    for batch in batches {
        let labels = string_column(batch, 0)?;
        for (r, label) in labels.iter().enumerate() {
            let row = ages.len() + 1;
            let raw = label.ok_or_else(|| anyhow!("row {}: missing age label", row))?;
            let age = parse_age_label(&clean_str(raw)).with_context(|| format!("row {}", row))?;

            for (c, out) in counts.iter_mut().enumerate() {
                let cells = string_column(batch, c + 1)?;
                let cell = if cells.is_null(r) { None } else { Some(cells.value(r)) };
                out.push(parse_count(cell).with_context(|| {
                    format!("row {} ({:?}), column {:?}", row, raw, headers[c + 1])
                })?);
            }
            ages.push(age);
        }
    }

    Ok(AgeTable {
        index_name: AGE_INDEX_NAME.to_string(),
        ages,
        columns: headers[1..].to_vec(),
        counts,
    })
}

fn parse_count(cell: Option<&str>) -> Result<f64> {
    let cleaned = cell.map(clean_str).unwrap_or_default();
    let v: f64 = cleaned
        .parse()
        .map_err(|_| anyhow!("count {:?} is not a number", cleaned))?;
    ensure!(v >= 0.0, "count {} is negative", v);
    Ok(v)
}
