use anyhow::{Context, anyhow};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tsdb_decoder::engine::core::decode::{
    DataTypeFilter, DecodeOptions, RowBatchDecoder, RowDecoder,
};
use tsdb_decoder::engine::core::row::{Column, Row};
use tsdb_decoder::engine::core::seq::{BlobRowSeq, NumericRowSeq, NumericSummaryRowSeq};
use tsdb_decoder::engine::core::sink::{Fragment, QueryResult};
use tsdb_decoder::engine::rollup::RollupConfig;
use tsdb_decoder::engine::schema::Tsdb1xSchema;
use tsdb_decoder::logging;
use tsdb_decoder::shared::config::CONFIG;

#[derive(Parser)]
#[command(name = "row_inspect")]
#[command(about = "Decode wide rows from a JSON dump and print their fragments", long_about = None)]
struct Args {
    /// JSON file shaped {"rows": [{"key": hex, "columns": [{"qualifier": hex, "value": hex}]}]}
    rows: PathBuf,

    /// Read the rows as rollup data of this configured interval
    #[arg(long)]
    rollup: Option<String>,

    /// Wanted data types, "1,7" or "*"
    #[arg(long, default_value = "1")]
    types: DataTypeFilter,

    /// Extension types decoded as opaque payloads
    #[arg(long, value_delimiter = ',')]
    blob_types: Vec<u8>,

    /// Keep the first of duplicate timestamps
    #[arg(long, conflicts_with = "keep_latest")]
    keep_earliest: bool,

    /// Keep the last of duplicate timestamps
    #[arg(long)]
    keep_latest: bool,

    /// Emit points newest first
    #[arg(long)]
    reversed: bool,
}

#[derive(Deserialize)]
struct RowDump {
    rows: Vec<RowJson>,
}

#[derive(Deserialize)]
struct RowJson {
    key: String,
    columns: Vec<ColumnJson>,
}

#[derive(Deserialize)]
struct ColumnJson {
    qualifier: String,
    value: String,
}

fn load_rows(path: &Path) -> anyhow::Result<Vec<Row>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let dump: RowDump = serde_json::from_str(&raw)?;

    dump.rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let key = hex::decode(&row.key).with_context(|| format!("row {} key", i))?;
            let columns = row
                .columns
                .iter()
                .enumerate()
                .map(|(j, c)| {
                    let qualifier = hex::decode(&c.qualifier)
                        .with_context(|| format!("row {} column {} qualifier", i, j))?;
                    let value = hex::decode(&c.value)
                        .with_context(|| format!("row {} column {} value", i, j))?;
                    Ok(Column::new(qualifier, value))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(Row::new(key, columns))
        })
        .collect()
}

fn fragment_json(fragment: &Fragment, rollups: &RollupConfig) -> Value {
    let seq = &fragment.seq;
    let data = if let Some(numeric) = seq.downcast_ref::<NumericRowSeq>() {
        json!({ "points": numeric.points(), "duplicates": numeric.duplicates() })
    } else if let Some(summary) = seq.downcast_ref::<NumericSummaryRowSeq>() {
        let points: Vec<Value> = summary
            .points()
            .iter()
            .map(|p| {
                let aggregator = rollups
                    .aggregator_name(p.aggregator)
                    .map(str::to_string)
                    .unwrap_or_else(|| p.aggregator.to_string());
                json!({
                    "offset_seconds": p.offset_seconds,
                    "aggregator": aggregator,
                    "value": p.value,
                })
            })
            .collect();
        json!({ "interval": summary.interval().name, "points": points })
    } else if let Some(blob) = seq.downcast_ref::<BlobRowSeq>() {
        let entries: Vec<Value> = blob
            .entries()
            .iter()
            .map(|e| json!({ "offset_nanos": e.offset_nanos, "payload": hex::encode(&e.payload) }))
            .collect();
        json!({ "entries": entries })
    } else {
        Value::Null
    };

    json!({
        "row_key": hex::encode(&fragment.row_key),
        "data_type": seq.data_type(),
        "base_timestamp": seq.base_timestamp(),
        "resolution": fragment.resolution,
        "size": seq.size(),
        "data": data,
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&CONFIG.logging)?;

    let mut schema = Tsdb1xSchema::new(&CONFIG.schema);
    for tag in &args.blob_types {
        schema.register_blob_type(*tag)?;
    }

    let interval = match &args.rollup {
        Some(name) => Some(
            CONFIG
                .rollups
                .interval(name)
                .ok_or_else(|| anyhow!("Unknown rollup interval: {}", name))?,
        ),
        None => None,
    };

    let mut options = DecodeOptions::from(&CONFIG.decode);
    if args.keep_earliest {
        options.keep_earliest = true;
    }
    if args.keep_latest {
        options.keep_earliest = false;
    }
    options.reversed |= args.reversed;

    let rows = load_rows(&args.rows)?;
    info!(target: "tsdb::row_inspect", rows = rows.len(), "Loaded rows");

    let result = QueryResult::new();
    let decoder = RowDecoder::new(&schema, &args.types, options);
    let outcome = RowBatchDecoder::new(decoder)
        .decode_all(&rows, interval, &result)
        .inspect_err(|e| e.log_error())?;

    let series: Vec<Value> = result
        .series_hashes()
        .into_iter()
        .map(|hash| {
            let fragments = result
                .with_series(hash, |fragments| {
                    fragments
                        .iter()
                        .map(|f| fragment_json(f, &CONFIG.rollups))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            json!({ "series_hash": format!("{:016x}", hash), "fragments": fragments })
        })
        .collect();

    let out = json!({
        "columns": outcome.columns,
        "filtered": outcome.filtered,
        "unsupported": outcome.unsupported,
        "fragments": outcome.fragments,
        "resolution": result.resolution(),
        "series": series,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
