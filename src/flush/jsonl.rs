use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::economy::EconomySystem;
use crate::model::{HexId, HistoryKind, KeyPoint, NationAccount, SupplyBase};

#[derive(Serialize)]
struct AccountRecord<'a> {
    nation: &'a str,
    economic_points: u32,
    supply_points: u32,
    turns_processed: u32,
    bases: &'a [SupplyBase],
    key_points: &'a BTreeMap<HexId, KeyPoint>,
    history_dropped: u64,
}

impl<'a> From<&'a NationAccount> for AccountRecord<'a> {
    fn from(account: &'a NationAccount) -> Self {
        Self {
            nation: &account.name,
            economic_points: account.economic_points,
            supply_points: account.supply_points,
            turns_processed: account.turns_processed,
            bases: &account.bases,
            key_points: &account.key_points,
            history_dropped: account.history.dropped(),
        }
    }
}

#[derive(Serialize)]
struct HistoryRecord<'a> {
    nation: &'a str,
    turn: u32,
    kind: HistoryKind,
    message: &'a str,
}

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Export the economy to JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes 2 files:
/// - `accounts.jsonl` — one account snapshot per nation (without history)
/// - `history.jsonl` — every retained history entry, nation by nation
pub fn flush_to_jsonl(economy: &EconomySystem, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(
        &output_dir.join("accounts.jsonl"),
        economy.nations().map(AccountRecord::from),
    )?;
    write_jsonl(
        &output_dir.join("history.jsonl"),
        economy.nations().flat_map(|account| {
            account.history.iter().map(|entry| HistoryRecord {
                nation: &account.name,
                turn: entry.turn,
                kind: entry.kind,
                message: &entry.message,
            })
        }),
    )?;

    Ok(())
}
