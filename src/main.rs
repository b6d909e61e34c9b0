use std::error::Error;

use clfeval::{metrics_report, ReportOptions, Tokenizer};
use parquet::{
    file::{reader::FileReader, serialized_reader::SerializedFileReader},
    record::RowAccessor,
};

fn main() -> Result<(), Box<dyn Error>> {
    let toknzr = Tokenizer::default();

    // Parse the whole prediction dump and store it in memory
    let dump_file = std::fs::File::open("datasets/eval_predictions.parquet")?;
    let dump: SerializedFileReader<std::fs::File> = SerializedFileReader::new(dump_file)?;

    let mut y_true: Vec<String> = Vec::new();
    let mut y_pred: Vec<String> = Vec::new();
    let mut n_words: Vec<i64> = Vec::new();
    for row in dump.get_row_iter(None)?.flatten() {
        let text = row.get_string(0)?.replace("\n", "");
        y_true.push(row.get_string(1)?.clone());
        y_pred.push(row.get_string(2)?.clone());
        n_words.push(toknzr.word_count(&text));
    }

    println!("Evaluated sentences: {}", y_true.len());

    let report = metrics_report(&y_true, &y_pred, &n_words, &ReportOptions::default());
    report.print();

    report.save_to_file(&mut std::fs::File::create("report.json")?)?;

    Ok(())
}
