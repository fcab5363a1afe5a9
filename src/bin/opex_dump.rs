//! opex_dump - Print the contents of an OPEX batch file.
//!
//! Decodes an `.oxi` document and prints the batch header, one line per
//! transaction, group and page, the batch summary, and any validation
//! diagnostics.
//!
//! # Usage
//!
//! ```bash
//! opex_dump [OPTIONS] <FILENAME>
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Print a batch
//! opex_dump batch.oxi
//!
//! # Validate against a schema while decoding
//! opex_dump --schema opex.xsd batch.oxi
//!
//! # Fail on malformed batch-level values
//! opex_dump --strict batch.oxi
//! ```
//!
//! Exits with status 1 when decoding fails and 2 when the document decoded
//! but produced error diagnostics.

use std::process::ExitCode;

use clap::Parser;

use opex_rs::objects::{Batch, Page, Side};
use opex_rs::{DecodeMode, OpexReader, Severity};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the contents of an OPEX batch file.
#[derive(Parser, Debug)]
#[command(name = "opex_dump")]
#[command(version = VERSION)]
#[command(about = "Print the contents of an OPEX batch file")]
struct Args {
    /// Input OPEX (.oxi) file
    filename: String,

    /// XML Schema to validate the document against
    #[arg(long)]
    schema: Option<String>,

    /// Treat malformed batch-level values as errors
    #[arg(long)]
    strict: bool,

    /// Enable debug output
    ///
    /// Prints additional information about processing to stderr.
    #[arg(long)]
    debug: bool,
}

fn or_dash<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), T::to_string)
}

fn print_header(batch: &Batch) {
    println!("Batch {}", or_dash(&batch.batch_identifier));
    println!("  format version: {}", or_dash(&batch.format_version));
    println!("  job:            {} ({})", or_dash(&batch.job_name), or_dash(&batch.job_type));
    println!("  operating mode: {}", or_dash(&batch.operating_mode));
    println!("  operator:       {}", or_dash(&batch.operator_name));
    println!("  started:        {}", or_dash(&batch.start_time));
    println!("  image path:     {}", or_dash(&batch.image_file_path));
}

fn print_page(page: &Page) {
    let front = page.image(Side::Front).and_then(|i| i.filename.as_deref());
    let back = page.image(Side::Back).and_then(|i| i.filename.as_deref());
    println!(
        "      Page {} {} status={} front={} back={}",
        or_dash(&page.batch_sequence),
        or_dash(&page.page_type),
        or_dash(&page.item_status),
        front.unwrap_or("-"),
        back.unwrap_or("-"),
    );
    for micr in page.micrs() {
        println!("        MICR {}", micr.value.as_deref().unwrap_or(""));
    }
    for barcode in page.barcodes() {
        println!(
            "        Barcode {} {}",
            barcode.barcode_type.as_deref().unwrap_or("-"),
            barcode.value.as_deref().unwrap_or("")
        );
    }
}

fn print_batch(batch: &Batch) {
    print_header(batch);
    for transaction in batch.transactions() {
        println!("  Transaction {}", or_dash(&transaction.transaction_id));
        for group in transaction.groups() {
            println!("    Group {}", or_dash(&group.group_id));
            for page in group.pages() {
                print_page(page);
            }
        }
    }
    match batch.end_info() {
        Some(end) => println!(
            "EndInfo pages={} groups={} transactions={} modified={}",
            or_dash(&end.num_pages),
            or_dash(&end.num_groups),
            or_dash(&end.num_transactions),
            or_dash(&end.is_modified),
        ),
        None => println!("EndInfo -"),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mode = if args.strict {
        DecodeMode::Strict
    } else {
        DecodeMode::Lenient
    };

    if args.debug {
        eprintln!("Debug mode enabled");
        eprintln!("Processing: {}", args.filename);
        eprintln!("Mode: {:?}", mode);
        eprintln!("Schema: {}", args.schema.as_deref().unwrap_or("(none)"));
    }

    let mut builder = OpexReader::builder().path(&args.filename).mode(mode);
    if let Some(schema) = &args.schema {
        builder = builder.schema_path(schema);
    }

    let mut reader = match builder.build() {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let batch = match reader.decode() {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Error decoding {}: {}", args.filename, e);
            return ExitCode::from(1);
        }
    };

    print_batch(&batch);

    if args.debug {
        eprintln!("Decoded {} pages", batch.page_count());
        eprintln!("Diagnostics: {}", reader.diagnostics().len());
    }

    for diagnostic in reader.diagnostics() {
        eprintln!("{}: {}", args.filename, diagnostic);
    }

    let failed = reader
        .diagnostics()
        .iter()
        .any(|d| d.severity == Severity::Error);
    if failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
