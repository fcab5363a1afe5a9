//! demo_page_summary - Count pages by type and images by side.
//!
//! This demo decodes an OPEX batch and reports how many pages of each page
//! type it contains, how many images were captured for each side, and the
//! total image file size per side.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example demo_page_summary <batch.oxi>
//! ```

use std::collections::BTreeMap;
use std::env;
use std::process;

use opex_rs::objects::Side;
use opex_rs::OpexReader;

/// Image counters for one side.
#[derive(Default)]
struct SideStats {
    count: u64,
    bytes: i64,
    missing_filename: u64,
}

impl SideStats {
    fn add(&mut self, filesize: Option<i64>, has_filename: bool) {
        self.count += 1;
        self.bytes = self.bytes.saturating_add(filesize.unwrap_or(0));
        if !has_filename {
            self.missing_filename += 1;
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <batch.oxi>", args[0]);
        process::exit(1);
    }

    let batch = match OpexReader::open(&args[1]).and_then(|mut reader| reader.decode()) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Error reading {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let mut pages_by_type: BTreeMap<String, u64> = BTreeMap::new();
    let mut voided = 0u64;
    let mut sides: BTreeMap<&'static str, SideStats> = BTreeMap::new();

    for page in batch.iter_pages() {
        let kind = page
            .page_type
            .map_or_else(|| "(none)".to_string(), |t| t.to_string());
        *pages_by_type.entry(kind).or_default() += 1;
        if page.is_void() {
            voided += 1;
        }

        for image in page.images() {
            let side = image.side.as_ref().map_or("(none)", Side::as_str);
            sides
                .entry(side)
                .or_default()
                .add(image.filesize, image.filename.is_some());
        }
    }

    println!("{:<16} {:>8}", "PageType", "Count");
    for (kind, count) in &pages_by_type {
        println!("{:<16} {:>8}", kind, count);
    }
    println!("{:<16} {:>8}", "(voided)", voided);
    println!();

    println!("{:<8} {:>8} {:>14} {:>10}", "Side", "Images", "Bytes", "Unnamed");
    for (side, stats) in &sides {
        println!(
            "{:<8} {:>8} {:>14} {:>10}",
            side, stats.count, stats.bytes, stats.missing_filename
        );
    }

    if let Some(end) = batch.end_info() {
        if let Some(expected) = end.num_pages {
            let decoded = batch.page_count();
            if usize::try_from(expected).ok() != Some(decoded) {
                println!();
                println!("EndInfo reports {} pages, decoded {}", expected, decoded);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_stats_saturate_on_huge_sizes() {
        let mut stats = SideStats::default();
        stats.add(Some(i64::MAX), true);
        stats.add(Some(10), false);
        stats.add(None, true);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.bytes, i64::MAX);
        assert_eq!(stats.missing_filename, 1);
    }
}
