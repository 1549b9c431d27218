//! CSV export of crawl results.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use gs25_core::product::ProductRow;

use crate::crawler::CrawlReport;
use crate::error::ScrapeResult;

/// Byte-order mark written ahead of the header so spreadsheet tools pick
/// UTF-8 for the Korean column names.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// File name for an export taken at `now`.
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("GS25_행사상품_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write `products` to a timestamped CSV under `dir`, creating it if needed.
///
/// Returns `None` without touching the filesystem when there is nothing to
/// write.
pub fn write_csv<Tz: TimeZone>(
    dir: &Path,
    products: &[ProductRow],
    now: &DateTime<Tz>,
) -> ScrapeResult<Option<PathBuf>>
where
    Tz::Offset: std::fmt::Display,
{
    if products.is_empty() {
        tracing::warn!("No products to save");
        return Ok(None);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now));

    let mut file = File::create(&path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = products.len(), "Saved crawl results");
    Ok(Some(path))
}

/// Log the end-of-run summary.
pub fn summarize(report: &CrawlReport) {
    tracing::info!(
        total = report.products.len(),
        duplicates = report.duplicates,
        skipped = report.skipped,
        "Crawl summary (duplicates removed)",
    );
    for (category, count) in report.per_category() {
        tracing::info!(category = %category, count, "Products per category");
    }
    for tab in &report.failed_tabs {
        tracing::warn!(tab = %tab, "Tab did not complete");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(name: &str, gift: Option<&str>) -> ProductRow {
        ProductRow {
            image_url: "https://image.example/a.jpg".into(),
            name: name.into(),
            price: "1,700".into(),
            promotion: "덤증정".into(),
            category: "덤증정 행사".into(),
            gift_name: gift.map(String::from),
        }
    }

    #[test]
    fn file_name_carries_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(export_file_name(&now), "GS25_행사상품_20250309_140507.csv");
    }

    #[test]
    fn writes_bom_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();

        let path = write_csv(&out, &[row("컵라면", Some("생수")), row("젤리", None)], &now)
            .unwrap()
            .expect("a file should be written");

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "이미지URL,상품명,가격,행사유형,행사분류,덤증정상품");
        assert_eq!(
            lines[1],
            "https://image.example/a.jpg,컵라면,\"1,700\",덤증정,덤증정 행사,생수"
        );
        assert!(lines[2].ends_with(",덤증정 행사,"));
    }

    #[test]
    fn nothing_written_for_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");
        let path = write_csv(&out, &[], &Utc::now()).unwrap();
        assert!(path.is_none());
        assert!(!out.exists());
    }
}
