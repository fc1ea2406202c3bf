//! Exporters: CSV table, SpreadsheetML workbook, diagnostic text dump.
//!
//! All exporters consume the canonical record of each non-failed
//! group; duplicates and failures are never exported, only renamed on
//! disk for manual inspection.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use fapiao_core::{Corpus, InvoiceRecord, FIELD_NAMES};

/// One CSV row per canonical record, header in declared field order.
pub fn write_csv(path: &Path, corpus: &Corpus) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(FIELD_NAMES)?;
    for record in corpus.canonical_records() {
        wtr.write_record(record.fields.to_row())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Same row set as the CSV as a SpreadsheetML (Excel 2003 XML)
/// workbook, with a leading 0-based index column.
pub fn write_sheet(path: &Path, corpus: &Corpus) -> anyhow::Result<()> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut workbook = BytesStart::new("Workbook");
    workbook.push_attribute(("xmlns", "urn:schemas-microsoft-com:office:spreadsheet"));
    workbook.push_attribute(("xmlns:ss", "urn:schemas-microsoft-com:office:spreadsheet"));
    writer.write_event(Event::Start(workbook))?;

    let mut worksheet = BytesStart::new("Worksheet");
    worksheet.push_attribute(("ss:Name", "发票"));
    writer.write_event(Event::Start(worksheet))?;
    writer.write_event(Event::Start(BytesStart::new("Table")))?;

    write_row(
        &mut writer,
        std::iter::once(String::new()).chain(FIELD_NAMES.iter().map(|s| s.to_string())),
    )?;

    for (index, record) in corpus.canonical_records().enumerate() {
        write_row(
            &mut writer,
            std::iter::once(index.to_string()).chain(record.fields.to_row()),
        )?;
    }

    writer.write_event(Event::End(BytesEnd::new("Table")))?;
    writer.write_event(Event::End(BytesEnd::new("Worksheet")))?;
    writer.write_event(Event::End(BytesEnd::new("Workbook")))?;

    fs::write(path, writer.into_inner())?;
    Ok(())
}

fn write_row(
    writer: &mut Writer<Vec<u8>>,
    cells: impl IntoIterator<Item = String>,
) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("Row")))?;
    for cell in cells {
        writer.write_event(Event::Start(BytesStart::new("Cell")))?;
        let mut data = BytesStart::new("Data");
        data.push_attribute(("ss:Type", "String"));
        writer.write_event(Event::Start(data))?;
        writer.write_event(Event::Text(BytesText::new(&cell)))?;
        writer.write_event(Event::End(BytesEnd::new("Data")))?;
        writer.write_event(Event::End(BytesEnd::new("Cell")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Row")))?;
    Ok(())
}

/// Companion `.txt` next to the document: the raw page text, a
/// delimiter line, then the numbered extracted `field: value` pairs.
/// Written before the rename so the dump keeps the original stem.
pub fn write_text_dump(record: &InvoiceRecord) -> anyhow::Result<()> {
    let path = record.source_path.with_extension("txt");

    let mut out = String::with_capacity(record.raw_text.len() + 256);
    out.push_str(&record.raw_text);
    out.push_str("\n--------------------\n");
    for (i, (name, value)) in FIELD_NAMES
        .iter()
        .zip(record.fields.to_row())
        .enumerate()
    {
        out.push_str(&format!("{}. {}: {}\n", i + 1, name, value));
    }

    fs::write(&path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fapiao_core::{Extraction, InvoiceFields};
    use std::path::PathBuf;

    fn keyed_record(name: &str) -> InvoiceRecord {
        let fields = InvoiceFields {
            code: Some("044031900111".to_string()),
            number: Some("12345678".to_string()),
            ..Default::default()
        };
        InvoiceRecord::new(
            PathBuf::from(name),
            "raw".to_string(),
            Extraction {
                fields,
                outcomes: Vec::new(),
                succeeded: true,
            },
        )
    }

    fn corpus_with_one_record() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.ingest(keyed_record("a.pdf"));
        corpus
    }

    #[test]
    fn csv_exports_one_row_per_group_not_per_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        // Two documents for the same invoice: one exported row.
        let mut corpus = corpus_with_one_record();
        corpus.ingest(keyed_record("b.pdf"));
        write_csv(&path, &corpus).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("城市,发票代码,发票号码"));
        assert!(lines[1].contains("044031900111"));
    }

    #[test]
    fn sheet_rows_carry_index_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xls");
        write_sheet(&path, &corpus_with_one_record()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<Worksheet ss:Name=\"发票\">"));
        assert!(content.contains(">0<"));
        assert!(content.contains("044031900111"));
    }

    #[test]
    fn text_dump_lists_numbered_fields_after_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("a.pdf");
        let fields = InvoiceFields {
            number: Some("12345678".to_string()),
            ..Default::default()
        };
        let record = InvoiceRecord::new(
            pdf.clone(),
            "第一页文本".to_string(),
            Extraction {
                fields,
                outcomes: Vec::new(),
                succeeded: false,
            },
        );

        write_text_dump(&record).unwrap();

        let content = fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert!(content.starts_with("第一页文本"));
        assert!(content.contains("--------------------"));
        assert!(content.contains("3. 发票号码: 12345678"));
    }
}
