//! Integration Tests for sheetkv
//!
//! Workbooks are generated in memory with rust_xlsxwriter and read back
//! through the public `Extractor` API.

use rust_xlsxwriter::*;
use std::io::Cursor;
use sheetkv::{Direction, ExtractorBuilder, OutputFormat, SheetSelector};

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// Generate a small skill sheet with labels to the right and above values
    pub fn generate_skill_sheet() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "氏名：")?;
        worksheet.write_string(0, 1, "山田　太郎")?;
        worksheet.write_string(1, 0, "年齢：")?;
        worksheet.write_number(1, 1, 35.0)?;
        worksheet.write_string(2, 0, "住所")?;
        worksheet.write_string(2, 1, "東京都\n千代田区")?;
        worksheet.write_string(4, 0, "保有資格")?;
        worksheet.write_string(5, 0, "基本情報技術者")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a workbook with 3 sheets
    pub fn generate_multi_sheets() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let sheet1 = workbook.add_worksheet();
        sheet1.set_name("表紙")?;
        sheet1.write_string(0, 0, "表紙_Data")?;

        let sheet2 = workbook.add_worksheet();
        sheet2.set_name("スキルシート")?;
        sheet2.write_string(0, 0, "スキルシート_Data")?;

        let sheet3 = workbook.add_worksheet();
        sheet3.set_name("経歴")?;
        sheet3.write_string(0, 0, "経歴_Data")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a sheet with a merged title (A1:C1) and a merged value (B2:C2)
    pub fn generate_merged_cells() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.merge_range(0, 0, 0, 2, "経歴書", &Format::new())?;
        worksheet.write_string(1, 0, "所属：")?;
        worksheet.merge_range(1, 1, 1, 2, "株式会社サンプル", &Format::new())?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate cells of every scalar type
    pub fn generate_typed_cells() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        worksheet.write_number(0, 0, 42.0)?;
        worksheet.write_number(0, 1, 3.5)?;
        worksheet.write_boolean(0, 2, true)?;
        // Serial value 45383.0 = 2024-04-01
        worksheet.write_number_with_format(0, 3, 45383.0, &date_format)?;
        worksheet.write_string(0, 4, "   ")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a 3x3 grid with one far-away cell outside the default read window
    pub fn generate_grid_with_outlier() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for row in 0..3u32 {
            for col in 0..3u16 {
                worksheet.write_string(row, col, format!("R{}C{}", row + 1, col + 1))?;
            }
        }
        worksheet.write_string(299, 0, "far away")?;

        Ok(workbook.save_to_buffer()?)
    }
}

fn tsv_lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

#[test]
fn test_tsv_lists_non_empty_cells_in_row_major_order() {
    let extractor = ExtractorBuilder::new().with_bom(false).build().unwrap();
    let excel_data = fixtures::generate_skill_sheet().unwrap();

    let tsv = extractor.convert_to_string(Cursor::new(excel_data)).unwrap();

    assert_eq!(
        tsv_lines(&tsv),
        vec![
            "A1\t氏名：",
            "B1\t山田 太郎",
            "A2\t年齢：",
            "B2\t35",
            "A3\t住所",
            "B3\t東京都 千代田区",
            "A5\t保有資格",
            "A6\t基本情報技術者",
        ]
    );
}

#[test]
fn test_tsv_bom_is_on_by_default() {
    let extractor = ExtractorBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_skill_sheet().unwrap();

    let tsv = extractor.convert_to_string(Cursor::new(excel_data)).unwrap();

    assert!(tsv.starts_with("\u{feff}A1\t"), "Got: {:?}", tsv);
}

#[test]
fn test_extract_pairs_from_skill_sheet() {
    let extractor = ExtractorBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_skill_sheet().unwrap();

    let pairs = extractor.extract_pairs(Cursor::new(excel_data)).unwrap();

    let summary: Vec<(&str, &str, Direction)> = pairs
        .iter()
        .map(|p| (p.key.as_str(), p.value.as_str(), p.direction))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("氏名", "山田 太郎", Direction::Right),
            ("年齢", "35", Direction::Right),
            ("住所", "東京都 千代田区", Direction::Right),
            ("保有資格", "基本情報技術者", Direction::Down),
        ]
    );

    assert!((pairs[0].confidence - 0.95).abs() < 1e-9);
    assert!((pairs[2].confidence - 0.8).abs() < 1e-9);
    assert_eq!(pairs[0].canonical.as_deref(), Some("name"));
    assert_eq!(pairs[3].canonical.as_deref(), Some("qualifications"));
    assert!(pairs.iter().all(|p| p.confidence > 0.0 && p.confidence < 1.0));
}

#[test]
fn test_json_output_format() {
    let extractor = ExtractorBuilder::new()
        .with_output_format(OutputFormat::Json)
        .build()
        .unwrap();
    let excel_data = fixtures::generate_skill_sheet().unwrap();

    let json = extractor.convert_to_string(Cursor::new(excel_data)).unwrap();

    // JSON出力にはBOMを付けない
    assert!(json.starts_with('{'), "Got: {:?}", json);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["sheet"], "Sheet1");
    assert_eq!(value["truncated"], false);
    assert_eq!(value["cells"].as_array().unwrap().len(), 8);
    assert_eq!(value["pairs"].as_array().unwrap().len(), 4);
    assert_eq!(value["pairs"][3]["direction"], "down");
    assert_eq!(value["pairs"][3]["value_cell"]["row"], 6);
}

#[test]
fn test_sheet_selection_by_name() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let extractor = ExtractorBuilder::new()
        .with_sheet_selector(SheetSelector::Name("経歴".to_string()))
        .build()
        .unwrap();

    let sheet = extractor.read_cells(Cursor::new(excel_data)).unwrap();

    assert_eq!(sheet.sheet_name, "経歴");
    assert_eq!(sheet.cells[0].value, "経歴_Data");
}

#[test]
fn test_sheet_selection_by_index() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let extractor = ExtractorBuilder::new()
        .with_sheet_selector(SheetSelector::Index(1))
        .build()
        .unwrap();

    let sheet = extractor.read_cells(Cursor::new(excel_data)).unwrap();

    assert_eq!(sheet.sheet_name, "スキルシート");
}

#[test]
fn test_sheet_selection_by_request_string() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let cases = [
        ("0", "表紙"),
        ("2", "経歴"),
        // シート数と同じ値は1始まりのインデックスとして扱う
        ("3", "経歴"),
        ("スキルシート", "スキルシート"),
        ("", "表紙"),
    ];

    for (request, expected) in cases {
        let extractor = ExtractorBuilder::new()
            .with_sheet_selector(SheetSelector::Request(request.to_string()))
            .build()
            .unwrap();
        let sheet = extractor
            .read_cells(Cursor::new(excel_data.clone()))
            .unwrap();
        assert_eq!(sheet.sheet_name, expected, "request: {:?}", request);
    }
}

#[test]
fn test_nonexistent_sheet_falls_back_to_first() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();

    for selector in [
        SheetSelector::Name("存在しない".to_string()),
        SheetSelector::Index(10),
        SheetSelector::Request("99".to_string()),
    ] {
        let extractor = ExtractorBuilder::new()
            .with_sheet_selector(selector)
            .build()
            .unwrap();
        let sheet = extractor
            .read_cells(Cursor::new(excel_data.clone()))
            .unwrap();
        assert_eq!(sheet.sheet_name, "表紙");
    }
}

#[test]
fn test_merged_cells_are_expanded() {
    let extractor = ExtractorBuilder::new().with_bom(false).build().unwrap();
    let excel_data = fixtures::generate_merged_cells().unwrap();

    let tsv = extractor.convert_to_string(Cursor::new(excel_data)).unwrap();

    assert_eq!(
        tsv_lines(&tsv),
        vec![
            "A1\t経歴書",
            "B1\t経歴書",
            "C1\t経歴書",
            "A2\t所属：",
            "B2\t株式会社サンプル",
            "C2\t株式会社サンプル",
        ]
    );
}

#[test]
fn test_merged_cells_without_expansion() {
    let extractor = ExtractorBuilder::new()
        .with_bom(false)
        .with_merge_expansion(false)
        .build()
        .unwrap();
    let excel_data = fixtures::generate_merged_cells().unwrap();

    let tsv = extractor.convert_to_string(Cursor::new(excel_data)).unwrap();

    assert_eq!(
        tsv_lines(&tsv),
        vec!["A1\t経歴書", "A2\t所属：", "B2\t株式会社サンプル"]
    );
}

#[test]
fn test_merged_value_is_paired_once() {
    let extractor = ExtractorBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_merged_cells().unwrap();

    let pairs = extractor.extract_pairs(Cursor::new(excel_data)).unwrap();

    let affiliation = pairs.iter().find(|p| p.key == "所属").unwrap();
    assert_eq!(affiliation.value, "株式会社サンプル");
    assert_eq!(affiliation.value_cell.to_a1_notation(), "B2");
    assert_eq!(affiliation.canonical.as_deref(), Some("affiliation"));
}

#[test]
fn test_typed_cells_are_stringified() {
    let extractor = ExtractorBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_typed_cells().unwrap();

    let sheet = extractor.read_cells(Cursor::new(excel_data)).unwrap();
    let values: Vec<&str> = sheet.cells.iter().map(|c| c.value.as_str()).collect();

    // 空白だけのセルは空セルとして除外される
    assert_eq!(values, vec!["42", "3.5", "TRUE", "2024-04-01 00:00:00"]);
}

#[test]
fn test_read_window_excludes_far_cells() {
    let extractor = ExtractorBuilder::new().build().unwrap();
    let excel_data = fixtures::generate_grid_with_outlier().unwrap();

    let sheet = extractor.read_cells(Cursor::new(excel_data)).unwrap();

    assert_eq!(sheet.cells.len(), 9);
    assert!(!sheet.truncated);
    assert!(sheet.cells.iter().all(|c| c.value != "far away"));
}

#[test]
fn test_row_and_column_limits() {
    let extractor = ExtractorBuilder::new()
        .with_max_rows(2)
        .with_max_cols(1)
        .build()
        .unwrap();
    let excel_data = fixtures::generate_grid_with_outlier().unwrap();

    let sheet = extractor.read_cells(Cursor::new(excel_data)).unwrap();
    let values: Vec<&str> = sheet.cells.iter().map(|c| c.value.as_str()).collect();

    assert_eq!(values, vec!["R1C1", "R2C1"]);
}

#[test]
fn test_nonempty_limit_truncates_output() {
    let extractor = ExtractorBuilder::new()
        .with_bom(false)
        .with_max_nonempty(4)
        .build()
        .unwrap();
    let excel_data = fixtures::generate_grid_with_outlier().unwrap();

    let tsv = extractor.convert_to_string(Cursor::new(excel_data)).unwrap();

    assert_eq!(
        tsv_lines(&tsv),
        vec![
            "A1\tR1C1",
            "B1\tR1C2",
            "C1\tR1C3",
            "A2\tR2C1",
            "# ...truncated...",
        ]
    );
}

#[test]
fn test_nonempty_limit_equal_to_cell_count_marks_truncation() {
    let extractor = ExtractorBuilder::new()
        .with_bom(false)
        .with_max_nonempty(9)
        .build()
        .unwrap();
    let excel_data = fixtures::generate_grid_with_outlier().unwrap();

    let sheet = extractor.read_cells(Cursor::new(excel_data.clone())).unwrap();
    assert_eq!(sheet.cells.len(), 9);
    assert!(sheet.truncated);

    // 上限に達した時点で打ち切りの印が付く
    let tsv = extractor.convert_to_string(Cursor::new(excel_data)).unwrap();
    let lines = tsv_lines(&tsv);
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[8], "C3\tR3C3");
    assert_eq!(lines[9], "# ...truncated...");

    let extractor = ExtractorBuilder::new().with_max_nonempty(10).build().unwrap();
    let sheet = extractor
        .read_cells(Cursor::new(fixtures::generate_grid_with_outlier().unwrap()))
        .unwrap();
    assert_eq!(sheet.cells.len(), 9);
    assert!(!sheet.truncated);
}

#[test]
fn test_read_from_file() {
    use std::io::Write;

    let excel_data = fixtures::generate_skill_sheet().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&excel_data).unwrap();

    let extractor = ExtractorBuilder::new().build().unwrap();
    let input = std::fs::File::open(file.path()).unwrap();
    let pairs = extractor.extract_pairs(input).unwrap();

    assert_eq!(pairs.len(), 4);
}

#[test]
fn test_file_not_found() {
    let result = std::fs::File::open("nonexistent_file.xlsx").map_err(sheetkv::SheetKvError::from);

    assert!(matches!(result, Err(sheetkv::SheetKvError::Io(_))));
}
