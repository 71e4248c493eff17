//! Macro-enabled workbook export.
//!
//! The template's VBA project is carried over into a freshly written
//! workbook with two sheets: `Data` (the table) and a hidden `Cfg` sheet
//! holding the API key, system and environment in `B1:B3`.

use chrono::{Datelike, NaiveDate};
use engdocs_core::{cell_text, Environment, ResultTable, Schema};
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatAlign, Workbook, Worksheet};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::error::StoreError;

/// Default template location.
pub const DEFAULT_TEMPLATE: &str = "./gsy/template.xlsm";

const VBA_PROJECT_ENTRY: &str = "xl/vbaProject.bin";
const DATA_SHEET: &str = "Data";
const CFG_SHEET: &str = "Cfg";
const HEADER_FILL: u32 = 0x00D3_D3D3;
const DATE_FORMAT: &str = "dd/mm/yyyy";
const MAX_COLUMN_WIDTH: usize = 50;
const WIDTH_SAMPLE_ROWS: usize = 100;
const WIDTH_PADDING: usize = 2;

/// Workbook export settings.
#[derive(Debug, Clone)]
pub struct WorkbookExport {
    /// Macro-enabled template.
    pub template: PathBuf,
    /// API key stored in the hidden configuration sheet.
    pub api_key: String,
    /// System label stored in the hidden configuration sheet.
    pub schema: Schema,
    /// Environment label stored in the hidden configuration sheet.
    pub environment: Environment,
}

impl WorkbookExport {
    /// Creates export settings.
    pub fn new(
        template: impl Into<PathBuf>,
        api_key: impl Into<String>,
        schema: Schema,
        environment: Environment,
    ) -> Self {
        Self {
            template: template.into(),
            api_key: api_key.into(),
            schema,
            environment,
        }
    }

    /// Fails unless the template exists and `output` ends in `.xlsm`.
    pub fn check(&self, output: &Path) -> Result<(), StoreError> {
        if !self.template.is_file() {
            let name = self.template.display().to_string();
            error!("Error: {} not found", name);
            error!("This file is required to create an excel file with macros");
            return Err(StoreError::MissingFile {
                path: name,
                purpose: "macro-enabled workbook template".to_string(),
            });
        }
        if output.extension().and_then(|e| e.to_str()) != Some("xlsm") {
            let name = output.display().to_string();
            error!("Error: {} is not in the .xlsm format", name);
            return Err(StoreError::InvalidOutput(name));
        }
        Ok(())
    }

    /// Writes `table` to `output`.
    pub fn export(&self, table: &ResultTable, output: &Path) -> Result<(), StoreError> {
        self.check(output)?;
        info!(
            "Exporting to Excel file: {} (System: {})",
            output.display(),
            self.schema
        );

        let mut workbook = Workbook::new();

        let vba = self.extract_vba_project(output)?;
        if let Some(vba_path) = &vba {
            workbook.add_vba_project(vba_path)?;
            info!("Macros copied from {}", self.template.display());
        }

        let result = self.write(&mut workbook, table, output);

        if let Some(vba_path) = vba {
            if let Err(e) = std::fs::remove_file(&vba_path) {
                debug!(path = %vba_path.display(), error = %e, "Could not remove extracted VBA project");
            }
        }
        result?;

        info!("Excel file saved successfully: {}", output.display());
        info!("Total rows exported: {}", table.len());
        Ok(())
    }

    fn write(&self, workbook: &mut Workbook, table: &ResultTable, output: &Path) -> Result<(), StoreError> {
        let data = workbook.add_worksheet();
        data.set_name(DATA_SHEET)?;
        write_data(data, table)?;

        let cfg = workbook.add_worksheet();
        cfg.set_name(CFG_SHEET)?;
        cfg.write_string(0, 1, &self.api_key)?;
        cfg.write_string(1, 1, self.schema.label())?;
        cfg.write_string(2, 1, self.environment.label())?;
        cfg.set_hidden(true);
        info!("API key and system stored in hidden {} sheet", CFG_SHEET);

        workbook.save(output)?;
        Ok(())
    }

    /// Extracts the template's VBA project next to `output`.
    ///
    /// Returns `None` when the template carries no macros.
    fn extract_vba_project(&self, output: &Path) -> Result<Option<PathBuf>, StoreError> {
        let mut archive = zip::ZipArchive::new(File::open(&self.template)?)?;
        let mut entry = match archive.by_name(VBA_PROJECT_ENTRY) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                warn!("Template {} has no VBA project", self.template.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;

        let mut name = output.file_name().unwrap_or_default().to_os_string();
        name.push(".vbaProject.bin");
        let path = output.with_file_name(name);
        std::fs::write(&path, bytes)?;
        debug!(path = %path.display(), "Extracted VBA project");
        Ok(Some(path))
    }
}

fn write_data(sheet: &mut Worksheet, table: &ResultTable) -> Result<(), StoreError> {
    let columns = table.columns();
    if columns.is_empty() {
        return Ok(());
    }

    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let date = Format::new().set_num_format(DATE_FORMAT);

    let last_col = col_num(columns.len() - 1)?;
    let last_row = row_num(table.len())?;

    for (idx, name) in columns.iter().enumerate() {
        let col = col_num(idx)?;
        sheet.write_string_with_format(0, col, name, &header)?;

        let is_date = name.to_lowercase().contains("date");
        for (row, value) in table.column_values(name).enumerate() {
            write_cell(sheet, row_num(row + 1)?, col, value, is_date.then_some(&date))?;
        }

        sheet.set_column_width(col, column_width(table, name))?;
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofilter(0, 0, last_row, last_col)?;
    Ok(())
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    date_format: Option<&Format>,
) -> Result<(), StoreError> {
    match (value, date_format) {
        (Value::Null, _) => {}
        (Value::String(text), Some(format)) => match parse_date(text) {
            Some(date) => {
                let excel = ExcelDateTime::from_ymd(date.0, date.1, date.2)?;
                sheet.write_datetime_with_format(row, col, &excel, format)?;
            }
            None => {
                sheet.write_string_with_format(row, col, text, format)?;
            }
        },
        (Value::String(text), None) => {
            sheet.write_string(row, col, text)?;
        }
        (Value::Bool(flag), _) => {
            sheet.write_boolean(row, col, *flag)?;
        }
        (Value::Number(number), _) => match number.as_f64() {
            Some(n) => {
                sheet.write_number(row, col, n)?;
            }
            None => {
                sheet.write_string(row, col, number.to_string())?;
            }
        },
        (other, _) => {
            sheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

/// Reads `DD/MM/YYYY` or `YYYY-MM-DD` into `(year, month, day)`.
fn parse_date(text: &str) -> Option<(u16, u8, u8)> {
    let date = NaiveDate::parse_from_str(text, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()?;
    Some((
        u16::try_from(date.year()).ok()?,
        u8::try_from(date.month()).ok()?,
        u8::try_from(date.day()).ok()?,
    ))
}

/// Header and first sampled rows, plus padding, capped.
fn column_width(table: &ResultTable, column: &str) -> f64 {
    let longest = table
        .column_values(column)
        .take(WIDTH_SAMPLE_ROWS - 1)
        .map(|v| cell_text(v).chars().count())
        .chain(std::iter::once(column.chars().count()))
        .max()
        .unwrap_or(0);
    let width = (longest + WIDTH_PADDING).min(MAX_COLUMN_WIDTH);
    f64::from(u32::try_from(width).unwrap_or(u32::MAX))
}

fn row_num(idx: usize) -> Result<u32, StoreError> {
    u32::try_from(idx).map_err(|_| StoreError::InvalidOutput(format!("row {idx} exceeds sheet limits")))
}

fn col_num(idx: usize) -> Result<u16, StoreError> {
    u16::try_from(idx).map_err(|_| StoreError::InvalidOutput(format!("column {idx} exceeds sheet limits")))
}
