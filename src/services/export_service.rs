use crate::error::{Error, Result};
use crate::models::candidate::{upload_label, CandidateRecord};
use crate::utils::time::format_date;
use rust_xlsxwriter::*;

pub const CSV_FILE_NAME: &str = "candidates_data.csv";
pub const XLSX_FILE_NAME: &str = "candidates_data.xlsx";

pub const EXPORT_HEADERS: [&str; 11] = [
    "ID",
    "Name",
    "Age",
    "Email",
    "Mobile",
    "Qualification",
    "Location",
    "Status",
    "Registration Date",
    "Resume",
    "ID Proof",
];

pub struct ExportService;

impl ExportService {
    fn row(candidate: &CandidateRecord) -> [String; 11] {
        [
            candidate.id.to_string(),
            candidate.name.clone(),
            candidate.age.to_string(),
            candidate.email.clone(),
            candidate.mobile.clone(),
            candidate.qualification.clone(),
            candidate.location.clone(),
            candidate.occupation_status.clone(),
            format_date(candidate.registration_date),
            upload_label(&candidate.resume).to_string(),
            upload_label(&candidate.id_proof).to_string(),
        ]
    }

    /// Every field, header included, is double-quoted.
    pub fn generate_candidates_csv(candidates: &[CandidateRecord]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(Vec::new());

        writer.write_record(EXPORT_HEADERS)?;
        for candidate in candidates {
            writer.write_record(Self::row(candidate))?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::Internal(format!("CSV buffer error: {}", e)))
    }

    /// Generate a styled XLSX workbook from a list of candidates.
    pub fn generate_candidates_xlsx(candidates: &[CandidateRecord]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Candidates")?;

        let primary_color = Color::RGB(0x1E293B);
        let header_bg = Color::RGB(0x0F172A);
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC);
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);

        let status_available = Color::RGB(0x10B981);
        let status_unavailable = Color::RGB(0xEF4444);

        let widths = [38.0, 26.0, 8.0, 30.0, 14.0, 16.0, 16.0, 16.0, 18.0, 14.0, 14.0];
        for (i, width) in widths.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }
        let last_col = (EXPORT_HEADERS.len() - 1) as u16;

        // Title row
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 36)?;
        worksheet.merge_range(0, 0, 0, last_col, "Candidate Report", &title_format)?;

        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(1, 22)?;
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
        let subtitle_text = format!("Exported: {}  •  Total candidates: {}", now, candidates.len());
        worksheet.merge_range(1, 0, 1, last_col, &subtitle_text, &subtitle_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 2;
        worksheet.set_row_height(header_row, 28)?;
        for (i, name) in EXPORT_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let data_start_row = 3;
        for (idx, candidate) in candidates.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);

            worksheet.set_row_height(row, 20)?;

            for (col, value) in Self::row(candidate).iter().enumerate() {
                let col = col as u16;
                match col {
                    // Age
                    2 => {
                        worksheet.write_number_with_format(row, col, candidate.age as f64, &center_fmt)?;
                    }
                    // Status
                    7 => {
                        let color = match value.as_str() {
                            "Available" => status_available,
                            "Not Available" => status_unavailable,
                            _ => Color::RGB(0x64748B),
                        };
                        let status_fmt = Format::new()
                            .set_font_size(10)
                            .set_bold()
                            .set_font_color(Color::White)
                            .set_background_color(color)
                            .set_align(FormatAlign::Center)
                            .set_align(FormatAlign::VerticalCenter)
                            .set_border(FormatBorder::Thin)
                            .set_border_color(border_color);
                        worksheet.write_string_with_format(row, col, value, &status_fmt)?;
                    }
                    8..=10 => {
                        worksheet.write_string_with_format(row, col, value, &center_fmt)?;
                    }
                    1 => {
                        let name_fmt = base_fmt.clone().set_bold();
                        worksheet.write_string_with_format(row, col, value, &name_fmt)?;
                    }
                    _ => {
                        worksheet.write_string_with_format(row, col, value, &base_fmt)?;
                    }
                }
            }
        }

        // Summary row
        let total_row = data_start_row + candidates.len() as u32 + 1;
        let summary_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(Color::RGB(0xE0E7FF))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let available = candidates
            .iter()
            .filter(|c| c.occupation_status == "Available")
            .count();
        let with_resume = candidates.iter().filter(|c| c.resume.is_some()).count();
        worksheet.set_row_height(total_row, 24)?;
        worksheet.merge_range(
            total_row,
            0,
            total_row,
            3,
            &format!("Total: {} candidates", candidates.len()),
            &summary_fmt,
        )?;
        worksheet.merge_range(
            total_row,
            4,
            total_row,
            last_col,
            &format!(
                "Available: {} | Not available: {} | Resumes uploaded: {}",
                available,
                candidates.len() - available,
                with_resume
            ),
            &summary_fmt,
        )?;

        worksheet.set_freeze_panes(3, 0)?;
        worksheet.autofilter(
            header_row,
            0,
            (data_start_row + candidates.len() as u32).saturating_sub(1).max(header_row),
            last_col,
        )?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::Document;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn record() -> CandidateRecord {
        CandidateRecord {
            id: Uuid::nil(),
            name: "Doe, \"Johnny\"".into(),
            age: 30,
            email: "john@example.com".into(),
            mobile: "9876543210".into(),
            qualification: "Graduate".into(),
            location: "delhi".into(),
            occupation_status: "Available".into(),
            resume: Some(Document::from_bytes("cv.pdf".into(), "application/pdf".into(), b"%PDF")),
            id_proof: None,
            registration_date: NaiveDate::from_ymd_opt(2023, 8, 15).unwrap(),
            updated_at: None,
            password_hash: String::new(),
        }
    }

    #[test]
    fn csv_quotes_every_field_in_fixed_order() {
        let bytes = ExportService::generate_candidates_csv(&[record()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "\"ID\",\"Name\",\"Age\",\"Email\",\"Mobile\",\"Qualification\",\"Location\",\"Status\",\"Registration Date\",\"Resume\",\"ID Proof\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"00000000-0000-0000-0000-000000000000\",\"Doe, \"\"Johnny\"\"\",\"30\",\"john@example.com\",\"9876543210\",\"Graduate\",\"delhi\",\"Available\",\"2023-08-15\",\"Uploaded\",\"Not Uploaded\""
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_csv_has_only_the_header() {
        let bytes = ExportService::generate_candidates_csv(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 1);
    }

    #[test]
    fn xlsx_is_a_zip_container() {
        let bytes = ExportService::generate_candidates_xlsx(&[record(), record()]).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let empty = ExportService::generate_candidates_xlsx(&[]).unwrap();
        assert_eq!(&empty[..2], b"PK");
    }
}
