use crate::domain::model::{InputRow, LookupResult};
use crate::utils::error::{EnrichError, Result};
use csv::{ByteRecord, QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};

pub const REQUIRED_HEADERS: [&str; 3] = ["company", "email", "phone"];
pub const OUTPUT_HEADER: &str = "Business Name,Address,Phone Number";

struct ColumnIndex {
    company: usize,
    email: usize,
    phone: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_HEADERS
            .into_iter()
            .filter(|name| position(*name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(EnrichError::MissingHeaders { missing });
        }

        Ok(Self {
            company: position("company").unwrap_or_default(),
            email: position("email").unwrap_or_default(),
            phone: position("phone").unwrap_or_default(),
        })
    }
}

/// 非 UTF-8 位元組以 U+FFFD 取代，單一欄位編碼錯誤不影響其他列
fn decode(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

fn is_blank(fields: &[String]) -> bool {
    fields.iter().all(|field| field.is_empty()) && fields.len() <= 1
}

fn field(fields: &[String], index: usize) -> String {
    fields.get(index).cloned().unwrap_or_default()
}

/// 解析輸入 CSV。只以逗號切割，不處理引號跳脫。
pub fn parse_input(data: &[u8], path: &str) -> Result<Vec<InputRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let mut lines = Vec::new();
    for record in reader.byte_records() {
        let fields = decode(&record?);
        if !is_blank(&fields) {
            lines.push(fields);
        }
    }

    let mut lines = lines.into_iter();
    let headers = lines.next().ok_or_else(|| EnrichError::EmptyFile {
        path: path.to_string(),
    })?;
    let columns = ColumnIndex::from_headers(&headers)?;

    Ok(lines
        .enumerate()
        .map(|(i, record)| InputRow {
            index: i + 1,
            company: field(&record, columns.company),
            email: field(&record, columns.email),
            phone: field(&record, columns.phone),
        })
        .collect())
}

/// 輸出 CSV：標頭不加引號，每個資料欄位都加上雙引號
pub fn render_results(results: &[LookupResult]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(OUTPUT_HEADER.len() + results.len() * 64);
    output.extend_from_slice(OUTPUT_HEADER.as_bytes());
    output.push(b'\n');

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(output);

    for result in results {
        writer.write_record([
            result.business_name.as_str(),
            result.address.as_str(),
            result.phone_number.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| EnrichError::IoError(e.into_error()))
}
