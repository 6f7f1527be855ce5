use chrono::NaiveDateTime;

/// `YYYY-MM-DD HH:MM:SS`, also the record key in the history file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One generated post as stored in the history file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub timestamp: String,    // ⇔ column 0 (日期)
    pub product_name: String, // ⇔ column 1 (商品名稱)
    pub style: String,        // ⇔ column 2 (風格)
    pub content: String,      // ⇔ column 3 (生成的文案)
}

impl PostRecord {
    pub fn new(
        timestamp: impl Into<String>,
        product_name: impl Into<String>,
        style: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            product_name: product_name.into(),
            style: style.into(),
            content: content.into(),
        }
    }

    /// Label shown in the history selector: `timestamp + sep + product_name`.
    pub fn label(&self, sep: &str) -> String {
        format!("{}{}{}", self.timestamp, sep, self.product_name)
    }

    /// Row as written to the CSV file.
    pub fn as_row(&self) -> [&str; 4] {
        [
            &self.timestamp,
            &self.product_name,
            &self.style,
            &self.content,
        ]
    }
}

pub fn format_stamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_stamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}
