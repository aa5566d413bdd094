//! Display formatting for table cells and summary cards.

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Unit index `i` such that `1024^i <= bytes < 1024^(i+1)`, capped at TB.
pub fn size_unit_index(bytes: u64) -> usize {
    let mut index = 0;
    let mut rest = bytes;
    while rest >= 1024 && index < SIZE_UNITS.len() - 1 {
        rest /= 1024;
        index += 1;
    }
    index
}

/// Human-readable size, e.g. `1536` → `"2 KB"`. Zero is `"0 Byte"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Byte".to_string();
    }
    let index = size_unit_index(bytes);
    let scaled = bytes as f64 / 1024f64.powi(index as i32);
    format!("{} {}", scaled.round(), SIZE_UNITS[index])
}

/// Currency amount with two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("₹{amount:.2}")
}

/// Render a backend timestamp in the browser's locale.
///
/// Unparseable input is returned unchanged.
#[cfg(target_arch = "wasm32")]
pub fn format_timestamp(raw: &str) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(raw));
    if date.get_time().is_nan() {
        return raw.to_string();
    }
    date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED)
        .into()
}

/// Render a backend timestamp as `M/D/YYYY, h:mm:ss AM`.
///
/// Timestamps without an offset are taken as local time. Unparseable input
/// is returned unchanged.
#[cfg(not(target_arch = "wasm32"))]
pub fn format_timestamp(raw: &str) -> String {
    use chrono::{DateTime, Local, NaiveDateTime};

    const DISPLAY: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return with_offset.with_timezone(&Local).format(DISPLAY).to_string();
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|naive| naive.format(DISPLAY).to_string())
        .unwrap_or_else(|| raw.to_string())
}
