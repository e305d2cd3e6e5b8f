#![no_main]

use libfuzzer_sys::fuzz_target;
use toml_decode::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.contains(['\n', '\r', '#']) {
        return;
    }
    let Ok(table) = toml_decode::decode(&format!("v = {text}")) else {
        return;
    };
    let Some(value) = table.get("v") else {
        return;
    };
    if !value.is_datetime() {
        return;
    }
    let formatted = match value {
        Value::OffsetDateTime(dt) => dt.to_string(),
        Value::LocalDateTime(dt) => dt.to_string(),
        Value::LocalDate(d) => d.to_string(),
        Value::LocalTime(t) => t.to_string(),
        _ => unreachable!(),
    };
    let again = toml_decode::decode(&format!("v = {formatted}")).unwrap();
    assert_eq!(again.get("v"), Some(value));
});
