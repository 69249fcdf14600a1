use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::Value;
use web_sys::Document;

use crate::config::{self, selectors};
use crate::error::PageError;

/// One entry of `events.json`. Only the head count matters here.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EventRecord {
    #[serde(default)]
    pub families_served: Option<Value>,
}

impl EventRecord {
    pub fn families(&self) -> i64 {
        self.families_served.as_ref().and_then(value_to_int).unwrap_or(0)
    }
}

/// Integer parsing with the leniency of JavaScript's `parseInt`: leading whitespace,
/// an optional sign, an optional `0x` prefix, then as many digits as are present.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, body) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits: Vec<u32> = body.chars().map_while(|c| c.to_digit(radix)).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.iter().fold(0i64, |acc, &d| {
        acc.saturating_mul(i64::from(radix)).saturating_add(i64::from(d))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// `Number.prototype.toString()` for a double: shortest round-trip digits, plain
/// notation between 1e-6 and 1e21, exponent notation outside it.
pub fn js_number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{}e{}{}", head, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", head, tail, e_sign, e.abs())
        }
    };
    format!("{}{}", sign, body)
}

/// The text JavaScript's `String(value)` would produce for a JSON value.
fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(js_number_to_string).unwrap_or_default(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn value_to_int(value: &Value) -> Option<i64> {
    parse_int_prefix(&js_string(value))
}

pub fn total_families_served(events: &[EventRecord]) -> i64 {
    events
        .iter()
        .fold(0i64, |sum, event| sum.saturating_add(event.families()))
}

pub async fn fetch_events(url: &str) -> Result<Vec<EventRecord>, PageError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|source| PageError::Fetch { url: url.to_string(), source })?;

    if !response.ok() {
        return Err(PageError::Status { url: url.to_string(), status: response.status() });
    }

    response
        .json::<Vec<EventRecord>>()
        .await
        .map_err(|source| PageError::Decode { url: url.to_string(), source })
}

/// Fetches the event list once and stores the total on the families-served counter.
/// Failures are logged and leave the counter target alone.
pub async fn load_events_and_update_counters(document: Document) {
    let url = config::get_events_url();
    match fetch_events(url).await {
        Ok(events) => {
            let total = total_families_served(&events);
            log::info!("Loaded {} events, {} families served", events.len(), total);
            if let Some(element) = document.get_element_by_id(selectors::FAMILIES_SERVED_ID) {
                if let Err(e) = element.set_attribute("data-target", &total.to_string()) {
                    log::error!("Error updating families served target: {:?}", e);
                }
            }
        }
        Err(e) => log::error!("Error loading events data: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(json: &str) -> Vec<EventRecord> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn sums_only_parseable_values() {
        let events = records(r#"[{"families_served":"120"},{"families_served":"abc"},{}]"#);
        assert_eq!(total_families_served(&events), 120);
    }

    #[test]
    fn accepts_numbers_and_ignores_other_types() {
        let events = records(
            r#"[
                {"families_served": 40},
                {"families_served": 12.9},
                {"families_served": null},
                {"families_served": true},
                {"families_served": [3]},
                {"families_served": {"count": 9}},
                {"name": "Winter drive", "families_served": " 8 "}
            ]"#,
        );
        assert_eq!(total_families_served(&events), 63);
    }

    #[test]
    fn empty_list_is_zero() {
        assert_eq!(total_families_served(&[]), 0);
    }

    #[test]
    fn parse_int_prefix_follows_parse_int() {
        assert_eq!(parse_int_prefix("120"), Some(120));
        assert_eq!(parse_int_prefix("  42 families"), Some(42));
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("+5"), Some(5));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn parse_int_prefix_reads_hex() {
        assert_eq!(parse_int_prefix("0x1A"), Some(26));
        assert_eq!(parse_int_prefix("0XfF"), Some(255));
        assert_eq!(parse_int_prefix("-0x10"), Some(-16));
        assert_eq!(parse_int_prefix("0x1G"), Some(1));
        assert_eq!(parse_int_prefix("0x"), None);
        assert_eq!(parse_int_prefix("012"), Some(12));
    }

    #[test]
    fn numbers_go_through_their_string_form() {
        let events = records(r#"[{"families_served": 1e21}, {"families_served": 5e-7}]"#);
        assert_eq!(total_families_served(&events), 6);
    }

    #[test]
    fn arrays_use_their_joined_text() {
        let events = records(
            r#"[{"families_served": [1, 2]}, {"families_served": []}, {"families_served": [null, 4]}]"#,
        );
        assert_eq!(total_families_served(&events), 1);
    }

    #[test]
    fn number_text_matches_javascript() {
        assert_eq!(js_number_to_string(120.0), "120");
        assert_eq!(js_number_to_string(12.9), "12.9");
        assert_eq!(js_number_to_string(-3.5), "-3.5");
        assert_eq!(js_number_to_string(0.000001), "0.000001");
        assert_eq!(js_number_to_string(5e-7), "5e-7");
        assert_eq!(js_number_to_string(1e21), "1e+21");
        assert_eq!(js_number_to_string(1.5e22), "1.5e+22");
        assert_eq!(js_number_to_string(1e20), "100000000000000000000");
        assert_eq!(js_number_to_string(0.25), "0.25");
        assert_eq!(js_number_to_string(-0.0), "0");
    }

    #[test]
    fn huge_totals_saturate() {
        let events = vec![
            EventRecord { families_served: Some(Value::from(i64::MAX)) },
            EventRecord { families_served: Some(Value::from(1)) },
        ];
        assert_eq!(total_families_served(&events), i64::MAX);
    }
}
