use js_sys::Date;
use wasm_bindgen::JsValue;

const LOCALE: &str = "en-US";

pub fn time_now() -> String {
    Date::new_0().to_locale_time_string(LOCALE).into()
}

/// Server timestamps in the browser's local time; unparseable input is shown
/// as-is.
pub fn date_time(raw: &str) -> String {
    match parse(raw) {
        Some(date) => date.to_locale_string(LOCALE, &JsValue::UNDEFINED).into(),
        None => raw.to_string(),
    }
}

pub fn date(raw: &str) -> String {
    match parse(raw) {
        Some(date) => date.to_locale_date_string(LOCALE, &JsValue::UNDEFINED).into(),
        None => raw.to_string(),
    }
}

fn parse(raw: &str) -> Option<Date> {
    let date = Date::new(&JsValue::from_str(raw));
    (!date.get_time().is_nan()).then_some(date)
}
