use braced_core::config::ANALYTICS_LOADER_URL;
use braced_core::AnalyticsHost;
use js_sys::{Array, Date, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlScriptElement, Window};

use crate::dom::js_err;

const GTAG_KEY: &str = "gtag";
const DATA_LAYER_KEY: &str = "dataLayer";

/// Injects the tag loader into the live page. Loaded-ness is read from the
/// global `gtag` function so a second injection is never attempted.
pub(crate) struct PageAnalytics;

impl AnalyticsHost for PageAnalytics {
    fn is_loaded(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        Reflect::get(&window, &JsValue::from_str(GTAG_KEY))
            .map(|value| value.is_function())
            .unwrap_or(false)
    }

    fn inject(&mut self, measurement_id: &str) {
        match inject_gtag(measurement_id) {
            Ok(()) => gloo::console::log!("analytics: loader injected", measurement_id),
            Err(err) => gloo::console::warn!("analytics: injection failed", js_err(err)),
        }
    }
}

fn inject_gtag(measurement_id: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
    append_loader(&window, measurement_id)?;

    let data_layer_key = JsValue::from_str(DATA_LAYER_KEY);
    let data_layer = Reflect::get(&window, &data_layer_key)?;
    if !Array::is_array(&data_layer) {
        Reflect::set(&window, &data_layer_key, &Array::new())?;
    }
    // gtag.js reads the `arguments` object itself, not an array copy.
    let gtag = Function::new_no_args("window.dataLayer.push(arguments);");
    Reflect::set(&window, &JsValue::from_str(GTAG_KEY), &gtag)?;
    gtag.call2(&JsValue::UNDEFINED, &JsValue::from_str("js"), &Date::new_0())?;
    gtag.call2(
        &JsValue::UNDEFINED,
        &JsValue::from_str("config"),
        &JsValue::from_str(measurement_id),
    )?;
    Ok(())
}

fn append_loader(window: &Window, measurement_id: &str) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("missing head"))?;
    let script = document
        .create_element("script")?
        .dyn_into::<HtmlScriptElement>()?;
    script.set_async(true);
    script.set_src(&format!("{ANALYTICS_LOADER_URL}?id={measurement_id}"));
    head.append_child(&script)?;
    Ok(())
}
