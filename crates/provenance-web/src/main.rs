use dioxus::prelude::*;
use provenance_core::{Verdict, analyze};
use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Analyzed {
        file_name: String,
        verdict: Verdict,
        report_json: String,
    },
    Error(String),
}

// Saves `bytes` through a temporary object URL and a synthetic link click.
fn download_bytes(file_name: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let blob = web_sys::Blob::new_with_u8_array_sequence(&js_sys::Array::of1(
        &js_sys::Uint8Array::from(bytes).into(),
    ))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(file_name);
    body.append_child(&a)?;
    a.click();
    body.remove_child(&a)?;
    web_sys::Url::revoke_object_url(&url)
}

fn analyze_upload(file_name: String, bytes: &[u8]) -> AppState {
    let verdict = analyze(bytes).with_identifier(file_name.clone());
    match serde_json::to_string_pretty(&verdict) {
        Ok(report_json) => AppState::Analyzed {
            file_name,
            verdict,
            report_json,
        },
        Err(e) => AppState::Error(e.to_string()),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn app() -> Element {
    let mut app_state = use_signal(|| AppState::Idle);

    let handle_file_upload = move |evt: FormEvent| async move {
        let Some(file_engine) = evt.files() else {
            return;
        };
        let Some(file_name) = file_engine.files().first().cloned() else {
            return;
        };
        match file_engine.read_file(&file_name).await {
            Some(bytes) => {
                log::info!("File loaded: {}, size: {}", file_name, bytes.len());
                app_state.set(analyze_upload(file_name, &bytes));
            }
            None => app_state.set(AppState::Error(format!("Could not read {file_name}"))),
        }
    };

    rsx! {
        div {
            class: "min-h-screen bg-gray-100 flex items-center justify-center p-4",
            div {
                class: "max-w-2xl w-full bg-white rounded-lg shadow-xl p-8 space-y-6",
                // Header
                div {
                    class: "text-center",
                    h1 { class: "text-4xl font-bold text-gray-800", "Photo Provenance" }
                    p { class: "text-gray-500 mt-2", "Drop a photo to check for real-world camera traits." }
                }

                // File Input
                div {
                    class: "flex flex-col items-center justify-center p-6 border-2 border-dashed border-gray-300 rounded-lg",
                    p { class: "text-gray-600 mb-4", "Select a JPEG, PNG, WEBP, TIFF or BMP image" }
                    label {
                        class: "file-input-button",
                        "Select File"
                        input {
                            r#type: "file",
                            class: "hidden",
                            accept: ".jpg, .jpeg, .png, .webp, .tif, .tiff, .bmp",
                            oninput: handle_file_upload,
                        }
                    }
                }

                // Report
                match app_state() {
                    AppState::Idle => {
                        rsx! { p { class: "text-center text-gray-500", "Your report will appear here." } }
                    },
                    AppState::Analyzed { file_name, verdict, report_json } => {
                        let banner = if verdict.is_confident() {
                            "p-4 bg-green-100 border border-green-400 text-green-700 rounded-md text-center font-bold"
                        } else {
                            "p-4 bg-yellow-100 border border-yellow-400 text-yellow-700 rounded-md text-center font-bold"
                        };
                        let label = verdict.label.to_string();
                        let make = verdict.metadata.make.unwrap_or("Unknown");
                        let model = verdict.metadata.model.unwrap_or("Unknown");
                        let resolution = verdict.resolution().unwrap_or_else(|| "Unknown".to_string());
                        let timestamp = verdict.metadata.timestamp.clone().unwrap_or_else(|| "Not found".to_string());
                        let gps = yes_no(verdict.metadata.gps_present);
                        let screenshot = yes_no(verdict.screenshot);
                        let notes: Vec<String> = verdict.reasons.iter().map(ToString::to_string).collect();
                        let stem = file_name.rsplit_once('.').map_or(file_name.as_str(), |(stem, _)| stem);
                        let download_name = format!("{stem}.provenance.json");
                        let report = report_json.clone();
                        rsx! {
                            div {
                                class: "space-y-4",
                                h3 { class: "text-xl font-semibold text-gray-700", "Result for ", span { class: "font-mono", "{file_name}" } }
                                p { class: "{banner}", "{label}" }
                                div {
                                    class: "grid grid-cols-2 gap-4 text-sm",
                                    div {
                                        p { class: "font-semibold", "Device make" }
                                        p { "{make}" }
                                        p { class: "font-semibold", "Device model" }
                                        p { "{model}" }
                                        p { class: "font-semibold", "Resolution" }
                                        p { "{resolution}" }
                                    }
                                    div {
                                        p { class: "font-semibold", "Timestamp" }
                                        p { "{timestamp}" }
                                        p { class: "font-semibold", "GPS info present" }
                                        p { "{gps}" }
                                        p { class: "font-semibold", "Screenshot detected" }
                                        p { "{screenshot}" }
                                    }
                                }
                                if !notes.is_empty() {
                                    h4 { class: "font-semibold text-gray-700", "Notes" }
                                    ul {
                                        class: "list-disc list-inside bg-gray-50 p-4 rounded-md",
                                        for note in notes {
                                            li { class: "text-sm", "{note}" }
                                        }
                                    }
                                }
                                h4 { class: "font-semibold text-gray-700", "Full JSON" }
                                pre { class: "bg-gray-50 p-4 rounded-md text-xs overflow-x-auto", "{report_json}" }
                                button {
                                    class: "w-full bg-blue-600 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded-md transition",
                                    onclick: move |_| {
                                        if let Err(e) = download_bytes(&download_name, report.as_bytes()) {
                                            log::error!("download failed: {e:?}");
                                        }
                                    },
                                    "Download Report"
                                }
                            }
                        }
                    },
                    AppState::Error(err) => {
                        rsx! { p { class: "text-red-500", "Error: {err}" } }
                    },
                }

                // Footer
                p {
                    class: "text-center text-xs text-gray-400 pt-4 border-t",
                    "All processing is done in your browser. Your files never leave your computer."
                }
            }
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    launch(app);
}
