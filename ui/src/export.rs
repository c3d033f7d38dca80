//! Export of the currently filtered dashboard view.
//!
//! JSON carries a self-describing envelope (id, timestamp, active filters,
//! aggregates); CSV is the tidy group-means table alone. Both honor the
//! filters exactly as the charts see them, so an export always matches the
//! screen.

use dioxus::prelude::*;
use serde::Serialize;

use crate::core::aggregate;
use crate::core::dataset::Record;
use crate::core::filters::FilterState;
#[cfg(target_arch = "wasm32")]
use crate::core::platform;
use crate::core::platform::platform_string;
use crate::core::stats;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

/// Everything a reader needs to reproduce the exported view.
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope {
    pub id: String,
    pub created_at: String,
    pub platform: String,
    pub origin: String,
    pub gender: String,
    pub year: String,
    pub metrics: [String; 2],
    pub row_count: usize,
    /// Pearson r of the metric pair over the filtered rows. Serializes as
    /// `null` when undefined.
    pub r: f64,
    pub groups: Vec<GroupRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupRow {
    pub age_group: String,
    pub first_mean: f64,
    pub second_mean: f64,
}

pub fn build_envelope(records: &[Record], filters: &FilterState, origin: &str) -> ExportEnvelope {
    let base = aggregate::filter_by_gender(records, &filters.gender);
    let rows = aggregate::filter_by_year(&base, &filters.year);
    let metrics = filters.metrics.metrics();

    let groups = aggregate::mean_by_age_group(&rows, &metrics)
        .into_iter()
        .map(|group| GroupRow {
            age_group: group.age_group,
            first_mean: group.means[0],
            second_mean: group.means[1],
        })
        .collect();

    let pairs: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| (metrics[0].value(r), metrics[1].value(r)))
        .collect();

    ExportEnvelope {
        id: uuid::Uuid::new_v4().to_string(),
        created_at: now_rfc3339(),
        platform: platform_string().to_string(),
        origin: origin.to_string(),
        gender: filters.gender.value(),
        year: filters.year.value(),
        metrics: [metrics[0].key().to_string(), metrics[1].key().to_string()],
        row_count: rows.len(),
        r: stats::pearson(&pairs),
        groups,
    }
}

#[component]
pub fn ExportPanel(records: Vec<Record>, filters: FilterState, origin: String) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("export-panel__meta".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "export-panel__meta export-panel__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "export-panel__meta export-panel__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let json_handler = {
        let records = records.clone();
        let filters = filters.clone();
        let origin = origin.clone();
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Preparing JSON"));
            let envelope = build_envelope(&records, &filters, &origin);

            #[cfg(target_arch = "wasm32")]
            {
                let mut status_signal = status_signal;
                let mut busy_signal = busy_signal;
                platform::spawn_future(async move {
                    let outcome = perform_json_export(envelope).await;
                    match outcome {
                        Ok(message) => status_signal.set(ExportStatus::Done(message)),
                        Err(err) => status_signal.set(ExportStatus::Error(err)),
                    }
                    busy_signal.set(false);
                });
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let outcome = futures::executor::block_on(perform_json_export(envelope));
                match outcome {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => status_signal.set(ExportStatus::Error(err)),
                }
                busy_signal.set(false);
            }
        }
    };

    let csv_handler = {
        let records = records.clone();
        let filters = filters.clone();
        let origin = origin.clone();
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Preparing CSV"));
            let envelope = build_envelope(&records, &filters, &origin);

            #[cfg(target_arch = "wasm32")]
            {
                let mut status_signal = status_signal;
                let mut busy_signal = busy_signal;
                platform::spawn_future(async move {
                    let outcome = perform_csv_export(envelope).await;
                    match outcome {
                        Ok(message) => status_signal.set(ExportStatus::Done(message)),
                        Err(err) => status_signal.set(ExportStatus::Error(err)),
                    }
                    busy_signal.set(false);
                });
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let outcome = futures::executor::block_on(perform_csv_export(envelope));
                match outcome {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => status_signal.set(ExportStatus::Error(err)),
                }
                busy_signal.set(false);
            }
        }
    };

    rsx! {
        section { class: "chart-card export-panel",
            div { class: "chart-card__header",
                h2 { "Export this view" }
                span { class: "chart-card__meta", "Respects the active filters" }
            }

            div { class: "export-panel__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: json_handler,
                    "Export JSON"
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: csv_handler,
                    "Export CSV"
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

async fn perform_json_export(envelope: ExportEnvelope) -> Result<String, String> {
    let json = serde_json::to_string_pretty(&envelope).map_err(|err| err.to_string())?;
    copy_to_clipboard(json.clone()).await?;
    let filename = format!("smokescope-view-{}.json", timestamp_slug());
    let delivery = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("JSON copied and saved to {path}"),
        None => "JSON copied to clipboard and download started".to_string(),
    })
}

async fn perform_csv_export(envelope: ExportEnvelope) -> Result<String, String> {
    let csv = build_csv(&envelope);
    let filename = format!("smokescope-view-{}.csv", timestamp_slug());
    let delivery = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("CSV saved to {path}"),
        None => "CSV download started".to_string(),
    })
}

fn build_csv(envelope: &ExportEnvelope) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(envelope.groups.len() + 1);
    rows.push(
        [
            "age_group",
            envelope.metrics[0].as_str(),
            envelope.metrics[1].as_str(),
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    );

    for group in &envelope.groups {
        rows.push(vec![
            group.age_group.clone(),
            csv_value(group.first_mean),
            csv_value(group.second_mean),
        ]);
    }

    let mut csv = String::new();
    for row in rows {
        let line = row
            .into_iter()
            .map(|field| escape_csv(&field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn csv_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:.2}")
    }
}

fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

fn now_rfc3339() -> String {
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".into())
}

async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        if !document.exec_command("copy").unwrap_or(false) {
            textarea.remove();
            return Err("Clipboard copy blocked".into());
        }
        textarea.remove();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
        file.write_all(&bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Smokescope", "Smokescope")
        .ok_or("Unable to determine export directory")?;
    let dir = dirs.data_dir().join("exports");
    Ok(dir)
}
