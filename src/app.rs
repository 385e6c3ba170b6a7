use std::path::Path;
use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use tracing::error;

use crate::config::AppConfig;
use crate::domain::entities::merge_table::MergeTable;
use crate::domain::entities::session::{BatchMode, MergeSession};
use crate::infra::export::xlsx::XlsxEncoder;
use crate::infra::import::decoder::SpreadsheetDecoder;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::ImportService;

const CARD_STYLE: &str = "background: #f3f4f6; padding: 12px; border-radius: 6px;";
const TAG_STYLE: &str =
    "background: #dbeafe; color: #1e40af; padding: 2px 8px; border-radius: 4px; font-size: 13px;";
const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 4px 8px; white-space: nowrap;";

pub fn import_status(session: &MergeSession) -> String {
    let table = session.table();
    let mut text = format!(
        "已合并 {} 个文件：{} 列，{} 行",
        session.merged_file_count(),
        table.headers().count(),
        table.row_count()
    );
    if !session.failures().is_empty() {
        text.push_str(&format!("；{} 个文件读取失败", session.failures().len()));
    }
    text
}

pub fn export_status(path: &Path, size: usize) -> String {
    format!("已保存 {}（{} 字节）", path.display(), size)
}

/// First `limit` merged rows as display strings, padded like the exported grid.
pub fn preview_rows(table: &MergeTable, limit: usize) -> Vec<Vec<String>> {
    (0..table.row_count().min(limit))
        .map(|row_idx| {
            table
                .columns()
                .iter()
                .map(|column| {
                    column
                        .values
                        .get(row_idx)
                        .map(|cell| cell.to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

fn failure_report(session: &MergeSession) -> String {
    session
        .failures()
        .iter()
        .map(|failure| format!("{}: {}", failure.file_name, failure.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[component]
pub fn App() -> Element {
    let config = AppConfig::default();
    let AppState {
        mut session,
        mut batch_mode,
        mut busy,
        mut status,
    } = AppState::new(config.default_batch_mode);

    let import_service = Arc::new(ImportService::new(Arc::new(SpreadsheetDecoder)));
    let export_service = Arc::new(ExportService::new(
        Arc::new(XlsxEncoder),
        config.sheet_name.clone(),
    ));

    let import_service_for_pick = import_service.clone();
    let accepted_extensions = config.accepted_extensions.clone();
    let handle_pick = move |_: MouseEvent| {
        let Some(paths) = FileDialog::new()
            .add_filter("试算表", accepted_extensions.as_slice())
            .add_filter("所有文件", &["*"])
            .pick_files()
        else {
            return;
        };
        if paths.is_empty() {
            return;
        }

        *busy.write() = true;
        *status.write() = format!("正在读取 {} 个文件", paths.len());
        let mode = batch_mode();
        let previous = session();
        let next = run_blocking("import", || {
            import_service_for_pick.import_paths(&paths, mode, Some(&previous))
        });

        *status.write() = import_status(&next);
        if !next.failures().is_empty() {
            MessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("部分文件读取失败")
                .set_description(failure_report(&next))
                .set_buttons(MessageButtons::Ok)
                .show();
        }
        session.set(next);
        *busy.write() = false;
    };

    let export_service_for_save = export_service.clone();
    let output_file_name = config.output_file_name.clone();
    let save_dir = config.save_dir.clone();
    let handle_download = move |_: MouseEvent| {
        let current = session();
        if !current.has_data() {
            return;
        }

        let mut dialog = FileDialog::new()
            .add_filter("Excel", &["xlsx"])
            .set_file_name(output_file_name.clone());
        if let Some(dir) = save_dir.as_ref() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        *busy.write() = true;
        *status.write() = format!("正在导出 {}", path.display());
        match run_blocking("export", || export_service_for_save.export_to(&current, &path)) {
            Ok(size) => {
                *status.write() = export_status(&path, size);
            }
            Err(err) => {
                error!("export failed: {err:#}");
                *status.write() = format!("导出失败：{err:#}");
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title("导出失败")
                    .set_description(format!("{err:#}"))
                    .set_buttons(MessageButtons::Ok)
                    .show();
            }
        }
        *busy.write() = false;
    };

    let snapshot = session();
    let status_text = status();
    let is_busy = busy();
    let append_mode = batch_mode() == BatchMode::Append;
    let has_data = snapshot.has_data();
    let has_files = !snapshot.file_names().is_empty();
    let merged_headers: Vec<String> = snapshot.table().headers().map(str::to_string).collect();
    let merged_row_count = snapshot.table().row_count();
    let preview = preview_rows(snapshot.table(), config.preview_rows);

    rsx! {
        div { style: "min-height: 100vh; background: #f3f4f6; display: flex; justify-content: center; padding: 24px; font-family: sans-serif;",
            div { style: "width: 100%; max-width: 1000px; background: #fff; border-radius: 8px; padding: 32px; box-shadow: 0 2px 8px rgba(0,0,0,0.15);",
                h1 { style: "text-align: center; margin-bottom: 24px;", "Excel 合并工具" }

                div { style: "display: flex; gap: 8px; align-items: center; margin-bottom: 12px;",
                    button { disabled: is_busy, onclick: handle_pick, "选择文件" }
                    label { style: "display: flex; gap: 4px; align-items: center;",
                        input {
                            r#type: "checkbox",
                            checked: append_mode,
                            disabled: is_busy,
                            onchange: move |_| {
                                batch_mode.set(if append_mode { BatchMode::Replace } else { BatchMode::Append });
                            },
                        }
                        "追加到当前结果"
                    }
                    button {
                        disabled: is_busy || !has_files,
                        onclick: move |_| {
                            session.set(MergeSession::default());
                            *status.write() = "已清空".to_string();
                        },
                        "清空"
                    }
                }
                p { style: "color: #555; margin-bottom: 16px;", "{status_text}" }

                if has_files {
                    div { style: "margin-bottom: 24px;",
                        h2 { style: "text-align: center;", "已上传文件：" }
                        ul { style: "display: flex; flex-wrap: wrap; justify-content: center; gap: 12px; list-style: none; padding: 0;",
                            {snapshot.file_names().iter().enumerate().map(|(idx, name)| rsx!(
                                li { key: "{idx}", style: "{CARD_STYLE}", "{name}" }
                            ))}
                        }
                    }
                }

                if has_data {
                    div { style: "text-align: center; margin-bottom: 24px;",
                        button {
                            disabled: is_busy,
                            style: "background: #3b82f6; color: #fff; padding: 8px 24px; border: none; border-radius: 6px;",
                            onclick: handle_download,
                            "下载合并结果"
                        }
                    }
                }

                if !snapshot.failures().is_empty() {
                    div { style: "margin-bottom: 24px; color: #b91c1c;",
                        h2 { "读取失败：" }
                        ul {
                            {snapshot.failures().iter().enumerate().map(|(idx, failure)| rsx!(
                                li { key: "{idx}", "{failure.file_name}: {failure.message}" }
                            ))}
                        }
                    }
                }

                if !snapshot.file_headers().is_empty() {
                    div { style: "margin-bottom: 24px;",
                        h2 { style: "text-align: center;", "文件列名：" }
                        div { style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px;",
                            {snapshot.file_headers().iter().enumerate().map(|(idx, entry)| rsx!(
                                div { key: "{idx}", style: "{CARD_STYLE}",
                                    h3 { style: "text-align: center; margin: 0 0 8px;", "{entry.file_name}:" }
                                    div { style: "display: flex; flex-wrap: wrap; gap: 6px;",
                                        {entry.headers.iter().map(|header| rsx!(
                                            span { style: "{TAG_STYLE}", "{header}" }
                                        ))}
                                    }
                                }
                            ))}
                        }
                    }
                }

                if has_data {
                    div {
                        h2 { style: "text-align: center;", "合并预览（共 {merged_row_count} 行）" }
                        div { style: "overflow: auto; max-height: 480px;",
                            table { style: "border-collapse: collapse; width: 100%;",
                                thead {
                                    tr {
                                        {merged_headers.iter().map(|header| rsx!(
                                            th { style: "{CELL_STYLE} background: #f9fafb;", "{header}" }
                                        ))}
                                    }
                                }
                                tbody {
                                    {preview.iter().enumerate().map(|(idx, row)| rsx!(
                                        tr { key: "{idx}",
                                            {row.iter().map(|cell| rsx!(
                                                td { style: "{CELL_STYLE}", "{cell}" }
                                            ))}
                                        }
                                    ))}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
