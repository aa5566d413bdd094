use dioxus::prelude::*;
use records::{AccessLevel, FileRecord};

use crate::format::{format_file_size, format_timestamp};
use crate::icons::{FaDownload, FaPenToSquare, FaTrashCan};
use crate::Icon;

fn access_badge_class(level: AccessLevel) -> &'static str {
    match level {
        AccessLevel::Public => "badge badge-public",
        AccessLevel::Private => "badge badge-private",
        AccessLevel::Internal => "badge badge-internal",
        AccessLevel::Confidential => "badge badge-confidential",
    }
}

fn or_dash(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

/// Table of file records. Edit and delete are reported to the caller;
/// the table itself never changes a record.
#[component]
pub fn FileTable(
    files: Vec<FileRecord>,
    on_edit: EventHandler<FileRecord>,
    on_delete: EventHandler<FileRecord>,
) -> Element {
    rsx! {
        div {
            class: "table-card",
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "File Name" }
                        th { "Type" }
                        th { "Size" }
                        th { "Department" }
                        th { "Owner" }
                        th { "Access Level" }
                        th { "Last Updated" }
                        th { "Actions" }
                    }
                }
                tbody {
                    if files.is_empty() {
                        tr {
                            td { class: "table-empty", colspan: "8", "No files found" }
                        }
                    }
                    for file in files.iter() {
                        FileRow {
                            key: "{file.file_id}",
                            file: file.clone(),
                            on_edit: on_edit,
                            on_delete: on_delete,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FileRow(
    file: FileRecord,
    on_edit: EventHandler<FileRecord>,
    on_delete: EventHandler<FileRecord>,
) -> Element {
    let size = format_file_size(file.file_size);
    let updated = format_timestamp(&file.updated_at);
    let department = or_dash(&file.department).to_string();
    let owner = or_dash(&file.owner).to_string();
    let badge = access_badge_class(file.access_level);
    let edit_target = file.clone();
    let delete_target = file.clone();

    rsx! {
        tr {
            td { class: "cell-strong", "{file.file_name}" }
            td { "{file.file_type}" }
            td { "{size}" }
            td { "{department}" }
            td { "{owner}" }
            td {
                span { class: badge, "{file.access_level}" }
            }
            td { "{updated}" }
            td {
                div {
                    class: "row-actions",
                    button {
                        class: "icon-button edit",
                        title: "Edit",
                        onclick: move |_| on_edit.call(edit_target.clone()),
                        Icon { icon: FaPenToSquare, width: 16, height: 16 }
                    }
                    button {
                        class: "icon-button delete",
                        title: "Delete",
                        onclick: move |_| on_delete.call(delete_target.clone()),
                        Icon { icon: FaTrashCan, width: 16, height: 16 }
                    }
                    a {
                        class: "icon-button",
                        title: "Open",
                        href: "{file.file_path}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        Icon { icon: FaDownload, width: 16, height: 16 }
                    }
                }
            }
        }
    }
}
