use dioxus::prelude::*;
use records::{AccessLevel, FileCreateInput, FileRecord, FileUpdateInput};

use crate::components::{Button, ButtonVariant, Input, Label};

/// Editable fields of a file record as the form holds them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileDraft {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub file_path: String,
    pub department: String,
    pub owner: String,
    pub access_level: AccessLevel,
}

fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Byte count typed into the size field. Anything that is not a whole
/// non-negative number counts as 0 until the user fixes it.
fn parse_size(text: &str) -> u64 {
    text.trim().parse().unwrap_or(0)
}

impl FileDraft {
    pub fn from_record(record: &FileRecord) -> Self {
        Self {
            file_name: record.file_name.clone(),
            file_type: record.file_type.clone(),
            file_size: record.file_size,
            file_path: record.file_path.clone(),
            department: record.department.clone().unwrap_or_default(),
            owner: record.owner.clone().unwrap_or_default(),
            access_level: record.access_level,
        }
    }

    /// Blank department/owner become absent fields.
    pub fn to_create_input(&self) -> FileCreateInput {
        FileCreateInput {
            file_name: self.file_name.clone(),
            file_type: self.file_type.clone(),
            file_size: self.file_size,
            file_path: self.file_path.clone(),
            department: optional(&self.department),
            owner: optional(&self.owner),
            access_level: self.access_level,
        }
    }

    /// Patch holding only the fields that differ from `original`.
    pub fn changes_from(&self, original: &FileRecord) -> FileUpdateInput {
        let changed = |new: &str, old: &str| (new != old).then(|| new.to_string());

        FileUpdateInput {
            file_name: changed(&self.file_name, &original.file_name),
            file_type: changed(&self.file_type, &original.file_type),
            file_size: (self.file_size != original.file_size).then_some(self.file_size),
            file_path: changed(&self.file_path, &original.file_path),
            department: changed(&self.department, original.department.as_deref().unwrap_or("")),
            owner: changed(&self.owner, original.owner.as_deref().unwrap_or("")),
            access_level: (self.access_level != original.access_level)
                .then_some(self.access_level),
        }
    }
}

/// Create/edit form for a file record.
///
/// Seeded once from `file` (or blank defaults); key the component by record
/// id so switching records reseeds it. Submitting hands the draft to
/// `on_submit` unchanged.
#[component]
pub fn FileForm(
    #[props(default)] file: Option<FileRecord>,
    on_submit: EventHandler<FileDraft>,
    on_cancel: EventHandler<()>,
    #[props(default)] saving: bool,
) -> Element {
    let editing = file.is_some();
    let mut draft = use_signal(move || {
        file.as_ref()
            .map(FileDraft::from_record)
            .unwrap_or_default()
    });
    // Raw text of the size field, so it can be emptied while typing.
    let mut size_text = use_signal(move || draft.peek().file_size.to_string());

    let current = draft();

    rsx! {
        form {
            class: "file-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(draft());
            },

            div {
                class: "form-grid",
                div {
                    Label { html_for: "file_name", "File Name *" }
                    Input {
                        id: "file_name",
                        name: "file_name",
                        required: true,
                        value: current.file_name.clone(),
                        oninput: move |evt: FormEvent| draft.write().file_name = evt.value(),
                    }
                }
                div {
                    Label { html_for: "file_type", "File Type *" }
                    Input {
                        id: "file_type",
                        name: "file_type",
                        required: true,
                        value: current.file_type.clone(),
                        oninput: move |evt: FormEvent| draft.write().file_type = evt.value(),
                    }
                }
                div {
                    Label { html_for: "file_size", "File Size (bytes) *" }
                    Input {
                        id: "file_size",
                        name: "file_size",
                        r#type: "number",
                        min: "0",
                        required: true,
                        value: size_text(),
                        oninput: move |evt: FormEvent| {
                            let text = evt.value();
                            draft.write().file_size = parse_size(&text);
                            size_text.set(text);
                        },
                    }
                }
                div {
                    Label { html_for: "file_path", "File Path *" }
                    Input {
                        id: "file_path",
                        name: "file_path",
                        required: true,
                        value: current.file_path.clone(),
                        oninput: move |evt: FormEvent| draft.write().file_path = evt.value(),
                    }
                }
                div {
                    Label { html_for: "department", "Department" }
                    Input {
                        id: "department",
                        name: "department",
                        value: current.department.clone(),
                        oninput: move |evt: FormEvent| draft.write().department = evt.value(),
                    }
                }
                div {
                    Label { html_for: "owner", "Owner" }
                    Input {
                        id: "owner",
                        name: "owner",
                        value: current.owner.clone(),
                        oninput: move |evt: FormEvent| draft.write().owner = evt.value(),
                    }
                }
                div {
                    Label { html_for: "access_level", "Access Level" }
                    select {
                        id: "access_level",
                        name: "access_level",
                        class: "select",
                        value: current.access_level.as_str(),
                        onchange: move |evt: FormEvent| {
                            if let Ok(level) = evt.value().parse::<AccessLevel>() {
                                draft.write().access_level = level;
                            }
                        },
                        for level in AccessLevel::ALL {
                            option {
                                key: "{level}",
                                value: level.as_str(),
                                selected: level == current.access_level,
                                "{level.label()}"
                            }
                        }
                    }
                }
            }

            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    submit: true,
                    disabled: saving,
                    if saving { "Saving..." } else if editing { "Update" } else { "Create" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FileRecord {
        FileRecord {
            file_id: 12,
            file_name: "budget.xlsx".to_string(),
            file_type: "xlsx".to_string(),
            file_size: 40_960,
            file_path: "/finance/budget.xlsx".to_string(),
            department: Some("Finance".to_string()),
            owner: None,
            access_level: AccessLevel::Internal,
            created_at: "2024-01-02T03:04:05".to_string(),
            updated_at: "2024-01-02T03:04:05".to_string(),
        }
    }

    #[test]
    fn test_blank_draft_defaults() {
        let draft = FileDraft::default();
        assert_eq!(draft.access_level, AccessLevel::Private);
        assert_eq!(draft.file_size, 0);
        assert!(draft.file_name.is_empty());
    }

    #[test]
    fn test_seeded_draft_is_unchanged() {
        let original = record();
        let draft = FileDraft::from_record(&original);
        assert_eq!(draft.department, "Finance");
        assert_eq!(draft.owner, "");
        assert!(draft.changes_from(&original).is_empty());
    }

    #[test]
    fn test_changes_only_include_edited_fields() {
        let original = record();
        let mut draft = FileDraft::from_record(&original);
        draft.file_name = "x".to_string();
        draft.access_level = AccessLevel::Public;

        let patch = draft.changes_from(&original);
        assert_eq!(
            patch,
            FileUpdateInput {
                file_name: Some("x".to_string()),
                access_level: Some(AccessLevel::Public),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_create_input_drops_blank_optionals() {
        let draft = FileDraft {
            file_name: "memo.txt".to_string(),
            file_type: "txt".to_string(),
            file_size: 12,
            file_path: "/memo.txt".to_string(),
            department: "  ".to_string(),
            owner: "sam".to_string(),
            access_level: AccessLevel::Private,
        };
        let input = draft.to_create_input();
        assert_eq!(input.department, None);
        assert_eq!(input.owner.as_deref(), Some("sam"));
    }

    #[test]
    fn test_size_text_parses_to_bytes() {
        assert_eq!(parse_size(" 4096 "), 4096);
        assert_eq!(parse_size(""), 0);
        assert_eq!(parse_size("-5"), 0);
        assert_eq!(parse_size("1.5"), 0);
    }
}
