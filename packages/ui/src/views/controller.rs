use api::{ApiClient, ApiError, Transport};
use dioxus::prelude::*;
use records::{ColumnDefinition, ColumnType};

use super::ModalOverlay;
use crate::components::{Button, ButtonVariant, Input, Label};
use crate::icons::FaPlus;
use crate::{log_activity, use_activity_log, use_api, Icon, LogLevel};

pub const COLUMN_NAME_REQUIRED: &str = "Column name is required";
pub const COLUMN_ADDED: &str = "Column added successfully!";

/// State of the "Add New Column" modal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnDialog {
    pub open: bool,
    pub draft: ColumnDefinition,
    pub error: Option<String>,
}

impl ColumnDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the modal. The draft and any error stay until the next success.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Only a non-blank name is required; uniqueness is the backend's call.
    pub fn validate(&self) -> Result<(), String> {
        if self.draft.name.trim().is_empty() {
            Err(COLUMN_NAME_REQUIRED.to_string())
        } else {
            Ok(())
        }
    }

    /// Validate and hand back the column to send. A blank name sets the
    /// error instead.
    pub fn prepare(&mut self) -> Option<ColumnDefinition> {
        match self.validate() {
            Ok(()) => {
                self.error = None;
                Some(self.draft.clone())
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    /// Apply the backend's answer to the dialog as it is now. Success resets
    /// it; a failure only shows on a dialog that is still open, leaving
    /// whatever the user typed meanwhile in place. Returns `true` once the
    /// column was accepted.
    pub fn finish(&mut self, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                *self = ColumnDialog::default();
                true
            }
            Err(e) => {
                if self.open {
                    self.error = Some(e.to_string());
                }
                false
            }
        }
    }

    /// [`prepare`](Self::prepare), send, then [`finish`](Self::finish).
    pub async fn submit<T: Transport>(&mut self, client: &ApiClient<T>) -> bool {
        let Some(column) = self.prepare() else {
            return false;
        };
        let result = client.add_column(&column).await;
        self.finish(result)
    }
}

/// Blocking acknowledgment after a column was added.
#[cfg(target_arch = "wasm32")]
fn acknowledge(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn acknowledge(message: &str) {
    tracing::info!("{message}");
}

/// Schema page: add a column to the backend's file table.
#[component]
pub fn ControllerView() -> Element {
    let client = use_api();
    let mut activity = use_activity_log();
    let mut dialog = use_signal(ColumnDialog::default);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let Some(column) = dialog.write().prepare() else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            let result = client.add_column(&column).await;
            let failure = result.as_ref().err().map(|e| e.to_string());
            let added = dialog.with_mut(|d| d.finish(result));
            saving.set(false);

            if added {
                log_activity(
                    &mut activity,
                    LogLevel::Success,
                    &format!("Added column {}", column.name),
                );
                acknowledge(COLUMN_ADDED);
            } else if let Some(error) = failure {
                log_activity(&mut activity, LogLevel::Error, &format!("Add column failed: {error}"));
            }
        });
    };

    let state = dialog();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { "Controller View" }
                Button {
                    onclick: move |_| dialog.write().open(),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Add Column"
                }
            }

            if state.open {
                ModalOverlay {
                    title: "Add New Column",
                    on_close: move |_| dialog.write().close(),
                    form {
                        onsubmit: handle_submit,
                        if let Some(error) = state.error.as_ref() {
                            div { class: "form-error", "{error}" }
                        }
                        div {
                            class: "form-field",
                            Label { html_for: "column_name", "Column Name" }
                            Input {
                                id: "column_name",
                                placeholder: "Enter column name",
                                value: state.draft.name.clone(),
                                oninput: move |evt: FormEvent| dialog.write().draft.name = evt.value(),
                            }
                        }
                        div {
                            class: "form-field",
                            Label { html_for: "column_type", "Column Type" }
                            select {
                                id: "column_type",
                                class: "select",
                                value: state.draft.column_type.as_str(),
                                onchange: move |evt: FormEvent| {
                                    if let Ok(column_type) = evt.value().parse::<ColumnType>() {
                                        dialog.write().draft.column_type = column_type;
                                    }
                                },
                                for column_type in ColumnType::ALL {
                                    option {
                                        key: "{column_type}",
                                        value: column_type.as_str(),
                                        selected: column_type == state.draft.column_type,
                                        "{column_type.label()}"
                                    }
                                }
                            }
                        }
                        div {
                            class: "form-actions",
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| dialog.write().close(),
                                "Cancel"
                            }
                            Button {
                                submit: true,
                                disabled: saving(),
                                "Add Column"
                            }
                        }
                    }
                }
            }

            div {
                class: "panel",
                h2 { "Instructions" }
                ul {
                    class: "instructions",
                    li { "Click the \"Add Column\" button to add a new column to the table" }
                    li { "Enter a unique name for the column" }
                    li { "Select the appropriate data type for the column" }
                    li { "The new column will be added to all existing and future records" }
                    li { "Column names should be unique and contain only letters, numbers, and underscores" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryTransport;

    fn client() -> ApiClient<MemoryTransport> {
        ApiClient::new(MemoryTransport::new())
    }

    #[tokio::test]
    async fn test_blank_name_sends_nothing() {
        let client = client();
        let mut dialog = ColumnDialog::default();
        dialog.open();
        dialog.draft.name = "   ".to_string();

        assert!(!dialog.submit(&client).await);
        assert_eq!(dialog.error.as_deref(), Some(COLUMN_NAME_REQUIRED));
        assert!(dialog.open);
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_success_resets_dialog() {
        let client = client();
        client.transport().respond(200, "{}");

        let mut dialog = ColumnDialog::default();
        dialog.open();
        dialog.error = Some("stale".to_string());
        dialog.draft = ColumnDefinition {
            name: "cost_center".to_string(),
            column_type: ColumnType::Number,
        };

        assert!(dialog.submit(&client).await);
        assert_eq!(dialog, ColumnDialog::default());
        assert_eq!(dialog.draft.column_type, ColumnType::Text);

        let sent = client.transport().last_request().unwrap();
        assert_eq!(sent.path, vec!["schema", "columns"]);
        assert_eq!(
            sent.body,
            Some(serde_json::json!({"name": "cost_center", "type": "number"}))
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_dialog_open() {
        let client = client();
        client
            .transport()
            .respond(400, r#"{"detail": "Column cost_center already exists"}"#);

        let mut dialog = ColumnDialog::default();
        dialog.open();
        dialog.draft.name = "cost_center".to_string();

        assert!(!dialog.submit(&client).await);
        assert!(dialog.open);
        assert_eq!(dialog.draft.name, "cost_center");
        assert_eq!(
            dialog.error.as_deref(),
            Some("Column cost_center already exists")
        );
    }

    #[tokio::test]
    async fn test_failure_after_close_leaves_dialog_closed() {
        let client = client();
        client
            .transport()
            .respond(500, r#"{"detail": "Database unavailable"}"#);

        let mut dialog = ColumnDialog::default();
        dialog.open();
        dialog.draft.name = "cost_center".to_string();
        let column = dialog.prepare().unwrap();

        // The user dismisses the modal and edits the draft before the answer.
        dialog.close();
        dialog.draft.name = "region".to_string();

        let result = client.add_column(&column).await;
        assert!(!dialog.finish(result));
        assert!(!dialog.open);
        assert_eq!(dialog.draft.name, "region");
        assert_eq!(dialog.error, None);
    }

    #[tokio::test]
    async fn test_failure_keeps_text_typed_during_request() {
        let client = client();
        client.transport().respond(409, r#"{"detail": "Column exists"}"#);

        let mut dialog = ColumnDialog::default();
        dialog.open();
        dialog.draft.name = "cost_center".to_string();
        let column = dialog.prepare().unwrap();
        dialog.draft.name = "cost_centre".to_string();

        let result = client.add_column(&column).await;
        assert!(!dialog.finish(result));
        assert!(dialog.open);
        assert_eq!(dialog.draft.name, "cost_centre");
        assert_eq!(dialog.error.as_deref(), Some("Column exists"));
    }
}
