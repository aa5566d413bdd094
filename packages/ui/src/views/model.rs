use api::{ApiClient, ApiError, Transport};
use dioxus::prelude::*;
use records::{AccessLevel, FileCreateInput, FileQuery, FileRecord, FileUpdateInput, Page};

use super::ModalOverlay;
use crate::components::{Button, ButtonVariant, Input};
use crate::icons::{FaChevronLeft, FaChevronRight, FaMagnifyingGlass, FaPlus};
use crate::{log_activity, use_activity_log, use_api, FileDraft, FileForm, FileTable, Icon, LogLevel};

/// Result cap for `GET /files/search/{term}`.
pub const SEARCH_LIMIT: u32 = 100;

/// What the file list shows: a filtered, paged listing or a search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileBrowser {
    pub query: FileQuery,
    pub page: Page,
    pub search: String,
}

impl FileBrowser {
    /// The trimmed search term, if any. A search ignores filters and paging.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    pub fn set_query(&mut self, query: FileQuery) {
        self.query = query;
        self.page = Page::new(0, self.page.limit);
    }

    pub fn set_search(&mut self, term: String) {
        self.search = term;
        self.page = Page::new(0, self.page.limit);
    }

    /// A full page came back, so there may be more behind it.
    pub fn has_next(&self, loaded: usize) -> bool {
        self.search_term().is_none() && loaded as u64 >= u64::from(self.page.limit)
    }

    pub async fn fetch<T: Transport>(
        &self,
        client: &ApiClient<T>,
    ) -> Result<Vec<FileRecord>, ApiError> {
        match self.search_term() {
            Some(term) => client.search_files(term, SEARCH_LIMIT).await,
            None => client.list_files(&self.query, self.page).await,
        }
    }
}

/// Text state of the filter bar, converted to a [`FileQuery`] on apply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryDraft {
    pub department: String,
    pub owner: String,
    pub file_type: String,
    pub access_level: String,
    pub min_size: String,
    pub max_size: String,
}

impl QueryDraft {
    /// Blank or unparseable fields mean "any".
    pub fn to_query(&self) -> FileQuery {
        let text = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        FileQuery {
            department: text(&self.department),
            owner: text(&self.owner),
            file_type: text(&self.file_type),
            access_level: self.access_level.parse::<AccessLevel>().ok(),
            min_size: self.min_size.trim().parse().ok(),
            max_size: self.max_size.trim().parse().ok(),
        }
    }
}

/// State of the create/edit modal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileDialog {
    pub open: bool,
    /// The record being edited; `None` while creating.
    pub editing: Option<FileRecord>,
    pub error: Option<String>,
}

impl FileDialog {
    pub fn open_create(&mut self) {
        *self = FileDialog {
            open: true,
            ..Default::default()
        };
    }

    pub fn open_edit(&mut self, record: FileRecord) {
        *self = FileDialog {
            open: true,
            editing: Some(record),
            error: None,
        };
    }

    pub fn close(&mut self) {
        *self = FileDialog::default();
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Work out what saving `draft` means for the record being edited.
    pub fn plan(&self, draft: &FileDraft) -> FileSave {
        match self.editing.as_ref() {
            Some(original) => {
                let patch = draft.changes_from(original);
                if patch.is_empty() {
                    FileSave::Unchanged(original.clone())
                } else {
                    FileSave::Update {
                        file_id: original.file_id,
                        patch,
                    }
                }
            }
            None => FileSave::Create(draft.to_create_input()),
        }
    }

    /// Apply the outcome of `save` to the dialog as it is now. Only the
    /// dialog session that issued the save is touched: once the user closed
    /// it, or moved on to another record, the answer is just returned.
    pub fn finish(
        &mut self,
        save: &FileSave,
        result: Result<FileRecord, ApiError>,
    ) -> Option<FileRecord> {
        let same_session =
            self.open && self.editing.as_ref().map(|r| r.file_id) == save.file_id();
        match result {
            Ok(saved) => {
                if same_session {
                    self.close();
                }
                Some(saved)
            }
            Err(e) => {
                if same_session {
                    self.error = Some(e.to_string());
                }
                None
            }
        }
    }

    /// [`plan`](Self::plan) and send, then [`finish`](Self::finish). On success
    /// the dialog closes and the saved record is returned; on failure it stays
    /// open with the error.
    pub async fn submit<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        draft: &FileDraft,
    ) -> Option<FileRecord> {
        let save = self.plan(draft);
        let result = save.send(client).await;
        self.finish(&save, result)
    }
}

/// One save issued from the file dialog.
#[derive(Clone, Debug, PartialEq)]
pub enum FileSave {
    Create(FileCreateInput),
    Update { file_id: i64, patch: FileUpdateInput },
    /// An edit that changes nothing; no request is made.
    Unchanged(FileRecord),
}

impl FileSave {
    /// Record this save targets; `None` for a create.
    pub fn file_id(&self) -> Option<i64> {
        match self {
            FileSave::Create(_) => None,
            FileSave::Update { file_id, .. } => Some(*file_id),
            FileSave::Unchanged(record) => Some(record.file_id),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            FileSave::Create(_) => "Created",
            FileSave::Update { .. } | FileSave::Unchanged(_) => "Updated",
        }
    }

    pub async fn send<T: Transport>(
        &self,
        client: &ApiClient<T>,
    ) -> Result<FileRecord, ApiError> {
        match self {
            FileSave::Create(input) => client.create_file(input).await,
            FileSave::Update { file_id, patch } => client.update_file(*file_id, patch).await,
            FileSave::Unchanged(record) => Ok(record.clone()),
        }
    }
}

/// File records page: search, filters, paging and the create/edit modal.
#[component]
pub fn ModelView() -> Element {
    let client = use_api();
    let mut activity = use_activity_log();
    let mut browser = use_signal(FileBrowser::default);
    let mut files = use_signal(Vec::<FileRecord>::new);
    let mut loading = use_signal(|| true);
    let mut dialog = use_signal(FileDialog::default);
    let mut saving = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<FileRecord>::None);
    let mut search_input = use_signal(String::new);
    let mut query_draft = use_signal(QueryDraft::default);

    let fetch_client = client.clone();
    let mut loader = use_resource(move || {
        let client = fetch_client.clone();
        let browser = browser();
        async move {
            loading.set(true);
            match browser.fetch(&client).await {
                Ok(list) => files.set(list),
                Err(e) => log_activity(
                    &mut activity,
                    LogLevel::Error,
                    &format!("Error fetching files: {e}"),
                ),
            }
            loading.set(false);
        }
    });

    let edit_client = client.clone();
    let handle_edit = move |row: FileRecord| {
        let client = edit_client.clone();
        spawn(async move {
            let record = match client.get_file(row.file_id).await {
                Ok(fresh) => fresh,
                Err(e) => {
                    log_activity(
                        &mut activity,
                        LogLevel::Warning,
                        &format!("Could not reload {}: {e}", row.file_name),
                    );
                    row
                }
            };
            dialog.write().open_edit(record);
        });
    };

    let save_client = client.clone();
    let handle_save = move |draft: FileDraft| {
        if saving() {
            return;
        }
        let save = dialog.read().plan(&draft);
        let client = save_client.clone();
        spawn(async move {
            saving.set(true);
            let result = save.send(&client).await;
            let failure = result.as_ref().err().map(|e| e.to_string());
            let saved = dialog.with_mut(|d| d.finish(&save, result));
            saving.set(false);

            match (saved, failure) {
                (Some(record), _) => {
                    log_activity(
                        &mut activity,
                        LogLevel::Success,
                        &format!("{} {}", save.verb(), record.file_name),
                    );
                    loader.restart();
                }
                (None, Some(error)) => {
                    log_activity(&mut activity, LogLevel::Error, &format!("Save failed: {error}"));
                }
                (None, None) => {}
            }
        });
    };

    let delete_client = client.clone();
    let handle_confirm_delete = move |_: MouseEvent| {
        let Some(record) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        let client = delete_client.clone();
        spawn(async move {
            match client.delete_file(record.file_id).await {
                Ok(()) => {
                    log_activity(
                        &mut activity,
                        LogLevel::Success,
                        &format!("Deleted {}", record.file_name),
                    );
                    loader.restart();
                }
                Err(e) => log_activity(
                    &mut activity,
                    LogLevel::Error,
                    &format!("Delete failed for {}: {e}", record.file_name),
                ),
            }
        });
    };

    let state = browser();
    let list = files();
    let modal = dialog();
    let filters = query_draft();
    let searching = state.search_term().is_some();
    let has_next = state.has_next(list.len());
    let page_number = state.page.number();
    let modal_title = if modal.is_editing() { "Edit File" } else { "Add New File" };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { "File Records" }
                Button {
                    onclick: move |_| dialog.write().open_create(),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Add File"
                }
            }

            form {
                class: "search-bar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    browser.write().set_search(search_input());
                },
                Input {
                    id: "file_search",
                    placeholder: "Search files...",
                    value: search_input(),
                    oninput: move |evt: FormEvent| search_input.set(evt.value()),
                }
                Button {
                    submit: true,
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    "Search"
                }
                if searching {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            search_input.set(String::new());
                            browser.write().set_search(String::new());
                        },
                        "Clear"
                    }
                }
            }

            if !searching {
                form {
                    class: "filter-bar",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        browser.write().set_query(query_draft().to_query());
                    },
                    Input {
                        id: "filter_department",
                        placeholder: "Department",
                        value: filters.department.clone(),
                        oninput: move |evt: FormEvent| query_draft.write().department = evt.value(),
                    }
                    Input {
                        id: "filter_owner",
                        placeholder: "Owner",
                        value: filters.owner.clone(),
                        oninput: move |evt: FormEvent| query_draft.write().owner = evt.value(),
                    }
                    Input {
                        id: "filter_file_type",
                        placeholder: "File type",
                        value: filters.file_type.clone(),
                        oninput: move |evt: FormEvent| query_draft.write().file_type = evt.value(),
                    }
                    select {
                        id: "filter_access_level",
                        class: "select",
                        value: filters.access_level.clone(),
                        onchange: move |evt: FormEvent| query_draft.write().access_level = evt.value(),
                        option { value: "", "Any access" }
                        for level in AccessLevel::ALL {
                            option {
                                key: "{level}",
                                value: level.as_str(),
                                selected: filters.access_level == level.as_str(),
                                "{level.label()}"
                            }
                        }
                    }
                    Input {
                        id: "filter_min_size",
                        r#type: "number",
                        min: "0",
                        placeholder: "Min bytes",
                        value: filters.min_size.clone(),
                        oninput: move |evt: FormEvent| query_draft.write().min_size = evt.value(),
                    }
                    Input {
                        id: "filter_max_size",
                        r#type: "number",
                        min: "0",
                        placeholder: "Max bytes",
                        value: filters.max_size.clone(),
                        oninput: move |evt: FormEvent| query_draft.write().max_size = evt.value(),
                    }
                    Button { variant: ButtonVariant::Outline, submit: true, "Apply" }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            query_draft.set(QueryDraft::default());
                            browser.write().set_query(FileQuery::default());
                        },
                        "Reset"
                    }
                }
            }

            if loading() && list.is_empty() {
                div { class: "panel-empty", "Loading files..." }
            } else {
                FileTable {
                    files: list.clone(),
                    on_edit: handle_edit,
                    on_delete: move |record: FileRecord| pending_delete.set(Some(record)),
                }
            }

            if !searching {
                div {
                    class: "pager",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: state.page.is_first(),
                        onclick: move |_| {
                            let page = browser().page.previous();
                            browser.write().page = page;
                        },
                        Icon { icon: FaChevronLeft, width: 12, height: 12 }
                        "Previous"
                    }
                    span { class: "pager-label", "Page {page_number}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: !has_next,
                        onclick: move |_| {
                            let page = browser().page.next();
                            browser.write().page = page;
                        },
                        "Next"
                        Icon { icon: FaChevronRight, width: 12, height: 12 }
                    }
                }
            }

            if modal.open {
                ModalOverlay {
                    title: "{modal_title}",
                    wide: true,
                    on_close: move |_| dialog.write().close(),
                    if let Some(error) = modal.error.as_ref() {
                        div { class: "form-error", "{error}" }
                    }
                    FileForm {
                        file: modal.editing.clone(),
                        saving: saving(),
                        on_submit: handle_save,
                        on_cancel: move |_| dialog.write().close(),
                    }
                }
            }

            if let Some(record) = pending_delete() {
                ModalOverlay {
                    title: "Delete File",
                    on_close: move |_| pending_delete.set(None),
                    p { "Are you sure you want to delete \"{record.file_name}\"?" }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| pending_delete.set(None),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Danger,
                            onclick: handle_confirm_delete,
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{MemoryTransport, Method};
    use serde_json::json;

    fn client() -> ApiClient<MemoryTransport> {
        ApiClient::new(MemoryTransport::new())
    }

    fn record() -> FileRecord {
        FileRecord {
            file_id: 7,
            file_name: "q3-report.pdf".to_string(),
            file_type: "pdf".to_string(),
            file_size: 2048,
            file_path: "/reports/q3-report.pdf".to_string(),
            department: Some("Finance".to_string()),
            owner: Some("asha".to_string()),
            access_level: AccessLevel::Internal,
            created_at: "2024-03-01T09:30:00".to_string(),
            updated_at: "2024-03-01T09:30:00".to_string(),
        }
    }

    fn record_json(file_name: &str) -> serde_json::Value {
        json!({
            "file_id": 7,
            "file_name": file_name,
            "file_type": "pdf",
            "file_size": 2048,
            "file_path": "/reports/q3-report.pdf",
            "department": "Finance",
            "owner": "asha",
            "access_level": "internal",
            "created_at": "2024-03-01T09:30:00",
            "updated_at": "2024-03-02T10:00:00"
        })
    }

    fn new_draft() -> FileDraft {
        FileDraft {
            file_name: "minutes.docx".to_string(),
            file_type: "docx".to_string(),
            file_size: 512,
            file_path: "/board/minutes.docx".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_failure_keeps_dialog_open() {
        let client = client();
        client
            .transport()
            .respond(500, r#"{"detail": "Database unavailable"}"#);

        let mut dialog = FileDialog::default();
        dialog.open_create();

        assert_eq!(dialog.submit(&client, &new_draft()).await, None);
        assert!(dialog.open);
        assert_eq!(dialog.error.as_deref(), Some("Database unavailable"));
    }

    #[tokio::test]
    async fn test_create_sends_only_filled_optionals() {
        let client = client();
        client.transport().respond_json(200, record_json("minutes.docx"));

        let mut dialog = FileDialog::default();
        dialog.open_create();
        let saved = dialog.submit(&client, &new_draft()).await;

        assert!(saved.is_some());
        assert_eq!(dialog, FileDialog::default());

        let sent = client.transport().last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(
            sent.body,
            Some(json!({
                "file_name": "minutes.docx",
                "file_type": "docx",
                "file_size": 512,
                "file_path": "/board/minutes.docx",
                "access_level": "private"
            }))
        );
    }

    #[tokio::test]
    async fn test_update_sends_changed_field_only() {
        let client = client();
        client.transport().respond_json(200, record_json("x"));

        let mut dialog = FileDialog::default();
        dialog.open_edit(record());
        let mut draft = FileDraft::from_record(&record());
        draft.file_name = "x".to_string();

        let saved = dialog.submit(&client, &draft).await.unwrap();
        assert_eq!(saved.file_name, "x");
        assert!(!dialog.open);

        let sent = client.transport().last_request().unwrap();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.path, vec!["files", "7"]);
        assert_eq!(sent.body, Some(json!({"file_name": "x"})));
    }

    #[tokio::test]
    async fn test_unchanged_edit_skips_request() {
        let client = client();
        let mut dialog = FileDialog::default();
        dialog.open_edit(record());

        let saved = dialog
            .submit(&client, &FileDraft::from_record(&record()))
            .await;
        assert_eq!(saved, Some(record()));
        assert!(!dialog.open);
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_search_term_switches_to_search_endpoint() {
        let client = client();
        client.transport().respond_json(200, json!([]));
        client.transport().respond_json(200, json!([]));

        let mut browser = FileBrowser::default();
        browser.set_search("  ".to_string());
        browser.fetch(&client).await.unwrap();
        let listed = client.transport().last_request().unwrap();
        assert_eq!(listed.path, vec!["files"]);
        assert_eq!(listed.query_value("skip"), Some("0"));

        browser.set_search(" report ".to_string());
        browser.fetch(&client).await.unwrap();
        let searched = client.transport().last_request().unwrap();
        assert_eq!(searched.path, vec!["files", "search", "report"]);
        assert_eq!(searched.query_value("limit"), Some("100"));
    }

    #[test]
    fn test_new_filters_return_to_first_page() {
        let mut browser = FileBrowser::default();
        browser.page = browser.page.next().next();
        assert_eq!(browser.page.number(), 3);

        browser.set_query(FileQuery {
            department: Some("Legal".to_string()),
            ..Default::default()
        });
        assert!(browser.page.is_first());
        assert_eq!(browser.page.limit, 100);
    }

    #[test]
    fn test_has_next_needs_full_page() {
        let browser = FileBrowser::default();
        assert!(browser.has_next(100));
        assert!(!browser.has_next(37));

        let searching = FileBrowser {
            search: "memo".to_string(),
            ..Default::default()
        };
        assert!(!searching.has_next(100));
    }

    #[test]
    fn test_query_draft_ignores_blank_and_invalid_fields() {
        let draft = QueryDraft {
            department: " Finance ".to_string(),
            owner: String::new(),
            file_type: "pdf".to_string(),
            access_level: "secret".to_string(),
            min_size: "1024".to_string(),
            max_size: "lots".to_string(),
        };
        assert_eq!(
            draft.to_query(),
            FileQuery {
                department: Some("Finance".to_string()),
                file_type: Some("pdf".to_string()),
                min_size: Some(1024),
                ..Default::default()
            }
        );
        assert!(QueryDraft::default().to_query().is_empty());
    }

    #[tokio::test]
    async fn test_failure_after_close_leaves_dialog_closed() {
        let client = client();
        client
            .transport()
            .respond(500, r#"{"detail": "Database unavailable"}"#);

        let mut dialog = FileDialog::default();
        dialog.open_create();
        let save = dialog.plan(&new_draft());

        // Dismissed while the request is in flight.
        dialog.close();

        let result = save.send(&client).await;
        assert_eq!(dialog.finish(&save, result), None);
        assert_eq!(dialog, FileDialog::default());
    }

    #[tokio::test]
    async fn test_late_answer_does_not_touch_another_record() {
        let client = client();
        client.transport().respond(500, r#"{"detail": "Timeout"}"#);

        let mut dialog = FileDialog::default();
        dialog.open_edit(record());
        let mut draft = FileDraft::from_record(&record());
        draft.owner = "ravi".to_string();
        let save = dialog.plan(&draft);

        let other = FileRecord {
            file_id: 8,
            ..record()
        };
        dialog.close();
        dialog.open_edit(other.clone());

        let result = save.send(&client).await;
        assert_eq!(dialog.finish(&save, result), None);
        assert!(dialog.open);
        assert_eq!(dialog.editing, Some(other));
        assert_eq!(dialog.error, None);
    }

    #[test]
    fn test_plan_describes_the_save() {
        let mut dialog = FileDialog::default();
        dialog.open_create();
        let create = dialog.plan(&new_draft());
        assert_eq!(create.file_id(), None);
        assert_eq!(create.verb(), "Created");

        dialog.open_edit(record());
        let mut draft = FileDraft::from_record(&record());
        assert_eq!(dialog.plan(&draft), FileSave::Unchanged(record()));

        draft.file_size = 4096;
        assert_eq!(
            dialog.plan(&draft),
            FileSave::Update {
                file_id: 7,
                patch: FileUpdateInput {
                    file_size: Some(4096),
                    ..Default::default()
                },
            }
        );
    }
}
