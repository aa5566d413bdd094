mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod layout;
pub use layout::DashboardLayout;

mod model;
pub use model::{FileBrowser, FileDialog, ModelView, QueryDraft, SEARCH_LIMIT};

mod transactions;
pub use transactions::TransactionsView;

mod controller;
pub use controller::{ColumnDialog, ControllerView, COLUMN_ADDED, COLUMN_NAME_REQUIRED};
