use dioxus::prelude::*;
use records::{Transaction, TransactionFilter, TransactionSummary};

use super::ModalOverlay;
use crate::components::{Button, ButtonVariant, Input, Label};
use crate::format::format_amount;
use crate::icons::{FaArrowsRotate, FaFilter};
use crate::{log_activity, use_activity_log, use_api, Icon, LogLevel};

/// CSS width of a department bar. Negative or oversized shares (possible
/// when refunds push the total below a department's sum) stay inside the track.
fn bar_width(percent: f64) -> String {
    let clamped = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("width: {clamped:.2}%")
}

fn parse_amount(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// Min/Max Amount fields exactly as typed. They reach the filter, and so
/// the backend, only when the filters are applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AmountRange {
    pub min: String,
    pub max: String,
}

impl AmountRange {
    /// Unparseable text counts as no bound.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (parse_amount(&self.min), parse_amount(&self.max))
    }

    /// Copy the bounds into `filter`. Returns `false` when it already held them.
    pub fn apply_to(&self, filter: &mut TransactionFilter) -> bool {
        let (min, max) = self.bounds();
        if filter.min_amount == min && filter.max_amount == max {
            return false;
        }
        filter.min_amount = min;
        filter.max_amount = max;
        true
    }
}

/// Transactions dashboard: summary cards and a department breakdown of the
/// currently loaded transactions.
#[component]
pub fn TransactionsView() -> Element {
    let client = use_api();
    let mut activity = use_activity_log();
    let mut filter = use_signal(TransactionFilter::default);
    let mut filter_open = use_signal(|| false);
    let mut amounts = use_signal(AmountRange::default);
    let mut transactions = use_signal(Vec::<Transaction>::new);
    let mut loading = use_signal(|| true);

    // Restarts whenever `filter` changes; a superseded request is dropped.
    let mut loader = use_resource(move || {
        let client = client.clone();
        let filter = filter();
        async move {
            loading.set(true);
            match client.list_transactions(&filter).await {
                Ok(list) => transactions.set(list),
                Err(e) => log_activity(
                    &mut activity,
                    LogLevel::Error,
                    &format!("Error fetching transactions: {e}"),
                ),
            }
            loading.set(false);
        }
    });

    let list = transactions();
    let summary = TransactionSummary::from_transactions(&list);
    let current = filter();
    let range = amounts();
    let active_filters = current.active_count();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { "View Dashboard" }
                div {
                    class: "page-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| filter_open.set(true),
                        Icon { icon: FaFilter, width: 14, height: 14 }
                        if active_filters > 0 { "Filter ({active_filters})" } else { "Filter" }
                    }
                    Button {
                        disabled: loading(),
                        onclick: move |_| loader.restart(),
                        Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                        "Refresh"
                    }
                }
            }

            div {
                class: "summary-grid",
                div {
                    class: "summary-card",
                    h3 { "Total Amount" }
                    p { "{format_amount(summary.total_amount)}" }
                }
                div {
                    class: "summary-card",
                    h3 { "Total Transactions" }
                    p { "{summary.count}" }
                }
                div {
                    class: "summary-card",
                    h3 { "Departments" }
                    p { "{summary.department_count()}" }
                }
            }

            div {
                class: "panel",
                h2 { "Department-wise Breakdown" }
                if loading() && list.is_empty() {
                    div { class: "panel-empty", "Loading transactions..." }
                } else if summary.departments.is_empty() {
                    div { class: "panel-empty", "No transactions found" }
                }
                div {
                    class: "department-bars",
                    for share in summary.departments.iter() {
                        div {
                            key: "{share.department}",
                            class: "department-row",
                            div { class: "department-name", "{share.department}" }
                            div {
                                class: "bar-track",
                                div { class: "bar-fill", style: bar_width(share.percent) }
                            }
                            div { class: "department-amount", "{format_amount(share.amount)}" }
                        }
                    }
                }
            }

            if filter_open() {
                ModalOverlay {
                    title: "Filter Transactions",
                    on_close: move |_| filter_open.set(false),
                    div {
                        class: "filter-fields",
                        div {
                            class: "form-field",
                            Label { html_for: "filter_department", "Department" }
                            select {
                                id: "filter_department",
                                class: "select",
                                value: current.department.clone(),
                                onchange: move |evt: FormEvent| filter.write().department = evt.value(),
                                option { value: "", "All Departments" }
                                for name in summary.department_names() {
                                    option {
                                        key: "{name}",
                                        selected: name == current.department,
                                        value: "{name}",
                                        "{name}"
                                    }
                                }
                            }
                        }
                        div {
                            class: "form-field",
                            Label { html_for: "filter_category", "Category" }
                            select {
                                id: "filter_category",
                                class: "select",
                                value: current.category.clone(),
                                onchange: move |evt: FormEvent| filter.write().category = evt.value(),
                                option { value: "", "All Categories" }
                                for name in summary.categories.iter() {
                                    option {
                                        key: "{name}",
                                        selected: *name == current.category,
                                        value: "{name}",
                                        "{name}"
                                    }
                                }
                            }
                        }
                        div {
                            class: "form-field",
                            Label { html_for: "filter_payment_mode", "Payment Mode" }
                            select {
                                id: "filter_payment_mode",
                                class: "select",
                                value: current.payment_mode.clone(),
                                onchange: move |evt: FormEvent| filter.write().payment_mode = evt.value(),
                                option { value: "", "All Payment Modes" }
                                for mode in summary.payment_modes.iter() {
                                    option {
                                        key: "{mode}",
                                        selected: *mode == current.payment_mode,
                                        value: "{mode}",
                                        "{mode}"
                                    }
                                }
                            }
                        }
                        div {
                            class: "form-row",
                            div {
                                class: "form-field",
                                Label { html_for: "filter_start_date", "From" }
                                Input {
                                    id: "filter_start_date",
                                    r#type: "date",
                                    value: current.start_date.clone(),
                                    oninput: move |evt: FormEvent| filter.write().start_date = evt.value(),
                                }
                            }
                            div {
                                class: "form-field",
                                Label { html_for: "filter_end_date", "To" }
                                Input {
                                    id: "filter_end_date",
                                    r#type: "date",
                                    value: current.end_date.clone(),
                                    oninput: move |evt: FormEvent| filter.write().end_date = evt.value(),
                                }
                            }
                        }
                        div {
                            class: "form-row",
                            div {
                                class: "form-field",
                                Label { html_for: "filter_min_amount", "Min Amount" }
                                Input {
                                    id: "filter_min_amount",
                                    r#type: "number",
                                    step: "0.01",
                                    value: range.min.clone(),
                                    oninput: move |evt: FormEvent| amounts.write().min = evt.value(),
                                }
                            }
                            div {
                                class: "form-field",
                                Label { html_for: "filter_max_amount", "Max Amount" }
                                Input {
                                    id: "filter_max_amount",
                                    r#type: "number",
                                    step: "0.01",
                                    value: range.max.clone(),
                                    oninput: move |evt: FormEvent| amounts.write().max = evt.value(),
                                }
                            }
                        }
                    }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| {
                                filter.set(TransactionFilter::default());
                                amounts.set(AmountRange::default());
                                filter_open.set(false);
                            },
                            "Reset"
                        }
                        Button {
                            onclick: move |_| {
                                let mut next = filter();
                                if amounts.read().apply_to(&mut next) {
                                    filter.set(next);
                                }
                                filter_open.set(false);
                            },
                            "Apply Filters"
                        }
                    }
                }
            }
        }
    }
}
