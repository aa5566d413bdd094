use dioxus::prelude::*;

/// Text-like `<input>` with the dashboard's styling.
///
/// `required` relies on the browser's native form validation.
#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] name: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] required: bool,
    #[props(default)] min: Option<String>,
    #[props(default)] step: Option<String>,
    #[props(default)] oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            id: id,
            name: name,
            class: "input {class}",
            r#type: r#type,
            placeholder: placeholder,
            value: value,
            required: required,
            min: min,
            step: step,
            oninput: move |evt| oninput.call(evt),
        }
    }
}
