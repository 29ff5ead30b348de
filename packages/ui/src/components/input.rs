use dioxus::prelude::*;

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] name: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] disabled: bool,
    /// Numeric inputs only; empty leaves the attribute off.
    #[props(default)] step: String,
    #[props(default)] min: String,
    #[props(default)] oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            id: id.clone(),
            name: name.clone(),
            class: "input {class}",
            r#type: r#type.clone(),
            placeholder: placeholder.clone(),
            value: value.clone(),
            disabled: disabled,
            step: (!step.is_empty()).then(|| step.clone()),
            min: (!min.is_empty()).then(|| min.clone()),
            oninput: move |evt| oninput.call(evt),
        }
    }
}
