use leptos::prelude::*;

/// Пункт выпадающего списка ссылки на сущность
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

/// Выпадающий список для ссылочного поля формы. Опции загружает
/// вызывающая страница (список инструментов, пользователей и т.п.),
/// пустое значение означает "ссылка не задана".
#[component]
pub fn EntitySelect(
    id: &'static str,
    label: &'static str,
    options: Signal<Vec<SelectOption>>,
    value: Signal<Option<String>>,
    on_change: Callback<Option<String>>,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=id
                on:change=move |ev| {
                    let selected = event_target_value(&ev);
                    on_change.run(if selected.is_empty() { None } else { Some(selected) });
                }
            >
                <option value="" selected=move || value.get().is_none()>
                    {"— не выбрано —"}
                </option>
                {move || {
                    let current = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|opt| {
                            let selected = current.as_deref() == Some(opt.id.as_str());
                            view! {
                                <option value=opt.id.clone() selected=selected>
                                    {opt.label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
            {error.map(|error| {
                view! {
                    {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                }
            })}
        </div>
    }
}
