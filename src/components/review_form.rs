use leptos::*;
use crate::models::review::ReviewInput;
use crate::validation::{Field, ValidationErrors, RATING_CHOICES};

/// The review submission form, pre-filled with `input` and annotated with `errors`.
#[component]
pub fn ReviewForm(input: ReviewInput, errors: ValidationErrors) -> impl IntoView {
    let name_errors = errors.messages(Field::Name).to_vec();
    let rating_errors = errors.messages(Field::Rating).to_vec();
    let comment_errors = errors.messages(Field::Comment).to_vec();
    let ReviewInput { name, rating, comment } = input;
    let current = rating.trim().to_string();

    view! {
        <form class="review-form" method="post" action="/submit">
            <div class="field">
                <label for="name">"Name"</label>
                <input type="text" id="name" name="name" value=name maxlength="50" required=true/>
                <FieldErrors messages=name_errors/>
            </div>
            <div class="field">
                <label for="rating">"Rating"</label>
                <select id="rating" name="rating">
                    {
                        RATING_CHOICES.iter().map(|&(value, label)| {
                            let selected = current == value;
                            view! { <option value=value selected=selected>{ label }</option> }
                        }).collect::<Vec<_>>()
                    }
                </select>
                <FieldErrors messages=rating_errors/>
            </div>
            <div class="field">
                <label for="comment">"Review"</label>
                <textarea id="comment" name="comment" rows="6" maxlength="500">{ comment }</textarea>
                <FieldErrors messages=comment_errors/>
            </div>
            <button type="submit">"Submit Review"</button>
        </form>
    }
}

#[component]
fn FieldErrors(messages: Vec<String>) -> impl IntoView {
    if messages.is_empty() {
        return ().into_view();
    }
    view! {
        <ul class="errors">
            { messages.into_iter().map(|message| view! { <li>{ message }</li> }).collect::<Vec<_>>() }
        </ul>
    }
    .into_view()
}
