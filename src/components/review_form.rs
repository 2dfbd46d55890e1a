use crate::models::form::{FormErrors, FormView};
use leptos::*;

fn field_errors(errors: &FormErrors, field: &str) -> impl IntoView {
    errors.get(field).map(|messages| {
        view! {
            <ul class="errorlist">
                { messages.iter().map(|m| view! { <li>{ m.clone() }</li> }).collect::<Vec<_>>() }
            </ul>
        }
    })
}

#[component]
pub fn ReviewForm(form: FormView) -> impl IntoView {
    let FormView {
        object,
        submission,
        scores,
        errors,
        ask_contact,
    } = form;
    let action = format!(
        "/reviews/add/{}/{}",
        submission.content_type_id, submission.content_id
    );

    let contact = ask_contact.then(|| {
        view! {
            <p>
                <label for="id_user_name">{ "Name" }</label>
                { field_errors(&errors, "user_name") }
                <input type="text" id="id_user_name" name="user_name" value=submission.user_name.clone() />
            </p>
            <p>
                <label for="id_user_email">{ "E-mail" }</label>
                { field_errors(&errors, "user_email") }
                <input type="text" id="id_user_email" name="user_email" value=submission.user_email.clone() />
            </p>
        }
    });

    view! {
        <div class="review-form">
            <h3>{ format!("Review {}", object.title) }</h3>
            <form method="post" action=action>
                <input type="hidden" name="content_type_id" value=submission.content_type_id.to_string() />
                <input type="hidden" name="content_id" value=submission.content_id.to_string() />
                { field_errors(&errors, "score") }
                <ul class="star-rating">
                    {
                        scores.into_iter().map(|score| {
                            let style = format!("z-index: {}; width: {}px", score.z_index, score.width);
                            view! {
                                <li class:current=score.current style=style>
                                    <label>
                                        <input type="radio" name="score" value=score.value checked=score.current />
                                        { score.title }
                                    </label>
                                </li>
                            }
                        }).collect::<Vec<_>>()
                    }
                </ul>
                { contact }
                <p>
                    <label for="id_comment">{ "Comment" }</label>
                    { field_errors(&errors, "comment") }
                    <textarea id="id_comment" name="comment">{ submission.comment.clone() }</textarea>
                </p>
                <button type="submit">{ "Preview" }</button>
            </form>
        </div>
    }
}
