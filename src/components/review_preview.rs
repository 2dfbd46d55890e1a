use crate::models::form::PreviewView;
use leptos::*;

#[component]
pub fn ReviewPreview(preview: PreviewView) -> impl IntoView {
    let PreviewView {
        object,
        submission,
        score,
        name,
        email,
    } = preview;

    view! {
        <div class="review-preview">
            <h3>{ format!("Your review of {}", object.title) }</h3>
            <dl>
                <dt>{ "Name" }</dt>
                <dd class="preview-name">{ name }</dd>
                <dt>{ "E-mail" }</dt>
                <dd class="preview-email">{ email }</dd>
                <dt>{ "Score" }</dt>
                <dd class="preview-score">{ score.to_string() }</dd>
                <dt>{ "Comment" }</dt>
                <dd class="preview-comment">{ submission.comment.clone() }</dd>
            </dl>
            // Everything is posted again; the server keeps no state between steps
            <form method="post" action="/reviews/save">
                <input type="hidden" name="content_type_id" value=submission.content_type_id.to_string() />
                <input type="hidden" name="content_id" value=submission.content_id.to_string() />
                <input type="hidden" name="score" value=submission.score.clone() />
                <input type="hidden" name="comment" value=submission.comment.clone() />
                <input type="hidden" name="user_name" value=submission.user_name.clone() />
                <input type="hidden" name="user_email" value=submission.user_email.clone() />
                <button type="submit" name="edit" value="1">{ "Edit" }</button>
                <button type="submit">{ "Send" }</button>
            </form>
        </div>
    }
}
