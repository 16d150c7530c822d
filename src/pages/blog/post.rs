use maud::{html, Markup};

use super::{Comment, CommentForm, Post};
use crate::{
    api::{self, Ack, ApiRequest},
    html::{empty_state, empty_state_with_link, format_timestamp, hidden_unless},
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

pub const AWAITING_MODERATION: &str =
    "Comment added! It will be published once a moderator approves it.";

/// A single post with its published comments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostModel {
    pub post_id: i64,
    pub posts: Slice<Vec<Post>>,
    pub comments: Slice<Vec<Comment>>,
    /// Why the post could not be shown, once its load failed.
    pub load_error: Option<String>,
    pub add_comment_open: bool,
    pub form_resets: u64,
    pub notifier: Notifier,
}

impl PostModel {
    pub fn new(post_id: i64) -> Self {
        Self {
            post_id,
            ..Self::default()
        }
    }

    pub fn post(&self) -> Option<&Post> {
        self.posts.get().iter().find(|post| post.id == self.post_id)
    }
}

#[derive(Debug, Clone)]
pub enum PostEvent {
    PostsLoaded(RequestToken, api::Result<Vec<Post>>),
    CommentsLoaded(RequestToken, api::Result<Vec<Comment>>),
    AddCommentOpened,
    AddCommentClosed,
    AddCommentSubmitted(CommentForm),
    CommentAdded(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct PostProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub add_comment_open: bool,
    pub form_resets: u64,
    pub on_open_add_comment: Callback<()>,
    pub on_close_add_comment: Callback<()>,
    pub on_add_comment: Callback<CommentForm>,
}

pub struct PostLogic {
    ctx: PageContext,
}

impl PostLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_comments(&self, model: &mut PostModel) -> Effect<PostEvent> {
        let token = model.comments.begin_load();
        self.ctx.request(
            ApiRequest::get(format!("/api/posts/{}/comments", model.post_id)),
            move |result| PostEvent::CommentsLoaded(token, result),
        )
    }
}

impl PageLogic<PostEvent, PostModel, PostProps> for PostLogic {
    fn init(&self, mut model: PostModel) -> (PostModel, Effect<PostEvent>) {
        let token = model.posts.begin_load();
        let effect = self.ctx.request(ApiRequest::get("/api/posts"), move |result| {
            PostEvent::PostsLoaded(token, result)
        });
        (model, effect)
    }

    fn update(&self, event: PostEvent, model: &PostModel) -> (PostModel, Effect<PostEvent>) {
        let mut model = model.clone();
        let expired = PostEvent::NotificationExpired;

        let effect = match event {
            PostEvent::PostsLoaded(token, Ok(posts)) => {
                if !model.posts.apply(token, posts) {
                    Effect::none()
                } else if model.post().is_some() {
                    self.load_comments(&mut model)
                } else {
                    log::warn!("Post {} not found", model.post_id);
                    Effect::none()
                }
            }
            PostEvent::PostsLoaded(token, Err(err)) => {
                if model.posts.is_current(token) {
                    model.load_error = Some(err.user_message("Could not fetch the post"));
                }
                Effect::none()
            }
            PostEvent::CommentsLoaded(token, result) => {
                let published = result.map(|comments| {
                    comments
                        .into_iter()
                        .filter(|comment| comment.approved)
                        .collect::<Vec<_>>()
                });
                self.ctx.loaded(
                    &mut model.comments,
                    &mut model.notifier,
                    token,
                    published,
                    "comments",
                    expired,
                )
            }
            PostEvent::AddCommentOpened => {
                model.add_comment_open = true;
                Effect::none()
            }
            PostEvent::AddCommentClosed => {
                model.add_comment_open = false;
                Effect::none()
            }
            PostEvent::AddCommentSubmitted(form) => match form.parse() {
                Ok(comment) => self.ctx.try_request(
                    ApiRequest::post(format!("/api/posts/{}/comments", model.post_id))
                        .with_json(&comment),
                    PostEvent::CommentAdded,
                ),
                Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
            },
            // Pending comments are not published, so there is nothing to reload.
            PostEvent::CommentAdded(Ok(_)) => {
                model.add_comment_open = false;
                model.form_resets += 1;
                self.ctx.notify(
                    &mut model.notifier,
                    AWAITING_MODERATION,
                    Severity::Success,
                    expired,
                )
            }
            PostEvent::CommentAdded(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the comment", expired)
            }
            PostEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &PostModel, emitter: &Emitter<PostEvent>) -> PostProps {
        PostProps {
            markup: render_post_page(model).into_string(),
            notification: model.notifier.current().cloned(),
            add_comment_open: model.add_comment_open,
            form_resets: model.form_resets,
            on_open_add_comment: emitter.callback(|_: ()| PostEvent::AddCommentOpened),
            on_close_add_comment: emitter.callback(|_: ()| PostEvent::AddCommentClosed),
            on_add_comment: emitter.callback(PostEvent::AddCommentSubmitted),
        }
    }
}

pub fn render_post_page(model: &PostModel) -> Markup {
    let post = model.post();
    html! {
        div id="postContainer" {
            @if let Some(message) = &model.load_error {
                (empty_state_with_link(message, "/", "Back"))
            } @else if let Some(post) = post {
                div class="post-detail" {
                    h2 { (post.title) }
                    p class="post-date" { (format_timestamp(post.created_at.as_deref())) }
                    div class="post-content" { (post.body) }
                }
            } @else if model.posts.is_loaded() {
                (empty_state_with_link("Post not found", "/", "Back"))
            }
        }
        section id="commentsSection" hidden=[hidden_unless(post.is_some())] {
            div id="commentsContainer" {
                @if model.comments.get().is_empty() {
                    (empty_state("No comments yet. Be the first!"))
                } @else {
                    @for comment in model.comments.get() {
                        div class="comment-card" {
                            div class="comment-header" {
                                strong { (comment.author) }
                                span class="comment-date" { (format_timestamp(comment.created_at.as_deref())) }
                            }
                            p class="comment-body" { (comment.body) }
                        }
                    }
                }
            }
        }
        div id="addCommentModal" class="modal" hidden=[hidden_unless(model.add_comment_open)] {
            div class="modal-content" {
                h2 { "Add a comment" }
                form id="addCommentForm" {
                    input type="text" name="author" required;
                    textarea name="body" required {}
                    button type="submit" class="btn btn-primary" { "Send" }
                }
            }
        }
        (model.notifier.render())
    }
}
