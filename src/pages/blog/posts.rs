use maud::{html, Markup};

use super::{Post, PostForm};
use crate::{
    api::{self, Ack, ApiRequest},
    html::{empty_state, format_timestamp, hidden_unless},
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostsModel {
    pub posts: Slice<Vec<Post>>,
    pub add_post_open: bool,
    pub notifier: Notifier,
}

#[derive(Debug, Clone)]
pub enum PostsEvent {
    PostsLoaded(RequestToken, api::Result<Vec<Post>>),
    AddPostOpened,
    AddPostClosed,
    AddPostSubmitted(PostForm),
    PostAdded(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct PostsProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub add_post_open: bool,
    pub on_open_add_post: Callback<()>,
    pub on_close_add_post: Callback<()>,
    pub on_add_post: Callback<PostForm>,
}

pub struct PostsLogic {
    ctx: PageContext,
}

impl PostsLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_posts(&self, model: &mut PostsModel) -> Effect<PostsEvent> {
        let token = model.posts.begin_load();
        self.ctx.request(ApiRequest::get("/api/posts"), move |result| {
            PostsEvent::PostsLoaded(token, result)
        })
    }
}

impl PageLogic<PostsEvent, PostsModel, PostsProps> for PostsLogic {
    fn init(&self, mut model: PostsModel) -> (PostsModel, Effect<PostsEvent>) {
        let effect = self.load_posts(&mut model);
        (model, effect)
    }

    fn update(&self, event: PostsEvent, model: &PostsModel) -> (PostsModel, Effect<PostsEvent>) {
        let mut model = model.clone();
        let expired = PostsEvent::NotificationExpired;

        let effect = match event {
            PostsEvent::PostsLoaded(token, result) => {
                self.ctx
                    .loaded(&mut model.posts, &mut model.notifier, token, result, "posts", expired)
            }
            PostsEvent::AddPostOpened => {
                model.add_post_open = true;
                Effect::none()
            }
            PostsEvent::AddPostClosed => {
                model.add_post_open = false;
                Effect::none()
            }
            PostsEvent::AddPostSubmitted(form) => match form.parse() {
                Ok(post) => self.ctx.try_request(
                    ApiRequest::post("/api/posts").with_json(&post),
                    PostsEvent::PostAdded,
                ),
                Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
            },
            PostsEvent::PostAdded(Ok(_)) => {
                log::info!("Post added");
                model.add_post_open = false;
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Post added successfully!",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_posts(&mut model)])
            }
            PostsEvent::PostAdded(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the post", expired)
            }
            PostsEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &PostsModel, emitter: &Emitter<PostsEvent>) -> PostsProps {
        PostsProps {
            markup: render_posts_page(model).into_string(),
            notification: model.notifier.current().cloned(),
            add_post_open: model.add_post_open,
            on_open_add_post: emitter.callback(|_: ()| PostsEvent::AddPostOpened),
            on_close_add_post: emitter.callback(|_: ()| PostsEvent::AddPostClosed),
            on_add_post: emitter.callback(PostsEvent::AddPostSubmitted),
        }
    }
}

pub fn render_posts_page(model: &PostsModel) -> Markup {
    html! {
        div id="postsContainer" {
            @if model.posts.get().is_empty() {
                (empty_state("No posts yet"))
            } @else {
                @for post in model.posts.get() {
                    div class="post-card" {
                        h3 { (post.title) }
                        p class="post-body" { (post.body) }
                        div class="post-footer" {
                            span class="post-date" { (format_timestamp(post.created_at.as_deref())) }
                            a href={ "/post/" (post.id) } class="btn btn-primary btn-small" { "View comments" }
                        }
                    }
                }
            }
        }
        div id="addPostModal" class="modal" hidden=[hidden_unless(model.add_post_open)] {
            div class="modal-content" {
                h2 { "New post" }
                form id="addPostForm" {
                    input type="text" name="title" required;
                    textarea name="body" required {}
                    button type="submit" class="btn btn-primary" { "Publish" }
                }
            }
        }
        (model.notifier.render())
    }
}
