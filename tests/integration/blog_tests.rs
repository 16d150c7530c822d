use std::sync::Arc;

use rest_mvu::api::{ApiRequest, ApiResponse, Method};
use rest_mvu::pages::blog::*;
use serde_json::json;
use spin::Mutex;

use super::*;

type PostsTest = PageTest<PostsEvent, PostsModel, PostsProps, PostsLogic>;
type PostTest = PageTest<PostEvent, PostModel, PostProps, PostLogic>;
type ModerationTest = PageTest<ModerationEvent, ModerationModel, ModerationProps, ModerationLogic>;

#[derive(Default)]
struct Blog {
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Blog {
    fn with_post() -> Self {
        Self {
            posts: vec![Post {
                id: 1,
                title: "Hello <world>".into(),
                body: "First post".into(),
                created_at: Some("2024-02-01T10:00:00".into()),
            }],
            comments: vec![],
        }
    }

    fn handle(&mut self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();
        match (request.method, segments.as_slice()) {
            (Method::Get, ["api", "posts"]) => ok(&self.posts),
            (Method::Post, ["api", "posts"]) => created(),
            (Method::Get, ["api", "posts", id, "comments"]) => {
                let post_id: i64 = id.parse().unwrap();
                let approved: Vec<&Comment> = self
                    .comments
                    .iter()
                    .filter(|comment| comment.post_id == post_id && comment.approved)
                    .collect();
                ok(&approved)
            }
            (Method::Post, ["api", "posts", id, "comments"]) => {
                let body = request.body.as_ref().unwrap();
                self.comments.push(Comment {
                    id: self.comments.len() as i64 + 1,
                    post_id: id.parse().unwrap(),
                    author: body["author"].as_str().unwrap().into(),
                    body: body["body"].as_str().unwrap().into(),
                    created_at: Some("2024-02-02T08:00:00".into()),
                    approved: false,
                });
                created()
            }
            (Method::Get, ["api", "comments", "pending"]) => {
                let pending: Vec<PendingComment> = self
                    .comments
                    .iter()
                    .filter(|comment| !comment.approved)
                    .map(|comment| PendingComment {
                        id: comment.id,
                        post_id: comment.post_id,
                        post_title: "Hello <world>".into(),
                        author: comment.author.clone(),
                        body: comment.body.clone(),
                        created_at: comment.created_at.clone(),
                    })
                    .collect();
                ok(&pending)
            }
            (Method::Post, ["api", "comments", id, "approve"]) => {
                let comment_id: i64 = id.parse().unwrap();
                match self.comments.iter_mut().find(|comment| comment.id == comment_id) {
                    Some(comment) => {
                        comment.approved = true;
                        ok(&json!({ "id": comment_id, "approved": true }))
                    }
                    None => rejected(404, "Comment not found"),
                }
            }
            _ => unexpected(request),
        }
    }
}

fn blog_backend(blog: Blog) -> FakeBackend {
    let blog = Arc::new(Mutex::new(blog));
    FakeBackend::new(move |request| blog.lock().handle(request))
}

fn start_posts(backend: &FakeBackend) -> PostsTest {
    start_page(backend, PostsModel::default(), PostsLogic::new)
}

fn start_post(backend: &FakeBackend, post_id: i64) -> PostTest {
    start_page(backend, PostModel::new(post_id), PostLogic::new)
}

fn start_moderation(backend: &FakeBackend) -> ModerationTest {
    start_page(backend, ModerationModel::default(), ModerationLogic::new)
}

fn comment_on(test: &mut PostTest, body: &str) {
    test.renders.with_latest(|props| {
        props.on_add_comment.call(CommentForm {
            author: "Grace".into(),
            body: body.into(),
        })
    });
    test.driver.process_events();
}

#[test]
fn given_no_posts_should_show_the_empty_state() {
    let test = start_posts(&blog_backend(Blog::default()));

    test.renders.with_latest(|props| {
        assert!(props.markup.contains("No posts yet"));
    });
}

#[test]
fn given_posts_should_escape_titles_and_link_to_comments() {
    let test = start_posts(&blog_backend(Blog::with_post()));

    test.renders.with_latest(|props| {
        assert!(props.markup.contains("Hello &lt;world&gt;"));
        assert!(props.markup.contains(r#"href="/post/1""#));
        assert!(props.markup.contains("01.02.2024, 10:00:00"));
    });
}

#[test]
fn given_a_new_post_should_close_the_modal_and_reload() {
    let mut test = start_posts(&blog_backend(Blog::with_post()));

    test.renders.with_latest(|props| props.on_open_add_post.trigger());
    test.driver.process_events();
    test.renders.with_latest(|props| {
        props.on_add_post.call(PostForm {
            title: "Second".into(),
            body: "More".into(),
        })
    });
    test.driver.process_events();

    assert_eq!(test.backend.requests_to(Method::Post, "/api/posts").len(), 1);
    assert_eq!(test.backend.requests_to(Method::Get, "/api/posts").len(), 2);
    assert!(!test.driver.model().add_post_open);
}

#[test]
fn given_an_unknown_post_should_show_not_found_without_loading_comments() {
    let test = start_post(&blog_backend(Blog::with_post()), 99);

    test.renders.with_latest(|props| {
        assert!(props.markup.contains("Post not found"));
        assert!(props.markup.contains(r#"<a href="/" class="btn btn-primary">Back</a>"#));
        assert!(props
            .markup
            .contains(r#"<section id="commentsSection" hidden="hidden">"#));
    });
    assert_eq!(test.backend.request_count(), 1);
}

#[test]
fn given_a_new_comment_should_not_show_it_before_approval() {
    let backend = blog_backend(Blog::with_post());
    let mut post = start_post(&backend, 1);

    comment_on(&mut post, "Nice one");

    assert_eq!(shown_messages(&post.renders), vec![AWAITING_MODERATION]);
    assert_eq!(
        backend.requests_to(Method::Get, "/api/posts/1/comments").len(),
        1
    );
    post.renders.with_latest(|props| {
        assert!(!props.markup.contains("Nice one"));
        assert!(props.markup.contains("No comments yet. Be the first!"));
        assert_eq!(props.form_resets, 1);
    });
}

#[test]
fn given_an_approved_comment_should_publish_it() {
    let backend = blog_backend(Blog::with_post());
    let mut post = start_post(&backend, 1);
    comment_on(&mut post, "Nice one");

    let mut moderation = start_moderation(&backend);
    moderation.renders.with_latest(|props| {
        assert!(props.markup.contains("Nice one"));
        props.on_approve.call(1);
    });
    moderation.driver.process_events();
    assert!(backend
        .requests_to(Method::Post, "/api/comments/1/approve")
        .is_empty());

    moderation
        .renders
        .with_latest(|props| props.confirmation.as_ref().unwrap().on_confirm.trigger());
    moderation.driver.process_events();

    assert_eq!(
        backend.requests_to(Method::Post, "/api/comments/1/approve").len(),
        1
    );
    assert_eq!(shown_messages(&moderation.renders), vec!["Comment approved!"]);
    moderation.renders.with_latest(|props| {
        assert!(props.markup.contains("No comments awaiting moderation"));
    });

    let reopened = start_post(&backend, 1);
    reopened.renders.with_latest(|props| {
        assert!(props.markup.contains("Nice one"));
        assert!(props.markup.contains("<strong>Grace</strong>"));
    });
}

#[test]
fn given_an_empty_comment_should_not_submit() {
    let backend = blog_backend(Blog::with_post());
    let mut post = start_post(&backend, 1);
    let before = backend.request_count();

    comment_on(&mut post, "  ");

    assert_eq!(backend.request_count(), before);
    assert_eq!(shown_messages(&post.renders), vec!["Comment is required"]);
}

#[test]
fn given_unapproved_comments_in_the_response_should_only_show_published_ones() {
    let backend = FakeBackend::new(|request| match request.path.as_str() {
        "/api/posts" => ok(&Blog::with_post().posts),
        "/api/posts/1/comments" => ok(&json!([
            {"id": 8, "post_id": 1, "author": "Ada", "body": "Published remark", "created_at": null, "approved": true},
            {"id": 9, "post_id": 1, "author": "Bot", "body": "Buy cheap watches", "created_at": null, "approved": false},
            {"id": 10, "post_id": 1, "author": "Lin", "body": "Legacy remark", "created_at": null},
        ])),
        _ => unexpected(request),
    });

    let post = start_post(&backend, 1);

    assert_eq!(post.driver.model().comments.get().len(), 2);
    post.renders.with_latest(|props| {
        assert!(props.markup.contains("Published remark"));
        assert!(props.markup.contains("Legacy remark"));
        assert!(!props.markup.contains("Buy cheap watches"));
    });
}
