pub mod activity;
pub mod comment;
pub mod post;
pub mod user;

pub use activity::Activity;
pub use comment::{Comment, CommentDetail, NewComment, PostComment};
pub use post::{NewPost, Post};
pub use user::{NewUser, User};
