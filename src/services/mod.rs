pub mod activity;
pub mod comments;
pub mod credentials;
pub mod error;
pub mod jokes;
pub mod posts;

pub use activity::ActivityRecorder;
pub use comments::CommentService;
pub use credentials::{CredentialService, Registration};
pub use error::ServiceError;
pub use jokes::{ApiNinjasJokes, JokeError, JokeSource};
pub use posts::{PostService, PostWithComments};
