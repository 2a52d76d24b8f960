//! Blog post model and the ownership capability used to gate mutations.
//!
//! A [`Post`] can only be edited or deleted through an [`OwnedPost`], which
//! is produced solely by [`Post::claim`] when the requesting user is the
//! author. The ownership check therefore happens once, on the loaded post,
//! and the handler reuses that same load.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{User, UserId};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 200;
/// Maximum content length in characters.
pub const CONTENT_MAX: usize = 20_000;

/// Stable post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Reasons a submitted post body is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostDraftError {
    /// Title or content was absent or blank.
    MissingTitleOrContent,
    /// Title exceeds [`TITLE_MAX`].
    TitleTooLong { max: usize },
    /// Content exceeds [`CONTENT_MAX`].
    ContentTooLong { max: usize },
}

impl fmt::Display for PostDraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitleOrContent => write!(f, "Title and content are required"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::ContentTooLong { max } => {
                write!(f, "content must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PostDraftError {}

/// Validated title and content for a new or revised post.
///
/// # Examples
/// ```
/// use heritage::domain::{PostDraft, PostDraftError};
///
/// let draft = PostDraft::try_from_parts(Some(" Hi "), Some("Hello")).unwrap();
/// assert_eq!(draft.title(), "Hi");
/// assert_eq!(
///     PostDraft::try_from_parts(Some("Hi"), None).unwrap_err(),
///     PostDraftError::MissingTitleOrContent,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    /// Validate optional raw title and content values.
    pub fn try_from_parts(
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, PostDraftError> {
        let title = title.map(str::trim).unwrap_or_default();
        let content = content.unwrap_or_default();
        if title.is_empty() || content.trim().is_empty() {
            return Err(PostDraftError::MissingTitleOrContent);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(PostDraftError::TitleTooLong { max: TITLE_MAX });
        }
        if content.chars().count() > CONTENT_MAX {
            return Err(PostDraftError::ContentTooLong { max: CONTENT_MAX });
        }
        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
        })
    }

    /// Post title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Post body.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[schema(value_type = String, format = Uuid)]
    id: PostId,
    title: String,
    content: String,
    #[schema(value_type = String, format = Uuid)]
    author: UserId,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Create a post from a validated draft.
    pub fn new(id: PostId, draft: PostDraft, author: UserId, created_at: DateTime<Utc>) -> Self {
        let PostDraft { title, content } = draft;
        Self {
            id,
            title,
            content,
            author,
            created_at,
        }
    }

    /// Rebuild a post from stored fields without re-validating them.
    pub fn from_parts(
        id: PostId,
        title: String,
        content: String,
        author: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            author,
            created_at,
        }
    }

    /// Post identifier.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Post title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Post body.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Author reference.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check whether `user` wrote this post.
    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.author == user
    }

    /// Resolve the requesting user's rights over this post.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use heritage::domain::{Post, PostAccess, PostDraft, PostId, UserId};
    ///
    /// let author = UserId::random();
    /// let draft = PostDraft::try_from_parts(Some("Hi"), Some("Hello")).unwrap();
    /// let post = Post::new(PostId::random(), draft, author.clone(), Utc::now());
    /// assert!(matches!(post.clone().claim(&UserId::random()), PostAccess::NotOwner));
    /// assert!(matches!(post.claim(&author), PostAccess::Owner(_)));
    /// ```
    pub fn claim(self, user: &UserId) -> PostAccess {
        if self.is_authored_by(user) {
            PostAccess::Owner(OwnedPost(self))
        } else {
            PostAccess::NotOwner
        }
    }
}

/// Outcome of the ownership gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAccess {
    /// The requester wrote the post and may change it.
    Owner(OwnedPost),
    /// The post exists but belongs to someone else.
    NotOwner,
}

/// A post whose author matched the requesting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedPost(Post);

impl OwnedPost {
    /// Borrow the post.
    pub fn post(&self) -> &Post {
        &self.0
    }

    /// Apply a revised draft, keeping identity, author and creation time.
    pub fn revise(self, draft: PostDraft) -> Self {
        let PostDraft { title, content } = draft;
        Self(Post {
            title,
            content,
            ..self.0
        })
    }

    /// Release the post.
    pub fn into_post(self) -> Post {
        self.0
    }
}

/// A post with its author resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredPost {
    /// The stored post.
    pub post: Post,
    /// Author record, absent if the reference no longer resolves.
    pub author: Option<User>,
}
