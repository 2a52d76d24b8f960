//! Request bodies for the account and blog forms.
//!
//! Every form is accepted as JSON or as `application/x-www-form-urlencoded`.
//! Fields are optional at this layer so a missing field reaches the domain
//! validators and produces their message rather than a decoder error.

use actix_web::{Either, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, PostDraft, PostDraftError, Registration,
    RegistrationError,
};

/// Message for post submissions without a `post` object.
pub const INVALID_POST_DATA: &str = "Invalid post data";

/// A body submitted as JSON or as an HTML form.
pub type Submitted<T> = Either<web::Json<T>, web::Form<T>>;

/// A post body, kept even when it failed to decode so the ownership gate can
/// run before the body is judged.
pub type PostSubmission = Result<Submitted<PostPayload>, actix_web::Error>;

/// Validate a [`PostSubmission`].
///
/// Missing or undecodable bodies count as a payload without a `post` object.
pub fn post_draft(body: PostSubmission) -> Result<PostDraft, Error> {
    match body {
        Ok(body) => submitted(body).into_draft(),
        Err(error) => {
            tracing::debug!(%error, "post body could not be decoded");
            Err(Error::invalid_request(INVALID_POST_DATA))
        }
    }
}

/// Unwrap a [`Submitted`] body.
pub fn submitted<T>(body: Submitted<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// Body of `POST /login`.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

impl LoginForm {
    /// Validate into login credentials.
    pub fn credentials(&self) -> Result<LoginCredentials, Error> {
        LoginCredentials::try_from_parts(self.username.as_deref(), self.password.as_deref())
            .map_err(|err| match err {
                LoginValidationError::MissingField => Error::invalid_request(err.to_string()),
            })
    }
}

/// Body of `POST /register`.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
    #[schema(example = "secret1")]
    pub confirm_password: Option<String>,
}

impl RegisterForm {
    /// Validate into a registration request.
    pub fn registration(&self) -> Result<Registration, Error> {
        Registration::try_from_parts(
            self.username.as_deref(),
            self.password.as_deref(),
            self.confirm_password.as_deref(),
        )
        .map_err(|err| match err {
            RegistrationError::InvalidUsername(_) => Error::validation(err.to_string()),
            RegistrationError::MissingField
            | RegistrationError::PasswordTooShort { .. }
            | RegistrationError::PasswordMismatch => Error::invalid_request(err.to_string()),
        })
    }
}

/// Title and content of a post.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct PostFields {
    #[schema(example = "Ajanta caves")]
    pub title: Option<String>,
    #[schema(example = "Buddhist rock-cut monuments in Aurangabad district.")]
    pub content: Option<String>,
}

/// Body of `POST /blog` and `PUT /blog/{id}`.
///
/// JSON clients send `{"post": {"title": .., "content": ..}}`; HTML forms
/// send `post[title]` and `post[content]` keys.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct PostPayload {
    pub post: Option<PostFields>,
    #[serde(rename = "post[title]", default, skip_serializing_if = "Option::is_none")]
    pub form_title: Option<String>,
    #[serde(rename = "post[content]", default, skip_serializing_if = "Option::is_none")]
    pub form_content: Option<String>,
}

impl PostPayload {
    /// JSON-style payload wrapping `fields`.
    pub fn new(fields: PostFields) -> Self {
        Self {
            post: Some(fields),
            ..Self::default()
        }
    }

    fn fields(self) -> Option<PostFields> {
        if self.post.is_some() {
            return self.post;
        }
        if self.form_title.is_none() && self.form_content.is_none() {
            return None;
        }
        Some(PostFields {
            title: self.form_title,
            content: self.form_content,
        })
    }

    /// Validate into a post draft.
    pub fn into_draft(self) -> Result<PostDraft, Error> {
        let fields = self
            .fields()
            .ok_or_else(|| Error::invalid_request(INVALID_POST_DATA))?;
        PostDraft::try_from_parts(fields.title.as_deref(), fields.content.as_deref()).map_err(
            |err| match err {
                PostDraftError::MissingTitleOrContent => Error::invalid_request(err.to_string()),
                PostDraftError::TitleTooLong { .. } | PostDraftError::ContentTooLong { .. } => {
                    Error::validation(err.to_string())
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::http::header::ContentType;
    use actix_web::{FromRequest, test as actix_test};
    use rstest::rstest;
    use serde::de::DeserializeOwned;
    use serde_json::json;

    async fn decode_form<T: DeserializeOwned + 'static>(body: &'static str) -> T {
        let (req, mut payload) = actix_test::TestRequest::post()
            .insert_header(ContentType::form_url_encoded())
            .set_payload(body)
            .to_http_parts();
        web::Form::<T>::from_request(&req, &mut payload)
            .await
            .expect("form decodes")
            .into_inner()
    }

    #[rstest]
    #[actix_web::test]
    async fn form_keys_build_a_draft() {
        let payload: PostPayload =
            decode_form("post%5Btitle%5D=Hi&post%5Bcontent%5D=Hello").await;
        let draft = payload.into_draft().expect("valid draft");
        assert_eq!(draft.title(), "Hi");
        assert_eq!(draft.content(), "Hello");
    }

    #[rstest]
    fn nested_json_builds_a_draft() {
        let payload: PostPayload =
            serde_json::from_value(json!({"post": {"title": "Hi", "content": "Hello"}}))
                .expect("json decodes");
        assert_eq!(payload.into_draft().expect("valid draft").title(), "Hi");
    }

    #[rstest]
    #[case(json!({}), "Invalid post data")]
    #[case(json!({"title": "Hi", "content": "Hello"}), "Invalid post data")]
    #[case(json!({"post": {"title": "Hi"}}), "Title and content are required")]
    #[case(json!({"post": {"title": "", "content": "Hello"}}), "Title and content are required")]
    fn incomplete_posts_are_bad_requests(#[case] body: serde_json::Value, #[case] message: &str) {
        let payload: PostPayload = serde_json::from_value(body).expect("json decodes");
        let err = payload.into_draft().expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    fn undecodable_post_bodies_read_as_missing_post_data() {
        let body: PostSubmission = Err(actix_web::error::ErrorBadRequest("Content type error"));
        let err = post_draft(body).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), INVALID_POST_DATA);
    }

    #[rstest]
    fn overlong_titles_are_validation_errors() {
        let payload = PostPayload::new(PostFields {
            title: Some("x".repeat(crate::domain::TITLE_MAX + 1)),
            content: Some("Hello".to_owned()),
        });
        let err = payload.into_draft().expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(err.message().starts_with("Validation Error: "));
    }

    #[rstest]
    #[case(None, Some("abcdef"), Some("abcdef"), "All fields are required")]
    #[case(Some("alice"), Some("abcde"), Some("abcde"), "Password must be at least 6 characters")]
    #[case(Some("alice"), Some("abcdef"), Some("abcdeg"), "Passwords do not match")]
    fn registration_failures_keep_their_messages(
        #[case] username: Option<&str>,
        #[case] password: Option<&str>,
        #[case] confirm: Option<&str>,
        #[case] message: &str,
    ) {
        let form = RegisterForm {
            username: username.map(str::to_owned),
            password: password.map(str::to_owned),
            confirm_password: confirm.map(str::to_owned),
        };
        let err = form.registration().expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[actix_web::test]
    async fn register_form_reads_camel_case_confirmation() {
        let form: RegisterForm =
            decode_form("username=alice&password=abcdef&confirmPassword=abcdef").await;
        assert!(form.registration().is_ok());
    }

    #[rstest]
    fn login_requires_both_fields() {
        let form = LoginForm {
            username: Some("alice".to_owned()),
            password: None,
        };
        let err = form.credentials().expect_err("rejected");
        assert_eq!(err.message(), "Username and password are required");
    }
}
