//! Multipart extractor with improved error handling.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{FromRequest, Multipart as AxumMultipart, Request};
use derive_more::{Deref, DerefMut, From};

use crate::handler::{Error, ErrorKind, Result};

/// Multipart form extractor with improved error handling.
///
/// Wraps [`axum::extract::Multipart`] so that rejections are reported
/// through the crate-wide [`Error`] type. Forms are submitted as
/// `multipart/form-data`; anything else is a `400 Bad Request`.
#[must_use = "requests do nothing unless you use them"]
#[derive(Debug, From, Deref, DerefMut)]
pub struct Multipart(pub AxumMultipart);

impl Multipart {
    /// Returns the inner [`axum::extract::Multipart`] stream.
    #[inline]
    pub fn into_inner(self) -> AxumMultipart {
        self.0
    }
}

impl<S> FromRequest<S> for Multipart
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let multipart = AxumMultipart::from_request(req, state).await?;
        Ok(Self(multipart))
    }
}

impl From<MultipartRejection> for Error<'static> {
    fn from(rejection: MultipartRejection) -> Self {
        ErrorKind::BadRequest
            .with_message("Invalid multipart form data")
            .with_context(rejection.body_text())
    }
}

impl aide::OperationInput for Multipart {
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumMultipart::operation_input(ctx, operation);
    }
}
